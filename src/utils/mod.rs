pub mod filename;
pub mod html;

pub use filename::{has_allowed_extension, secure_filename, timestamped_filename};
pub use html::escape_html;
