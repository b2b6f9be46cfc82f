pub mod media;
pub mod pages;
pub mod system;

pub use media::MediaService;
pub use pages::PageService;
pub use system::SystemService;
