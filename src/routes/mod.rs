pub mod api;

pub mod media;

pub mod pages;

pub use api::configure_api_routes;
pub use media::configure_media_routes;
pub use pages::configure_page_routes;
