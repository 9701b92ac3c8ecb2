pub mod image_client;
pub mod traits;
pub mod upstream_client;

pub use image_client::ImageClient;
pub use traits::ImageGenerator;
pub use upstream_client::UpstreamClient;

/// Route the proxy listens on, relative to its base URL.
pub const PROXY_PATH: &str = "/api/seedream";
/// Provider route the proxy forwards to.
pub const UPSTREAM_PATH: &str = "/api/v3/images/generations";
