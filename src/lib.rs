pub mod cache;
pub mod client;
pub mod environment;
pub mod error;
pub mod fetch;
pub mod images;
pub mod logging;
pub mod models;

pub const TARGET_WEB_REQUEST: &str = "web_request";

pub use cache::ResponseCache;
pub use client::NewsApiClient;
pub use environment::ApiConfig;
pub use error::ApiError;
