pub mod client;
pub mod types;

pub use client::{ApiClient, build_api_client};
pub use types::*;
