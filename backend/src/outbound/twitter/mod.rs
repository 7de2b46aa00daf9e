//! Twitter v2 user directory adapter.

mod credential;
mod dto;
mod http_directory;

pub use credential::BearerToken;
pub use http_directory::{DEFAULT_API_BASE_URL, TwitterHttpDirectory};
