//! HTTP inbound adapter exposing the relay endpoint and probes.

pub mod error;
pub mod health;
pub mod state;
pub mod users;

pub use error::ApiResult;
