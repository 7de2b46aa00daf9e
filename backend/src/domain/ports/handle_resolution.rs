//! Driving port for resolving a handle to an account id.
//!
//! The HTTP adapter depends on this trait only, so handlers can be tested
//! with a mock and never see the directory adapter.

use async_trait::async_trait;

use crate::domain::{AccountId, Error, Handle};

/// Use-case port: resolve one validated handle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HandleResolution: Send + Sync {
    /// Resolve `handle` to the directory's account identifier.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::InternalError`] when the directory
    /// call fails or no account matches.
    async fn resolve_handle(&self, handle: &Handle) -> Result<AccountId, Error>;
}
