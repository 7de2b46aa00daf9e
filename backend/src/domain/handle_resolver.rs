//! Handle resolution service.
//!
//! Implements the [`HandleResolution`] driving port on top of the
//! [`UserDirectory`] driven port: one lookup per call, first record wins.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{
    HandleResolution, UserDirectory, UserDirectoryError, UsernameLookupRequest,
};
use crate::domain::{AccountId, Error, Handle};

/// Resolves handles through a user directory.
pub struct HandleResolver<D: ?Sized> {
    directory: Arc<D>,
}

impl<D: ?Sized> Clone for HandleResolver<D> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<D: ?Sized> HandleResolver<D> {
    /// Create a resolver backed by `directory`.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

impl<D> HandleResolver<D>
where
    D: UserDirectory + ?Sized,
{
    fn map_directory_error(handle: &Handle, err: &UserDirectoryError) -> Error {
        error!(handle = %handle, error = %err, "user directory lookup failed");
        Error::internal(format!("lookup for {handle} failed: {err}"))
    }

    fn no_match(handle: &Handle) -> Error {
        error!(handle = %handle, "user directory returned no records");
        Error::internal(format!("no account found for {handle}"))
    }
}

#[async_trait]
impl<D> HandleResolution for HandleResolver<D>
where
    D: UserDirectory + ?Sized,
{
    async fn resolve_handle(&self, handle: &Handle) -> Result<AccountId, Error> {
        let request = UsernameLookupRequest::id_only(handle.clone());
        let users = self
            .directory
            .lookup_usernames(&request)
            .await
            .map_err(|err| Self::map_directory_error(handle, &err))?;

        let first = users.first().ok_or_else(|| Self::no_match(handle))?;
        debug!(handle = %handle, account_id = %first.id, "handle resolved");
        Ok(first.id)
    }
}
