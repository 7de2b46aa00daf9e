//! Driven port for the external user directory.
//!
//! The domain owns the lookup request and the record shape; the outbound
//! adapter owns the wire format, authentication and transport.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AccountId, Handle};

/// User fields the directory can be asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    /// The numeric account identifier.
    Id,
}

impl UserField {
    /// Wire name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
        }
    }
}

/// Username-to-account lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernameLookupRequest {
    /// Handles to resolve, in request order.
    pub usernames: Vec<Handle>,
    /// Fields to include in each returned record.
    pub user_fields: Vec<UserField>,
}

impl UsernameLookupRequest {
    /// Lookup for one handle requesting only the account id.
    #[must_use]
    pub fn id_only(handle: Handle) -> Self {
        Self {
            usernames: vec![handle],
            user_fields: vec![UserField::Id],
        }
    }
}

/// One account record returned by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryUser {
    /// Account identifier.
    pub id: AccountId,
}

define_port_error! {
    /// Errors surfaced while calling the user directory.
    pub enum UserDirectoryError {
        /// The request named no usernames, so nothing was sent.
        EmptyLookup =>
            "user directory lookup requires at least one username",
        /// The request never produced a response.
        Transport { message: String } =>
            "user directory transport failed: {message}",
        /// The call exceeded its deadline.
        Timeout { message: String } =>
            "user directory timeout: {message}",
        /// The directory rejected the bearer credential.
        Unauthorized { message: String } =>
            "user directory rejected credentials: {message}",
        /// The directory answered with a non-success status.
        Upstream { status: u16, message: String } =>
            "user directory returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "user directory response decode failed: {message}",
    }
}

/// Port for resolving usernames against the external directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up account records for the requested usernames.
    ///
    /// Unknown usernames are omitted from the result rather than reported as
    /// errors, so an empty vector means nothing matched.
    async fn lookup_usernames(
        &self,
        request: &UsernameLookupRequest,
    ) -> Result<Vec<DirectoryUser>, UserDirectoryError>;
}

/// Fixture directory that resolves every username to the same id.
#[derive(Debug, Clone, Copy)]
pub struct FixtureUserDirectory {
    id: AccountId,
}

impl FixtureUserDirectory {
    /// Create a fixture answering with `id`.
    #[must_use]
    pub const fn new(id: AccountId) -> Self {
        Self { id }
    }
}

impl Default for FixtureUserDirectory {
    fn default() -> Self {
        Self::new(AccountId::new(42))
    }
}

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn lookup_usernames(
        &self,
        request: &UsernameLookupRequest,
    ) -> Result<Vec<DirectoryUser>, UserDirectoryError> {
        Ok(request
            .usernames
            .iter()
            .map(|_| DirectoryUser { id: self.id })
            .collect())
    }
}
