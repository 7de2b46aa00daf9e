//! Reqwest-backed user directory adapter.
//!
//! This adapter owns transport details only: URL construction, bearer
//! authentication, HTTP status mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, info};

use super::credential::BearerToken;
use super::dto::UsersLookupResponseDto;
use crate::domain::ports::{
    DirectoryUser, UserDirectory, UserDirectoryError, UsernameLookupRequest,
};

/// Production host of the user directory.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com";
const USERS_BY_PATH: &str = "2/users/by";
const DEFAULT_USER_AGENT: &str = "handle-relay/0.1";

/// User directory adapter issuing `GET /2/users/by` against one host.
pub struct TwitterHttpDirectory {
    client: Client,
    base_url: Url,
    token: BearerToken,
}

impl TwitterHttpDirectory {
    /// Build an adapter with an optional whole-request timeout.
    ///
    /// `None` leaves reqwest's defaults in place.
    ///
    /// ```rust,ignore
    /// let directory = TwitterHttpDirectory::new(base_url, token, None)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        token: BearerToken,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
            token,
        })
    }

    /// Host the adapter talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl UserDirectory for TwitterHttpDirectory {
    async fn lookup_usernames(
        &self,
        request: &UsernameLookupRequest,
    ) -> Result<Vec<DirectoryUser>, UserDirectoryError> {
        let url = build_lookup_url(&self.base_url, request)?;
        debug!(url = %url, "querying user directory");
        let response = self
            .client
            .get(url)
            .bearer_auth(self.token.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_users(body.as_ref())
    }
}

fn build_lookup_url(
    base_url: &Url,
    request: &UsernameLookupRequest,
) -> Result<Url, UserDirectoryError> {
    if request.usernames.is_empty() {
        return Err(UserDirectoryError::empty_lookup());
    }
    // `Url::join` replaces the last segment unless the base ends in '/'.
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    let mut url = base
        .join(USERS_BY_PATH)
        .map_err(|error| UserDirectoryError::transport(format!("invalid lookup URL: {error}")))?;

    let usernames = request
        .usernames
        .iter()
        .map(|handle| handle.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let fields = request
        .user_fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(",");
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("usernames", &usernames);
        if !fields.is_empty() {
            query.append_pair("user.fields", &fields);
        }
    }
    Ok(url)
}

fn parse_users(body: &[u8]) -> Result<Vec<DirectoryUser>, UserDirectoryError> {
    let decoded: UsersLookupResponseDto = serde_json::from_slice(body).map_err(|error| {
        UserDirectoryError::decode(format!("invalid users lookup payload: {error}"))
    })?;
    if let Some(summary) = decoded.problem_summary() {
        info!(problems = %summary, "user directory reported partial errors");
    }
    decoded
        .into_domain_users()
        .map_err(UserDirectoryError::decode)
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    if error.is_timeout() {
        UserDirectoryError::timeout(error.to_string())
    } else {
        UserDirectoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserDirectoryError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            UserDirectoryError::unauthorized(message)
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            UserDirectoryError::timeout(message)
        }
        _ if body_preview.is_empty() => UserDirectoryError::upstream(status.as_u16(), "empty body"),
        _ => UserDirectoryError::upstream(status.as_u16(), body_preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
