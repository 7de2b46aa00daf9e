//! Handle lookup endpoint.
//!
//! ```text
//! GET /user/TwitterDev  ->  200 2244994945
//! GET /user/a!          ->  400 (empty body)
//! ```

use actix_web::{get, web};
use tracing::info;

use crate::domain::{AccountId, Error, Handle};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Resolve a handle to its numeric account identifier.
///
/// The handle is validated before any outbound call; invalid handles never
/// reach the directory.
#[utoipa::path(
    get,
    path = "/user/{username}",
    params(
        ("username" = String, Path, description = "Handle of 3-15 letters, digits, or underscores")
    ),
    responses(
        (status = 200, description = "Account identifier", body = u64),
        (status = 400, description = "Handle fails validation"),
        (status = 500, description = "Lookup failed or no account matched")
    ),
    tags = ["users"],
    operation_id = "resolveUser"
)]
#[get("/user/{username}")]
pub async fn resolve_user(
    state: web::Data<HttpState>,
    username: web::Path<String>,
) -> ApiResult<web::Json<AccountId>> {
    let raw = username.into_inner();
    let handle = Handle::parse(raw.as_str()).map_err(|err| {
        info!(username = %raw, reason = %err, "rejected invalid handle");
        Error::invalid_request(err.to_string())
    })?;

    let id = state.resolver.resolve_handle(&handle).await?;
    Ok(web::Json(id))
}
