//! OpenAPI documentation for the relay's HTTP surface.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary for external tooling.

use utoipa::OpenApi;

/// OpenAPI document for the relay.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Handle relay API",
        description = "Resolves social-network handles to numeric account identifiers.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::resolve_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    tags(
        (name = "users", description = "Handle lookups"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/user/{username}", "/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn lookup_documents_all_outcomes() {
        let doc = ApiDoc::openapi();
        let item = doc
            .paths
            .paths
            .get("/user/{username}")
            .expect("lookup path");
        let operation = item.get.as_ref().expect("GET operation");
        for status in ["200", "400", "500"] {
            assert!(
                operation.responses.responses.contains_key(status),
                "missing {status} response"
            );
        }
        assert_eq!(operation.operation_id.as_deref(), Some("resolveUser"));
    }
}
