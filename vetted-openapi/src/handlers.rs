use std::sync::Arc;

use vetted_core::http::{routing::get, HeaderValue, IntoResponse, Router, CONTENT_TYPE};
use vetted_core::Endpoint;

use crate::builder::{build_spec, OpenApiConfig};

/// A router serving the document for `endpoints` at `config.path`.
///
/// The document is rebuilt on every request.
pub fn openapi_routes(config: OpenApiConfig, endpoints: Arc<[Endpoint]>) -> Router {
    let path = config.path.clone();
    let config = Arc::new(config);
    Router::new().route(
        &path,
        get(move || {
            let config = Arc::clone(&config);
            let endpoints = Arc::clone(&endpoints);
            async move {
                let body = build_spec(&config, &endpoints).to_string();
                tracing::debug!(endpoints = endpoints.len(), "serving openapi document");
                (
                    [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                    body,
                )
                    .into_response()
            }
        }),
    )
}
