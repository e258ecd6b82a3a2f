use vetted_core::{App, Plugin};

use crate::builder::{generate, OpenApiConfig};
use crate::handlers::openapi_routes;

/// Plugin that serves the generated document.
///
/// ```ignore
/// App::new()
///     .add_router(authors)?
///     .with(OpenApiPlugin::new(OpenApiConfig::new("Authors", "1.0.0")))
/// ```
pub struct OpenApiPlugin {
    config: OpenApiConfig,
}

impl OpenApiPlugin {
    pub fn new(config: OpenApiConfig) -> Self {
        Self { config }
    }
}

impl Plugin for OpenApiPlugin {
    fn install(self, app: App) -> App {
        let config = self.config;
        app.with_endpoint_consumer(move |endpoints| openapi_routes(config, endpoints))
    }
}

/// Document generation straight from an [`App`].
pub trait OpenApiExt {
    /// The OpenAPI 3.0.3 document for every endpoint registered so far.
    fn openapi3(&self, title: &str, version: &str) -> String;
}

impl OpenApiExt for App {
    fn openapi3(&self, title: &str, version: &str) -> String {
        generate(title, version, self.endpoints())
    }
}
