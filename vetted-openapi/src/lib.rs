//! OpenAPI 3.0.3 documents synthesized from registered endpoint schemas.

mod builder;
mod ext;
mod handlers;
pub mod params;
pub mod schema;

pub use builder::{build_spec, generate, openapi_path, OpenApiConfig, OPENAPI_VERSION};
pub use ext::{OpenApiExt, OpenApiPlugin};
pub use handlers::openapi_routes;
pub use params::{parameter_objects, ParamLocation, NO_DESCRIPTION};
pub use schema::{nullable_schema_object, schema_object};
