use serde_json::{json, Map, Value};
use vetted_core::{ConfigError, Endpoint, VettedConfig};

use crate::params::{parameter_objects, ParamLocation, NO_DESCRIPTION};
use crate::schema::schema_object;

/// Version string written into every generated document.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// Configuration for the generated OpenAPI document.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    /// Route the document is served at.
    pub path: String,
}

impl OpenApiConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            description: None,
            path: "/openapi.json".to_string(),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Read `openapi.title`, `openapi.version`, `openapi.description` and
    /// `openapi.path`, defaulting to `API`, `0.1.0`, none and `/openapi.json`.
    pub fn from_config(config: &VettedConfig) -> Result<Self, ConfigError> {
        let mut out = Self::new(
            &config.get_optional::<String>("openapi.title")?.unwrap_or_else(|| "API".into()),
            &config.get_optional::<String>("openapi.version")?.unwrap_or_else(|| "0.1.0".into()),
        );
        out.description = config.get_optional("openapi.description")?;
        if let Some(path) = config.get_optional::<String>("openapi.path")? {
            out.path = path;
        }
        Ok(out)
    }
}

/// Build the OpenAPI document for `endpoints`.
///
/// Endpoints sharing a path are merged into one Path Item, keyed by the
/// lowercase method name.
pub fn build_spec(config: &OpenApiConfig, endpoints: &[Endpoint]) -> Value {
    let mut paths: Map<String, Value> = Map::new();

    for endpoint in endpoints {
        let item = paths
            .entry(openapi_path(&endpoint.path))
            .or_insert_with(|| json!({}));
        if let Some(item) = item.as_object_mut() {
            item.insert(endpoint.method.as_str().to_string(), operation(endpoint));
        }
    }

    let mut info: Map<String, Value> = Map::new();
    info.insert("title".into(), json!(config.title));
    info.insert("version".into(), json!(config.version));
    if let Some(ref desc) = config.description {
        info.insert("description".into(), json!(desc));
    }

    json!({
        "openapi": OPENAPI_VERSION,
        "info": info,
        "paths": paths,
    })
}

fn operation(endpoint: &Endpoint) -> Value {
    let schemas = &endpoint.schemas;

    let responses: Map<String, Value> = schemas
        .responses
        .iter()
        .flatten()
        .map(|(status, schema)| {
            let response = json!({
                "description": schema.description().unwrap_or(NO_DESCRIPTION),
                "content": { "application/json": { "schema": schema_object(Some(schema)) } },
            });
            (status.to_string(), response)
        })
        .collect();

    let mut parameters = parameter_objects(schemas.params.as_ref(), ParamLocation::Path);
    parameters.extend(parameter_objects(schemas.query.as_ref(), ParamLocation::Query));

    let mut op: Map<String, Value> = Map::new();
    op.insert("responses".into(), Value::Object(responses));
    if let Some(ref body) = schemas.body {
        op.insert(
            "requestBody".into(),
            json!({
                "description": body.description().unwrap_or(NO_DESCRIPTION),
                "content": { "application/json": { "schema": schema_object(Some(body)) } },
            }),
        );
    }
    op.insert("parameters".into(), Value::Array(parameters));
    Value::Object(op)
}

/// `/hello/:name` becomes `/hello/{name}`.
pub fn openapi_path(path: &str) -> String {
    vetted_core::path::to_brace_syntax(path)
}

/// Generate the document as a JSON string.
///
/// Nothing is cached; every call walks the registry again.
pub fn generate(title: &str, version: &str, endpoints: &[Endpoint]) -> String {
    build_spec(&OpenApiConfig::new(title, version), endpoints).to_string()
}
