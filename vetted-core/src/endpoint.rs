use std::collections::BTreeMap;

use crate::http::MethodFilter;
use vetted_schema::Schema;

/// HTTP methods an endpoint can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Lowercase name, as used for OpenAPI operation keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    pub(crate) fn filter(&self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
            HttpMethod::Put => MethodFilter::PUT,
            HttpMethod::Patch => MethodFilter::PATCH,
            HttpMethod::Delete => MethodFilter::DELETE,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

/// Response schemas keyed by status code.
pub type ResponseSchemas = BTreeMap<u16, Schema>;

/// The schemas declared for one endpoint.
///
/// Every slot is optional. A slot without a schema rejects any data sent for it.
///
/// ```ignore
/// EndpointSchemas::new()
///     .params(object().field("name", string().max(10)))
///     .response(200, object().field("hello", string()))
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointSchemas {
    pub query: Option<Schema>,
    pub body: Option<Schema>,
    pub params: Option<Schema>,
    pub responses: Option<ResponseSchemas>,
}

impl EndpointSchemas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, schema: impl Into<Schema>) -> Self {
        self.query = Some(schema.into());
        self
    }

    pub fn body(mut self, schema: impl Into<Schema>) -> Self {
        self.body = Some(schema.into());
        self
    }

    pub fn params(mut self, schema: impl Into<Schema>) -> Self {
        self.params = Some(schema.into());
        self
    }

    /// Declare the body schema for one response status.
    pub fn response(mut self, status: u16, schema: impl Into<Schema>) -> Self {
        self.responses
            .get_or_insert_with(ResponseSchemas::new)
            .insert(status, schema.into());
        self
    }

    pub fn response_schema(&self, status: u16) -> Option<&Schema> {
        self.responses.as_ref().and_then(|r| r.get(&status))
    }
}

/// A registered route: the `(path, method)` identity plus its schemas.
///
/// `path` keeps the `:name` placeholder syntax it was registered with.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    pub schemas: EndpointSchemas,
}

impl Endpoint {
    pub fn is(&self, path: &str, method: HttpMethod) -> bool {
        self.method == method && self.path == path
    }
}
