use std::future::Future;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error, warn};
use vetted_schema::{IssueCode, ValidationReport};

use crate::endpoint::{Endpoint, EndpointSchemas, HttpMethod};
use crate::error::{EndpointError, HttpError, RegistrationError};
use crate::http::{
    routing, Bytes, HeaderValue, IntoResponse, RawPathParams, RawPathParamsRejection, Response,
    Router, StatusCode, Uri, CONTENT_TYPE,
};
use crate::path::{placeholders_conflict, to_brace_syntax};
use crate::validator::{EndpointValidator, Input, RawInput};

/// A handler's answer: the status code and the JSON body to send.
pub type Reply = (u16, Value);

/// What endpoint handlers return.
pub type HandlerResult = Result<Reply, HttpError>;

/// Registry of schema-validated endpoints, bound to an axum [`Router`].
///
/// ```ignore
/// let mut router = EndpointRouter::new();
/// router.endpoint(
///     "/hello/:name",
///     HttpMethod::Get,
///     EndpointSchemas::new()
///         .params(object().field("name", string().max(10)))
///         .response(200, object().field("hello", string())),
///     |input: Input| async move {
///         Ok((200, json!({ "hello": input.param("name") })))
///     },
/// )?;
/// ```
#[derive(Default)]
pub struct EndpointRouter {
    endpoints: Vec<Endpoint>,
    router: Router,
}

impl EndpointRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every endpoint registered so far, in registration order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn contains(&self, path: &str, method: HttpMethod) -> bool {
        self.endpoints.iter().any(|e| e.is(path, method))
    }

    /// Register an endpoint and bind its handler.
    ///
    /// Fails without touching the registry when `(path, method)` is already taken.
    pub fn endpoint<H, Fut>(
        &mut self,
        path: &str,
        method: HttpMethod,
        schemas: EndpointSchemas,
        handler: H,
    ) -> Result<&mut Self, RegistrationError>
    where
        H: Fn(Input) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        check_registration(&self.endpoints, path, method)?;

        let validator = Arc::new(EndpointValidator::new(schemas.clone()));
        let handler = Arc::new(handler);
        let method_router = routing::on(
            method.filter(),
            move |params: Result<RawPathParams, RawPathParamsRejection>, uri: Uri, body: Bytes| {
                let validator = Arc::clone(&validator);
                let handler = Arc::clone(&handler);
                async move {
                    match extract_input(params, &uri, &body) {
                        Ok(raw) => dispatch(&validator, handler.as_ref(), raw).await,
                        Err(err) => {
                            debug!(error = %err, "rejected undecodable request");
                            err.into_response()
                        }
                    }
                }
            },
        );

        let router = std::mem::take(&mut self.router);
        self.router = router.route(&to_brace_syntax(path), method_router);
        self.endpoints.push(Endpoint {
            path: path.to_string(),
            method,
            schemas,
        });
        debug!(%method, path, "endpoint registered");
        Ok(self)
    }

    pub fn get<H, Fut>(&mut self, path: &str, schemas: EndpointSchemas, handler: H) -> Result<&mut Self, RegistrationError>
    where
        H: Fn(Input) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.endpoint(path, HttpMethod::Get, schemas, handler)
    }

    pub fn post<H, Fut>(&mut self, path: &str, schemas: EndpointSchemas, handler: H) -> Result<&mut Self, RegistrationError>
    where
        H: Fn(Input) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.endpoint(path, HttpMethod::Post, schemas, handler)
    }

    pub fn put<H, Fut>(&mut self, path: &str, schemas: EndpointSchemas, handler: H) -> Result<&mut Self, RegistrationError>
    where
        H: Fn(Input) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.endpoint(path, HttpMethod::Put, schemas, handler)
    }

    pub fn patch<H, Fut>(&mut self, path: &str, schemas: EndpointSchemas, handler: H) -> Result<&mut Self, RegistrationError>
    where
        H: Fn(Input) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.endpoint(path, HttpMethod::Patch, schemas, handler)
    }

    pub fn delete<H, Fut>(&mut self, path: &str, schemas: EndpointSchemas, handler: H) -> Result<&mut Self, RegistrationError>
    where
        H: Fn(Input) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.endpoint(path, HttpMethod::Delete, schemas, handler)
    }

    /// Split into the endpoint records and the bound axum router.
    pub fn into_parts(self) -> (Vec<Endpoint>, Router) {
        (self.endpoints, self.router)
    }

    /// The bound axum router, without the endpoint records.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Whether `path` and `method` can join `endpoints`.
///
/// Fails on a taken `(path, method)` pair, and on a path whose placeholder
/// names disagree with a registered path sharing its prefix.
pub(crate) fn check_registration(
    endpoints: &[Endpoint],
    path: &str,
    method: HttpMethod,
) -> Result<(), RegistrationError> {
    let route = to_brace_syntax(path);
    if endpoints
        .iter()
        .any(|e| e.method == method && to_brace_syntax(&e.path) == route)
    {
        return Err(RegistrationError::Duplicate {
            method,
            path: path.to_string(),
        });
    }
    if let Some(existing) = endpoints
        .iter()
        .find(|e| placeholders_conflict(&to_brace_syntax(&e.path), &route))
    {
        return Err(RegistrationError::Conflict {
            path: path.to_string(),
            existing: existing.path.clone(),
        });
    }
    Ok(())
}

/// Pull query, body and path parameters out of the request.
///
/// An empty body is "no data". A body that is not valid JSON, or a path
/// segment that is not valid UTF-8, is reported as an input error.
fn extract_input(
    params: Result<RawPathParams, RawPathParamsRejection>,
    uri: &Uri,
    body: &Bytes,
) -> Result<RawInput, EndpointError> {
    let query = uri.query().map(|q| {
        let map: Map<String, Value> = form_urlencoded::parse(q.as_bytes())
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect();
        Value::Object(map)
    });

    let params = match params {
        Ok(params) => {
            let map: Map<String, Value> = params
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect();
            Some(Value::Object(map))
        }
        Err(RawPathParamsRejection::MissingPathParams(_)) => None,
        Err(rejection) => {
            return Err(EndpointError::InputValidation(ValidationReport::single(
                "params",
                IssueCode::InvalidType,
                format!("Path parameters could not be decoded: {}", rejection.body_text()),
            )))
        }
    };

    let body = if body.is_empty() {
        None
    } else {
        let value = serde_json::from_slice::<Value>(body).map_err(|e| {
            EndpointError::InputValidation(ValidationReport::single(
                "body",
                IssueCode::InvalidJson,
                format!("Request body is not valid JSON: {e}"),
            ))
        })?;
        Some(value)
    };

    Ok(RawInput {
        query,
        body,
        params,
    })
}

/// Run one request through validation, the handler, and response validation.
async fn dispatch<H, Fut>(validator: &EndpointValidator, handler: &H, raw: RawInput) -> Response
where
    H: Fn(Input) -> Fut,
    Fut: Future<Output = HandlerResult>,
{
    let input = match validator.validate_input(raw) {
        Ok(input) => input,
        Err(err) => {
            debug!(error = %err, "rejected request input");
            return err.into_response();
        }
    };

    let (status, body) = match handler(input).await {
        Ok(reply) => reply,
        Err(err) => return err.into_response(),
    };

    match validator.validate_response(status, &body) {
        Ok(validated) => json_response(status, &validated),
        Err(EndpointError::ResponseValidation { status, report }) if !is_success(status) => {
            warn!(
                status,
                %report,
                "error response does not match its declared schema, sending it unchanged"
            );
            json_response(status, &body)
        }
        Err(err) => {
            error!(status, error = %err, "handler response rejected");
            err.into_response()
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn json_response(status: u16, body: &Value) -> Response {
    let Ok(status_code) = StatusCode::from_u16(status) else {
        error!(status, "handler returned an invalid status code");
        return EndpointError::ResponseConfiguration(format!("Invalid status code {status}"))
            .into_response();
    };
    (
        status_code,
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body.to_string(),
    )
        .into_response()
}
