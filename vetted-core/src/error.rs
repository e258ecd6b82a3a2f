use crate::endpoint::HttpMethod;
use crate::http::{IntoResponse, Json, Response, StatusCode};
use vetted_schema::ValidationReport;

/// Helper to create a JSON error response with a standard `{ "error": message }` body.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, Json(body)).into_response()
}

fn report_response(status: StatusCode, error: &str, report: &ValidationReport) -> Response {
    let body = serde_json::json!({
        "error": error,
        "details": report.errors,
    });
    (status, Json(body)).into_response()
}

/// Errors a route handler may return.
///
/// Anything a handler returns here is sent to the client as-is; it never goes
/// through response-schema validation.
pub enum HttpError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    Validation(ValidationReport),
    Custom {
        status: StatusCode,
        body: serde_json::Value,
    },
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            HttpError::Validation(report) => {
                report_response(StatusCode::BAD_REQUEST, "Validation failed", &report)
            }
            HttpError::Custom { status, body } => (status, Json(body)).into_response(),
            HttpError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
            HttpError::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            HttpError::Internal(msg) => error_response(StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            HttpError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            HttpError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            HttpError::Validation(report) => write!(f, "Validation Error: {} errors", report.len()),
            HttpError::Custom { status, body } => write!(f, "Custom Error ({status}): {body}"),
        }
    }
}

impl std::fmt::Debug for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for HttpError {}

impl From<ValidationReport> for HttpError {
    fn from(report: ValidationReport) -> Self {
        HttpError::Validation(report)
    }
}

/// Generate `From<E> for HttpError` implementations that map error types to
/// a specific `HttpError` variant.
///
/// # Example
///
/// ```ignore
/// vetted_core::map_error! {
///     sqlx::Error => Internal,
///     std::num::ParseIntError => BadRequest,
/// }
/// ```
#[macro_export]
macro_rules! map_error {
    ( $( $err_ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$err_ty> for $crate::HttpError {
                fn from(err: $err_ty) -> Self {
                    $crate::HttpError::$variant(err.to_string())
                }
            }
        )*
    };
}

map_error! {
    std::io::Error => Internal,
    serde_json::Error => Internal,
}

// ── Endpoint pipeline errors ────────────────────────────────────────────────

/// Failures raised while running a request through an endpoint's schemas.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointError {
    /// The client sent data that does not match the declared input schemas.
    InputValidation(ValidationReport),
    /// The handler produced a body that violates the schema declared for its status.
    ResponseValidation { status: u16, report: ValidationReport },
    /// The endpoint declares no schema for the status the handler returned.
    ResponseConfiguration(String),
}

impl EndpointError {
    pub fn is_input_validation(&self) -> bool {
        matches!(self, EndpointError::InputValidation(_))
    }

    pub fn is_response_validation(&self) -> bool {
        matches!(self, EndpointError::ResponseValidation { .. })
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            EndpointError::InputValidation(report) => Some(report),
            EndpointError::ResponseValidation { report, .. } => Some(report),
            EndpointError::ResponseConfiguration(_) => None,
        }
    }
}

impl std::fmt::Display for EndpointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointError::InputValidation(report) => write!(f, "Input validation failed: {report}"),
            EndpointError::ResponseValidation { status, report } => {
                write!(f, "Response validation failed for status {status}: {report}")
            }
            EndpointError::ResponseConfiguration(msg) => write!(f, "Response configuration error: {msg}"),
        }
    }
}

impl std::error::Error for EndpointError {}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        match self {
            EndpointError::InputValidation(report) => HttpError::Validation(report).into_response(),
            EndpointError::ResponseValidation { report, .. } => report_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Response validation failed",
                &report,
            ),
            EndpointError::ResponseConfiguration(msg) => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        }
    }
}

/// Raised at setup time when routes are misconfigured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    Duplicate { method: HttpMethod, path: String },
    /// `path` names a placeholder differently from `existing` at a
    /// position both paths reach through the same segments.
    Conflict { path: String, existing: String },
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationError::Duplicate { method, path } => {
                write!(f, "Endpoint already exists for {method} {path}")
            }
            RegistrationError::Conflict { path, existing } => {
                write!(f, "Path {path} conflicts with {existing}: placeholder names differ")
            }
        }
    }
}

impl std::error::Error for RegistrationError {}
