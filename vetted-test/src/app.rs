use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue, IntoHeaderName, CONTENT_TYPE};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tower::util::ServiceExt;
use vetted_core::http::{Body, Router};
use vetted_core::App;

use crate::path::resolve_path;

/// Drives an application in-process through `tower::ServiceExt::oneshot`.
///
/// No port is bound; each request clones the router.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Build `app` and wrap the resulting router.
    pub fn from_app(app: App) -> Self {
        Self::new(app.build())
    }

    pub fn get(&self, path: &str) -> TestRequest<'_> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> TestRequest<'_> {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> TestRequest<'_> {
        self.request(Method::PUT, path)
    }

    pub fn patch(&self, path: &str) -> TestRequest<'_> {
        self.request(Method::PATCH, path)
    }

    pub fn delete(&self, path: &str) -> TestRequest<'_> {
        self.request(Method::DELETE, path)
    }

    pub fn request(&self, method: Method, path: &str) -> TestRequest<'_> {
        TestRequest {
            app: self,
            method,
            path: path.to_string(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .unwrap_or_else(|e| panic!("could not read response body: {e}"))
            .to_bytes();
        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

/// One request under construction. Nothing is sent until [`send`](Self::send).
pub struct TestRequest<'a> {
    app: &'a TestApp,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestRequest<'_> {
    /// Append a query pair; pairs are form-urlencoded onto the path on send.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, name: impl IntoHeaderName, value: impl AsRef<str>) -> Self {
        let value = HeaderValue::from_str(value.as_ref())
            .unwrap_or_else(|e| panic!("invalid header value {:?}: {e}", value.as_ref()));
        self.headers.insert(name, value);
        self
    }

    /// Serialize `body` as the JSON payload and mark it `application/json`.
    pub fn json(mut self, body: &impl Serialize) -> Self {
        self.body = serde_json::to_vec(body)
            .unwrap_or_else(|e| panic!("request body is not serializable: {e}"));
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self
    }

    /// Raw payload, sent as-is.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    fn target(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let pairs = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        let joiner = if self.path.contains('?') { '&' } else { '?' };
        format!("{}{joiner}{pairs}", self.path)
    }

    pub async fn send(self) -> TestResponse {
        let uri = self.target();
        let mut request = Request::new(Body::from(self.body));
        *request.method_mut() = self.method;
        *request.uri_mut() = uri
            .parse()
            .unwrap_or_else(|e| panic!("invalid request target {uri:?}: {e}"));
        *request.headers_mut() = self.headers;
        self.app.dispatch(request).await
    }
}

/// The response to a [`TestRequest`], with chainable assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

macro_rules! status_assertions {
    ($($name:ident => $code:ident),* $(,)?) => {
        $(
            pub fn $name(self) -> Self {
                self.assert_status(StatusCode::$code)
            }
        )*
    };
}

impl TestResponse {
    status_assertions! {
        assert_ok => OK,
        assert_created => CREATED,
        assert_bad_request => BAD_REQUEST,
        assert_not_found => NOT_FOUND,
        assert_method_not_allowed => METHOD_NOT_ALLOWED,
        assert_internal_error => INTERNAL_SERVER_ERROR,
    }

    pub fn assert_status(self, expected: StatusCode) -> Self {
        if self.status != expected {
            panic!("Expected {expected}, got {}\nBody: {}", self.status, self.text());
        }
        self
    }

    /// Compare the whole body with `expected`.
    pub fn assert_json(self, expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        let actual: Value = self.json();
        assert_eq!(actual, expected, "response body differs\n  Expected: {expected}\n  Actual:   {actual}");
        self
    }

    /// Compare the value found at `path` with `expected`.
    ///
    /// ```ignore
    /// resp.assert_json_path("details[0].field", "body.age")
    ///     .assert_json_path("details.len()", 1);
    /// ```
    pub fn assert_json_path(self, path: &str, expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        let root: Value = self.json();
        let found = resolve_path(&root, path);
        assert_eq!(
            found, expected,
            "value at \"{path}\" differs\n  Expected: {expected}\n  Actual:   {found}\n  Body: {root}",
        );
        self
    }

    /// Expect a `Validation failed` report with at least one issue on `field`.
    pub fn assert_validation_error(self, field: &str) -> Self {
        let root: Value = self.json();
        assert_eq!(root["error"], "Validation failed", "not a validation error: {root}");
        let mentioned = root["details"]
            .as_array()
            .is_some_and(|details| details.iter().any(|d| d["field"] == field));
        assert!(mentioned, "no validation error for \"{field}\"\n  Body: {root}");
        self
    }

    /// Deserialize the value at `path`.
    pub fn json_path<T: DeserializeOwned>(&self, path: &str) -> T {
        let found = resolve_path(&self.json(), path);
        serde_json::from_value(found.clone())
            .unwrap_or_else(|e| panic!("value at \"{path}\" has the wrong shape: {e}\n  Value: {found}"))
    }

    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        let name: HeaderName = name.as_ref().parse().ok()?;
        self.headers.get(name)?.to_str().ok()
    }

    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("response body is not JSON: {e}\nBody: {}", self.text()))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
