//! The slice of `axum` that vetted exposes.
//!
//! Everything that touches the transport goes through these re-exports so
//! downstream crates do not need a direct `axum` dependency.

pub use axum::body::{Body, Bytes};
pub use axum::extract::rejection::RawPathParamsRejection;
pub use axum::extract::{RawPathParams, Request};
pub use axum::http::header::{self, HeaderName, HeaderValue, CONTENT_TYPE};
pub use axum::http::{HeaderMap, Method, StatusCode, Uri};
pub use axum::response::{IntoResponse, Response};
pub use axum::routing::{self, MethodFilter};
pub use axum::{serve, Json, Router};
