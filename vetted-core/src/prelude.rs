//! Everything needed to declare and serve endpoints, with a single `use`.
//!
//! ```ignore
//! use vetted_core::prelude::*;
//!
//! let mut router = EndpointRouter::new();
//! router.get("/", EndpointSchemas::new().response(200, string()), |_| async {
//!     Ok((200, json!("healthy")))
//! })?;
//! ```

pub use crate::app::App;
pub use crate::config::{ServerConfig, VettedConfig};
pub use crate::endpoint::{EndpointSchemas, HttpMethod};
pub use crate::error::{EndpointError, HttpError, RegistrationError};
pub use crate::plugin::Plugin;
pub use crate::plugins::{ErrorHandling, Tracing};
pub use crate::router::{EndpointRouter, HandlerResult};
pub use crate::validator::Input;

pub use vetted_schema::{
    any, array, boolean, enumeration, number, object, string, tuple, Schema, SchemaExt,
};

pub use serde_json::json;
