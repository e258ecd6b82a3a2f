//! vetted: schema-validated HTTP endpoints over axum.
//!
//! Each endpoint declares schemas for its query, path parameters, body and
//! responses. Requests are checked against them before the handler runs,
//! responses are checked after, and the same schemas produce an OpenAPI
//! 3.0.3 document.
//!
//! ```ignore
//! use vetted::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature   | Default | Crate            |
//! |-----------|---------|------------------|
//! | `openapi` | **yes** | `vetted-openapi` |

pub use vetted_core::*;

pub use vetted_schema;

#[cfg(feature = "openapi")]
pub use vetted_openapi;

pub mod prelude {
    //! Everything needed to declare, document and serve endpoints.

    pub use vetted_core::prelude::*;

    #[cfg(feature = "openapi")]
    pub use vetted_openapi::{OpenApiConfig, OpenApiExt, OpenApiPlugin};
}
