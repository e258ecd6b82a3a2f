//! In-process HTTP testing for vetted applications.
//!
//! ```ignore
//! let app = TestApp::from_app(App::new().add_router(router)?);
//! app.get("/hello/world").send().await.assert_ok().assert_json_path("hello", "world");
//! ```

mod app;
mod path;

pub use app::{TestApp, TestRequest, TestResponse};
pub use path::{resolve_path, tokenize_path, PathToken};
