//! Built-in plugins for cross-cutting concerns.

use crate::app::App;
use crate::plugin::Plugin;

/// HTTP request/response tracing.
///
/// Initialises the global `tracing` subscriber (via [`init_tracing()`]) and
/// adds a tower-http `TraceLayer` that logs requests and responses.
///
/// [`init_tracing()`]: crate::init_tracing
pub struct Tracing;

impl Plugin for Tracing {
    fn install(self, app: App) -> App {
        crate::layers::init_tracing();
        app.with_layer_fn(|router| router.layer(crate::layers::default_trace()))
    }
}

/// Converts handler panics into JSON 500 responses.
pub struct ErrorHandling;

impl Plugin for ErrorHandling {
    fn install(self, app: App) -> App {
        app.with_layer_fn(|router| router.layer(crate::layers::catch_panic_layer()))
    }
}
