//! Plugin system.
//!
//! Plugins are composable units of functionality installed into an [`App`]
//! with `.with(plugin)`. A plugin may add layers, mount extra routes, or
//! register an endpoint consumer that sees the final endpoint list.

use crate::app::App;

/// A composable unit of functionality that can be installed into an [`App`].
///
/// # Example
///
/// ```ignore
/// use vetted_core::{App, Plugin};
/// use vetted_core::http::{routing::get, Router};
///
/// pub struct Ping;
///
/// impl Plugin for Ping {
///     fn install(self, app: App) -> App {
///         app.with_endpoint_consumer(|_| Router::new().route("/ping", get(|| async { "pong" })))
///     }
/// }
/// ```
pub trait Plugin: Send + 'static {
    /// Install this plugin into the given `App`, returning the modified app.
    fn install(self, app: App) -> App;

    /// The name of this plugin (for diagnostics).
    fn name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}
