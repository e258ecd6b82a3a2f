use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::endpoint::Endpoint;
use crate::error::RegistrationError;
use crate::http::Router;
use crate::plugin::Plugin;
use crate::router::{check_registration, EndpointRouter};

type LayerFn = Box<dyn FnOnce(Router) -> Router + Send>;
type EndpointConsumer = Box<dyn FnOnce(Arc<[Endpoint]>) -> Router + Send>;

/// An application assembled from one or more [`EndpointRouter`]s.
///
/// The endpoint registry is the concatenation of every added router's
/// endpoints, in the order they were added.
///
/// ```ignore
/// App::new()
///     .add_router(authors)?
///     .add_router(health)?
///     .with(Tracing)
///     .with(OpenApiPlugin::new(OpenApiConfig::new("Authors", "1.0.0")))
///     .serve("0.0.0.0:3000")
///     .await?;
/// ```
#[derive(Default)]
pub struct App {
    endpoints: Vec<Endpoint>,
    router: Router,
    layers: Vec<LayerFn>,
    consumers: Vec<EndpointConsumer>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a router's endpoints and routes into this app.
    ///
    /// Fails when one of its endpoints reuses a `(path, method)` pair that an
    /// earlier router already registered, or conflicts with one of its paths.
    pub fn add_router(mut self, router: EndpointRouter) -> Result<Self, RegistrationError> {
        let (endpoints, routes) = router.into_parts();
        for endpoint in &endpoints {
            check_registration(&self.endpoints, &endpoint.path, endpoint.method)?;
        }
        debug!(count = endpoints.len(), "router added");
        self.endpoints.extend(endpoints);
        self.router = std::mem::take(&mut self.router).merge(routes);
        Ok(self)
    }

    /// Every endpoint registered across all added routers.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Install a [`Plugin`] into this app.
    pub fn with<P: Plugin>(self, plugin: P) -> Self {
        debug!(plugin = P::name(), "installing plugin");
        plugin.install(self)
    }

    /// Apply a custom transformation to the final router.
    ///
    /// Transformations run during [`build`](Self::build), in registration
    /// order, after every route and consumer has been merged.
    pub fn with_layer_fn<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Router) -> Router + Send + 'static,
    {
        self.layers.push(Box::new(f));
        self
    }

    /// Mount a router computed from the endpoint registry.
    ///
    /// The closure runs at build time with the frozen registry, so it sees
    /// endpoints from routers added after it was registered.
    pub fn with_endpoint_consumer<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Arc<[Endpoint]>) -> Router + Send + 'static,
    {
        self.consumers.push(Box::new(f));
        self
    }

    /// Assemble the final `axum::Router` from all routes, consumers and layers.
    pub fn build(self) -> Router {
        let endpoints: Arc<[Endpoint]> = self.endpoints.into();
        let mut router = self.router;
        for consumer in self.consumers {
            router = router.merge(consumer(Arc::clone(&endpoints)));
        }
        for layer_fn in self.layers {
            router = layer_fn(router);
        }
        router
    }

    /// Build the application and serve it on `addr` until Ctrl-C or SIGTERM.
    pub async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        let endpoints = self.endpoints.len();
        let app = self.build();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(%addr, endpoints, "vetted server listening");
        crate::http::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("vetted server stopped");
        Ok(())
    }
}

/// Wait for a shutdown signal (Ctrl-C or SIGTERM on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
