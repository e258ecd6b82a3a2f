pub mod app;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod layers;
pub mod path;
pub mod plugin;
pub mod plugins;
pub mod prelude;
pub mod router;
pub mod validator;

pub use app::App;
pub use config::{ConfigError, ConfigValue, FromConfigValue, ServerConfig, VettedConfig};
pub use endpoint::{Endpoint, EndpointSchemas, HttpMethod, ResponseSchemas};
pub use error::{error_response, EndpointError, HttpError, RegistrationError};
pub use layers::{catch_panic_layer, default_trace, init_tracing};
pub use plugin::Plugin;
pub use router::{EndpointRouter, HandlerResult, Reply};
pub use validator::{EndpointValidator, Input, RawInput};

pub use vetted_schema;
