//! # modelize-http
//!
//! JSON REST surface over modelize models. Model failures are mapped to
//! transport statuses here and nowhere else: rejected records become 422,
//! missing records 404, storage and configuration failures 500.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{AppConfig, AppConfigTrait, ConfigError, LogFormat, LoggingConfig, ServerConfig};
pub use error::{HttpError, HttpResult};
pub use logging::init_logging;
pub use routes::router;
pub use server::Server;
pub use state::AppState;
