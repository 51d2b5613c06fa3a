pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod logger;
pub mod model;
pub mod schema;

pub use app::{create_router, AppState};
pub use config::{CliArgs, ServerConfig};
pub use error::{ApiError, Result, ServerError};
pub use model::MarketOutlook;
