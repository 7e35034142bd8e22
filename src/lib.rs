//! Events API: REST backend for products and events on PostgreSQL.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod mapper;
pub mod model;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;

pub use app::App;
pub use config::AppConfig;
pub use error::{AppError, ConfigError, StartupError};
pub use mapper::{EventMapper, ProductMapper, Repository};
pub use model::{Event, Page, Product, Resource};
pub use response::{ErrorBody, ResultBody};
pub use state::AppState;
pub use store::{Gateway, StoreError};
