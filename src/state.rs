//! Shared application state for all routes.

use crate::handlers::Repo;
use crate::mapper::{EventMapper, ProductMapper};
use crate::model::{Event, Product};
use crate::store::Gateway;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub products: Repo<Product>,
    pub events: Repo<Event>,
}

impl AppState {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn from_gateway(gateway: Gateway) -> Self {
        AppState {
            products: Arc::new(ProductMapper::new(gateway.clone())),
            events: Arc::new(EventMapper::new(gateway)),
        }
    }
}
