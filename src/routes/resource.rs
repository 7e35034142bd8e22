//! Route table for one resource family.
//!
//! `collection` serves the list, `item` accepts creates, and `item/:id` serves
//! read/update/delete. Every `:id` goes through the shared numeric-id extractor.

use crate::handlers::{create, delete, list, read, update, Repo};
use crate::model::Resource;
use axum::{
    routing::{get, post},
    Router,
};

pub fn resource_routes<T: Resource>(repo: Repo<T>, collection: &str, item: &str) -> Router {
    Router::new()
        .route(collection, get(list::<T>))
        .route(item, post(create::<T>))
        .route(
            &format!("{item}/:id"),
            get(read::<T>).put(update::<T>).delete(delete::<T>),
        )
        .with_state(repo)
}
