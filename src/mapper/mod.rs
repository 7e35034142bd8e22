//! Entity mappers: translate between wire records and storage rows.
//!
//! Handlers only see [`Repository`]; the PostgreSQL mappers implement it over
//! the [`Gateway`](crate::store::Gateway).

pub mod event;
pub mod product;

pub use event::EventMapper;
pub use product::ProductMapper;

use crate::model::{Page, Resource};
use crate::store::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait Repository<T: Resource>: Send + Sync {
    /// Load one entity. No row is `StoreError::NotFound`.
    async fn fetch_by_id(&self, id: i64) -> Result<T, StoreError>;

    /// Load a window of entities; past the end yields an empty vec.
    async fn fetch_page(&self, page: Page) -> Result<Vec<T>, StoreError>;

    /// Insert and return the entity carrying its storage-assigned id.
    async fn create(&self, entity: T) -> Result<T, StoreError>;

    /// Overwrite the persisted fields of `id`. Returns rows affected.
    async fn update(&self, id: i64, entity: &T) -> Result<u64, StoreError>;

    /// Remove `id`. Returns rows affected.
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;
}
