//! CRUD handlers shared by every resource: list, create, read, update, delete.
//!
//! Each handler parses its inputs, calls the repository once and maps the
//! outcome to a JSON response; the first failure short-circuits to an error body.

use crate::error::AppError;
use crate::extractors::{Payload, ResourceId};
use crate::mapper::Repository;
use crate::model::{Page, Resource};
use crate::response::{created, ok, success};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;
use std::sync::Arc;

pub type Repo<T> = Arc<dyn Repository<T>>;

fn checked<T: Resource>(entity: T) -> Result<T, AppError> {
    entity.validate().map_err(|reason| {
        tracing::debug!(resource = T::SLUG, reason, "payload rejected");
        AppError::InvalidPayload
    })?;
    Ok(entity)
}

/// GET /<slug>s?start=&count=
pub async fn list<T: Resource>(
    State(repo): State<Repo<T>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let page = Page::from_query(
        params.get("count").map(String::as_str),
        params.get("start").map(String::as_str),
    );
    let rows = repo.fetch_page(page).await.map_err(AppError::from_store::<T>)?;
    Ok(ok(rows))
}

/// POST /<slug>
pub async fn create<T: Resource>(
    State(repo): State<Repo<T>>,
    Payload(body): Payload<T>,
) -> Result<impl IntoResponse, AppError> {
    let entity = checked(body)?;
    let created_entity = repo.create(entity).await.map_err(AppError::from_store::<T>)?;
    tracing::info!(resource = T::SLUG, id = created_entity.id(), "created");
    Ok(created(created_entity))
}

/// GET /<slug>/{id}
pub async fn read<T: Resource>(
    State(repo): State<Repo<T>>,
    ResourceId(id, _): ResourceId<T>,
) -> Result<impl IntoResponse, AppError> {
    let entity = repo.fetch_by_id(id).await.map_err(AppError::from_store::<T>)?;
    Ok(ok(entity))
}

/// PUT /<slug>/{id}. The path id wins over any id in the body; the response
/// echoes the entity as sent.
pub async fn update<T: Resource>(
    State(repo): State<Repo<T>>,
    ResourceId(id, _): ResourceId<T>,
    Payload(mut body): Payload<T>,
) -> Result<impl IntoResponse, AppError> {
    body.set_id(id);
    let entity = checked(body)?;
    let affected = repo.update(id, &entity).await.map_err(AppError::from_store::<T>)?;
    if affected == 0 {
        return Err(AppError::NotFound(T::NAME));
    }
    Ok(ok(entity))
}

/// DELETE /<slug>/{id}
pub async fn delete<T: Resource>(
    State(repo): State<Repo<T>>,
    ResourceId(id, _): ResourceId<T>,
) -> Result<impl IntoResponse, AppError> {
    let affected = repo.delete(id).await.map_err(AppError::from_store::<T>)?;
    if affected == 0 {
        return Err(AppError::NotFound(T::NAME));
    }
    tracing::info!(resource = T::SLUG, id, "deleted");
    Ok(success())
}
