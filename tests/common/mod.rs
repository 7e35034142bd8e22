#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use events_api::routes::{self, DEFAULT_BODY_LIMIT};
use events_api::{AppState, Event, Page, Product, Repository, Resource, StoreError};

/// Repository over a map with a monotonic id sequence, like a SERIAL column.
pub struct MemoryRepo<T> {
    rows: Mutex<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T> Default for MemoryRepo<T> {
    fn default() -> Self {
        MemoryRepo {
            rows: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<T: Resource> MemoryRepo<T> {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl<T: Resource> Repository<T> for MemoryRepo<T> {
    async fn fetch_by_id(&self, id: i64) -> Result<T, StoreError> {
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn fetch_page(&self, page: Page) -> Result<Vec<T>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn create(&self, mut entity: T) -> Result<T, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        entity.set_id(id);
        self.rows.lock().unwrap().insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: i64, entity: &T) -> Result<u64, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(row) => {
                *row = entity.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        Ok(self.rows.lock().unwrap().remove(&id).map_or(0, |_| 1))
    }
}

/// Repository whose every call fails like a dead connection pool.
pub struct FailingRepo;

#[async_trait]
impl<T: Resource> Repository<T> for FailingRepo {
    async fn fetch_by_id(&self, _id: i64) -> Result<T, StoreError> {
        Err(StoreError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn fetch_page(&self, _page: Page) -> Result<Vec<T>, StoreError> {
        Err(StoreError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _entity: T) -> Result<T, StoreError> {
        Err(StoreError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _id: i64, _entity: &T) -> Result<u64, StoreError> {
        Err(StoreError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: i64) -> Result<u64, StoreError> {
        Err(StoreError::Db(sqlx::Error::PoolTimedOut))
    }
}

pub struct TestApp {
    pub router: Router,
    pub products: Arc<MemoryRepo<Product>>,
    pub events: Arc<MemoryRepo<Event>>,
}

/// Full router (minus `/ready`) over fresh in-memory repositories.
pub fn build_test_app() -> TestApp {
    let products = Arc::new(MemoryRepo::<Product>::default());
    let events = Arc::new(MemoryRepo::<Event>::default());
    let state = AppState {
        products: products.clone(),
        events: events.clone(),
    };
    TestApp {
        router: routes::build(state, None, DEFAULT_BODY_LIMIT),
        products,
        events,
    }
}

pub fn build_failing_app() -> Router {
    let state = AppState {
        products: Arc::new(FailingRepo),
        events: Arc::new(FailingRepo),
    };
    routes::build(state, None, DEFAULT_BODY_LIMIT)
}

/// Send one request. Bodies go out without a `Content-Type` header.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn put(app: &Router, uri: &str, body: &str) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_as<T: DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
