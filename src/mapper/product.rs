//! Product rows in `products`.

use super::Repository;
use crate::model::{Page, Product};
use crate::sql::Statement;
use crate::store::{Gateway, StoreError};
use async_trait::async_trait;

// price is NUMERIC(10,2); read it back as float8 for the wire.
const SELECT_BY_ID: &str = "SELECT name, price::float8 FROM products WHERE id = $1";
const SELECT_PAGE: &str =
    "SELECT id, name, price::float8 FROM products ORDER BY id LIMIT $1 OFFSET $2";
const INSERT: &str = "INSERT INTO products (name, price) VALUES ($1, $2::numeric) RETURNING id";
const UPDATE: &str = "UPDATE products SET name = $1, price = $2::numeric WHERE id = $3";
const DELETE: &str = "DELETE FROM products WHERE id = $1";

pub struct ProductMapper {
    gateway: Gateway,
}

impl ProductMapper {
    pub fn new(gateway: Gateway) -> Self {
        ProductMapper { gateway }
    }
}

#[async_trait]
impl Repository<Product> for ProductMapper {
    async fn fetch_by_id(&self, id: i64) -> Result<Product, StoreError> {
        let (name, price): (String, f64) = self
            .gateway
            .query_one(&Statement::new(SELECT_BY_ID).bind(id))
            .await?;
        Ok(Product { id, name, price })
    }

    async fn fetch_page(&self, page: Page) -> Result<Vec<Product>, StoreError> {
        let stmt = Statement::new(SELECT_PAGE).bind(page.limit).bind(page.offset);
        let rows: Vec<(i64, String, f64)> = self.gateway.query_many(&stmt).await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, price)| Product { id, name, price })
            .collect())
    }

    async fn create(&self, mut product: Product) -> Result<Product, StoreError> {
        let stmt = Statement::new(INSERT)
            .bind(product.name.as_str())
            .bind(product.price);
        let (id,): (i64,) = self.gateway.query_one(&stmt).await?;
        product.id = id;
        Ok(product)
    }

    async fn update(&self, id: i64, product: &Product) -> Result<u64, StoreError> {
        let stmt = Statement::new(UPDATE)
            .bind(product.name.as_str())
            .bind(product.price)
            .bind(id);
        self.gateway.exec(&stmt).await
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        self.gateway.exec(&Statement::new(DELETE).bind(id)).await
    }
}
