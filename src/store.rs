//! Storage gateway: executes parameterized statements against the PostgreSQL pool.

use crate::sql::{params, Statement};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::{FromRow, Postgres, Transaction};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A single-row lookup matched nothing.
    #[error("no rows in result set")]
    NotFound,
    /// A column the row requires was absent on the entity.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

fn log_statement(stmt: &Statement, op: &'static str) {
    debug_assert_eq!(
        stmt.placeholder_count(),
        stmt.params.len(),
        "parameter count mismatch for `{}`",
        stmt.sql
    );
    tracing::debug!(sql = %stmt.sql, params = ?stmt.params, "{op}");
}

/// Façade over the connection pool. Cheap to clone; every call acquires a
/// connection for one statement and releases it on completion.
#[derive(Clone, Debug)]
pub struct Gateway {
    pool: PgPool,
}

impl Gateway {
    pub fn new(pool: PgPool) -> Self {
        Gateway { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run a statement expected to yield 0 or 1 rows. Zero rows is `StoreError::NotFound`.
    pub async fn query_one<T>(&self, stmt: &Statement) -> Result<T, StoreError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        log_statement(stmt, "query_one");
        let row = params::bind_as(sqlx::query_as::<_, T>(stmt.sql), &stmt.params)
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or(StoreError::NotFound)
    }

    /// Run a statement yielding 0..N rows. Zero rows is an empty vec.
    pub async fn query_many<T>(&self, stmt: &Statement) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        log_statement(stmt, "query_many");
        let rows = params::bind_as(sqlx::query_as::<_, T>(stmt.sql), &stmt.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Run a statement with no result rows. Returns rows affected.
    pub async fn exec(&self, stmt: &Statement) -> Result<u64, StoreError> {
        log_statement(stmt, "exec");
        let result = params::bind(sqlx::query(stmt.sql), &stmt.params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Open a transaction. Dropping it without `commit` rolls back.
    pub async fn begin(&self) -> Result<GatewayTx, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(GatewayTx { tx })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    /// Apply the bundled schema migrations (`migrations/`).
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Wait for checked-out connections to return, then close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A transaction scope with the same statement operations as [`Gateway`].
pub struct GatewayTx {
    tx: Transaction<'static, Postgres>,
}

impl GatewayTx {
    pub async fn query_one<T>(&mut self, stmt: &Statement) -> Result<T, StoreError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        log_statement(stmt, "query_one (tx)");
        let row = params::bind_as(sqlx::query_as::<_, T>(stmt.sql), &stmt.params)
            .fetch_optional(&mut *self.tx)
            .await?;
        row.ok_or(StoreError::NotFound)
    }

    pub async fn exec(&mut self, stmt: &Statement) -> Result<u64, StoreError> {
        log_statement(stmt, "exec (tx)");
        let result = params::bind(sqlx::query(stmt.sql), &stmt.params)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }
}
