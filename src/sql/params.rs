//! Typed bind values for parameterized statements.

use chrono::NaiveDateTime;
use sqlx::postgres::PgArguments;
use sqlx::query::{Query, QueryAs};
use sqlx::Postgres;

/// A value bound to a `$n` placeholder. Caller data only ever reaches PostgreSQL this way.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Int(i64),
    Float(f64),
    Text(String),
    /// `TIMESTAMP` (no zone); callers convert to UTC wall-clock first.
    Timestamp(NaiveDateTime),
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::Int(v)
    }
}

impl From<f64> for BindValue {
    fn from(v: f64) -> Self {
        BindValue::Float(v)
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::Text(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(v.to_string())
    }
}

impl From<NaiveDateTime> for BindValue {
    fn from(v: NaiveDateTime) -> Self {
        BindValue::Timestamp(v)
    }
}

/// Bind values in order to a row-mapping query.
pub(crate) fn bind_as<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    params: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for p in params {
        q = match p {
            BindValue::Int(v) => q.bind(*v),
            BindValue::Float(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
            BindValue::Timestamp(v) => q.bind(*v),
        };
    }
    q
}

/// Bind values in order to a statement with no result rows.
pub(crate) fn bind<'q>(
    mut q: Query<'q, Postgres, PgArguments>,
    params: &'q [BindValue],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        q = match p {
            BindValue::Int(v) => q.bind(*v),
            BindValue::Float(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
            BindValue::Timestamp(v) => q.bind(*v),
        };
    }
    q
}
