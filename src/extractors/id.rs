//! Numeric id from the `{id}` path segment, shared by every id-bearing route.

use crate::error::AppError;
use crate::model::Resource;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::marker::PhantomData;

/// Path id for resource `T`. Rejects with `Invalid <slug> ID`.
#[derive(Debug)]
pub struct ResourceId<T>(pub i64, pub PhantomData<fn() -> T>);

impl<T> ResourceId<T> {
    pub fn new(id: i64) -> Self {
        ResourceId(id, PhantomData)
    }
}

/// Accept only a non-empty run of ASCII digits that fits in `i64`.
pub fn parse_numeric_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ResourceId<T>
where
    T: Resource,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::InvalidId(T::SLUG))?;
        parse_numeric_id(&raw)
            .map(ResourceId::new)
            .ok_or(AppError::InvalidId(T::SLUG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_only() {
        assert_eq!(parse_numeric_id("0"), Some(0));
        assert_eq!(parse_numeric_id("42"), Some(42));
        assert_eq!(parse_numeric_id("007"), Some(7));
        assert_eq!(parse_numeric_id(""), None);
        assert_eq!(parse_numeric_id("-1"), None);
        assert_eq!(parse_numeric_id("+1"), None);
        assert_eq!(parse_numeric_id("1a"), None);
        assert_eq!(parse_numeric_id(" 1"), None);
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(parse_numeric_id("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_numeric_id("9223372036854775808"), None);
    }
}
