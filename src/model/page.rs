//! Page window for list endpoints.

/// Largest page a client may ask for; also the size used when `count` is unusable.
pub const MAX_PAGE_SIZE: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    /// Build a window from raw `count` / `start` query values. Unparsable or
    /// out-of-range `count` becomes `MAX_PAGE_SIZE`; `start` is floored at 0.
    pub fn from_query(count: Option<&str>, start: Option<&str>) -> Self {
        let count = count.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0);
        let start = start.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0);
        let limit = if (1..=MAX_PAGE_SIZE).contains(&count) {
            count
        } else {
            MAX_PAGE_SIZE
        };
        Page {
            offset: start.max(0),
            limit,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page {
            offset: 0,
            limit: MAX_PAGE_SIZE,
        }
    }
}
