//! Statement: fixed SQL text plus its ordered parameters.

use super::params::BindValue;

/// One parameterized statement. The SQL is always a compile-time constant;
/// everything the caller supplies travels in `params`.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub sql: &'static str,
    pub params: Vec<BindValue>,
}

impl Statement {
    pub fn new(sql: &'static str) -> Self {
        Statement {
            sql,
            params: Vec::new(),
        }
    }

    /// Append the next positional parameter (`$1`, `$2`, ...).
    pub fn bind(mut self, value: impl Into<BindValue>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Number of `$n` placeholders in the SQL text (highest index).
    pub(crate) fn placeholder_count(&self) -> usize {
        let bytes = self.sql.as_bytes();
        let mut max = 0usize;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if let Ok(n) = self.sql[start..end].parse::<usize>() {
                    max = max.max(n);
                }
                i = end;
            } else {
                i += 1;
            }
        }
        max
    }
}
