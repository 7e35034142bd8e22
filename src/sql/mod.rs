//! Parameterized statements: fixed SQL text, values as parameters.

mod statement;
pub mod params;
pub use params::BindValue;
pub use statement::Statement;
