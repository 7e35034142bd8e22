pub mod id;
pub mod payload;

pub use id::{parse_numeric_id, ResourceId};
pub use payload::Payload;
