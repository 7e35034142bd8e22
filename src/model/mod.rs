//! Wire types for the exposed resources.

pub mod event;
pub mod page;
pub mod product;

pub use event::{Event, Speaker, Sponsor, Talk, Venue};
pub use page::Page;
pub use product::Product;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A storage-backed entity reachable at `/<slug>` and `/<slug>/{id}`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Display name used in error messages, e.g. `Event not found`.
    const NAME: &'static str;
    /// Lowercase form used in paths and `Invalid event ID`.
    const SLUG: &'static str;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// Check fields the storage layer requires. `Err` carries a short reason for logs.
    fn validate(&self) -> Result<(), &'static str>;
}
