use super::Resource;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Stored as `NUMERIC(10,2)`.
    pub price: f64,
}

impl Resource for Product {
    const NAME: &'static str = "Product";
    const SLUG: &'static str = "product";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if !self.price.is_finite() {
            return Err("price must be a finite number");
        }
        Ok(())
    }
}
