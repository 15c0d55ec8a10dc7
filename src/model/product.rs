/// A product record as served by the remote catalog.
///
/// # Decoding
/// Strict like [`User`](crate::model::User): absent or mistyped fields fail
/// the load.
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Server-assigned identifier
    /// * `name` - Product name
    /// * `price` - Product price
    pub fn new(id: u64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}
