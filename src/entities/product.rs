use chrono::NaiveDateTime;

use crate::domain::{Product, ProductCreate};
use crate::error::{Result, ShopError};
use crate::store::Entity;

impl Entity for Product {
    type CreatePayload = ProductCreate;
    const KIND: &'static str = "product";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Creates a new Product from creation parameters.
    ///
    /// # Errors
    /// `Validation` if the name is blank. Kind and quantity are already constrained by their types.
    fn from_create(id: String, created_at: NaiveDateTime, params: ProductCreate) -> Result<Self> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(ShopError::validation("product name is required"));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            kind: params.kind,
            quantity: params.quantity,
            created_at,
        })
    }
}
