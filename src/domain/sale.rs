use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::Product;
use crate::error::{Result, ShopError};

/// A recorded sale.
///
/// `product_name` is copied from the product when the sale is recorded and never re-derived,
/// so the sale keeps its label even if the product goes away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub created_at: NaiveDateTime,
}

/// Payload for recording a sale, as entered by the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleCreate {
    pub product_id: String,
    pub quantity: u32,
}

impl SaleCreate {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }

    /// Builds a payload from raw form fields.
    pub fn parse(product_id: &str, quantity: &str) -> Result<Self> {
        let product_id = product_id.trim();
        let quantity = quantity.trim();
        if product_id.is_empty() || quantity.is_empty() {
            return Err(ShopError::validation("product and quantity are required"));
        }
        let quantity = quantity
            .parse::<u32>()
            .map_err(|_| ShopError::validation(format!("quantity must be a positive integer, got {}", quantity)))?;
        Ok(Self::new(product_id, quantity))
    }
}

/// Sale payload with the product name captured at sale time.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
}

impl SaleDraft {
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
        }
    }
}
