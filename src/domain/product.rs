use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{Result, ShopError};

/// Closed set of product lines carried by the shop.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductKind {
    /// Prescription frames.
    Glasses,
    Sunglasses,
    /// Contact lenses.
    Lenses,
}

/// Represents a product line in the inventory.
///
/// Everything but `quantity` is fixed at creation; `quantity` only moves when a sale is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProductKind,
    pub quantity: u32,
    pub created_at: NaiveDateTime,
}

impl Product {
    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.quantity <= threshold
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Removes `units` from stock and returns what is left.
    ///
    /// # Errors
    /// `InsufficientStock` if `units` exceeds the current quantity; stock is unchanged.
    pub fn withdraw_stock(&mut self, units: u32) -> Result<u32> {
        if units > self.quantity {
            return Err(ShopError::InsufficientStock {
                requested: units,
                available: self.quantity,
            });
        }
        self.quantity -= units;
        Ok(self.quantity)
    }
}

/// Payload for registering a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub name: String,
    pub kind: ProductKind,
    pub quantity: u32,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, kind: ProductKind, quantity: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            quantity,
        }
    }

    /// Builds a payload from raw form fields.
    ///
    /// # Errors
    /// `Validation` when a field is blank, the type is not one of
    /// `glasses`, `sunglasses` or `lenses`, or the quantity is not a non-negative integer.
    pub fn parse(name: &str, kind: &str, quantity: &str) -> Result<Self> {
        let kind = kind.trim();
        let quantity = quantity.trim();
        if name.trim().is_empty() || kind.is_empty() || quantity.is_empty() {
            return Err(ShopError::validation("name, type and quantity are required"));
        }
        let kind = ProductKind::from_str(kind)
            .map_err(|_| ShopError::validation(format!("unknown product type: {}", kind)))?;
        let quantity = quantity.parse::<u32>().map_err(|_| {
            ShopError::validation(format!("quantity must be a non-negative integer, got {}", quantity))
        })?;
        Ok(Self::new(name, kind, quantity))
    }
}
