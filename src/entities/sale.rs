use chrono::NaiveDateTime;

use crate::domain::{Sale, SaleDraft};
use crate::error::{Result, ShopError};
use crate::store::Entity;

impl Entity for Sale {
    type CreatePayload = SaleDraft;
    const KIND: &'static str = "sale";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    fn from_create(id: String, created_at: NaiveDateTime, draft: SaleDraft) -> Result<Self> {
        if draft.quantity == 0 {
            return Err(ShopError::validation("sale quantity must be at least 1"));
        }
        Ok(Self {
            id,
            product_id: draft.product_id,
            product_name: draft.product_name,
            quantity: draft.quantity,
            created_at,
        })
    }
}
