//! In-memory entity store and the mutation operations that keep it consistent.

mod clock;
mod collection;

pub use clock::*;
pub use collection::*;

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Appointment, AppointmentCreate, Product, ProductCreate, Sale, SaleCreate, SaleDraft};
use crate::error::{Result, ShopError};
use crate::reports::Reports;

/// Verbatim copy of the three collections, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub appointments: Vec<Appointment>,
}

impl StoreSnapshot {
    pub fn reports(&self) -> Reports<'_> {
        Reports::new(&self.products, &self.sales, &self.appointments)
    }
}

/// Owns the products, sales and appointments of one session.
pub struct EntityStore {
    products: Collection<Product>,
    sales: Collection<Sale>,
    appointments: Collection<Appointment>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("products", &self.products.len())
            .field("sales", &self.sales.len())
            .field("appointments", &self.appointments.len())
            .finish()
    }
}

impl EntityStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            products: Collection::new(),
            sales: Collection::new(),
            appointments: Collection::new(),
            clock,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn products(&self) -> &[Product] {
        self.products.as_slice()
    }

    pub fn sales(&self) -> &[Sale] {
        self.sales.as_slice()
    }

    pub fn appointments(&self) -> &[Appointment] {
        self.appointments.as_slice()
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn reports(&self) -> Reports<'_> {
        Reports::new(self.products(), self.sales(), self.appointments())
    }

    pub fn add_product(&mut self, params: ProductCreate) -> Result<Product> {
        let now = self.now();
        self.products.insert(params, now)
    }

    /// Records a sale and takes the sold units out of the product's stock.
    ///
    /// Both effects happen or neither does.
    ///
    /// # Errors
    /// - `Validation` for a zero quantity
    /// - `NotFound` for an unknown product id
    /// - `InsufficientStock` when the quantity exceeds the product's stock
    pub fn record_sale(&mut self, params: SaleCreate) -> Result<Sale> {
        self.sell(params).map(|(sale, _)| sale)
    }

    /// Same as [`record_sale`](Self::record_sale), also returning the product's stock left after the sale.
    pub fn sell(&mut self, params: SaleCreate) -> Result<(Sale, u32)> {
        let SaleCreate { product_id, quantity } = params;
        if quantity == 0 {
            return Err(ShopError::validation("sale quantity must be at least 1"));
        }
        let now = self.now();

        let product = self
            .products
            .get(&product_id)
            .ok_or_else(|| ShopError::not_found(Product::KIND, product_id.as_str()))?;
        if quantity > product.quantity {
            return Err(ShopError::InsufficientStock {
                requested: quantity,
                available: product.quantity,
            });
        }
        let sale = self.sales.build(SaleDraft::snapshot(product, quantity), now)?;

        let remaining = self.products.mutate(&product_id, |p| p.withdraw_stock(quantity))?;
        self.sales.push(sale.clone());
        debug!(sale_id = %sale.id, remaining, "Stock withdrawn for sale");
        Ok((sale, remaining))
    }

    pub fn add_appointment(&mut self, params: AppointmentCreate) -> Result<Appointment> {
        let now = self.now();
        self.appointments.insert(params, now)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            products: self.products().to_vec(),
            sales: self.sales().to_vec(),
            appointments: self.appointments().to_vec(),
        }
    }

    /// Replaces every collection with the snapshot's contents.
    ///
    /// The store is left untouched if any collection is rejected.
    pub fn restore(&mut self, snapshot: StoreSnapshot) -> Result<()> {
        let products = Collection::from_records(snapshot.products)?;
        let sales = Collection::from_records(snapshot.sales)?;
        let appointments = Collection::from_records(snapshot.appointments)?;
        self.products = products;
        self.sales = sales;
        self.appointments = appointments;
        Ok(())
    }
}
