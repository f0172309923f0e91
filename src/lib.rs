//! # Optica Store
//!
//! In-memory inventory, sales and appointment store for an optical shop, with the
//! reports its front desk screens are built from.
//!
//! - **Records** - [`Product`](domain::Product), [`Sale`](domain::Sale) and
//!   [`Appointment`](domain::Appointment), held in insertion order by the [`EntityStore`](store::EntityStore)
//! - **Mutations** - `add_product`, `record_sale` and `add_appointment`; a sale and its stock
//!   withdrawal are applied together or not at all
//! - **Reports** - pure queries over a [`StoreSnapshot`](store::StoreSnapshot) through [`Reports`](reports::Reports)
//! - **Actor shell** - [`ShopSystem`](app_system::ShopSystem) runs the store behind a
//!   [`ShopClient`](clients::ShopClient) handle and can persist it as a JSON snapshot
//!
//! ## Example Usage
//!
//! ```no_run
//! # use optica_store::prelude::*;
//! # async fn demo() -> Result<(), ShopError> {
//! let system = ShopSystem::new(ShopConfig::default());
//!
//! let frames = system
//!     .client
//!     .add_product(ProductCreate::new("Ray-Ban Classic", ProductKind::Sunglasses, 10))
//!     .await?;
//! system.client.record_sale(SaleCreate::new(&frames.id, 7)).await?;
//!
//! let snapshot = system.client.snapshot().await?;
//! assert_eq!(snapshot.reports().total_stock(), 3);
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actors;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
mod entities;
pub mod error;
pub mod messages;
pub mod persistence;
pub mod reports;
pub mod store;

#[cfg(test)]
mod mock_framework;

pub mod prelude {
    pub use crate::app_system::{setup_tracing, ShopSystem};
    pub use crate::clients::ShopClient;
    pub use crate::config::ShopConfig;
    pub use crate::domain::*;
    pub use crate::error::{Result, ShopError};
    pub use crate::messages::StoreEvent;
    pub use crate::persistence::{JsonFileRepository, SnapshotRepository};
    pub use crate::reports::Reports;
    pub use crate::store::{Clock, EntityStore, ManualClock, StoreSnapshot, SystemClock};
}
