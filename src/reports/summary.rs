use chrono::NaiveDateTime;
use serde::Serialize;

use super::{units_sold, ProductSales, Reports};
use crate::config::ShopConfig;
use crate::domain::{Appointment, Product, Sale};

/// Inventory overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub product_count: usize,
    pub total_stock: u64,
    pub low_stock: Vec<Product>,
    pub last_update: Option<NaiveDateTime>,
}

/// Sales overview for the moment the report was built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub total_units: u64,
    pub units_today: u64,
    pub units_recent: u64,
    pub most_sold: Option<ProductSales>,
    pub last_sale: Option<Sale>,
}

/// Appointment overview for the moment the report was built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentReport {
    pub upcoming: Vec<Appointment>,
    pub today_count: usize,
    pub window_count: usize,
    pub last_booked: Option<Appointment>,
}

impl Reports<'_> {
    pub fn stock_report(&self, config: &ShopConfig) -> StockReport {
        StockReport {
            product_count: self.products.len(),
            total_stock: self.total_stock(),
            low_stock: self
                .low_stock_products(config.low_stock_threshold)
                .into_iter()
                .cloned()
                .collect(),
            last_update: self.last_stock_update().map(|p| p.created_at),
        }
    }

    pub fn sales_report(&self, now: NaiveDateTime, config: &ShopConfig) -> SalesReport {
        SalesReport {
            total_units: self.total_sales_units(),
            units_today: units_sold(self.sales_on(now.date())),
            units_recent: units_sold(self.sales_since(config.recent_sales_days, now)),
            most_sold: self.most_sold_product(),
            last_sale: self.last_sale().cloned(),
        }
    }

    pub fn appointment_report(&self, now: NaiveDateTime, config: &ShopConfig) -> AppointmentReport {
        AppointmentReport {
            upcoming: self.upcoming_appointments(now).into_iter().cloned().collect(),
            today_count: self.appointments_on(now.date()).len(),
            window_count: self.appointments_within(config.upcoming_window_days, now).len(),
            last_booked: self.last_appointment().cloned(),
        }
    }
}
