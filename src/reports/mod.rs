//! Read-only queries over the three collections.
//!
//! Everything here is a pure function of the slices it was built from. Queries that pick a single
//! "most" or "last" record return `None` on empty input; placeholders are for the caller to render.

mod summary;

pub use summary::*;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::{Appointment, Product, Sale};
use crate::store::Entity;

/// Products at or below this quantity are reported as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Length in days of the "this week" appointment window.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Length in days of the recent sales window.
pub const RECENT_SALES_DAYS: i64 = 7;

/// Units sold per product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_name: String,
    pub units: u64,
}

/// Borrowed view of the store contents that all report queries run against.
#[derive(Debug, Clone, Copy)]
pub struct Reports<'a> {
    products: &'a [Product],
    sales: &'a [Sale],
    appointments: &'a [Appointment],
}

impl<'a> Reports<'a> {
    pub fn new(products: &'a [Product], sales: &'a [Sale], appointments: &'a [Appointment]) -> Self {
        Self {
            products,
            sales,
            appointments,
        }
    }

    // -------------------------------------------------------------------------
    // Stock
    // -------------------------------------------------------------------------

    pub fn total_stock(&self) -> u64 {
        self.products.iter().map(|p| u64::from(p.quantity)).sum()
    }

    /// Products with `quantity <= threshold`, in store order.
    pub fn low_stock_products(&self, threshold: u32) -> Vec<&'a Product> {
        self.products.iter().filter(|p| p.is_low_stock(threshold)).collect()
    }

    /// Products that can still be sold.
    pub fn products_in_stock(&self) -> Vec<&'a Product> {
        self.products.iter().filter(|p| p.in_stock()).collect()
    }

    /// The most recently registered product; the last inserted wins a timestamp tie.
    pub fn last_stock_update(&self) -> Option<&'a Product> {
        latest(self.products)
    }

    pub fn recent_products(&self) -> impl Iterator<Item = &'a Product> {
        self.products.iter().rev()
    }

    // -------------------------------------------------------------------------
    // Sales
    // -------------------------------------------------------------------------

    pub fn total_sales_units(&self) -> u64 {
        units_sold(self.sales)
    }

    /// Sales recorded on the given local calendar day.
    pub fn sales_on(&self, day: NaiveDate) -> Vec<&'a Sale> {
        self.sales.iter().filter(|s| s.created_at.date() == day).collect()
    }

    /// Sales recorded at or after `now - days * 24h`.
    ///
    /// A window reaching past the representable calendar covers every sale.
    pub fn sales_since(&self, days: i64, now: NaiveDateTime) -> Vec<&'a Sale> {
        let cutoff = Duration::try_days(days).and_then(|window| now.checked_sub_signed(window));
        self.sales
            .iter()
            .filter(|s| cutoff.map_or(true, |cutoff| s.created_at >= cutoff))
            .collect()
    }

    /// Product name with the most units sold.
    ///
    /// Sales are grouped by the name captured at sale time. On a tie the name that was sold first wins.
    pub fn most_sold_product(&self) -> Option<ProductSales> {
        let mut totals: Vec<ProductSales> = Vec::new();
        for sale in self.sales {
            match totals.iter_mut().find(|t| t.product_name == sale.product_name) {
                Some(total) => total.units += u64::from(sale.quantity),
                None => totals.push(ProductSales {
                    product_name: sale.product_name.clone(),
                    units: u64::from(sale.quantity),
                }),
            }
        }
        totals
            .into_iter()
            .fold(None, |best: Option<ProductSales>, current| match best {
                Some(best) if best.units >= current.units => Some(best),
                _ => Some(current),
            })
    }

    /// The most recent sale; the last inserted wins a timestamp tie.
    pub fn last_sale(&self) -> Option<&'a Sale> {
        latest(self.sales)
    }

    pub fn recent_sales(&self) -> impl Iterator<Item = &'a Sale> {
        self.sales.iter().rev()
    }

    // -------------------------------------------------------------------------
    // Appointments
    // -------------------------------------------------------------------------

    /// Appointments scheduled at or after `now`, soonest first.
    ///
    /// Appointments sharing a slot keep their booking order.
    pub fn upcoming_appointments(&self, now: NaiveDateTime) -> Vec<&'a Appointment> {
        let mut upcoming: Vec<&'a Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.scheduled_at() >= now)
            .collect();
        upcoming.sort_by_key(|a| a.scheduled_at());
        upcoming
    }

    pub fn appointments_on(&self, day: NaiveDate) -> Vec<&'a Appointment> {
        self.appointments.iter().filter(|a| a.date == day).collect()
    }

    /// Appointments scheduled from `now` up to the end of the day `days` days ahead.
    ///
    /// Slots earlier today have already passed and are left out. A window reaching past the
    /// representable calendar has no upper bound.
    pub fn appointments_within(&self, days: i64, now: NaiveDateTime) -> Vec<&'a Appointment> {
        let last = Duration::try_days(days)
            .and_then(|window| now.checked_add_signed(window))
            .map(|end| end.date());
        self.appointments
            .iter()
            .filter(|a| a.scheduled_at() >= now && last.map_or(true, |last| a.date <= last))
            .collect()
    }

    /// The most recently booked appointment; the last inserted wins a timestamp tie.
    pub fn last_appointment(&self) -> Option<&'a Appointment> {
        latest(self.appointments)
    }

    pub fn recent_appointments(&self) -> impl Iterator<Item = &'a Appointment> {
        self.appointments.iter().rev()
    }
}

/// Newest record by creation time; `max_by_key` keeps the last of equal keys.
fn latest<T: Entity>(items: &[T]) -> Option<&T> {
    items.iter().max_by_key(|item| item.created_at())
}

/// Sum of units over any subset of sales.
pub fn units_sold<'s>(sales: impl IntoIterator<Item = &'s Sale>) -> u64 {
    sales.into_iter().map(|s| u64::from(s.quantity)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductKind;
    use chrono::NaiveTime;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    fn product(id: &str, name: &str, quantity: u32, created_at: NaiveDateTime) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            kind: ProductKind::Glasses,
            quantity,
            created_at,
        }
    }

    fn sale(id: &str, name: &str, quantity: u32, created_at: NaiveDateTime) -> Sale {
        Sale {
            id: id.into(),
            product_id: format!("product_{}", name.len()),
            product_name: name.into(),
            quantity,
            created_at,
        }
    }

    fn appointment(id: &str, date: NaiveDate, hour: u32, created_at: NaiveDateTime) -> Appointment {
        Appointment {
            id: id.into(),
            client_name: format!("Client {}", id),
            date,
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            observations: None,
            created_at,
        }
    }

    fn day(offset: i64) -> NaiveDate {
        now().date() + Duration::days(offset)
    }

    #[test]
    fn test_empty_store_reports_nothing() {
        let reports = Reports::new(&[], &[], &[]);
        assert_eq!(reports.total_stock(), 0);
        assert_eq!(reports.total_sales_units(), 0);
        assert!(reports.low_stock_products(LOW_STOCK_THRESHOLD).is_empty());
        assert!(reports.last_stock_update().is_none());
        assert!(reports.most_sold_product().is_none());
        assert!(reports.last_sale().is_none());
        assert!(reports.last_appointment().is_none());
        assert!(reports.upcoming_appointments(now()).is_empty());
    }

    #[test]
    fn test_low_stock_is_inclusive_and_keeps_store_order() {
        let products = vec![
            product("product_1", "A", 5, now()),
            product("product_2", "B", 6, now()),
            product("product_3", "C", 0, now()),
        ];
        let reports = Reports::new(&products, &[], &[]);

        let low: Vec<_> = reports.low_stock_products(LOW_STOCK_THRESHOLD).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(low, vec!["product_1", "product_3"]);
        let sellable: Vec<_> = reports.products_in_stock().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(sellable, vec!["product_1", "product_2"]);
        assert_eq!(reports.total_stock(), 11);
    }

    #[test]
    fn test_last_records_prefer_latest_insert_on_tie() {
        let products = vec![
            product("product_1", "A", 1, now()),
            product("product_2", "B", 1, now()),
            product("product_3", "C", 1, now() - Duration::hours(1)),
        ];
        let sales = vec![
            sale("sale_1", "A", 1, now()),
            sale("sale_2", "B", 1, now()),
        ];
        let appointments = vec![
            appointment("appointment_1", day(1), 9, now()),
            appointment("appointment_2", day(2), 9, now()),
        ];
        let reports = Reports::new(&products, &sales, &appointments);

        assert_eq!(reports.last_stock_update().unwrap().id, "product_2");
        assert_eq!(reports.last_sale().unwrap().id, "sale_2");
        assert_eq!(reports.last_appointment().unwrap().id, "appointment_2");
    }

    #[test]
    fn test_most_sold_groups_by_name_and_breaks_ties_by_first_seen() {
        let sales = vec![
            sale("sale_1", "Ray-Ban Classic", 2, now()),
            sale("sale_2", "Oakley Holbrook", 3, now()),
            sale("sale_3", "Ray-Ban Classic", 1, now()),
        ];
        let reports = Reports::new(&[], &sales, &[]);
        assert_eq!(
            reports.most_sold_product(),
            Some(ProductSales { product_name: "Ray-Ban Classic".into(), units: 3 })
        );

        let sales = vec![
            sale("sale_1", "Oakley Holbrook", 1, now()),
            sale("sale_2", "Ray-Ban Classic", 4, now()),
            sale("sale_3", "Oakley Holbrook", 3, now()),
        ];
        let reports = Reports::new(&[], &sales, &[]);
        assert_eq!(reports.most_sold_product().unwrap().product_name, "Oakley Holbrook");
    }

    #[test]
    fn test_sales_windows() {
        let sales = vec![
            sale("sale_1", "A", 1, now() - Duration::days(8)),
            sale("sale_2", "A", 2, now() - Duration::days(7)),
            sale("sale_3", "A", 3, now() - Duration::hours(11)),
            sale("sale_4", "A", 4, now() - Duration::hours(1)),
        ];
        let reports = Reports::new(&[], &sales, &[]);

        let today: Vec<_> = reports.sales_on(now().date()).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(today, vec!["sale_4"]);
        let week = reports.sales_since(RECENT_SALES_DAYS, now());
        assert_eq!(week.len(), 3);
        assert_eq!(units_sold(week), 9);
        assert_eq!(reports.total_sales_units(), 10);

        let recent: Vec<_> = reports.recent_sales().map(|s| s.id.as_str()).collect();
        assert_eq!(recent, vec!["sale_4", "sale_3", "sale_2", "sale_1"]);
    }

    #[test]
    fn test_upcoming_appointments_sorted_and_stable() {
        let appointments = vec![
            appointment("appointment_1", day(3), 9, now()),
            appointment("appointment_2", day(0), 9, now()),
            appointment("appointment_3", day(1), 14, now()),
            appointment("appointment_4", day(1), 14, now()),
            appointment("appointment_5", day(0), 10, now()),
        ];
        let reports = Reports::new(&[], &[], &appointments);

        let upcoming: Vec<_> = reports.upcoming_appointments(now()).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            upcoming,
            vec!["appointment_5", "appointment_3", "appointment_4", "appointment_1"]
        );
    }

    #[test]
    fn test_appointments_by_day_and_window() {
        let appointments = vec![
            appointment("appointment_1", day(-1), 9, now()),
            appointment("appointment_2", day(0), 8, now()),
            appointment("appointment_3", day(7), 18, now()),
            appointment("appointment_4", day(8), 9, now()),
        ];
        let reports = Reports::new(&[], &[], &appointments);

        let today: Vec<_> = reports.appointments_on(day(0)).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(today, vec!["appointment_2"]);
        let week: Vec<_> = reports
            .appointments_within(UPCOMING_WINDOW_DAYS, now())
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(week, vec!["appointment_3"]);
    }

    #[test]
    fn test_window_includes_later_slots_today() {
        let appointments = vec![
            appointment("appointment_1", day(0), 8, now()),
            appointment("appointment_2", day(0), 10, now()),
            appointment("appointment_3", day(0), 17, now()),
        ];
        let reports = Reports::new(&[], &[], &appointments);

        let week: Vec<_> = reports
            .appointments_within(UPCOMING_WINDOW_DAYS, now())
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(week, vec!["appointment_2", "appointment_3"]);
        assert_eq!(reports.appointments_within(0, now()).len(), 2);
    }

    #[test]
    fn test_oversized_windows_do_not_panic() {
        let sales = vec![sale("sale_1", "A", 1, now() - Duration::days(400))];
        let appointments = vec![appointment("appointment_1", day(400), 9, now())];
        let reports = Reports::new(&[], &sales, &appointments);

        assert_eq!(reports.sales_since(i64::MAX / 2, now()).len(), 1);
        assert_eq!(reports.appointments_within(i64::MAX / 2, now()).len(), 1);
        assert_eq!(reports.sales_since(9_999_999_999_999, now()).len(), 1);
    }

    #[test]
    fn test_reads_are_idempotent() {
        let products = vec![product("product_1", "A", 2, now())];
        let sales = vec![sale("sale_1", "A", 2, now())];
        let appointments = vec![appointment("appointment_1", day(1), 9, now())];
        let reports = Reports::new(&products, &sales, &appointments);

        assert_eq!(reports.most_sold_product(), reports.most_sold_product());
        assert_eq!(reports.upcoming_appointments(now()), reports.upcoming_appointments(now()));
        assert_eq!(reports.low_stock_products(5), reports.low_stock_products(5));
    }
}
