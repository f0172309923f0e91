use std::sync::Arc;

use chrono::Duration;
use optica_store::prelude::*;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ShopConfig::load().map_err(|e| e.to_string())?;
    info!("Starting optical shop store");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let system = match config.snapshot_path.clone() {
        Some(path) => ShopSystem::open(config, clock, JsonFileRepository::new(path))
            .await
            .map_err(|e| e.to_string())?,
        None => ShopSystem::with_clock(config, clock),
    };
    let client = system.client.clone();

    let span = tracing::info_span!("stock_intake");
    let product = async {
        info!("Registering product");
        client
            .add_product(ProductCreate::new("Ray-Ban Classic", ProductKind::Sunglasses, 10))
            .await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("sales_counter");
    let sale_result = async {
        info!(product_id = %product.id, "Recording sale");
        client.record_sale(SaleCreate::new(&product.id, 7)).await
    }
    .instrument(span)
    .await;

    match sale_result {
        Ok(sale) => info!(sale_id = %sale.id, "Sale recorded successfully"),
        Err(e) => error!(error = %e, "Sale failed"),
    }

    let now = system.clock().now();
    let tomorrow = now.date() + Duration::days(1);
    let booking = AppointmentCreate::parse("Maria Silva", &tomorrow.to_string(), "14:00", None)
        .map_err(|e| e.to_string())?;
    if let Err(e) = client.add_appointment(booking).await {
        error!(error = %e, "Appointment booking failed");
    }

    let snapshot = client.snapshot().await.map_err(|e| e.to_string())?;
    let reports = snapshot.reports();
    let now = system.clock().now();
    info!(report = ?reports.stock_report(&system.config), "Stock report");
    info!(report = ?reports.sales_report(now, &system.config), "Sales report");
    info!(report = ?reports.appointment_report(now, &system.config), "Appointment report");

    // Shutdown system gracefully
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
