use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, instrument};

use crate::clients::ShopClient;
use crate::domain::{Appointment, AppointmentCreate, Product, ProductCreate, Sale, SaleCreate};
use crate::messages::{ServiceResponse, ShopRequest, StoreEvent};
use crate::store::{EntityStore, StoreSnapshot};

// =============================================================================
// SHOP SERVICE
// =============================================================================

/// Single owner of the [`EntityStore`].
///
/// Requests are handled one at a time off the mailbox, so every request, including the
/// two-part sale recording, is applied without any other request observing it half-done.
pub struct ShopService {
    receiver: mpsc::Receiver<ShopRequest>,
    store: EntityStore,
    events: broadcast::Sender<StoreEvent>,
}

impl ShopService {
    pub fn new(buffer_size: usize, event_capacity: usize, store: EntityStore) -> (Self, ShopClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (events, _) = broadcast::channel(event_capacity);
        let client = ShopClient::new(sender, events.clone());
        let service = Self {
            receiver,
            store,
            events,
        };
        (service, client)
    }

    #[instrument(name = "shop_service", skip(self))]
    pub async fn run(mut self) {
        info!("ShopService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ShopRequest::AddProduct { params, respond_to } => {
                    self.handle_add_product(params, respond_to);
                }
                ShopRequest::RecordSale { params, respond_to } => {
                    self.handle_record_sale(params, respond_to);
                }
                ShopRequest::AddAppointment { params, respond_to } => {
                    self.handle_add_appointment(params, respond_to);
                }
                ShopRequest::GetProduct { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.product(&id).cloned()));
                }
                ShopRequest::ListProducts { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.products().to_vec()));
                }
                ShopRequest::ListSales { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.sales().to_vec()));
                }
                ShopRequest::ListAppointments { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.appointments().to_vec()));
                }
                ShopRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.snapshot()));
                }
                ShopRequest::Restore { snapshot, respond_to } => {
                    self.handle_restore(snapshot, respond_to);
                }
                ShopRequest::Shutdown => {
                    info!("ShopService shutting down");
                    break;
                }
            }
        }
        info!("ShopService stopped");
    }

    /// Sends an event to whoever is listening; nobody listening is fine.
    fn publish(&self, event: StoreEvent) {
        let _ = self.events.send(event);
    }

    #[instrument(fields(product_name = %params.name, kind = %params.kind, quantity = params.quantity), skip(self, params, respond_to))]
    fn handle_add_product(&mut self, params: ProductCreate, respond_to: ServiceResponse<Product>) {
        let result = self.store.add_product(params);
        match &result {
            Ok(product) => {
                info!(product_id = %product.id, "Product added");
                self.publish(StoreEvent::ProductAdded(product.clone()));
            }
            Err(e) => debug!(error = %e, "Product rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %params.product_id, quantity = params.quantity), skip(self, params, respond_to))]
    fn handle_record_sale(&mut self, params: SaleCreate, respond_to: ServiceResponse<Sale>) {
        let result = match self.store.sell(params) {
            Ok((sale, remaining_stock)) => {
                info!(sale_id = %sale.id, remaining_stock, "Sale recorded");
                self.publish(StoreEvent::SaleRecorded {
                    sale: sale.clone(),
                    remaining_stock,
                });
                Ok(sale)
            }
            Err(e) => {
                debug!(error = %e, "Sale rejected");
                Err(e)
            }
        };
        let _ = respond_to.send(result);
    }

    #[instrument(fields(client_name = %params.client_name, scheduled_for = %params.scheduled_at()), skip(self, params, respond_to))]
    fn handle_add_appointment(&mut self, params: AppointmentCreate, respond_to: ServiceResponse<Appointment>) {
        let result = self.store.add_appointment(params);
        match &result {
            Ok(appointment) => {
                info!(appointment_id = %appointment.id, "Appointment booked");
                self.publish(StoreEvent::AppointmentAdded(appointment.clone()));
            }
            Err(e) => debug!(error = %e, "Appointment rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(
        fields(products = snapshot.products.len(), sales = snapshot.sales.len(), appointments = snapshot.appointments.len()),
        skip(self, snapshot, respond_to)
    )]
    fn handle_restore(&mut self, snapshot: StoreSnapshot, respond_to: ServiceResponse<()>) {
        let result = self.store.restore(snapshot);
        match &result {
            Ok(()) => {
                info!("Store restored from snapshot");
                self.publish(StoreEvent::Restored);
            }
            Err(e) => debug!(error = %e, "Snapshot rejected"),
        }
        let _ = respond_to.send(result);
    }
}
