#[macro_use]
mod macros;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, instrument};

use crate::domain::{Appointment, AppointmentCreate, Product, ProductCreate, Sale, SaleCreate};
use crate::error::{Result, ShopError};
use crate::messages::{ShopRequest, StoreEvent};
use crate::store::StoreSnapshot;

/// Cloneable handle to the [`ShopService`](crate::actors::ShopService).
///
/// This is the surface the presentation layer talks to: the three mutations,
/// the collection listings, and snapshots for the reporting engine.
#[derive(Clone)]
pub struct ShopClient {
    sender: mpsc::Sender<ShopRequest>,
    events: broadcast::Sender<StoreEvent>,
}

impl ShopClient {
    pub fn new(sender: mpsc::Sender<ShopRequest>, events: broadcast::Sender<StoreEvent>) -> Self {
        Self { sender, events }
    }

    /// Registers an observer for store changes.
    ///
    /// Only mutations applied after this call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    #[instrument(
        fields(products = snapshot.products.len(), sales = snapshot.sales.len(), appointments = snapshot.appointments.len()),
        skip(self, snapshot)
    )]
    pub async fn restore(&self, snapshot: StoreSnapshot) -> Result<()> {
        debug!("Sending request");
        let (respond_to, response) = tokio::sync::oneshot::channel();
        self.sender
            .send(ShopRequest::Restore { snapshot, respond_to })
            .await
            .map_err(|_| ShopError::ActorCommunication("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| ShopError::ActorCommunication("Actor dropped".to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<()> {
        debug!("Sending shutdown");
        self.sender
            .send(ShopRequest::Shutdown)
            .await
            .map_err(|_| ShopError::ActorCommunication("Actor closed".to_string()))
    }
}

client_method!(ShopClient => fn add_product(params: ProductCreate) -> Product as ShopRequest::AddProduct);
client_method!(ShopClient => fn record_sale(params: SaleCreate) -> Sale as ShopRequest::RecordSale);
client_method!(ShopClient => fn add_appointment(params: AppointmentCreate) -> Appointment as ShopRequest::AddAppointment);
client_method!(ShopClient => fn get_product(id: String) -> Option<Product> as ShopRequest::GetProduct);
client_method!(ShopClient => fn snapshot() -> StoreSnapshot as ShopRequest::Snapshot);

impl_list_methods!(ShopClient, ShopRequest {
    products => Product,
    sales => Sale,
    appointments => Appointment,
});
