use serde::Serialize;
use tokio::sync::oneshot;

use crate::domain::{Appointment, AppointmentCreate, Product, ProductCreate, Sale, SaleCreate};
use crate::error::ShopError;
use crate::store::StoreSnapshot;

/// Generic type aliases for service communication
pub type ServiceResult<T> = std::result::Result<T, ShopError>;
pub type ServiceResponse<T> = oneshot::Sender<ServiceResult<T>>;

/// Typed messages for the store actor. Each variant carries its parameters
/// and a oneshot channel for the response.
#[derive(Debug)]
pub enum ShopRequest {
    AddProduct {
        params: ProductCreate,
        respond_to: ServiceResponse<Product>,
    },
    RecordSale {
        params: SaleCreate,
        respond_to: ServiceResponse<Sale>,
    },
    AddAppointment {
        params: AppointmentCreate,
        respond_to: ServiceResponse<Appointment>,
    },
    GetProduct {
        id: String,
        respond_to: ServiceResponse<Option<Product>>,
    },
    ListProducts {
        respond_to: ServiceResponse<Vec<Product>>,
    },
    ListSales {
        respond_to: ServiceResponse<Vec<Sale>>,
    },
    ListAppointments {
        respond_to: ServiceResponse<Vec<Appointment>>,
    },
    Snapshot {
        respond_to: ServiceResponse<StoreSnapshot>,
    },
    Restore {
        snapshot: StoreSnapshot,
        respond_to: ServiceResponse<()>,
    },
    Shutdown,
}

/// Broadcast to subscribers after every successful mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum StoreEvent {
    ProductAdded(Product),
    SaleRecorded { sale: Sale, remaining_stock: u32 },
    AppointmentAdded(Appointment),
    Restored,
}
