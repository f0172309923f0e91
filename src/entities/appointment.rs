use chrono::NaiveDateTime;

use crate::domain::{Appointment, AppointmentCreate};
use crate::error::{Result, ShopError};
use crate::store::Entity;

impl Entity for Appointment {
    type CreatePayload = AppointmentCreate;
    const KIND: &'static str = "appointment";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Creates a new Appointment booked at `created_at`.
    ///
    /// # Errors
    /// - `Validation` if the client name is blank
    /// - `PastDate` unless the scheduled date and time are strictly after `created_at`
    fn from_create(id: String, created_at: NaiveDateTime, params: AppointmentCreate) -> Result<Self> {
        let client_name = params.client_name.trim();
        if client_name.is_empty() {
            return Err(ShopError::validation("client name is required"));
        }
        let scheduled_for = params.scheduled_at();
        if scheduled_for <= created_at {
            return Err(ShopError::PastDate { scheduled_for });
        }
        Ok(Self {
            id,
            client_name: client_name.to_string(),
            date: params.date,
            time: params.time,
            observations: params.observations,
            created_at,
        })
    }
}
