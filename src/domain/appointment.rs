use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopError};

/// A client appointment.
///
/// `date` and `time` are when the client is expected; `created_at` is when it was booked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub client_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Payload for booking an appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentCreate {
    pub client_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub observations: Option<String>,
}

impl AppointmentCreate {
    pub fn new(client_name: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            client_name: client_name.into(),
            date,
            time,
            observations: None,
        }
    }

    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        self.observations = Some(observations.into());
        self
    }

    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Builds a payload from raw form fields: a `YYYY-MM-DD` date and an `HH:MM` time.
    ///
    /// Blank observations are treated as absent.
    pub fn parse(client_name: &str, date: &str, time: &str, observations: Option<&str>) -> Result<Self> {
        let (date, time) = (date.trim(), time.trim());
        if client_name.trim().is_empty() || date.is_empty() || time.is_empty() {
            return Err(ShopError::validation("client name, date and time are required"));
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| ShopError::validation(format!("invalid date {}: {}", date, e)))?;
        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .map_err(|e| ShopError::validation(format!("invalid time {}: {}", time, e)))?;

        let mut payload = Self::new(client_name, date, time);
        if let Some(obs) = observations.map(str::trim).filter(|o| !o.is_empty()) {
            payload = payload.with_observations(obs);
        }
        Ok(payload)
    }
}
