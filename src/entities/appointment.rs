//! Appointment entity - Appuntamento e riferimenti denormalizzati per la visualizzazione

use super::de;
use super::enums::AppointmentStatus;
use super::{Client, Employee, Service};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(deserialize_with = "de::id")]
    pub id: i32,
    #[serde(with = "de::calendar_date")]
    pub date: NaiveDate,
    /// Orario "HH:MM"
    pub hour: String,
    pub status: AppointmentStatus,
    #[serde(deserialize_with = "de::id")]
    pub service_id: i32,
    #[serde(deserialize_with = "de::id")]
    pub employee_id: i32,
    #[serde(deserialize_with = "de::id")]
    pub client_id: i32,
    // None => l'appuntamento non è (più) nel carrello
    #[serde(default, deserialize_with = "de::optional_id")]
    pub cart_id: Option<i32>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub service: Option<Service>,
    #[serde(default)]
    pub employee: Option<Employee>,
    #[serde(default)]
    pub client: Option<Client>,
}

impl Appointment {
    pub fn is_pending(&self) -> bool {
        self.status == AppointmentStatus::Pending
    }
}
