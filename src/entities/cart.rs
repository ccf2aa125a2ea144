//! Cart entity - Carrello del cliente con gli appuntamenti in attesa di conferma

use super::Appointment;
use super::de;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(deserialize_with = "de::id")]
    pub id: i32,
    #[serde(deserialize_with = "de::id")]
    pub client_id: i32,
    // il backend usa il singolare
    #[serde(rename = "appointment", default)]
    pub appointments: Vec<Appointment>,
}

impl Cart {
    /// Invariante: ogni appuntamento del carrello appartiene al suo cliente.
    /// Ritorna gli id che la violano.
    pub fn foreign_appointments(&self) -> Vec<i32> {
        self.appointments
            .iter()
            .filter(|a| a.client_id != self.client_id)
            .map(|a| a.id)
            .collect()
    }
}
