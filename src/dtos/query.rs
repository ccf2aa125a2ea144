//! Query DTOs - Filtri per la lista degli appuntamenti

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filtro della lista appuntamenti: testo libero e giorno opzionale
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AppointmentFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}
