//! Service entity - Servizio offerto dal salone

use super::de;
use super::{Category, Employee, Picture};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(deserialize_with = "de::id")]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Prezzo in unità intere di valuta
    pub price: i64,
    /// Durata in minuti
    pub duration: u32,
    #[serde(default, deserialize_with = "de::optional_id")]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub picture: Option<Picture>,
    /// Funzionari che eseguono il servizio. Vuoto => non prenotabile.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

impl Service {
    pub fn is_bookable(&self) -> bool {
        !self.employees.is_empty()
    }

    pub fn employee(&self, employee_id: i32) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == employee_id)
    }
}
