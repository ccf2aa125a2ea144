//! Query cache - Cache read-through delle letture dall'API
//!
//! Le voci si invalidano dopo una mutazione andata a buon fine e non vengono mai
//! aggiornate in modo ottimistico.

use crate::core::AppError;
use crate::entities::Role;
use dashmap::DashMap;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use std::future::Future;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    UserProfile { role: Role, id: i32 },
    Employees,
    Employee(i32),
    Categories,
    Category(i32),
    Services,
    Service(i32),
    Appointments,
    Appointment(i32),
    CartByClient(i32),
    AcademicLevels,
    ValidationCodes,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::UserProfile { role, id } => write!(f, "{}-{}-getOneUser", role, id),
            QueryKey::Employees => f.write_str("getAllEmployees"),
            QueryKey::Employee(id) => write!(f, "{}-getOneEmployee", id),
            QueryKey::Categories => f.write_str("getAllCategories"),
            QueryKey::Category(id) => write!(f, "{}-getOneCategory", id),
            QueryKey::Services => f.write_str("getAllServices"),
            QueryKey::Service(id) => write!(f, "{}-getOneService", id),
            QueryKey::Appointments => f.write_str("getAllAppointments"),
            QueryKey::Appointment(id) => write!(f, "{}-getOneAppointment", id),
            QueryKey::CartByClient(id) => write!(f, "{}-getCartByClientId", id),
            QueryKey::AcademicLevels => f.write_str("getAllAcademicLevels"),
            QueryKey::ValidationCodes => f.write_str("getAllCodeValidations"),
        }
    }
}

#[derive(Default)]
pub struct QueryCache {
    entries: DashMap<QueryKey, serde_json::Value>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entry = self.entries.get(key)?;
        match serde_json::from_value(entry.value().clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, "Cached value has an unexpected shape: {}", e);
                None
            }
        }
    }

    pub fn put<T: Serialize>(&self, key: QueryKey, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => {
                self.entries.insert(key, json);
            }
            Err(e) => warn!(key = %key, "Value not cached: {}", e),
        }
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn invalidate(&self, key: &QueryKey) {
        if self.entries.remove(key).is_some() {
            debug!(key = %key, "Query invalidated");
        }
    }

    pub fn invalidate_many(&self, keys: &[QueryKey]) {
        keys.iter().for_each(|key| self.invalidate(key));
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Restituisce il valore in cache oppure lo recupera con `fetch` e lo memorizza.
    /// Un errore di `fetch` non tocca la cache.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if let Some(hit) = self.get(&key) {
            debug!(key = %key, "Cache hit");
            return Ok(hit);
        }

        debug!(key = %key, "Cache miss");
        let value = fetch().await?;
        self.put(key, &value);
        Ok(value)
    }
}
