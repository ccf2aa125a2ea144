//! In-flight guard - Impedisce di inviare due volte la stessa mutazione
//!
//! La chiave resta occupata finché il [`PendingGuard`] è vivo. Il rilascio avviene
//! nel `Drop`, quindi anche un errore o una finestra chiusa liberano la chiave.

use crate::core::AppError;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone, Default)]
pub struct InFlight {
    keys: Arc<DashMap<String, ()>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, key: impl Into<String>) -> Result<PendingGuard, AppError> {
        let key = key.into();
        // entry() tiene il lock dello shard: controllo e inserimento sono atomici
        match self.keys.entry(key.clone()) {
            Entry::Occupied(_) => {
                warn!(key = %key, "Mutation already in flight");
                Err(AppError::conflict("Operação em andamento").with_details(key))
            }
            Entry::Vacant(slot) => {
                slot.insert(());
                debug!(key = %key, "Mutation started");
                Ok(PendingGuard {
                    keys: Arc::clone(&self.keys),
                    key,
                })
            }
        }
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }
}

pub struct PendingGuard {
    keys: Arc<DashMap<String, ()>>,
    key: String,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.keys.remove(&self.key);
        debug!(key = %self.key, "Mutation finished");
    }
}
