//! Cart DTOs - Payload verso `/cart/*`

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartDTO {
    pub client_id: i32,
    pub appointment_id: i32,
}

/// Aggiunge `appointment_id` al carrello esistente `id`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartDTO {
    pub id: i32,
    pub client_id: i32,
    pub appointment_id: i32,
}
