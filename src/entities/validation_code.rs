//! ValidationCode entity - Codice che un gerente consegna per la registrazione di un funzionario

use super::de;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidationCode {
    #[serde(deserialize_with = "de::id")]
    pub id: i32,
    pub characters: String,
    #[serde(default)]
    pub description: String,
}
