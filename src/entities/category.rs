//! Category entity - Categoria che raggruppa i servizi

use super::Service;
use super::de;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    #[serde(deserialize_with = "de::id")]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub services: Vec<Service>,
}
