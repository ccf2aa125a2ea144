//! AcademicLevel entity - Livello di istruzione di un funzionario

use super::de;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AcademicLevel {
    #[serde(deserialize_with = "de::id")]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
}
