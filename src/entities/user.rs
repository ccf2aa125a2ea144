//! User entities - Identità di clienti, funzionari e gerenti

use super::de;
use super::enums::Role;
use super::{AcademicLevel, Appointment, Cart, Category, Service};
use serde::{Deserialize, Deserializer, Serialize};

/// Identità dell'utente autenticato, persistita insieme al token
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(deserialize_with = "de::id")]
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub cellphone: String,
    pub role: Role,
    #[serde(default, deserialize_with = "de::optional_id")]
    pub academic_level_id: Option<i32>,
}

/// Orari già occupati o bloccati di un funzionario.
///
/// Sul filo il campo si chiama `availability` ma la presenza di un orario
/// significa che NON è prenotabile. Il backend lo manda come `null`, come stringa
/// singola (token separati da virgola) oppure come lista.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct BlockedHours(Vec<String>);

impl BlockedHours {
    pub fn new<I, S>(hours: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(hours.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, hour: &str) -> bool {
        let hour = hour.trim();
        self.0.iter().any(|blocked| blocked == hour)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for BlockedHours {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }

        let tokens = match Option::<Raw>::deserialize(deserializer)? {
            None => Vec::new(),
            Some(Raw::One(joined)) => joined
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
            Some(Raw::Many(list)) => list.into_iter().map(|t| t.trim().to_string()).collect(),
        };
        Ok(Self(tokens))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(deserialize_with = "de::id")]
    pub id: i32,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub cellphone: String,
    #[serde(default)]
    pub availability: BlockedHours,
    #[serde(default = "employee_role")]
    pub role: Role,
    #[serde(default, deserialize_with = "de::optional_id")]
    pub academic_level_id: Option<i32>,
    #[serde(default)]
    pub academic_level: Option<AcademicLevel>,
    #[serde(default)]
    pub services: Vec<Service>,
}

fn employee_role() -> Role {
    Role::Employee
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(deserialize_with = "de::id")]
    pub id: i32,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub cellphone: String,
    #[serde(default = "client_role")]
    pub role: Role,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub cart: Option<Cart>,
}

fn client_role() -> Role {
    Role::Client
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Picture {
    pub url: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub photo: Option<Picture>,
}

/// Payload di "get one user": identità comune più i campi specifici del ruolo
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(deserialize_with = "de::id")]
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub cellphone: String,
    pub role: Role,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    // solo clienti
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub cart: Option<Cart>,
    // solo funzionari e gerenti
    #[serde(default)]
    pub services: Option<Vec<Service>>,
    #[serde(default)]
    pub academic_level: Option<AcademicLevel>,
}
