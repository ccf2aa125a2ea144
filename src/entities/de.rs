//! Helper serde - Deserializzatori tolleranti per i formati del backend
//!
//! Il backend non è coerente: gli id arrivano a volte come numeri e a volte come
//! stringhe (campi dei form), le date come `YYYY-MM-DD` o come timestamp completo.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    fn into_id<E: Error>(self) -> Result<i32, E> {
        match self {
            IntOrString::Int(n) => i32::try_from(n).map_err(E::custom),
            IntOrString::Str(s) => s.trim().parse::<i32>().map_err(E::custom),
        }
    }
}

pub fn id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    IntOrString::deserialize(deserializer)?.into_id()
}

pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<IntOrString>::deserialize(deserializer)?
        .map(IntOrString::into_id)
        .transpose()
}

/// Data di calendario: si serializza come `YYYY-MM-DD` e si accetta anche un
/// timestamp RFC 3339 (il frontend inviava oggetti `Date` serializzati)
pub mod calendar_date {
    use super::*;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid calendar date: {}", raw)))
    }

    pub(crate) fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }
}
