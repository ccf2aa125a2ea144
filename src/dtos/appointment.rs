//! Appointment DTOs - Form di prenotazione e payload verso `/appointment/*`

use crate::entities::AppointmentStatus;
use crate::entities::de::calendar_date;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

const FIRST_BOOKABLE_HOUR: u32 = 8;
const LAST_BOOKABLE_HOUR: u32 = 20;

/// Solo la parte delle ore conta: "20:45" è ancora ammesso
fn validate_hour(hour: &str) -> Result<(), ValidationError> {
    let hours = hour
        .split(':')
        .next()
        .and_then(|h| h.trim().parse::<u32>().ok());

    match hours {
        Some(h) if (FIRST_BOOKABLE_HOUR..=LAST_BOOKABLE_HOUR).contains(&h) => Ok(()),
        _ => {
            let mut err = ValidationError::new("hour_range");
            err.message = Some(Cow::Borrowed("Horário deve estar entre 8:00 e 20:00"));
            Err(err)
        }
    }
}

fn validate_not_past(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date >= Local::now().date_naive() {
        return Ok(());
    }

    let mut err = ValidationError::new("past_date");
    err.message = Some(Cow::Borrowed("Data deve ser hoje ou futura"));
    Err(err)
}

/// Valori del form di prenotazione così come li compila il cliente
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingFormDTO {
    pub employee_id: i32,

    #[serde(with = "calendar_date")]
    #[validate(custom(function = "validate_not_past"))]
    pub date: NaiveDate,

    #[validate(
        length(min = 1, message = "Horário é obrigatório"),
        custom(function = "validate_hour")
    )]
    pub hour: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentDTO {
    pub service_id: i32,
    pub employee_id: i32,
    pub client_id: i32,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    pub hour: String,
    pub status: AppointmentStatus,
}

/// `cartId` viene sempre serializzato: `null` toglie l'appuntamento dal carrello
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentDTO {
    pub id: i32,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    pub hour: String,
    pub employee_id: i32,
    pub cart_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateAppointmentStatusDTO {
    pub id: i32,
    pub status: AppointmentStatus,
    pub reason: String,
}
