//! Cart services - Carrello del cliente e pianificazione in blocco
//!
//! Aggiungere al carrello significa creare l'appuntamento e poi agganciarlo al
//! carrello: sono due chiamate in sequenza. Se l'aggancio fallisce l'appuntamento
//! appena creato viene cancellato.

use crate::core::{AppError, AppState, Confirmation, QueryKey, ensure_can_manage};
use crate::dtos::{BookingFormDTO, CreateCartDTO, UpdateAppointmentDTO, UpdateCartDTO};
use crate::entities::{Appointment, Cart, CurrentUser, Role, Service};
use crate::repositories::{Create, Delete, Update};
use crate::services::appointment;
use crate::utils::{convert_minutes, format_currency};
use futures::future::join_all;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    pub total_price: i64,
    pub total_duration: u32,
}

impl CartTotals {
    pub fn formatted_price(&self) -> String {
        format_currency(self.total_price)
    }

    pub fn formatted_duration(&self) -> String {
        convert_minutes(self.total_duration)
    }
}

/// Esito di [`schedule_all`] quando tutte le chiamate sono andate a buon fine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkOutcome {
    pub scheduled: Vec<i32>,
}

/// Somma prezzo e durata dei servizi. Un appuntamento senza servizio conta 0.
pub fn compute_totals(appointments: &[Appointment]) -> CartTotals {
    appointments
        .iter()
        .filter_map(|a| a.service.as_ref())
        .fold(CartTotals::default(), |acc, service| CartTotals {
            total_price: acc.total_price.saturating_add(service.price),
            total_duration: acc.total_duration.saturating_add(service.duration),
        })
}

/// Il carrello deve appartenere all'attore (o l'attore è un gerente) e ogni
/// appuntamento deve essere del cliente del carrello
pub fn ensure_cart_consistent(actor: &CurrentUser, cart: &Cart) -> Result<(), AppError> {
    ensure_can_manage(cart.client_id, Role::Client, actor)?;

    let foreign = cart.foreign_appointments();
    if !foreign.is_empty() {
        warn!(cart_id = cart.id, ?foreign, "Cart holds appointments of another client");
        return Err(AppError::validation("Carrinho inconsistente")
            .with_details(format!("appointments {:?} belong to another client", foreign)));
    }

    Ok(())
}

fn cart_keys(client_id: i32) -> [QueryKey; 3] {
    [
        QueryKey::CartByClient(client_id),
        QueryKey::UserProfile {
            role: Role::Client,
            id: client_id,
        },
        QueryKey::Appointments,
    ]
}

#[instrument(skip(state, actor), fields(user_id = actor.id))]
pub async fn get_cart(state: &AppState, actor: &CurrentUser) -> Result<Option<Cart>, AppError> {
    state
        .cache
        .get_or_fetch(QueryKey::CartByClient(actor.id), || {
            state.cart.find_by_client_id(&actor.id)
        })
        .await
}

#[instrument(skip(state, actor, service, form), fields(user_id = actor.id, service_id = service.id))]
pub async fn add_to_cart(
    state: &AppState,
    actor: &CurrentUser,
    service: &Service,
    form: &BookingFormDTO,
) -> Result<Appointment, AppError> {
    debug!("Adding appointment to cart");
    let result: Result<Appointment, AppError> = async {
        // 1. Creare l'appuntamento con tutte le guardie della prenotazione
        // 2. Agganciarlo al carrello: crearlo se il cliente non ne ha uno
        // 3. Se l'aggancio fallisce, cancellare l'appuntamento appena creato
        // 4. Se fallisce anche la cancellazione, segnalare l'operazione incompleta

        // tenuta fino alla fine dell'aggancio, oltre la guardia di `book`
        let _guard = state.in_flight.begin(format!("cart-add-{}", actor.id))?;
        let created = appointment::book(state, actor, service, form).await?;

        let attach: Result<(), AppError> = async {
            match state.cart.find_by_client_id(&actor.id).await? {
                None => {
                    let dto = CreateCartDTO {
                        client_id: actor.id,
                        appointment_id: created.id,
                    };
                    state.cart.create(&dto).await
                }
                Some(cart) => {
                    let dto = UpdateCartDTO {
                        id: cart.id,
                        client_id: actor.id,
                        appointment_id: created.id,
                    };
                    state.cart.update(&cart.id, &dto).await
                }
            }
        }
        .await;

        state.cache.invalidate_many(&cart_keys(actor.id));

        let Err(attach_error) = attach else {
            info!(appointment_id = created.id, "Appointment staged in cart");
            return Ok(created);
        };

        warn!(appointment_id = created.id, "Attach failed, rolling back: {}", attach_error);
        match state.appointment.delete(&created.id).await {
            Ok(()) => {
                info!(appointment_id = created.id, "Rollback completed");
                Err(attach_error)
            }
            Err(rollback_error) => {
                error!(
                    appointment_id = created.id,
                    "Rollback failed, appointment left outside the cart: {}", rollback_error
                );
                Err(AppError::partial_failure(
                    "O agendamento foi criado mas não foi adicionado ao carrinho",
                )
                .with_details(format!(
                    "appointment {} not in cart: attach failed ({}), delete failed ({})",
                    created.id, attach_error, rollback_error
                )))
            }
        }
    }
    .await;

    state.report(result, "Carrinho", "Agendamento adicionado ao carrinho!")
}

/// Toglie un appuntamento dal carrello senza controlli, usata anche in blocco
async fn send_schedule(state: &AppState, appointment: &Appointment) -> Result<i32, AppError> {
    let dto = UpdateAppointmentDTO {
        id: appointment.id,
        date: appointment.date,
        hour: appointment.hour.clone(),
        employee_id: appointment.employee_id,
        cart_id: None,
    };
    state.appointment.update(&appointment.id, &dto).await?;
    Ok(appointment.id)
}

#[instrument(skip(state, actor, appointment), fields(user_id = actor.id, appointment_id = appointment.id))]
pub async fn schedule_appointment(
    state: &AppState,
    actor: &CurrentUser,
    appointment: &Appointment,
) -> Result<(), AppError> {
    let result: Result<(), AppError> = async {
        ensure_can_manage(appointment.client_id, Role::Client, actor)?;
        if appointment.cart_id.is_none() {
            return Err(AppError::validation("Agendamento não está no carrinho"));
        }

        let _guard = state
            .in_flight
            .begin(format!("appointment-{}", appointment.id))?;

        send_schedule(state, appointment).await?;

        info!("Appointment scheduled");
        state.cache.invalidate_many(&cart_keys(appointment.client_id));
        state.cache.invalidate(&QueryKey::Appointment(appointment.id));
        Ok(())
    }
    .await;

    state.report(result, "Carrinho", "Agendamento marcado com sucesso!")
}

/// Pianifica tutti gli appuntamenti del carrello in parallelo.
///
/// Non è transazionale: i successi non vengono annullati se qualche chiamata fallisce.
#[instrument(skip(state, actor, cart), fields(user_id = actor.id, cart_id = cart.id))]
pub async fn schedule_all(
    state: &AppState,
    actor: &CurrentUser,
    cart: &Cart,
) -> Result<BulkOutcome, AppError> {
    let result: Result<BulkOutcome, AppError> = async {
        ensure_cart_consistent(actor, cart)?;
        if cart.appointments.is_empty() {
            debug!("Nothing to schedule");
            return Ok(BulkOutcome::default());
        }

        let _guard = state.in_flight.begin(format!("cart-{}", cart.id))?;

        let results = join_all(
            cart.appointments
                .iter()
                .map(|appointment| send_schedule(state, appointment)),
        )
        .await;

        let mut scheduled = Vec::new();
        let mut failed = Vec::new();
        let mut first_error = None;
        for (appointment, outcome) in cart.appointments.iter().zip(results) {
            match outcome {
                Ok(id) => scheduled.push(id),
                Err(e) => {
                    warn!(appointment_id = appointment.id, "Scheduling failed: {}", e);
                    failed.push(appointment.id);
                    first_error.get_or_insert(e);
                }
            }
        }

        if !scheduled.is_empty() {
            state.cache.invalidate_many(&cart_keys(cart.client_id));
        }

        match first_error {
            None => {
                info!(count = scheduled.len(), "Cart scheduled");
                Ok(BulkOutcome { scheduled })
            }
            Some(e) if scheduled.is_empty() => Err(e),
            Some(_) => Err(AppError::partial_failure(
                "Alguns agendamentos não foram marcados",
            )
            .with_details(format!("scheduled {:?}, failed {:?}", scheduled, failed))),
        }
    }
    .await;

    state.report(result, "Carrinho", "Agendamentos marcados com sucesso!")
}

/// Svuota il carrello. Gli appuntamenti restano.
#[instrument(skip(state, actor, cart), fields(user_id = actor.id, cart_id = cart.id))]
pub async fn clear_cart(
    state: &AppState,
    actor: &CurrentUser,
    cart: &Cart,
    confirmation: Confirmation,
) -> Result<bool, AppError> {
    if confirmation == Confirmation::Dismissed {
        return Ok(false);
    }

    let result: Result<bool, AppError> = async {
        ensure_cart_consistent(actor, cart)?;
        let _guard = state.in_flight.begin(format!("cart-{}", cart.id))?;

        state.cart.delete(&cart.id).await?;

        info!("Cart cleared");
        state.cache.invalidate_many(&cart_keys(cart.client_id));
        Ok(true)
    }
    .await;

    state.report(result, "Carrinho", "Carrinho esvaziado!")
}

/// Cancella un appuntamento del carrello, con le stesse regole di `delete_appointment`
#[instrument(skip(state, actor, cart), fields(user_id = actor.id, cart_id = cart.id))]
pub async fn remove_from_cart(
    state: &AppState,
    actor: &CurrentUser,
    cart: &Cart,
    appointment_id: i32,
    confirmation: Confirmation,
) -> Result<bool, AppError> {
    if confirmation == Confirmation::Dismissed {
        return Ok(false);
    }

    let result: Result<bool, AppError> = async {
        ensure_cart_consistent(actor, cart)?;
        let staged = cart
            .appointments
            .iter()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| AppError::not_found("Agendamento não está no carrinho"))?;

        appointment::remove(state, actor, staged).await?;
        Ok(true)
    }
    .await;

    state.report(result, "Carrinho", "Agendamento removido do carrinho!")
}
