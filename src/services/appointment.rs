//! Appointment services - Ciclo di vita degli appuntamenti
//!
//! Ogni operazione controlla ruolo, stato e disponibilità PRIMA di chiamare l'API.
//! Un controllo fallito non produce nessuna richiesta di rete.

use crate::core::{
    AppError, AppState, Confirmation, QueryKey, ensure_can_manage, require_role,
};
use crate::dtos::{
    AppointmentFilter, BookingFormDTO, CreateAppointmentDTO, UpdateAppointmentDTO,
    UpdateAppointmentStatusDTO,
};
use crate::entities::{Appointment, AppointmentStatus, CurrentUser, Employee, Role, Service};
use crate::repositories::{Create, Delete, Read, ReadAll, Update};
use crate::services::availability::ensure_slot_available;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

// ********************* GUARDIE **********************//

/// Solo un cliente può prenotare o modificare una prenotazione
pub fn ensure_booking_role(actor: &CurrentUser) -> Result<(), AppError> {
    if actor.role == Role::Client {
        return Ok(());
    }

    warn!(user_id = actor.id, role = %actor.role, "Booking attempted by a non-client");
    Err(AppError::access_denied("Apenas clientes podem fazer agendamentos"))
}

/// Solo gli appuntamenti PENDING sono modificabili, per qualsiasi ruolo
pub fn ensure_editable(appointment: &Appointment) -> Result<(), AppError> {
    if appointment.is_pending() {
        return Ok(());
    }

    warn!(
        appointment_id = appointment.id,
        status = %appointment.status,
        "Edit attempted on a non-pending appointment"
    );
    Err(AppError::access_denied(
        "Apenas agendamentos pendentes podem ser editados",
    ))
}

pub fn ensure_transition(from: AppointmentStatus, to: AppointmentStatus) -> Result<(), AppError> {
    if from.can_transition_to(to) {
        return Ok(());
    }

    warn!(%from, %to, "Illegal status transition");
    Err(AppError::validation("Mudança de estado não permitida").with_details(format!(
        "{} -> {}",
        from.display_name(),
        to.display_name()
    )))
}

/// Motivazione inviata al cliente insieme al nuovo stato
pub fn status_change_reason(status: AppointmentStatus, employee: &Employee) -> String {
    format!(
        "O estado do agendamento foi alterado para {} entre em contato com o funcionário para mais informações, nome do funcionário: {} contato: {}",
        status.display_name(),
        employee.username,
        employee.cellphone
    )
}

fn profile_key(user: &CurrentUser) -> QueryKey {
    QueryKey::UserProfile {
        role: user.role,
        id: user.id,
    }
}

// ********************* LETTURE **********************//

#[instrument(skip(state))]
pub async fn list_appointments(state: &AppState) -> Result<Vec<Appointment>, AppError> {
    state
        .cache
        .get_or_fetch(QueryKey::Appointments, || state.appointment.read_all())
        .await
}

#[instrument(skip(state), fields(appointment_id = %id))]
pub async fn get_appointment(state: &AppState, id: i32) -> Result<Appointment, AppError> {
    state
        .cache
        .get_or_fetch(QueryKey::Appointment(id), || async {
            state
                .appointment
                .read(&id)
                .await?
                .ok_or_else(|| AppError::not_found("Agendamento não encontrado"))
        })
        .await
}

/// Filtra per nome della controparte (il cliente se chi guarda è un funzionario,
/// altrimenti il funzionario) o nome del servizio, e opzionalmente per giorno
pub fn filter_appointments<'a>(
    appointments: &'a [Appointment],
    viewer_role: Role,
    filter: &AppointmentFilter,
) -> Vec<&'a Appointment> {
    let query = filter.search.trim().to_lowercase();

    appointments
        .iter()
        .filter(|appointment| {
            let counterpart = match viewer_role {
                Role::Employee => appointment.client.as_ref().map(|c| c.username.as_str()),
                _ => appointment.employee.as_ref().map(|e| e.username.as_str()),
            };
            let service = appointment.service.as_ref().map(|s| s.name.as_str());

            let matches_search = query.is_empty()
                || [counterpart, service]
                    .into_iter()
                    .flatten()
                    .any(|name| name.to_lowercase().contains(&query));

            let matches_date = filter.date.is_none_or(|day| appointment.date == day);

            matches_search && matches_date
        })
        .collect()
}

// ********************* MUTAZIONI **********************//

/// Crea l'appuntamento senza pubblicare toast, riusata dal carrello
pub(crate) async fn book(
    state: &AppState,
    actor: &CurrentUser,
    service: &Service,
    form: &BookingFormDTO,
) -> Result<Appointment, AppError> {
    // 1. Verificare che l'attore sia un cliente
    // 2. Validare il form (data non passata, orario fra 8 e 20)
    // 3. Verificare che il funzionario esegua il servizio e che l'orario non sia bloccato
    // 4. Bloccare i doppi invii
    // 5. Creare l'appuntamento in stato PENDING per l'attore
    // 6. Invalidare profilo e lista appuntamenti

    ensure_booking_role(actor)?;
    form.validate()?;
    let employee = ensure_slot_available(service, form.employee_id, form.date, &form.hour)?;

    let _guard = state
        .in_flight
        .begin(format!("appointment-create-{}", actor.id))?;

    let dto = CreateAppointmentDTO {
        service_id: service.id,
        employee_id: employee.id,
        client_id: actor.id,
        date: form.date,
        hour: form.hour.trim().to_string(),
        status: AppointmentStatus::Pending,
    };
    let created = state.appointment.create(&dto).await?;

    info!(appointment_id = created.id, "Appointment created");
    state
        .cache
        .invalidate_many(&[profile_key(actor), QueryKey::Appointments]);

    Ok(created)
}

#[instrument(skip(state, actor, service, form), fields(user_id = actor.id, service_id = service.id))]
pub async fn create_appointment(
    state: &AppState,
    actor: &CurrentUser,
    service: &Service,
    form: &BookingFormDTO,
) -> Result<Appointment, AppError> {
    debug!("Booking appointment");
    let result = book(state, actor, service, form).await;
    state.report(result, "Agendamento", "Agendamento realizado com sucesso!")
}

#[instrument(skip(state, actor, appointment, service, form), fields(user_id = actor.id, appointment_id = appointment.id))]
pub async fn edit_appointment(
    state: &AppState,
    actor: &CurrentUser,
    appointment: &Appointment,
    service: &Service,
    form: &BookingFormDTO,
) -> Result<(), AppError> {
    debug!("Editing appointment");
    let result: Result<(), AppError> = async {
        // 1. Lo stato deve essere PENDING, qualunque sia il ruolo
        // 2. Solo il cliente proprietario può modificare
        // 3. Validare il form e il nuovo orario
        // 4. Inviare l'aggiornamento mantenendo il carrello corrente

        ensure_editable(appointment)?;
        ensure_booking_role(actor)?;
        ensure_can_manage(appointment.client_id, Role::Client, actor)?;

        if service.id != appointment.service_id {
            return Err(AppError::validation("Serviço não corresponde ao agendamento"));
        }
        form.validate()?;
        let employee = ensure_slot_available(service, form.employee_id, form.date, &form.hour)?;

        let _guard = state
            .in_flight
            .begin(format!("appointment-{}", appointment.id))?;

        let dto = UpdateAppointmentDTO {
            id: appointment.id,
            date: form.date,
            hour: form.hour.trim().to_string(),
            employee_id: employee.id,
            cart_id: appointment.cart_id,
        };
        state.appointment.update(&appointment.id, &dto).await?;

        info!("Appointment updated");
        state.cache.invalidate_many(&[
            profile_key(actor),
            QueryKey::Appointments,
            QueryKey::Appointment(appointment.id),
            QueryKey::CartByClient(appointment.client_id),
        ]);
        Ok(())
    }
    .await;

    state.report(result, "Agendamento", "Agendamento atualizado com sucesso!")
}

/// Cancella l'appuntamento senza toast, riusata dal carrello
pub(crate) async fn remove(
    state: &AppState,
    actor: &CurrentUser,
    appointment: &Appointment,
) -> Result<(), AppError> {
    ensure_can_manage(appointment.client_id, Role::Client, actor)?;

    let _guard = state
        .in_flight
        .begin(format!("appointment-{}", appointment.id))?;

    state.appointment.delete(&appointment.id).await?;

    info!(appointment_id = appointment.id, "Appointment deleted");
    state.cache.invalidate_many(&[
        profile_key(actor),
        QueryKey::UserProfile {
            role: Role::Client,
            id: appointment.client_id,
        },
        QueryKey::Appointments,
        QueryKey::Appointment(appointment.id),
        QueryKey::CartByClient(appointment.client_id),
    ]);
    Ok(())
}

/// `Ok(false)` se l'utente ha chiuso la conferma: nessuna chiamata
#[instrument(skip(state, actor, appointment), fields(user_id = actor.id, appointment_id = appointment.id))]
pub async fn delete_appointment(
    state: &AppState,
    actor: &CurrentUser,
    appointment: &Appointment,
    confirmation: Confirmation,
) -> Result<bool, AppError> {
    if confirmation == Confirmation::Dismissed {
        debug!("Deletion dismissed");
        return Ok(false);
    }

    let result = remove(state, actor, appointment).await.map(|_| true);
    state.report(result, "Agendamento", "Agendamento excluído com sucesso!")
}

#[instrument(skip(state, actor, appointment), fields(user_id = actor.id, appointment_id = appointment.id))]
pub async fn update_appointment_status(
    state: &AppState,
    actor: &CurrentUser,
    appointment: &Appointment,
    new_status: AppointmentStatus,
) -> Result<(), AppError> {
    debug!("Updating appointment status");
    let result: Result<(), AppError> = async {
        // 1. Solo il funzionario dell'appuntamento o un gerente
        // 2. La transizione deve essere legale, altrimenti lo stato resta invariato
        // 3. Recuperare nome e contatto del funzionario per la motivazione
        // 4. Inviare stato e motivazione

        require_role(actor, &[Role::Employee, Role::Manager])?;
        if actor.role == Role::Employee && actor.id != appointment.employee_id {
            warn!("Employee is not assigned to this appointment");
            return Err(AppError::access_denied(
                "Você não tem permissão para esta operação",
            ));
        }
        ensure_transition(appointment.status, new_status)?;

        let employee = match &appointment.employee {
            Some(employee) => employee.clone(),
            None => state
                .user
                .read_employee(&appointment.employee_id)
                .await?
                .ok_or_else(|| AppError::not_found("Funcionário não encontrado"))?,
        };

        let _guard = state
            .in_flight
            .begin(format!("appointment-{}", appointment.id))?;

        let dto = UpdateAppointmentStatusDTO {
            id: appointment.id,
            status: new_status,
            reason: status_change_reason(new_status, &employee),
        };
        state.appointment.update_status(&appointment.id, &dto).await?;

        info!(from = %appointment.status, "Appointment status changed");
        state.cache.invalidate_many(&[
            profile_key(actor),
            QueryKey::UserProfile {
                role: Role::Client,
                id: appointment.client_id,
            },
            QueryKey::Appointments,
            QueryKey::Appointment(appointment.id),
        ]);
        Ok(())
    }
    .await;

    state.report(result, "Agendamento", "Estado do agendamento atualizado!")
}
