//! AppointmentRepository - Repository per gli appuntamenti

use super::{ApiClient, Create, Delete, Read, ReadAll, Update};
use crate::core::AppError;
use crate::dtos::{CreateAppointmentDTO, UpdateAppointmentDTO, UpdateAppointmentStatusDTO};
use crate::entities::Appointment;
use crate::routes::{appointment, with_id};
use std::sync::Arc;

pub struct AppointmentRepository {
    api: Arc<ApiClient>,
}

impl AppointmentRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Cambio di stato con motivazione, `/appointment/updateStatus/{id}`
    pub async fn update_status(
        &self,
        id: &i32,
        data: &UpdateAppointmentStatusDTO,
    ) -> Result<(), AppError> {
        self.api
            .post_unit(&with_id(appointment::UPDATE_STATUS, *id), data)
            .await
    }
}

impl Create<Appointment, CreateAppointmentDTO> for AppointmentRepository {
    async fn create(&self, data: &CreateAppointmentDTO) -> Result<Appointment, AppError> {
        self.api.post(appointment::CREATE, data).await
    }
}

impl Read<Appointment, i32> for AppointmentRepository {
    async fn read(&self, id: &i32) -> Result<Option<Appointment>, AppError> {
        self.api
            .get_optional(&with_id(appointment::GET_ONE, *id))
            .await
    }
}

impl ReadAll<Appointment> for AppointmentRepository {
    async fn read_all(&self) -> Result<Vec<Appointment>, AppError> {
        self.api.get(appointment::GET_ALL).await
    }
}

impl Update<(), UpdateAppointmentDTO, i32> for AppointmentRepository {
    async fn update(&self, id: &i32, data: &UpdateAppointmentDTO) -> Result<(), AppError> {
        self.api
            .post_unit(&with_id(appointment::UPDATE, *id), data)
            .await
    }
}

impl Delete<i32> for AppointmentRepository {
    async fn delete(&self, id: &i32) -> Result<(), AppError> {
        self.api.delete(&with_id(appointment::DELETE, *id)).await
    }
}
