//! Common repository traits
//!
//! This module defines generic interfaces for the REST resources of the salon API.

use crate::core::AppError;

/// Trait for creating new entities through the API
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with ID assigned by the server)
/// * `CreateDTO` - DTO for creation (without ID)
pub trait Create<Entity, CreateDTO> {
    /// # Returns
    /// * `Ok(Entity)` - Created entity with ID assigned by the server
    /// * `Err(AppError)` - Transport or API error
    async fn create(&self, data: &CreateDTO) -> Result<Entity, AppError>;
}

/// Trait for reading a single entity by id
pub trait Read<Entity, Id> {
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - The API answered 404
    /// * `Err(AppError)` - Any other failure
    async fn read(&self, id: &Id) -> Result<Option<Entity>, AppError>;
}

/// Trait for listing every entity of a resource
pub trait ReadAll<Entity> {
    async fn read_all(&self) -> Result<Vec<Entity>, AppError>;
}

/// Trait for updating existing entities
///
/// # Type Parameters
/// * `Entity` - Type of the updated entity
/// * `UpdateDTO` - DTO for updating
/// * `Id` - Type of the id, appended as the last path segment
pub trait Update<Entity, UpdateDTO, Id> {
    async fn update(&self, id: &Id, data: &UpdateDTO) -> Result<Entity, AppError>;
}

/// Trait for deleting entities
pub trait Delete<Id> {
    /// # Returns
    /// * `Ok(())` - Deletion successful
    /// * `Err(AppError)` - Error during deletion
    async fn delete(&self, id: &Id) -> Result<(), AppError>;
}
