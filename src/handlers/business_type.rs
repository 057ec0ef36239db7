//! Business type handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppError;
use crate::handlers::MessageResponse;
use crate::middleware::CurrentAdmin;
use crate::services::business_type::{BusinessType, TypeNameInput};
use crate::services::BusinessTypeService;
use crate::AppState;

/// Get all types (empty list is a normal 200)
pub async fn list_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<BusinessType>>, AppError> {
    let types = BusinessTypeService::new(state.db.clone()).get_types().await?;
    Ok(Json(types))
}

/// Get a type by id
pub async fn get_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BusinessType>, AppError> {
    let business_type = BusinessTypeService::new(state.db.clone()).get_type(id).await?;
    Ok(Json(business_type))
}

/// Create a new type
pub async fn create_type(
    State(state): State<AppState>,
    Json(input): Json<TypeNameInput>,
) -> Result<(StatusCode, Json<BusinessType>), AppError> {
    let created = BusinessTypeService::new(state.db.clone())
        .create_type(input)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename a type
pub async fn update_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<TypeNameInput>,
) -> Result<Json<BusinessType>, AppError> {
    let updated = BusinessTypeService::new(state.db.clone())
        .update_type(id, input)
        .await?;
    Ok(Json(updated))
}

/// Delete a type unless a business still references it
pub async fn delete_type(
    State(state): State<AppState>,
    CurrentAdmin(actor): CurrentAdmin,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    BusinessTypeService::new(state.db.clone()).delete_type(id).await?;
    tracing::info!(admin = %actor.username, deleted_id = id, "type deleted");
    Ok(Json(MessageResponse::new("Type deleted")))
}
