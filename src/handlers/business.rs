//! Business directory handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppError;
use crate::handlers::MessageResponse;
use crate::middleware::CurrentAdmin;
use crate::services::business::{
    Business, BusinessListing, CreateBusinessInput, UpdateBusinessInput,
};
use crate::services::BusinessService;
use crate::AppState;

/// Get all businesses joined with their type names
pub async fn list_businesses(
    State(state): State<AppState>,
) -> Result<Json<Vec<BusinessListing>>, AppError> {
    let businesses = BusinessService::new(state.db.clone()).get_businesses().await?;
    Ok(Json(businesses))
}

/// Get a business by id
pub async fn get_business(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Business>, AppError> {
    let business = BusinessService::new(state.db.clone()).get_business(id).await?;
    Ok(Json(business))
}

/// Create a new business
pub async fn create_business(
    State(state): State<AppState>,
    Json(input): Json<CreateBusinessInput>,
) -> Result<(StatusCode, Json<Business>), AppError> {
    let created = BusinessService::new(state.db.clone())
        .create_business(input)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially update a business
pub async fn update_business(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateBusinessInput>,
) -> Result<Json<Business>, AppError> {
    let updated = BusinessService::new(state.db.clone())
        .update_business(id, input)
        .await?;
    Ok(Json(updated))
}

/// Delete a business
pub async fn delete_business(
    State(state): State<AppState>,
    CurrentAdmin(actor): CurrentAdmin,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    BusinessService::new(state.db.clone()).delete_business(id).await?;
    tracing::info!(admin = %actor.username, deleted_id = id, "business deleted");
    Ok(Json(MessageResponse::new("Business deleted")))
}
