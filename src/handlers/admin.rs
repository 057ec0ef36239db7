//! Admin account handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::handlers::MessageResponse;
use crate::middleware::CurrentAdmin;
use crate::services::admin::{Admin, CreateAdminInput, LoginOutcome, UpdateAdminInput};
use crate::services::{AdminService, AuthService};
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Get all admins
pub async fn list_admins(State(state): State<AppState>) -> Result<Json<Vec<Admin>>, AppError> {
    let admins = AdminService::new(state.db.clone()).get_admins().await?;
    Ok(Json(admins))
}

/// Get an admin by id
pub async fn get_admin(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Admin>, AppError> {
    let admin = AdminService::new(state.db.clone()).get_admin(id).await?;
    Ok(Json(admin))
}

/// Register a new admin
pub async fn create_admin(
    State(state): State<AppState>,
    Json(input): Json<CreateAdminInput>,
) -> Result<(StatusCode, Json<Admin>), AppError> {
    let admin = AdminService::new(state.db.clone()).create_admin(input).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

/// Update an admin's username and optionally password
pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateAdminInput>,
) -> Result<Json<Admin>, AppError> {
    let admin = AdminService::new(state.db.clone())
        .update_admin(id, input)
        .await?;
    Ok(Json(admin))
}

/// Delete an admin
pub async fn delete_admin(
    State(state): State<AppState>,
    CurrentAdmin(actor): CurrentAdmin,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    AdminService::new(state.db.clone()).delete_admin(id).await?;
    tracing::info!(admin = %actor.username, deleted_id = id, "admin deleted");
    Ok(Json(MessageResponse::new("Admin deleted")))
}

/// Authenticate an admin and issue a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginOutcome>, AppError> {
    let auth = AuthService::new(state.config.jwt.secret.clone());
    let outcome = AdminService::new(state.db.clone())
        .login(&auth, &body.username, &body.password)
        .await?;
    Ok(Json(outcome))
}

/// Tokens are stateless; logging out is a client-side discard.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully"))
}
