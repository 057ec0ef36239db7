//! Bearer-token authentication middleware
//!
//! Applied to the mutating route groups. A missing token is rejected as
//! unauthenticated (401); a token that is present but invalid or expired is
//! rejected as forbidden (403).

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{AppError, ErrorBody};
use crate::services::AuthService;
use crate::AppState;

/// Admin identity decoded from a validated token
#[derive(Clone, Debug)]
pub struct AuthAdmin {
    pub id: i32,
    pub username: String,
}

/// Validate the bearer token and attach the decoded admin to the request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => return AppError::MissingToken.into_response(),
    };

    let auth = AuthService::new(state.config.jwt.secret.clone());
    let claims = match auth.validate_token(token) {
        Ok(claims) => claims,
        Err(err) => return err.into_response(),
    };

    request.extensions_mut().insert(AuthAdmin {
        id: claims.id,
        username: claims.username,
    });

    next.run(request).await
}

/// Extractor for the authenticated admin on protected routes
#[derive(Clone, Debug)]
pub struct CurrentAdmin(pub AuthAdmin);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorBody>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthAdmin>()
            .cloned()
            .map(CurrentAdmin)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorBody {
                        message: "Authentication token required".to_string(),
                        error: None,
                    }),
                )
            })
    }
}
