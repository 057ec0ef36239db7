//! Admin account management and login

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::services::auth::{self, AuthService};

/// Admin service for account CRUD and authentication
#[derive(Clone)]
pub struct AdminService {
    db: PgPool,
}

/// Admin account row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Admin {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

/// Input for registering an admin
#[derive(Debug, Deserialize)]
pub struct CreateAdminInput {
    pub username: String,
    pub password: String,
}

/// Input for a self-service admin update; omitted or empty password keeps
/// the stored hash
#[derive(Debug, Deserialize)]
pub struct UpdateAdminInput {
    pub username: String,
    pub password: Option<String>,
}

/// Successful login payload
#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub username: String,
}

impl AdminService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all admins
    pub async fn get_admins(&self) -> AppResult<Vec<Admin>> {
        let admins = sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash FROM admins ORDER BY id ASC",
        )
        .fetch_all(&self.db)
        .await?;

        if admins.is_empty() {
            return Err(AppError::NotFound("No admins found".to_string()));
        }

        Ok(admins)
    }

    /// Get an admin by id
    pub async fn get_admin(&self, id: i32) -> AppResult<Admin> {
        sqlx::query_as::<_, Admin>("SELECT id, username, password_hash FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))
    }

    /// Register a new admin; the password is hashed before storage
    pub async fn create_admin(&self, input: CreateAdminInput) -> AppResult<Admin> {
        // Usernames are unique under case-sensitive comparison
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM admins WHERE username = $1",
        )
        .bind(&input.username)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::Conflict("Admin name already exists".to_string()));
        }

        let password_hash = auth::hash_password(&input.password)?;

        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(&input.username)
        .bind(&password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Admin name already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(admin)
    }

    /// Update username and optionally the password.
    ///
    /// The password merge happens at the storage layer: a NULL bind keeps
    /// the previous hash via COALESCE, so a username-only update never
    /// touches the credential.
    pub async fn update_admin(&self, id: i32, input: UpdateAdminInput) -> AppResult<Admin> {
        let taken = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM admins WHERE username = $1 AND id != $2",
        )
        .bind(&input.username)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        if taken > 0 {
            return Err(AppError::Conflict("Admin name already exists".to_string()));
        }

        let password_hash = match input.password.as_deref().filter(|p| !p.is_empty()) {
            Some(plaintext) => Some(auth::hash_password(plaintext)?),
            None => None,
        };

        let admin = sqlx::query_as::<_, Admin>(
            r#"
            UPDATE admins
            SET username = $1,
                password_hash = COALESCE($2, password_hash)
            WHERE id = $3
            RETURNING id, username, password_hash
            "#,
        )
        .bind(&input.username)
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Admin name already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?
        .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

        Ok(admin)
    }

    /// Delete an admin by id
    pub async fn delete_admin(&self, id: i32) -> AppResult<()> {
        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins WHERE id = $1")
            .bind(id)
            .fetch_one(&self.db)
            .await?;

        if existing == 0 {
            return Err(AppError::NotFound("Admin not found".to_string()));
        }

        sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Authenticate an admin and issue a bearer token
    pub async fn login(
        &self,
        auth: &AuthService,
        username: &str,
        password: &str,
    ) -> AppResult<LoginOutcome> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

        let valid = auth::verify_password(password, &admin.password_hash)?;
        if !valid {
            return Err(AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        let token = auth.issue_token(admin.id, &admin.username)?;

        Ok(LoginOutcome {
            token,
            username: admin.username,
        })
    }
}
