//! Business type (category) management

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{is_unique_violation, AppError, AppResult};

/// Service for the category labels attached to businesses
#[derive(Clone)]
pub struct BusinessTypeService {
    db: PgPool,
}

/// Business type row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BusinessType {
    pub id: i32,
    pub name: String,
}

/// Input for creating or renaming a type
#[derive(Debug, Deserialize)]
pub struct TypeNameInput {
    pub name: String,
}

impl BusinessTypeService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all types; an empty directory yields an empty list
    pub async fn get_types(&self) -> AppResult<Vec<BusinessType>> {
        let types =
            sqlx::query_as::<_, BusinessType>("SELECT id, name FROM types ORDER BY id ASC")
                .fetch_all(&self.db)
                .await?;

        Ok(types)
    }

    /// Get a type by id
    pub async fn get_type(&self, id: i32) -> AppResult<BusinessType> {
        sqlx::query_as::<_, BusinessType>("SELECT id, name FROM types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Type not found".to_string()))
    }

    /// Create a new type; names are unique case-insensitively
    pub async fn create_type(&self, input: TypeNameInput) -> AppResult<BusinessType> {
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM types WHERE LOWER(name) = $1",
        )
        .bind(input.name.to_lowercase())
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::Conflict("Type name already exists".to_string()));
        }

        let created = sqlx::query_as::<_, BusinessType>(
            "INSERT INTO types (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&input.name)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Type name already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(created)
    }

    /// Rename a type
    pub async fn update_type(&self, id: i32, input: TypeNameInput) -> AppResult<BusinessType> {
        let taken = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM types WHERE LOWER(name) = $1 AND id != $2",
        )
        .bind(input.name.to_lowercase())
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        if taken > 0 {
            return Err(AppError::Conflict("Type name already exists".to_string()));
        }

        let updated = sqlx::query_as::<_, BusinessType>(
            "UPDATE types SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(&input.name)
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Type name already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?
        .ok_or_else(|| AppError::NotFound("Type not found".to_string()))?;

        Ok(updated)
    }

    /// Delete a type, refusing while any business still references it
    pub async fn delete_type(&self, id: i32) -> AppResult<()> {
        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM types WHERE id = $1")
            .bind(id)
            .fetch_one(&self.db)
            .await?;

        if existing == 0 {
            return Err(AppError::NotFound("Type not found".to_string()));
        }

        let referenced = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM businesses WHERE type_id = $1",
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        if referenced > 0 {
            return Err(AppError::ReferentialConflict(
                "Cannot delete this type because it is associated with a business".to_string(),
            ));
        }

        sqlx::query("DELETE FROM types WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
