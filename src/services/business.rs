//! Business directory entries

use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::{is_unique_violation, AppError, AppResult};

/// Service for directory entries
#[derive(Clone)]
pub struct BusinessService {
    db: PgPool,
}

/// A 2-D location, persisted as a pair of double-precision coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

/// Business row as stored
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Business {
    pub id: i32,
    pub name: String,
    pub type_id: i32,
    #[sqlx(flatten)]
    pub location: Location,
}

/// Listing row joined against the type table for its display name
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BusinessListing {
    pub id: i32,
    pub name: String,
    #[sqlx(flatten)]
    pub location: Location,
    pub type_name: String,
}

/// Input for creating a business.
///
/// `location` stays a raw JSON value so that a malformed payload (missing,
/// or with non-numeric coordinates) is reported as a 400 with the usual
/// message instead of a body-deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateBusinessInput {
    pub name: String,
    pub type_id: i32,
    #[serde(default)]
    pub location: Option<serde_json::Value>,
}

/// Partial-update input; only supplied fields are written
#[derive(Debug, Deserialize)]
pub struct UpdateBusinessInput {
    pub name: Option<String>,
    pub type_id: Option<i32>,
    #[serde(default)]
    pub location: Option<serde_json::Value>,
}

/// Accept only an object with numeric x and y.
fn parse_location(value: &serde_json::Value) -> Option<Location> {
    let x = value.get("x")?.as_f64()?;
    let y = value.get("y")?.as_f64()?;
    Some(Location { x, y })
}

const SELECT_COLUMNS: &str = "id, name, type_id, location_x AS x, location_y AS y";

impl BusinessService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all businesses with their type display names
    pub async fn get_businesses(&self) -> AppResult<Vec<BusinessListing>> {
        let businesses = sqlx::query_as::<_, BusinessListing>(
            r#"
            SELECT b.id, b.name, b.location_x AS x, b.location_y AS y, t.name AS type_name
            FROM businesses b
            JOIN types t ON b.type_id = t.id
            ORDER BY b.id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        if businesses.is_empty() {
            return Err(AppError::NotFound("No businesses found".to_string()));
        }

        Ok(businesses)
    }

    /// Get a business by id (raw row, including type_id)
    pub async fn get_business(&self, id: i32) -> AppResult<Business> {
        sqlx::query_as::<_, Business>(&format!(
            "SELECT {} FROM businesses WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Business not found".to_string()))
    }

    /// Create a business; the location must carry numeric x and y
    pub async fn create_business(&self, input: CreateBusinessInput) -> AppResult<Business> {
        let location = input
            .location
            .as_ref()
            .and_then(parse_location)
            .ok_or_else(|| AppError::InvalidInput("Invalid location format".to_string()))?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM businesses WHERE LOWER(name) = $1",
        )
        .bind(input.name.to_lowercase())
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::Conflict(
                "Business name already exists".to_string(),
            ));
        }

        let created = sqlx::query_as::<_, Business>(&format!(
            r#"
            INSERT INTO businesses (name, type_id, location_x, location_y)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(&input.name)
        .bind(input.type_id)
        .bind(location.x)
        .bind(location.y)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Business name already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(created)
    }

    /// Partial update: fold only the supplied fields into the SET list.
    pub async fn update_business(&self, id: i32, input: UpdateBusinessInput) -> AppResult<Business> {
        // Location, when present, must still be a numeric pair
        let location = match input.location.as_ref() {
            Some(value) => Some(
                parse_location(value)
                    .ok_or_else(|| AppError::InvalidInput("Invalid location format".to_string()))?,
            ),
            None => None,
        };

        if let Some(ref name) = input.name {
            let taken = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM businesses WHERE LOWER(name) = $1 AND id != $2",
            )
            .bind(name.to_lowercase())
            .bind(id)
            .fetch_one(&self.db)
            .await?;

            if taken > 0 {
                return Err(AppError::Conflict(
                    "Business name already exists".to_string(),
                ));
            }
        }

        if input.name.is_none() && input.type_id.is_none() && location.is_none() {
            return Err(AppError::InvalidInput("No fields to update".to_string()));
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE businesses SET ");
        {
            let mut assignments = builder.separated(", ");
            if let Some(ref name) = input.name {
                assignments.push("name = ").push_bind_unseparated(name);
            }
            if let Some(type_id) = input.type_id {
                assignments.push("type_id = ").push_bind_unseparated(type_id);
            }
            if let Some(location) = location {
                assignments
                    .push("location_x = ")
                    .push_bind_unseparated(location.x);
                assignments
                    .push("location_y = ")
                    .push_bind_unseparated(location.y);
            }
        }
        builder.push(" WHERE id = ").push_bind(id);
        builder.push(format!(" RETURNING {}", SELECT_COLUMNS));

        let updated = builder
            .build_query_as::<Business>()
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Business name already exists".to_string())
                } else {
                    AppError::Database(e)
                }
            })?
            .ok_or_else(|| AppError::NotFound("Business not found".to_string()))?;

        Ok(updated)
    }

    /// Delete a business by id
    pub async fn delete_business(&self, id: i32) -> AppResult<()> {
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM businesses WHERE id = $1")
                .bind(id)
                .fetch_one(&self.db)
                .await?;

        if existing == 0 {
            return Err(AppError::NotFound("Business not found".to_string()));
        }

        sqlx::query("DELETE FROM businesses WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
