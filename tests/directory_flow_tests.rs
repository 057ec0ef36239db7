//! End-to-end directory flows against a live database.
//!
//! These tests exercise the services directly and need a migrated Postgres
//! instance; set DATABASE_URL and run with `cargo test -- --ignored`.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use bizdir_backend::error::AppError;
use bizdir_backend::services::admin::{CreateAdminInput, UpdateAdminInput};
use bizdir_backend::services::business::{CreateBusinessInput, UpdateBusinessInput};
use bizdir_backend::services::business_type::TypeNameInput;
use bizdir_backend::services::{AdminService, AuthService, BusinessService, BusinessTypeService};

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for database tests");
    PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("failed to connect to test database")
}

/// Unique suffix so tests don't collide with existing rows or each other
fn suffix() -> String {
    format!(
        "{:x}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    )
}

fn location(x: f64, y: f64) -> serde_json::Value {
    serde_json::json!({ "x": x, "y": y })
}

#[tokio::test]
#[ignore] // Requires database connection
async fn case_insensitive_type_conflict_and_referential_guard() {
    let pool = test_pool().await;
    let types = BusinessTypeService::new(pool.clone());
    let businesses = BusinessService::new(pool.clone());
    let sfx = suffix();

    let cafe = types
        .create_type(TypeNameInput {
            name: format!("Cafe-{}", sfx),
        })
        .await
        .unwrap();

    // Same name in a different case must be rejected
    let dup = types
        .create_type(TypeNameInput {
            name: format!("CAFE-{}", sfx.to_uppercase()),
        })
        .await;
    assert!(matches!(dup, Err(AppError::Conflict(_))));

    let joes = businesses
        .create_business(CreateBusinessInput {
            name: format!("Joe's-{}", sfx),
            type_id: cafe.id,
            location: Some(location(1.0, 2.0)),
        })
        .await
        .unwrap();

    // Location round-trips exactly
    let fetched = businesses.get_business(joes.id).await.unwrap();
    assert_eq!(fetched.location.x, 1.0);
    assert_eq!(fetched.location.y, 2.0);
    assert_eq!(fetched.type_id, cafe.id);

    // The listing surfaces the type's display name
    let listing = businesses.get_businesses().await.unwrap();
    let row = listing.iter().find(|b| b.id == joes.id).unwrap();
    assert_eq!(row.type_name, cafe.name);

    // Deleting a referenced type is refused
    let blocked = types.delete_type(cafe.id).await;
    assert!(matches!(blocked, Err(AppError::ReferentialConflict(_))));

    // After the business goes, the type can go too
    businesses.delete_business(joes.id).await.unwrap();
    types.delete_type(cafe.id).await.unwrap();

    // A second delete reports the absence, and so does a rename
    let gone = types.delete_type(cafe.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));

    let rename_gone = types
        .update_type(
            cafe.id,
            TypeNameInput {
                name: format!("Espresso-{}", sfx),
            },
        )
        .await;
    assert!(matches!(rename_gone, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore] // Requires database connection
async fn invalid_location_persists_nothing() {
    let pool = test_pool().await;
    let types = BusinessTypeService::new(pool.clone());
    let businesses = BusinessService::new(pool.clone());
    let sfx = suffix();

    let t = types
        .create_type(TypeNameInput {
            name: format!("Bakery-{}", sfx),
        })
        .await
        .unwrap();

    let name = format!("Crumbs-{}", sfx);
    let result = businesses
        .create_business(CreateBusinessInput {
            name: name.clone(),
            type_id: t.id,
            location: Some(serde_json::json!({ "x": "5", "y": 2 })),
        })
        .await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM businesses WHERE name = $1")
        .bind(&name)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    types.delete_type(t.id).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires database connection
async fn partial_update_touches_only_supplied_fields() {
    let pool = test_pool().await;
    let types = BusinessTypeService::new(pool.clone());
    let businesses = BusinessService::new(pool.clone());
    let sfx = suffix();

    let old_type = types
        .create_type(TypeNameInput {
            name: format!("Diner-{}", sfx),
        })
        .await
        .unwrap();
    let new_type = types
        .create_type(TypeNameInput {
            name: format!("Bistro-{}", sfx),
        })
        .await
        .unwrap();

    let b = businesses
        .create_business(CreateBusinessInput {
            name: format!("Mel's-{}", sfx),
            type_id: old_type.id,
            location: Some(location(13.7563, 100.5018)),
        })
        .await
        .unwrap();

    // No supplied fields is an input error
    let empty = businesses
        .update_business(
            b.id,
            UpdateBusinessInput {
                name: None,
                type_id: None,
                location: None,
            },
        )
        .await;
    assert!(matches!(empty, Err(AppError::InvalidInput(_))));

    // A type_id-only update leaves name and location untouched
    let updated = businesses
        .update_business(
            b.id,
            UpdateBusinessInput {
                name: None,
                type_id: Some(new_type.id),
                location: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.type_id, new_type.id);
    assert_eq!(updated.name, b.name);
    assert_eq!(updated.location, b.location);

    businesses.delete_business(b.id).await.unwrap();
    types.delete_type(old_type.id).await.unwrap();
    types.delete_type(new_type.id).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires database connection
async fn admin_update_without_password_keeps_credential() {
    let pool = test_pool().await;
    let admins = AdminService::new(pool.clone());
    let auth = AuthService::new("integration-test-secret");
    let sfx = suffix();

    let username = format!("admin-{}", sfx);
    let created = admins
        .create_admin(CreateAdminInput {
            username: username.clone(),
            password: "original-pw".to_string(),
        })
        .await
        .unwrap();

    // Username-only update must not rotate the stored hash
    let renamed = format!("renamed-{}", sfx);
    admins
        .update_admin(
            created.id,
            UpdateAdminInput {
                username: renamed.clone(),
                password: None,
            },
        )
        .await
        .unwrap();

    let outcome = admins.login(&auth, &renamed, "original-pw").await.unwrap();
    assert_eq!(outcome.username, renamed);
    assert!(auth.validate_token(&outcome.token).is_ok());

    // Wrong password is unauthenticated, unknown username is not found
    let wrong = admins.login(&auth, &renamed, "other-pw").await;
    assert!(matches!(wrong, Err(AppError::Unauthorized(_))));

    let unknown = admins.login(&auth, &format!("nobody-{}", sfx), "pw").await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    admins.delete_admin(created.id).await.unwrap();
}
