//! Route definitions for the Business Directory backend

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create the resource routes, mounted at the application root
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/admin", admin_routes(state.clone()))
        .nest("/type", type_routes(state.clone()))
        .nest("/business", business_routes(state))
}

/// Admin routes: CRUD is protected, login/logout are public
fn admin_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(handlers::list_admins).post(handlers::create_admin))
        .route(
            "/:id",
            get(handlers::get_admin)
                .put(handlers::update_admin)
                .delete(handlers::delete_admin),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .merge(protected)
}

/// Type routes: reads and creation are public, mutation is protected
fn type_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route(
            "/:id",
            put(handlers::update_type).delete(handlers::delete_type),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(handlers::list_types).post(handlers::create_type))
        .route("/:id", get(handlers::get_type))
        .merge(protected)
}

/// Business routes: reads and creation are public, mutation is protected
fn business_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route(
            "/:id",
            put(handlers::update_business).delete(handlers::delete_business),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route(
            "/",
            get(handlers::list_businesses).post(handlers::create_business),
        )
        .route("/:id", get(handlers::get_business))
        .merge(protected)
}
