use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::auth::{api as auth_api, auth_middleware, AuthState};
use crate::employees::{api as employee_api, EmployeeState};
use crate::middleware::request_logging;

/// Create the API router
pub fn create_router(auth_state: AuthState, employee_state: EmployeeState) -> Router {
    // Public namespace: registration and login
    let public_routes = Router::new()
        .route("/public/register", post(auth_api::register))
        .route("/public/login", post(auth_api::login))
        .with_state(auth_state.clone());

    // Private namespace: the session holder's own profile
    let private_routes = Router::new()
        .route("/private/profile", get(auth_api::profile))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state.clone());

    // Employees namespace: every endpoint needs a live session
    let employee_routes = Router::new()
        .route(
            "/employees",
            get(employee_api::list_employees).post(employee_api::create_employee),
        )
        .route(
            "/employees/",
            get(employee_api::list_employees).post(employee_api::create_employee),
        )
        .route(
            "/employees/:name",
            get(employee_api::get_employee)
                .put(employee_api::replace_employee)
                .patch(employee_api::patch_employee),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(employee_state);

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(private_routes)
        .merge(employee_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
