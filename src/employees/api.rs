//! Employee API Endpoints
//! Mission: List, create, read, replace and patch employees by name

use crate::api::json::JsonBody;
use crate::api::MessageResponse;
use crate::employees::{
    models::{Employee, EmployeeFields},
    store::EmployeeStore,
};
use crate::validation::ValidationErrors;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct EmployeeState {
    pub store: Arc<EmployeeStore>,
}

impl EmployeeState {
    pub fn new(store: Arc<EmployeeStore>) -> Self {
        Self { store }
    }
}

/// GET /employees/
pub async fn list_employees(State(state): State<EmployeeState>) -> Json<Vec<Employee>> {
    Json(state.store.list())
}

/// POST /employees/
pub async fn create_employee(
    State(state): State<EmployeeState>,
    JsonBody(payload): JsonBody<EmployeeFields>,
) -> Result<(StatusCode, Json<MessageResponse>), EmployeeApiError> {
    let employee = payload.require_all()?;
    state.store.create(employee);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Employee added successfully.")),
    ))
}

/// GET /employees/:name
pub async fn get_employee(
    State(state): State<EmployeeState>,
    Path(name): Path<String>,
) -> Result<Json<Employee>, EmployeeApiError> {
    state
        .store
        .get_by_name(&name)
        .map(Json)
        .ok_or(EmployeeApiError::NotFound)
}

/// PUT /employees/:name
pub async fn replace_employee(
    State(state): State<EmployeeState>,
    Path(name): Path<String>,
    JsonBody(payload): JsonBody<EmployeeFields>,
) -> Result<Json<MessageResponse>, EmployeeApiError> {
    let replacement = payload.require_all()?;

    state
        .store
        .replace(&name, replacement)
        .ok_or(EmployeeApiError::NotFound)?;

    Ok(Json(MessageResponse::new("Employee updated successfully.")))
}

/// PATCH /employees/:name
pub async fn patch_employee(
    State(state): State<EmployeeState>,
    Path(name): Path<String>,
    JsonBody(payload): JsonBody<EmployeeFields>,
) -> Result<Json<MessageResponse>, EmployeeApiError> {
    state
        .store
        .patch(&name, payload)
        .ok_or(EmployeeApiError::NotFound)?;

    Ok(Json(MessageResponse::new("Employee updated successfully.")))
}

#[derive(Debug)]
pub enum EmployeeApiError {
    Validation(ValidationErrors),
    NotFound,
}

impl From<ValidationErrors> for EmployeeApiError {
    fn from(errors: ValidationErrors) -> Self {
        EmployeeApiError::Validation(errors)
    }
}

impl IntoResponse for EmployeeApiError {
    fn into_response(self) -> Response {
        match self {
            EmployeeApiError::Validation(errors) => errors.into_response(),
            EmployeeApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Employee not found." })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> EmployeeState {
        EmployeeState::new(Arc::new(EmployeeStore::new(vec![Employee {
            name: "Ada".to_string(),
            position: "Engineer".to_string(),
            achievements: Vec::new(),
        }])))
    }

    #[tokio::test]
    async fn test_get_missing_employee_is_not_found() {
        let result = get_employee(State(state()), Path("Grace".to_string())).await;
        assert!(matches!(result, Err(EmployeeApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_requires_all_fields() {
        let state = state();
        let payload = EmployeeFields {
            name: Some("Grace".to_string()),
            ..Default::default()
        };

        let result = create_employee(State(state.clone()), JsonBody(payload)).await;
        match result {
            Err(EmployeeApiError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other.map(|r| r.0)),
        }
        assert_eq!(state.store.len(), 1);
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            EmployeeApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EmployeeApiError::Validation(ValidationErrors::body("bad"))
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }
}
