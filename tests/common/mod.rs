//! Common helpers for router-level integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use mock_employee_api::api::create_router;
use mock_employee_api::auth::{AuthState, JwtHandler, UserStore};
use mock_employee_api::employees::{Employee, EmployeeState, EmployeeStore};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const PASSWORD: &str = "Abcdefg1!";

pub struct TestApp {
    pub router: Router,
    pub auth: AuthState,
    pub employees: EmployeeState,
}

/// App with low bcrypt cost and the given seed employees
pub fn create_test_app(seed: Vec<Employee>) -> TestApp {
    let auth = AuthState::new(
        Arc::new(UserStore::new(4)),
        Arc::new(JwtHandler::new(
            "integration-secret".to_string(),
            Duration::minutes(30),
        )),
    );
    let employees = EmployeeState::new(Arc::new(EmployeeStore::new(seed)));
    let router = create_router(auth.clone(), employees.clone());

    TestApp {
        router,
        auth,
        employees,
    }
}

pub fn employee(name: &str, position: &str, achievements: &[&str]) -> Employee {
    Employee {
        name: name.to_string(),
        position: position.to_string(),
        achievements: achievements.iter().map(|a| a.to_string()).collect(),
    }
}

impl TestApp {
    /// Send a request and return status with parsed JSON body (`Null` when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    pub async fn register(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/public/register",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/public/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Register `username` with the default password and return a fresh token
    pub async fn token_for(&self, username: &str) -> String {
        let (status, _) = self.register(username, PASSWORD).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = self.login(username, PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }
}
