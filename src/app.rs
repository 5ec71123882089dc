//! Application assembly
//! Mission: Wire stores, auth and router from a `Config`

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    api,
    auth::AuthState,
    config::Config,
    employees::{EmployeeRepository, EmployeeState, EmployeeStore, JsonFileRepository},
};

pub fn build_app(config: &Config) -> Result<Router> {
    if config.uses_dev_secret() {
        warn!("⚠️  JWT_SECRET not set, using development secret. CHANGE IN PRODUCTION!");
    }

    let auth_state = AuthState::from_config(config);
    info!(
        "🔐 Authentication initialized (session TTL {}m)",
        config.session_ttl_minutes
    );

    let repository: Arc<dyn EmployeeRepository> =
        Arc::new(JsonFileRepository::new(&config.employees_path));
    let store = EmployeeStore::load(repository, config.autosave).with_context(|| {
        format!(
            "Failed to load employees from {}",
            config.employees_path.display()
        )
    })?;
    info!(
        "👥 Employee store ready: {} records (autosave: {})",
        store.len(),
        config.autosave
    );

    let employee_state = EmployeeState::new(Arc::new(store));

    Ok(api::create_router(auth_state, employee_state))
}
