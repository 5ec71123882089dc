//! Employee Store
//! Mission: In-memory employee list with first-match lookup by name

use crate::employees::{
    models::{Employee, EmployeeFields},
    repository::EmployeeRepository,
};
use anyhow::Result;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{info, warn};

pub struct EmployeeStore {
    employees: RwLock<Vec<Employee>>,
    autosave: Option<Arc<dyn EmployeeRepository>>,
    /// Serializes snapshot + save so the last write on disk holds every mutation
    save_lock: Mutex<()>,
}

impl EmployeeStore {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees: RwLock::new(employees),
            autosave: None,
            save_lock: Mutex::new(()),
        }
    }

    /// Load from `repository`; with `autosave` every mutation is written back through it
    pub fn load(repository: Arc<dyn EmployeeRepository>, autosave: bool) -> Result<Self> {
        let employees = repository.load()?;
        Ok(Self {
            employees: RwLock::new(employees),
            autosave: autosave.then_some(repository),
            save_lock: Mutex::new(()),
        })
    }

    /// All employees in insertion order
    pub fn list(&self) -> Vec<Employee> {
        self.employees.read().clone()
    }

    pub fn create(&self, employee: Employee) {
        info!("➕ Adding employee: {}", employee.name);
        self.employees.write().push(employee);
        self.persist();
    }

    /// First employee whose name matches exactly
    pub fn get_by_name(&self, name: &str) -> Option<Employee> {
        self.employees.read().iter().find(|e| e.name == name).cloned()
    }

    /// Overwrite every field of the first match. Returns the stored record.
    pub fn replace(&self, name: &str, replacement: Employee) -> Option<Employee> {
        let updated = {
            let mut employees = self.employees.write();
            let slot = employees.iter_mut().find(|e| e.name == name)?;
            *slot = replacement;
            slot.clone()
        };

        info!("✏️  Replaced employee {} → {}", name, updated.name);
        self.persist();
        Some(updated)
    }

    /// Merge present fields into the first match. Returns the stored record.
    pub fn patch(&self, name: &str, fields: EmployeeFields) -> Option<Employee> {
        let updated = {
            let mut employees = self.employees.write();
            let slot = employees.iter_mut().find(|e| e.name == name)?;
            fields.apply_to(slot);
            slot.clone()
        };

        info!("✏️  Patched employee {}", name);
        self.persist();
        Some(updated)
    }

    pub fn len(&self) -> usize {
        self.employees.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self) {
        let Some(repository) = &self.autosave else {
            return;
        };

        let _guard = self.save_lock.lock();
        let snapshot = self.list();
        if let Err(e) = repository.save(&snapshot) {
            warn!("Failed to save employees: {:#}", e);
        }
    }
}
