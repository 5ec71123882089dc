//! Employee Models

use crate::validation::{self, ValidationErrors};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// Request body shared by create, replace and patch.
///
/// Create and replace require every field; patch applies whichever are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeFields {
    pub name: Option<String>,
    pub position: Option<String>,
    pub achievements: Option<Vec<String>>,
}

impl EmployeeFields {
    pub fn require_all(self) -> Result<Employee, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = validation::require(&mut errors, "name", self.name);
        let position = validation::require(&mut errors, "position", self.position);
        let achievements = validation::require(&mut errors, "achievements", self.achievements);

        match (name, position, achievements) {
            (Some(name), Some(position), Some(achievements)) => errors.into_result(Employee {
                name,
                position,
                achievements,
            }),
            _ => Err(errors),
        }
    }

    /// Merge present fields into `employee`, leaving the rest untouched
    pub fn apply_to(self, employee: &mut Employee) {
        if let Some(name) = self.name {
            employee.name = name;
        }
        if let Some(position) = self.position {
            employee.position = position;
        }
        if let Some(achievements) = self.achievements {
            employee.achievements = achievements;
        }
    }
}
