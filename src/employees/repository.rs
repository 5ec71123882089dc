//! Employee Repository
//! Mission: Load the employee list from disk at startup and write it back on demand

use crate::employees::models::Employee;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Persistence collaborator for the employee store
pub trait EmployeeRepository: Send + Sync {
    fn load(&self) -> Result<Vec<Employee>>;
    fn save(&self, employees: &[Employee]) -> Result<()>;
}

/// Employees kept as a JSON array in a single file
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EmployeeRepository for JsonFileRepository {
    /// A missing file loads as an empty list
    fn load(&self) -> Result<Vec<Employee>> {
        if !self.path.exists() {
            info!(
                "📂 No employee file at {}, starting empty",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let employees: Vec<Employee> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid employee JSON in {}", self.path.display()))?;

        info!(
            "📂 Loaded {} employees from {}",
            employees.len(),
            self.path.display()
        );
        Ok(employees)
    }

    fn save(&self, employees: &[Employee]) -> Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;

        let json = serde_json::to_vec_pretty(employees).context("Failed to encode employees")?;

        // Uniquely named sibling, renamed over the target: readers never see a partial file
        let mut tmp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
        tmp.write_all(&json)
            .with_context(|| format!("Failed to write {}", tmp.path().display()))?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!(
            "💾 Saved {} employees to {}",
            employees.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Employee> {
        vec![Employee {
            name: "Ada".to_string(),
            position: "Engineer".to_string(),
            achievements: vec!["First program".to_string()],
        }]
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("employee.json"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("data").join("employee.json"));

        repo.save(&sample()).unwrap();
        assert_eq!(repo.load().unwrap(), sample());

        // Only the target remains; the temp file was renamed onto it
        let entries: Vec<_> = fs::read_dir(dir.path().join("data"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("employee.json")]);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("employee.json"));

        repo.save(&sample()).unwrap();
        repo.save(&[]).unwrap();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("employee.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileRepository::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Invalid employee JSON"));
    }
}
