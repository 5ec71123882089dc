//! Service configuration from CLI flags, environment and `.env`

use clap::Parser;
use std::path::PathBuf;

pub const DEV_JWT_SECRET: &str = "dev-secret-change-in-production-minimum-32-characters";

#[derive(Debug, Clone, Parser)]
#[command(name = "mock-employee-api", version, about = "Mock employee REST API")]
pub struct Config {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// JSON array of employees loaded at startup
    #[arg(long, env = "EMPLOYEES_PATH", default_value = "data/employee.json")]
    pub employees_path: PathBuf,

    /// Write the employee list back to `employees_path` after each change
    #[arg(long = "autosave", env = "EMPLOYEES_AUTOSAVE")]
    pub autosave: bool,

    #[arg(long, env = "JWT_SECRET", default_value = DEV_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: String,

    /// Absolute lifetime of a login session
    #[arg(
        long,
        env = "SESSION_TTL_MINUTES",
        default_value_t = 30,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub session_ttl_minutes: i64,

    #[arg(
        long,
        env = "BCRYPT_COST",
        default_value_t = bcrypt::DEFAULT_COST,
        value_parser = clap::value_parser!(u32).range(4..=31)
    )]
    pub bcrypt_cost: u32,
}

impl Config {
    /// Load `.env` (if any) then parse CLI flags with environment fallbacks
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::parse()
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}
