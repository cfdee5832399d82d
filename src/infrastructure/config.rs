use std::env;

use crate::services::dashboard_service::DEFAULT_DUE_SOON_DAYS;
use crate::services::loan_service::DEFAULT_LOAN_DAYS;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Loan period used when a checkout does not name one
    pub loan_days: i64,
    pub due_soon_days: i64,
    /// Load the sample catalog at startup
    pub seed_demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            cors_allowed_origins: Vec::new(),
            loan_days: DEFAULT_LOAN_DAYS,
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
            seed_demo: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let positive = |key: &str, fallback: i64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<i64>().ok())
                .filter(|days| *days > 0)
                .unwrap_or(fallback)
        };

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            loan_days: positive("LOAN_DAYS", defaults.loan_days),
            due_soon_days: positive("DUE_SOON_DAYS", defaults.due_soon_days),
            seed_demo: lookup("SEED_DEMO")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.seed_demo),
        }
    }
}
