use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub governance_config_path: String,
    pub audit_log_path: String,
    pub repository: String,
}

impl AppConfig {
    pub fn load() -> Self {
        let governance_config_path = env::var("GOVERNANCE_CONFIG_PATH")
            .unwrap_or_else(|_| "github/GOVERNANCE_CONFIG.json".to_string());

        let audit_log_path = env::var("GOVERNANCE_AUDIT_PATH")
            .unwrap_or_else(|_| "github/GOVERNANCE_AUDIT.json".to_string());

        let repository = env::var("GOVERNANCE_REPO")
            .unwrap_or_else(|_| "gitforge/gitforge".to_string());

        AppConfig {
            governance_config_path,
            audit_log_path,
            repository,
        }
    }
}
