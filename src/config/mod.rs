//! Configuration loading and management

use crate::core::error::{ConfigError, GuardError, GuardResult};
use crate::core::model::UserProfile;
use crate::core::validation::{ValidationOutcome, validate_object};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Token the upload route compares `secret_key` against
pub const DEFAULT_UPLOAD_SECRET: &str = "2026_CORE";

/// Server configuration
///
/// Every field has a default, so a YAML file only needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the server binds to
    #[validate(length(min = 1))]
    pub bind_address: String,

    /// Expected value of the upload route's `secret_key` query parameter
    #[validate(length(min = 1))]
    pub upload_secret: String,

    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,

    /// Users present in the list store at startup, ids 0..n
    pub seed_users: Vec<UserProfile>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            upload_secret: DEFAULT_UPLOAD_SECRET.to_string(),
            log_filter: "info,fieldguard=debug".to_string(),
            seed_users: vec![UserProfile::new("rishi_dev", 25)],
        }
    }
}

impl ServerConfig {
    /// Load and check configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> GuardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        config.check()?;
        Ok(config)
    }

    /// Load and check configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> GuardResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Check field values and seed users
    ///
    /// Seed users go through the same schema as users created over HTTP.
    pub fn check(&self) -> GuardResult<()> {
        self.validate()?;

        for (index, user) in self.seed_users.iter().enumerate() {
            let value = serde_json::to_value(user)?;
            if let ValidationOutcome::Invalid(violations) =
                validate_object(&value, UserProfile::schema())
            {
                let messages: Vec<String> = violations.iter().map(ToString::to_string).collect();
                return Err(GuardError::Config(ConfigError::InvalidValue {
                    field: format!("seed_users[{}]", index),
                    message: messages.join(", "),
                }));
            }
        }

        Ok(())
    }
}
