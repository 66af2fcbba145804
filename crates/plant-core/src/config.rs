use crate::activity::DEFAULT_ACTIVITY_LIMIT;
use crate::error::Result;
use crate::identity::{LocalUser, Role};
use crate::paths;
use crate::store::{StoreOptions, DEFAULT_UPCOMING_WINDOW_DAYS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// AuthConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Refuse plant commands until someone has logged in.
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub users: Vec<LocalUser>,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_upcoming_window")]
    pub upcoming_window_days: u32,
    /// How far ahead the progress report looks for plants "needing attention".
    #[serde(default = "default_attention_window")]
    pub attention_window_days: u32,
    #[serde(default = "default_activity_limit")]
    pub activity_log_limit: usize,
    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_version() -> u32 {
    1
}

fn default_upcoming_window() -> u32 {
    DEFAULT_UPCOMING_WINDOW_DAYS
}

fn default_attention_window() -> u32 {
    2
}

fn default_activity_limit() -> usize {
    DEFAULT_ACTIVITY_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            upcoming_window_days: default_upcoming_window(),
            attention_window_days: default_attention_window(),
            activity_log_limit: default_activity_limit(),
            auth: AuthConfig::default(),
        }
    }
}

impl Config {
    /// Load `.plants/config.yaml`, falling back to defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            upcoming_window_days: self.upcoming_window_days,
            activity_limit: self.activity_log_limit,
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.upcoming_window_days == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "upcoming_window_days is 0: no plant will ever be listed as upcoming"
                    .to_string(),
            });
        }

        if self.attention_window_days == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "attention_window_days is 0: the report's attention list stays empty"
                    .to_string(),
            });
        }

        if self.activity_log_limit == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "activity_log_limit is 0: no activity will be kept".to_string(),
            });
        }

        let mut emails = HashSet::new();
        for user in &self.auth.users {
            if !emails.insert(user.email.to_lowercase()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("duplicate user email '{}'", user.email),
                });
            }
            if user.password.is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("user '{}' has an empty password", user.email),
                });
            }
        }

        if self.auth.required && self.auth.users.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "auth.required is set but no users are configured".to_string(),
            });
        }

        if self.auth.required && !self.auth.users.iter().any(|u| u.role == Role::Admin) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "no admin user configured".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.upcoming_window_days, 3);
        assert_eq!(cfg.attention_window_days, 2);
        assert_eq!(cfg.activity_log_limit, 50);
        assert!(!cfg.auth.required);
    }

    #[test]
    fn config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.upcoming_window_days = 5;
        cfg.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.upcoming_window_days, 5);
        assert_eq!(loaded.store_options().upcoming_window_days, 5);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let yaml = "upcoming_window_days: 7\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.upcoming_window_days, 7);
        assert_eq!(cfg.attention_window_days, 2);
        assert_eq!(cfg.version, 1);
    }

    #[test]
    fn validate_default_is_clean() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_duplicate_users_and_empty_passwords() {
        let yaml = r#"
auth:
  required: true
  users:
    - id: "1"
      email: ana@example.com
      name: Ana
      role: admin
      password: secret
    - id: "2"
      email: ANA@example.com
      name: Ana Again
      password: ""
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        let warnings = cfg.validate();
        assert_eq!(
            warnings
                .iter()
                .filter(|w| w.level == WarnLevel::Error)
                .count(),
            2
        );
    }

    #[test]
    fn validate_required_without_users() {
        let mut cfg = Config::default();
        cfg.auth.required = true;
        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("no users are configured")));
    }
}
