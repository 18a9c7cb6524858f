use crate::dataset::Dataset;
use crate::error::{CrmError, Result};
use crate::intake::DEFAULT_MAX_FILES;
use crate::paths;
use crate::query::SortOrder;
use serde::{Deserialize, Serialize};
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
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
    /// Base of the links sent to customers for intake.
    #[serde(default = "default_intake_base_url")]
    pub intake_base_url: String,
}

fn default_intake_base_url() -> String {
    "attracta.com".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

fn default_recent_limit() -> usize {
    3
}

fn default_preview_limit() -> usize {
    6
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            preview_limit: default_preview_limit(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadsConfig {
    #[serde(default)]
    pub default_sort: SortOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub company: CompanyConfig,
    /// User the CLI acts as when none is given.
    #[serde(default = "default_user")]
    pub default_user: String,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub leads: LeadsConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
}

fn default_version() -> u32 {
    1
}

fn default_user() -> String {
    "u1".to_string()
}

impl Config {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            company: CompanyConfig {
                name: company_name.into(),
                intake_base_url: default_intake_base_url(),
            },
            default_user: default_user(),
            dashboard: DashboardConfig::default(),
            leads: LeadsConfig::default(),
            intake: IntakeConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(CrmError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self, data: Option<&Dataset>) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.company.intake_base_url.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "company.intake_base_url is empty; intake links will be relative"
                    .to_string(),
            });
        }

        if self.dashboard.recent_limit == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "dashboard.recent_limit is 0; recent activity will be empty".to_string(),
            });
        }

        if self.intake.max_files == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "intake.max_files is 0; customers cannot attach files".to_string(),
            });
        }

        if let Some(data) = data {
            if data.user(&self.default_user).is_err() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!(
                        "default_user '{}' is not in the user directory",
                        self.default_user
                    ),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
