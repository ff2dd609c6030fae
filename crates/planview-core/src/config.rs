use crate::error::{PlanviewError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.clickup.com/api/v2";
pub const DEFAULT_SOURCE_FOLDER: &str = "Planning";
pub const DEFAULT_VIEW_FOLDER: &str = "Planning - Customer Views";
pub const DEFAULT_CUSTOMER_FIELD: &str = "Customer";
pub const TOKEN_ENV: &str = "CLICKUP_API_TOKEN";

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
// CustomerField
// ---------------------------------------------------------------------------

/// Which custom field partitions tasks by customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerField {
    #[serde(default = "default_customer_field")]
    pub name: String,
    /// Only fields of this type qualify (e.g. `short_text`). Any type when unset.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

fn default_customer_field() -> String {
    DEFAULT_CUSTOMER_FIELD.to_string()
}

impl Default for CustomerField {
    fn default() -> Self {
        Self {
            name: default_customer_field(),
            field_type: None,
        }
    }
}

// ---------------------------------------------------------------------------
// CustomFieldPolicy
// ---------------------------------------------------------------------------

/// What happens to custom field values on tasks copied for the chosen
/// customer. Placeholders never carry custom field values either way.
///
/// `Copy` only carries fields whose read value is valid on create (text,
/// number, date, checkbox and similar). Dropdown, people, relationship and
/// computed fields are left empty on the copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomFieldPolicy {
    #[default]
    Copy,
    Clear,
}

impl std::fmt::Display for CustomFieldPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomFieldPolicy::Copy => write!(f, "copy"),
            CustomFieldPolicy::Clear => write!(f, "clear"),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (planview.yaml)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Space holding the planning folder. Prompted for when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    #[serde(default = "default_source_folder")]
    pub source_folder: String,
    #[serde(default = "default_view_folder")]
    pub view_folder: String,
    #[serde(default)]
    pub customer_field: CustomerField,
    #[serde(default)]
    pub custom_fields: CustomFieldPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_source_folder() -> String {
    DEFAULT_SOURCE_FOLDER.to_string()
}

fn default_view_folder() -> String {
    DEFAULT_VIEW_FOLDER.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            space: None,
            source_folder: default_source_folder(),
            view_folder: default_view_folder(),
            customer_field: CustomerField::default(),
            custom_fields: CustomFieldPolicy::default(),
            api_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.source_folder.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "source_folder is empty".to_string(),
            });
        }

        if self.view_folder.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "view_folder is empty".to_string(),
            });
        } else if self.view_folder == self.source_folder {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "view_folder and source_folder are both '{}': sync would clear the source",
                    self.view_folder
                ),
            });
        }

        if self.customer_field.name.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "customer_field.name is empty".to_string(),
            });
        }

        if let Some(space) = &self.space {
            if space.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: "space is empty; it will be prompted for".to_string(),
                });
            }
        }

        if self.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "timeout_secs=0 disables the request timeout".to_string(),
            });
        }

        warnings
    }

    /// Build the client settings, taking the token from the caller.
    pub fn client_config(&self, token: Option<String>) -> Result<ClientConfig> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or(PlanviewError::MissingToken)?;
        let timeout = (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs));
        Ok(ClientConfig {
            base_url: self
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token,
            timeout,
        })
    }
}

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Connection settings for the remote service, built once per process.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
