//! Configuration loading and management

use crate::core::bill::BillStatus;
use crate::core::error::ConfigError;
use crate::core::routes::Route;
use serde::{Deserialize, Serialize};

/// Configuration of the NewBill form
///
/// Every field has a default, so an empty YAML document is a valid config.
///
/// ```yaml
/// accepted_extensions: [jpg, jpeg, png]
/// accepted_mime_types: [image/jpeg, image/jpg, image/png]
/// success_route: "#employee/bills"
/// enforce_constraints: false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Receipt extensions accepted by the file input (lowercase, no dot)
    pub accepted_extensions: Vec<String>,

    /// Declared MIME types accepted by the file input
    pub accepted_mime_types: Vec<String>,

    /// Message shown under the file input when a receipt is refused
    pub rejection_message: String,

    /// Route the form navigates to once the bill is persisted
    pub success_route: String,

    /// Status given to newly submitted bills
    pub default_status: BillStatus,

    /// VAT percentage used when the `pct` input is blank
    pub default_pct: i64,

    /// Run constraint validation before the submit handler, as a browser would
    ///
    /// Off by default: a click on `btn-send` always reaches the store.
    pub enforce_constraints: bool,

    /// Buffer size of the diagnostic channel
    pub diagnostics_capacity: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            accepted_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            accepted_mime_types: vec![
                "image/jpeg".to_string(),
                "image/jpg".to_string(),
                "image/png".to_string(),
            ],
            rejection_message: "Seuls les fichiers jpg, jpeg et png sont acceptés.".to_string(),
            success_route: Route::Bills.path().to_string(),
            default_status: BillStatus::Pending,
            default_pct: 20,
            enforce_constraints: false,
            diagnostics_capacity: 64,
        }
    }
}

impl FormConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                file: Some(path.to_string()),
                message,
            },
            other => other,
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Lowercase the allow-lists and drop leading dots from extensions
    pub fn normalize(&mut self) {
        for ext in &mut self.accepted_extensions {
            *ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        }
        for mime in &mut self.accepted_mime_types {
            *mime = mime.trim().to_ascii_lowercase();
        }
    }

    /// Reject configurations the form cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.accepted_extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "accepted_extensions".to_string(),
                value: "[]".to_string(),
                message: "at least one extension must be accepted".to_string(),
            });
        }
        if let Some(empty) = self.accepted_extensions.iter().find(|e| e.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "accepted_extensions".to_string(),
                value: empty.clone(),
                message: "extensions cannot be blank".to_string(),
            });
        }
        if self.default_pct < 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_pct".to_string(),
                value: self.default_pct.to_string(),
                message: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}
