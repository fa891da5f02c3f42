//! Typed error handling for the NewBill core
//!
//! Errors are grouped by category so callers can match on what failed instead
//! of inspecting strings.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: constraint validation of the form inputs
//! - [`StoreError`]: failures reported by the remote bill store
//! - [`ConfigError`]: configuration parsing and loading
//! - [`SessionError`]: missing or unusable session context
//!
//! # Example
//!
//! ```rust,ignore
//! use newbill::prelude::*;
//!
//! match NewBillController::new(store, navigator, session, FormConfig::default()) {
//!     Ok(controller) => controller,
//!     Err(FormError::Session(SessionError::NotAnEmployee { .. })) => {
//!         // route the user back to the admin dashboard
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The main error type for the NewBill core
#[derive(Debug)]
pub enum FormError {
    /// Form constraint validation errors
    Validation(ValidationError),

    /// Remote store errors
    Store(StoreError),

    /// Configuration errors
    Config(ConfigError),

    /// Session errors
    Session(SessionError),

    /// Unknown form input
    UnknownField { test_id: String },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Validation(e) => write!(f, "{}", e),
            FormError::Store(e) => write!(f, "{}", e),
            FormError::Config(e) => write!(f, "{}", e),
            FormError::Session(e) => write!(f, "{}", e),
            FormError::UnknownField { test_id } => {
                write!(f, "No form input with data-testid '{}'", test_id)
            }
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormError::Validation(e) => Some(e),
            FormError::Store(e) => Some(e),
            FormError::Config(e) => Some(e),
            FormError::Session(e) => Some(e),
            FormError::UnknownField { .. } => None,
        }
    }
}

impl FormError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FormError::Validation(_) => "VALIDATION_ERROR",
            FormError::Store(e) => e.error_code(),
            FormError::Config(_) => "CONFIG_ERROR",
            FormError::Session(e) => e.error_code(),
            FormError::UnknownField { .. } => "UNKNOWN_FIELD",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

/// Errors raised by the form's constraint validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),
}

impl ValidationError {
    /// Build the error from a list of field errors, collapsing a single entry
    pub fn from_fields(mut errors: Vec<FieldValidationError>) -> Self {
        if errors.len() == 1 {
            let FieldValidationError { field, message } = errors.remove(0);
            ValidationError::FieldError { field, message }
        } else {
            ValidationError::FieldErrors(errors)
        }
    }

    /// Names of the fields that failed validation
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::FieldError { field, .. } => vec![field.as_str()],
            ValidationError::FieldErrors(errors) => {
                errors.iter().map(|e| e.field.as_str()).collect()
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for FormError {
    fn from(err: ValidationError) -> Self {
        FormError::Validation(err)
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors reported by a [`BillStore`](crate::core::store::BillStore)
///
/// `Remote` displays the backend's message verbatim ("Erreur 404", "Erreur 500", ...).
/// The backend does not expose a structured code, so the raw message is all the
/// client can surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend rejected the request with a free-form message
    #[error("{0}")]
    Remote(String),

    /// No bill exists under the given key
    #[error("Erreur 404")]
    NotFound { key: String },

    /// The store could not be reached
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    pub fn remote(message: impl Into<String>) -> Self {
        StoreError::Remote(message.into())
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Remote(_) => "STORE_REMOTE_ERROR",
            StoreError::NotFound { .. } => "BILL_NOT_FOUND",
            StoreError::Unavailable { .. } => "STORE_UNAVAILABLE",
        }
    }
}

impl From<StoreError> for FormError {
    fn from(err: StoreError) -> Self {
        FormError::Store(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

impl From<ConfigError> for FormError {
    fn from(err: ConfigError) -> Self {
        FormError::Config(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Session Errors
// =============================================================================

/// Errors related to the session context handed to the form
#[derive(Debug, Error)]
pub enum SessionError {
    /// The persisted session value could not be decoded
    #[error("Invalid session value: {message}")]
    Malformed { message: String },

    /// Only employees may submit bills
    #[error("Session of type '{user_type}' cannot submit bills")]
    NotAnEmployee { user_type: String },
}

impl SessionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::Malformed { .. } => "SESSION_MALFORMED",
            SessionError::NotAnEmployee { .. } => "SESSION_FORBIDDEN",
        }
    }
}

impl From<SessionError> for FormError {
    fn from(err: SessionError) -> Self {
        FormError::Session(err)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Malformed {
            message: err.to_string(),
        }
    }
}
