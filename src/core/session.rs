//! Session context for the NewBill form
//!
//! The session is read once by the host (usually from the persisted `"user"`
//! storage key) and handed to the controller at construction. The form never
//! mutates it.

use crate::core::error::SessionError;
use serde::{Deserialize, Serialize};

/// Storage key under which the host persists the signed-in user
pub const SESSION_STORAGE_KEY: &str = "user";

/// Kind of signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Employee => "Employee",
            UserType::Admin => "Admin",
        }
    }
}

/// Signed-in user context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,

    /// Missing from some persisted values, in which case bills carry an empty email
    #[serde(default)]
    pub email: String,
}

impl Session {
    /// Create an employee session
    pub fn employee(email: impl Into<String>) -> Self {
        Self {
            user_type: UserType::Employee,
            email: email.into(),
        }
    }

    /// Create an admin session
    pub fn admin(email: impl Into<String>) -> Self {
        Self {
            user_type: UserType::Admin,
            email: email.into(),
        }
    }

    /// Decode the JSON value persisted under [`SESSION_STORAGE_KEY`]
    ///
    /// ```rust,ignore
    /// let session = Session::from_json(r#"{"type":"Employee","email":"a@a"}"#)?;
    /// ```
    pub fn from_json(value: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(value)?)
    }

    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }

    /// Only employees may submit bills
    pub fn require_employee(&self) -> Result<(), SessionError> {
        if self.is_employee() {
            Ok(())
        } else {
            Err(SessionError::NotAnEmployee {
                user_type: self.user_type.as_str().to_string(),
            })
        }
    }
}
