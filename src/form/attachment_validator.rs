//! Receipt allow-list

use crate::config::FormConfig;
use crate::core::attachment::Attachment;
use serde::Serialize;
use std::fmt;

/// Why a receipt was refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AttachmentRejection {
    /// The file name has no extension
    MissingExtension,

    /// The extension is not on the allow-list
    DisallowedExtension { extension: String },

    /// The declared MIME type contradicts the allow-list
    DisallowedMimeType { mime_type: String },
}

impl fmt::Display for AttachmentRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentRejection::MissingExtension => write!(f, "file has no extension"),
            AttachmentRejection::DisallowedExtension { extension } => {
                write!(f, "extension '{}' is not accepted", extension)
            }
            AttachmentRejection::DisallowedMimeType { mime_type } => {
                write!(f, "type '{}' is not accepted", mime_type)
            }
        }
    }
}

/// Verdict on a selected receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(AttachmentRejection),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// Decides whether a receipt may be attached to a bill
///
/// A file is accepted when its extension is on the allow-list and its declared
/// MIME type is either absent or also on the allow-list.
#[derive(Debug, Clone)]
pub struct AttachmentValidator {
    extensions: Vec<String>,
    mime_types: Vec<String>,
    message: String,
}

impl AttachmentValidator {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            extensions: config.accepted_extensions.clone(),
            mime_types: config.accepted_mime_types.clone(),
            message: config.rejection_message.clone(),
        }
    }

    pub fn check(&self, file: &Attachment) -> Verdict {
        let Some(extension) = file.extension() else {
            return Verdict::Reject(AttachmentRejection::MissingExtension);
        };
        if !self
            .extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(&extension))
        {
            return Verdict::Reject(AttachmentRejection::DisallowedExtension { extension });
        }

        let mime_type = file.declared_type.trim();
        if !mime_type.is_empty()
            && !self
                .mime_types
                .iter()
                .any(|m| m.eq_ignore_ascii_case(mime_type))
        {
            return Verdict::Reject(AttachmentRejection::DisallowedMimeType {
                mime_type: mime_type.to_string(),
            });
        }

        Verdict::Accept
    }

    /// Message shown to the employee when a receipt is refused
    pub fn user_message(&self) -> &str {
        &self.message
    }
}

impl Default for AttachmentValidator {
    fn default() -> Self {
        Self::new(&FormConfig::default())
    }
}
