//! Receipt attachments and the references the store hands back for them

use serde::{Deserialize, Serialize};

/// A receipt file selected in the `file` input
///
/// Lives only between selection and upload.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub bytes: Vec<u8>,

    /// MIME type declared by the browser, possibly empty
    pub declared_type: String,

    pub file_name: String,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("declared_type", &self.declared_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        declared_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            declared_type: declared_type.into(),
            file_name: file_name.into(),
        }
    }

    /// Build an attachment from a file input's value
    ///
    /// Browsers report the selection as `C:\fakepath\<name>`; only the last
    /// path segment is kept.
    pub fn from_input_path(
        path: &str,
        declared_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let file_name = path.rsplit(['\\', '/']).next().unwrap_or(path);
        Self::new(file_name, declared_type, bytes)
    }

    /// Lowercased extension, if the name has one
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Payload sent to [`BillStore::create`](crate::core::store::BillStore::create)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file: Attachment,
    pub email: String,
}

/// What the store returns once a receipt is uploaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBill {
    pub file_url: String,

    /// Key of the bill created alongside the upload, used by later updates
    pub key: String,
}

/// A receipt that has been uploaded, as remembered by the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAttachment {
    pub bill_id: String,
    pub file_url: String,
    pub file_name: String,
}
