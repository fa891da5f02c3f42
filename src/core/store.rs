//! Contract for the remote bill store

use crate::core::attachment::{CreatedBill, FileUpload};
use crate::core::bill::BillRecord;
use crate::core::error::StoreError;
use async_trait::async_trait;

/// Remote persistence for bills
///
/// The form only needs two operations: uploading the receipt (which also
/// reserves a bill key) and persisting the completed record under that key.
/// Implementations must not retry; each call maps to a single request.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Upload a receipt and reserve a bill
    async fn create(&self, upload: FileUpload) -> Result<CreatedBill, StoreError>;

    /// Persist a bill record
    ///
    /// `key` is the key returned by [`create`](Self::create), or `None` when no
    /// receipt was uploaded.
    async fn update(&self, key: Option<&str>, bill: &BillRecord) -> Result<(), StoreError>;
}
