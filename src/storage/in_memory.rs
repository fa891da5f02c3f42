//! In-memory implementation of BillStore for development and testing

use crate::core::attachment::{CreatedBill, FileUpload};
use crate::core::bill::BillRecord;
use crate::core::error::StoreError;
use crate::core::store::BillStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A receipt kept by the in-memory store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReceipt {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub email: String,
}

#[derive(Debug, Default)]
struct Bills {
    receipts: HashMap<String, StoredReceipt>,
    records: HashMap<String, BillRecord>,
}

/// In-memory bill store
///
/// `create` stores the receipt and reserves a key; `update` writes the record
/// under that key. Updating an unknown key fails with
/// [`StoreError::NotFound`]; updating without a key stores the record under a
/// fresh one.
#[derive(Clone, Debug)]
pub struct InMemoryBillStore {
    bills: Arc<RwLock<Bills>>,
    base_url: String,
}

impl InMemoryBillStore {
    pub fn new() -> Self {
        Self::with_base_url("memory://bills")
    }

    /// Files are served as `{base_url}/{key}/{file_name}`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            bills: Arc::new(RwLock::new(Bills::default())),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<BillRecord> {
        self.bills.read().await.records.get(key).cloned()
    }

    pub async fn receipt(&self, key: &str) -> Option<StoredReceipt> {
        self.bills.read().await.receipts.get(key).cloned()
    }

    /// All persisted records
    pub async fn list(&self) -> Vec<BillRecord> {
        self.bills.read().await.records.values().cloned().collect()
    }

    /// Number of receipts uploaded so far
    pub async fn receipt_count(&self) -> usize {
        self.bills.read().await.receipts.len()
    }
}

impl Default for InMemoryBillStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BillStore for InMemoryBillStore {
    async fn create(&self, upload: FileUpload) -> Result<CreatedBill, StoreError> {
        let key = Uuid::new_v4().to_string();
        let file_url = format!("{}/{}/{}", self.base_url, key, upload.file.file_name);

        self.bills.write().await.receipts.insert(
            key.clone(),
            StoredReceipt {
                file_name: upload.file.file_name,
                content_type: upload.file.declared_type,
                bytes: upload.file.bytes,
                email: upload.email,
            },
        );

        Ok(CreatedBill { file_url, key })
    }

    async fn update(&self, key: Option<&str>, bill: &BillRecord) -> Result<(), StoreError> {
        let mut bills = self.bills.write().await;

        let key = match key {
            Some(key) => {
                if !bills.receipts.contains_key(key) && !bills.records.contains_key(key) {
                    return Err(StoreError::NotFound {
                        key: key.to_string(),
                    });
                }
                key.to_string()
            }
            None => Uuid::new_v4().to_string(),
        };

        let mut record = bill.clone();
        record.id = Some(key.clone());
        bills.records.insert(key, record);
        Ok(())
    }
}
