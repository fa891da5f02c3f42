//! Submission client over the bill store

use crate::core::attachment::{Attachment, FileUpload, UploadedAttachment};
use crate::core::bill::BillRecord;
use crate::core::error::StoreError;
use crate::core::store::BillStore;
use std::sync::Arc;

/// Wraps a [`BillStore`] with the two calls the form makes
///
/// Both calls are single-shot: no retry and no timeout. Errors are returned to
/// the caller untouched.
#[derive(Clone)]
pub struct SubmissionClient {
    store: Arc<dyn BillStore>,
}

impl SubmissionClient {
    pub fn new(store: Arc<dyn BillStore>) -> Self {
        Self { store }
    }

    /// Upload a receipt for `email` and remember where it went
    pub async fn create(
        &self,
        attachment: Attachment,
        email: &str,
    ) -> Result<UploadedAttachment, StoreError> {
        let file_name = attachment.file_name.clone();
        tracing::debug!(file_name = %file_name, size = attachment.size(), "Uploading receipt");

        let created = self
            .store
            .create(FileUpload {
                file: attachment,
                email: email.to_string(),
            })
            .await?;

        tracing::debug!(bill_id = %created.key, file_url = %created.file_url, "Receipt uploaded");
        Ok(UploadedAttachment {
            bill_id: created.key,
            file_url: created.file_url,
            file_name,
        })
    }

    /// Persist the bill under its own key
    pub async fn update(&self, bill: &BillRecord) -> Result<(), StoreError> {
        tracing::debug!(bill_id = ?bill.id, "Persisting bill");
        self.store.update(bill.id.as_deref(), bill).await
    }
}

impl std::fmt::Debug for SubmissionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attachment::CreatedBill;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        uploads: Mutex<Vec<FileUpload>>,
        updates: Mutex<Vec<(Option<String>, BillRecord)>>,
    }

    #[async_trait]
    impl BillStore for RecordingStore {
        async fn create(&self, upload: FileUpload) -> Result<CreatedBill, StoreError> {
            self.uploads.lock().unwrap().push(upload);
            Ok(CreatedBill {
                file_url: "https://localhost:3456/images/test.jpg".to_string(),
                key: "1234".to_string(),
            })
        }

        async fn update(&self, key: Option<&str>, bill: &BillRecord) -> Result<(), StoreError> {
            self.updates
                .lock()
                .unwrap()
                .push((key.map(str::to_string), bill.clone()));
            if key.is_none() {
                return Err(StoreError::remote("Erreur 404"));
            }
            Ok(())
        }
    }

    fn bill(id: Option<&str>) -> BillRecord {
        BillRecord {
            id: id.map(str::to_string),
            email: "a@a".to_string(),
            expense_type: Default::default(),
            name: "train".to_string(),
            date: "2019-03-09".to_string(),
            amount: Some(42),
            vat: String::new(),
            pct: 20,
            commentary: None,
            file_url: None,
            file_name: None,
            status: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_create_sends_email_and_keeps_file_name() {
        let store = Arc::new(RecordingStore::default());
        let client = SubmissionClient::new(store.clone());

        let uploaded = client
            .create(Attachment::new("test.png", "image/png", b"testdata".to_vec()), "a@a")
            .await
            .unwrap();

        assert_eq!(uploaded.bill_id, "1234");
        assert_eq!(uploaded.file_name, "test.png");
        let uploads = store.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].email, "a@a");
    }

    #[tokio::test]
    async fn test_update_uses_bill_id_as_key() {
        let store = Arc::new(RecordingStore::default());
        let client = SubmissionClient::new(store.clone());

        client.update(&bill(Some("1234"))).await.unwrap();
        let err = client.update(&bill(None)).await.unwrap_err();

        assert_eq!(err.to_string(), "Erreur 404");
        let updates = store.updates.lock().unwrap();
        assert_eq!(updates[0].0.as_deref(), Some("1234"));
        assert_eq!(updates[1].0, None);
    }
}
