//! Macro-generated test suite for `BillStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod form_harness;
//!
//! use form_harness::*;
//! use newbill::storage::InMemoryBillStore;
//!
//! bill_store_tests!(InMemoryBillStore::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_create_returns_key_and_url`: upload answers a non-empty key and URL
//! - `test_create_twice_gives_distinct_keys`
//! - `test_update_with_created_key`: the key from `create` is accepted by `update`
//! - `test_update_unknown_key_fails`: with "Erreur 404"
//! - `test_update_is_repeatable`: a failed submit can be retried
//! - `test_concurrent_creates`: parallel uploads from spawned tasks

/// Generate a `BillStore` conformance test suite.
///
/// `$factory` is evaluated inside each async test, so it may `.await`. For the
/// concurrent test the store must also be `Clone + 'static`.
#[macro_export]
macro_rules! bill_store_tests {
    ($factory:expr) => {
        mod bill_store_contract_tests {
            use super::*;
            use newbill::core::attachment::{Attachment, FileUpload};
            use newbill::core::bill::{BillRecord, BillStatus, ExpenseType};
            use newbill::core::store::BillStore;
            use std::collections::HashSet;

            fn upload(name: &str) -> FileUpload {
                FileUpload {
                    file: Attachment::new(name, "image/png", b"testdata".to_vec()),
                    email: "a@a".to_string(),
                }
            }

            fn record(key: &str) -> BillRecord {
                BillRecord {
                    id: Some(key.to_string()),
                    email: "a@a".to_string(),
                    expense_type: ExpenseType::Hotel,
                    name: "encore".to_string(),
                    date: "2004-04-04".to_string(),
                    amount: Some(400),
                    vat: "80".to_string(),
                    pct: 20,
                    commentary: Some("séminaire billed".to_string()),
                    file_url: Some("https://localhost:3456/images/test.jpg".to_string()),
                    file_name: Some("test.png".to_string()),
                    status: BillStatus::Pending,
                }
            }

            #[tokio::test]
            async fn test_create_returns_key_and_url() {
                let store = $factory;
                let created = store.create(upload("test.png")).await.unwrap();
                assert!(!created.key.is_empty());
                assert!(!created.file_url.is_empty());
            }

            #[tokio::test]
            async fn test_create_twice_gives_distinct_keys() {
                let store = $factory;
                let a = store.create(upload("a.png")).await.unwrap();
                let b = store.create(upload("b.png")).await.unwrap();
                assert_ne!(a.key, b.key);
            }

            #[tokio::test]
            async fn test_update_with_created_key() {
                let store = $factory;
                let created = store.create(upload("test.png")).await.unwrap();
                store
                    .update(Some(&created.key), &record(&created.key))
                    .await
                    .unwrap();
            }

            #[tokio::test]
            async fn test_update_unknown_key_fails() {
                let store = $factory;
                let err = store
                    .update(Some("no-such-bill"), &record("no-such-bill"))
                    .await
                    .unwrap_err();
                assert_eq!(err.to_string(), "Erreur 404");
            }

            #[tokio::test]
            async fn test_update_is_repeatable() {
                let store = $factory;
                let created = store.create(upload("test.png")).await.unwrap();
                let bill = record(&created.key);
                store.update(Some(&created.key), &bill).await.unwrap();
                store.update(Some(&created.key), &bill).await.unwrap();
            }

            #[tokio::test]
            async fn test_concurrent_creates() {
                let store = $factory;
                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store.create(upload(&format!("{i}.png"))).await.unwrap().key
                    }));
                }

                let mut keys = HashSet::new();
                for handle in handles {
                    keys.insert(handle.await.unwrap());
                }
                assert_eq!(keys.len(), 10);
            }
        }
    };
}
