//! Shared test harness for the NewBill form
//!
//! Provides `MockBillStore`, a scriptable `BillStore` that counts calls, can
//! fail or hold back `create`/`update`, plus helpers to build a controller
//! wired to a `HistoryNavigator`.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod form_harness;
//! use form_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod bill_store_tests;

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use newbill::prelude::*;

pub const EMPLOYEE_EMAIL: &str = "employee@test.tld";
pub const FILE_URL: &str = "https://localhost:3456/images/test.jpg";

// ---------------------------------------------------------------------------
// MockBillStore
// ---------------------------------------------------------------------------

/// Scriptable store recording every call it receives
#[derive(Default)]
pub struct MockBillStore {
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    uploads: Mutex<Vec<FileUpload>>,
    updates: Mutex<Vec<(Option<String>, BillRecord)>>,
    create_error: Mutex<Option<StoreError>>,
    update_error: Mutex<Option<StoreError>>,
    create_gate: Mutex<Option<Arc<Notify>>>,
    update_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockBillStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<FileUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(Option<String>, BillRecord)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn last_update(&self) -> Option<(Option<String>, BillRecord)> {
        self.updates.lock().unwrap().last().cloned()
    }

    /// Make every following `create` fail
    pub fn fail_create(&self, error: Option<StoreError>) {
        *self.create_error.lock().unwrap() = error;
    }

    /// Make every following `update` fail
    pub fn fail_update(&self, error: Option<StoreError>) {
        *self.update_error.lock().unwrap() = error;
    }

    /// Hold the next `create` until the returned gate is notified
    pub fn hold_next_create(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.create_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Hold the next `update` until the returned gate is notified
    pub fn hold_next_update(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.update_gate.lock().unwrap() = Some(gate.clone());
        gate
    }
}

#[async_trait]
impl BillStore for MockBillStore {
    async fn create(&self, upload: FileUpload) -> Result<CreatedBill, StoreError> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.uploads.lock().unwrap().push(upload);

        let gate = self.create_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let error = self.create_error.lock().unwrap().clone();
        match error {
            Some(err) => Err(err),
            None => Ok(CreatedBill {
                file_url: FILE_URL.to_string(),
                key: format!("bill-{n}"),
            }),
        }
    }

    async fn update(&self, key: Option<&str>, bill: &BillRecord) -> Result<(), StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.updates
            .lock()
            .unwrap()
            .push((key.map(str::to_string), bill.clone()));

        let gate = self.update_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let error = self.update_error.lock().unwrap().clone();
        match error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A controller for an employee session, plus its store and navigator
pub struct Page {
    pub controller: NewBillController,
    pub store: Arc<MockBillStore>,
    pub navigator: Arc<HistoryNavigator>,
}

pub fn new_bill_page() -> Page {
    new_bill_page_with(FormConfig::default())
}

pub fn new_bill_page_with(config: FormConfig) -> Page {
    let store = MockBillStore::new();
    let navigator = Arc::new(HistoryNavigator::default());
    let controller = NewBillController::new(
        store.clone(),
        navigator.clone(),
        Session::employee(EMPLOYEE_EMAIL),
        config,
    )
    .unwrap();

    Page {
        controller,
        store,
        navigator,
    }
}

pub fn png(name: &str) -> Attachment {
    Attachment::new(name, "image/png", b"\x89PNG testdata".to_vec())
}

pub fn jpg(name: &str) -> Attachment {
    Attachment::new(name, "image/jpeg", b"\xFF\xD8 testdata".to_vec())
}

pub fn pdf(name: &str) -> Attachment {
    Attachment::new(name, "application/pdf", b"%PDF-1.4".to_vec())
}

/// Fill the required inputs with valid values
pub async fn fill_required(controller: &NewBillController) {
    controller
        .change_field(FieldId::ExpenseName, "Vol Paris Londres")
        .await
        .unwrap();
    controller
        .change_field(FieldId::Date, "2019-03-09")
        .await
        .unwrap();
    controller.change_field(FieldId::Amount, "348").await.unwrap();
}

/// Events already published on `rx`
pub fn drain(rx: &mut tokio::sync::broadcast::Receiver<EventEnvelope>) -> Vec<FormEvent> {
    newbill::core::events::drain(rx)
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

pub fn assert_no_navigation(navigator: &HistoryNavigator) {
    assert!(
        navigator.history().is_empty(),
        "expected no navigation, got {:?}",
        navigator.history()
    );
}

pub fn assert_reported(events: &[FormEvent], message: &str) {
    assert!(
        events.iter().any(|e| e.error_message() == Some(message)),
        "expected '{}' on the diagnostic channel, got {:?}",
        message,
        events
    );
}
