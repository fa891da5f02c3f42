//! # NewBill
//!
//! Core of the Billed expense-report form: an employee picks a receipt, fills
//! in the expense fields and submits the bill to a remote store.
//!
//! ## Features
//!
//! - **Receipt checks**: only jpg, jpeg and png receipts reach the store
//! - **Eager upload**: accepted receipts are uploaded on selection
//! - **Typed records**: inputs are collected into a [`BillRecord`](core::BillRecord)
//! - **Pluggable stores**: in-memory for tests, REST behind the `http` feature
//! - **Diagnostics**: every failure is published on a broadcast channel
//! - **Configuration-Based**: allow-lists and routes from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use newbill::prelude::*;
//! use std::sync::Arc;
//!
//! let navigator = Arc::new(HistoryNavigator::default());
//! let controller = NewBillController::new(
//!     Arc::new(InMemoryBillStore::new()),
//!     navigator.clone(),
//!     Session::employee("a@a"),
//!     FormConfig::default(),
//! )?;
//!
//! controller
//!     .handle_file_change(Some(Attachment::new("receipt.png", "image/png", bytes)))
//!     .await;
//! controller.change_field(FieldId::ExpenseName, "Vol Paris Londres").await?;
//! controller.change_field(FieldId::Date, "2019-03-09").await?;
//! controller.change_field(FieldId::Amount, "348").await?;
//!
//! controller.click_submit().await;
//! assert!(navigator.location().ends_with("#employee/bills"));
//! ```

pub mod config;
pub mod core;
pub mod form;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        attachment::{Attachment, CreatedBill, FileUpload, UploadedAttachment},
        bill::{BillRecord, BillStatus, ExpenseType},
        error::{ConfigError, FormError, SessionError, StoreError, ValidationError},
        events::{DiagnosticBus, EventEnvelope, FormEvent},
        field::{FieldId, SUBMIT_TEST_ID},
        routes::Route,
        session::{Session, UserType},
        store::BillStore,
    };

    // === Form ===
    pub use crate::form::{
        AttachmentValidator, ControllerState, FileOutcome, FormStateCollector, HistoryNavigator,
        Navigator, NewBillController, NewBillForm, SubmissionClient, SubmitOutcome, UploadState,
        Verdict,
    };

    // === Storage ===
    #[cfg(feature = "http")]
    pub use crate::storage::HttpBillStore;
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryBillStore;

    // === Config ===
    pub use crate::config::FormConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
