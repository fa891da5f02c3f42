//! The NewBill form
//!
//! Inputs, receipt checks, record collection and the page controller that
//! ties them to a [`BillStore`](crate::core::store::BillStore).

pub mod attachment_validator;
pub mod client;
pub mod collector;
pub mod controller;
pub mod inputs;
pub mod navigation;

pub use attachment_validator::{AttachmentRejection, AttachmentValidator, Verdict};
pub use client::SubmissionClient;
pub use collector::FormStateCollector;
pub use controller::{ControllerState, FileOutcome, NewBillController, SubmitOutcome, UploadState};
pub use inputs::{FileInput, NewBillForm};
pub use navigation::{HistoryNavigator, Navigator};
