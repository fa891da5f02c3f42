//! NewBill page controller
//!
//! Wires the page events to validation, collection and submission.
//!
//! # State machine
//!
//! ```text
//!            file accepted            submit                update ok
//!   Idle ─────────────────▶ FileSelected ─────▶ Submitting ───────────▶ Done
//!     ▲                                            │
//!     └──────────── Failed ◀───────────────────────┘ update err
//! ```
//!
//! Handlers take `&self`; the form and state sit behind an async mutex that is
//! released before every store call, so a second submit arriving while the
//! first is in flight sees `Submitting` and is turned away.

use crate::config::FormConfig;
use crate::core::attachment::{Attachment, UploadedAttachment};
use crate::core::error::{FormError, ValidationError};
use crate::core::events::{DiagnosticBus, EventEnvelope, FormEvent};
use crate::core::field::FieldId;
use crate::core::session::Session;
use crate::core::store::BillStore;
use crate::form::attachment_validator::{AttachmentRejection, AttachmentValidator, Verdict};
use crate::form::client::SubmissionClient;
use crate::form::collector::FormStateCollector;
use crate::form::inputs::NewBillForm;
use crate::form::navigation::Navigator;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};

/// Lifecycle of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    FileSelected,
    Submitting,
    Done,
    /// Last submit failed; the form is editable again
    Failed,
}

/// Upload status of the currently selected receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    /// Nothing uploaded yet
    None,
    Pending,
    Ready(UploadedAttachment),
    Failed { message: String },
}

/// Result of a file-change event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The input was cleared; no upload is started
    NoFile,
    /// The receipt was refused and the input cleared
    Rejected(AttachmentRejection),
    Uploaded(UploadedAttachment),
    UploadFailed { message: String },
    /// Another file was selected before this upload finished
    Superseded,
}

/// Result of a submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The bill was persisted and the form navigated away
    Submitted { route: String },
    /// The store refused the bill; `message` is its message verbatim
    Failed { message: String },
    /// Constraint validation blocked the submit
    Invalid(ValidationError),
    /// The selected receipt is still uploading or its upload failed
    AttachmentNotReady,
    /// A submit is already in flight
    InFlight,
}

struct FormSession {
    form: NewBillForm,
    state: ControllerState,
    upload: UploadState,
    /// Bumped on every accepted selection; upload results for older ones are dropped
    selection: u64,
}

/// Controller of the NewBill page
pub struct NewBillController {
    client: SubmissionClient,
    navigator: Arc<dyn Navigator>,
    session: Session,
    validator: AttachmentValidator,
    collector: FormStateCollector,
    config: FormConfig,
    diagnostics: DiagnosticBus,
    inner: Mutex<FormSession>,
}

impl NewBillController {
    /// Build the controller for a signed-in employee
    pub fn new(
        store: Arc<dyn BillStore>,
        navigator: Arc<dyn Navigator>,
        session: Session,
        config: FormConfig,
    ) -> Result<Self, FormError> {
        session.require_employee()?;
        config.validate()?;

        Ok(Self {
            client: SubmissionClient::new(store),
            navigator,
            validator: AttachmentValidator::new(&config),
            collector: FormStateCollector::new(&config),
            diagnostics: DiagnosticBus::new(config.diagnostics_capacity),
            session,
            config,
            inner: Mutex::new(FormSession {
                form: NewBillForm::new(),
                state: ControllerState::Idle,
                upload: UploadState::None,
                selection: 0,
            }),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Diagnostic channel the controller reports on
    pub fn diagnostics(&self) -> &DiagnosticBus {
        &self.diagnostics
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.diagnostics.subscribe()
    }

    pub async fn state(&self) -> ControllerState {
        self.inner.lock().await.state
    }

    pub async fn upload_state(&self) -> UploadState {
        self.inner.lock().await.upload.clone()
    }

    /// Snapshot of the inputs
    pub async fn form(&self) -> NewBillForm {
        self.inner.lock().await.form.clone()
    }

    /// Number of files held by the `file` input
    pub async fn file_count(&self) -> usize {
        self.inner.lock().await.form.file_input().files().len()
    }

    /// Change event on a text input
    pub async fn change_field(&self, field: FieldId, value: impl Into<String>) -> Result<(), FormError> {
        self.inner.lock().await.form.set_value(field, value)
    }

    /// Change event on a text input addressed by its test id
    pub async fn change_field_by_test_id(
        &self,
        test_id: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.change_field(test_id.parse()?, value).await
    }

    /// Change event on the `file` input
    ///
    /// Accepted receipts are uploaded straight away. Store failures are reported
    /// on the diagnostic channel and never returned as errors.
    pub async fn handle_file_change(&self, file: Option<Attachment>) -> FileOutcome {
        let Some(file) = file else {
            // An earlier upload stays attached
            self.inner.lock().await.form.file_input_mut().clear();
            return FileOutcome::NoFile;
        };

        if let Verdict::Reject(reason) = self.validator.check(&file) {
            let mut inner = self.inner.lock().await;
            inner
                .form
                .file_input_mut()
                .reject(self.validator.user_message());
            drop(inner);

            tracing::warn!(
                file_name = %file.file_name,
                declared_type = %file.declared_type,
                reason = %reason,
                "Receipt rejected"
            );
            self.diagnostics.publish(FormEvent::AttachmentRejected {
                file_name: file.file_name,
                reason: reason.to_string(),
            });
            return FileOutcome::Rejected(reason);
        }

        let generation = {
            let mut inner = self.inner.lock().await;
            inner.selection += 1;
            inner.form.file_input_mut().select(file.clone());
            inner.upload = UploadState::Pending;
            if inner.state != ControllerState::Submitting {
                inner.state = ControllerState::FileSelected;
            }
            inner.selection
        };

        let file_name = file.file_name.clone();
        let result = self.client.create(file, &self.session.email).await;

        let mut inner = self.inner.lock().await;
        if inner.selection != generation {
            tracing::debug!(file_name = %file_name, "Discarding upload of a replaced receipt");
            return FileOutcome::Superseded;
        }

        match result {
            Ok(uploaded) => {
                inner.upload = UploadState::Ready(uploaded.clone());
                drop(inner);

                tracing::info!(bill_id = %uploaded.bill_id, file_name = %file_name, "Receipt attached");
                self.diagnostics.publish(FormEvent::AttachmentUploaded {
                    bill_id: uploaded.bill_id.clone(),
                    file_url: uploaded.file_url.clone(),
                    file_name: uploaded.file_name.clone(),
                });
                FileOutcome::Uploaded(uploaded)
            }
            Err(err) => {
                let message = err.to_string();
                inner.upload = UploadState::Failed {
                    message: message.clone(),
                };
                if inner.state == ControllerState::FileSelected {
                    inner.state = ControllerState::Idle;
                }
                drop(inner);

                tracing::error!(file_name = %file_name, error = %message, "Receipt upload failed");
                self.diagnostics.publish(FormEvent::UploadFailed {
                    file_name,
                    message: message.clone(),
                });
                FileOutcome::UploadFailed { message }
            }
        }
    }

    /// Click on `btn-send`
    ///
    /// Goes straight to [`Self::handle_submit`] unless `enforce_constraints` is
    /// set, in which case an invalid form is refused the way a browser would.
    pub async fn click_submit(&self) -> SubmitOutcome {
        if self.config.enforce_constraints {
            let checked = self.inner.lock().await.form.check_validity();
            if let Err(err) = checked {
                tracing::debug!(fields = ?err.fields(), "Submit blocked by constraint validation");
                return SubmitOutcome::Invalid(err);
            }
        }
        self.handle_submit().await
    }

    /// Submit handler
    ///
    /// Collects the inputs and persists the bill. At most one update is in
    /// flight at any time.
    pub async fn handle_submit(&self) -> SubmitOutcome {
        let bill = {
            let mut inner = self.inner.lock().await;
            if inner.state == ControllerState::Submitting {
                tracing::debug!("Submit ignored, another one is in flight");
                return SubmitOutcome::InFlight;
            }

            let attachment = match &inner.upload {
                UploadState::None => None,
                UploadState::Ready(uploaded) => Some(uploaded.clone()),
                UploadState::Pending | UploadState::Failed { .. } => {
                    tracing::debug!("Submit ignored, receipt is not uploaded");
                    return SubmitOutcome::AttachmentNotReady;
                }
            };

            let bill = self
                .collector
                .collect(&inner.form, &self.session, attachment.as_ref());
            inner.state = ControllerState::Submitting;
            bill
        };

        match self.client.update(&bill).await {
            Ok(()) => {
                self.inner.lock().await.state = ControllerState::Done;

                tracing::info!(bill_id = ?bill.id, "Bill submitted");
                self.diagnostics
                    .publish(FormEvent::Submitted { bill_id: bill.id });

                let route = self.config.success_route.clone();
                self.navigator.on_navigate(&route);
                self.diagnostics.publish(FormEvent::Navigated {
                    route: route.clone(),
                });
                SubmitOutcome::Submitted { route }
            }
            Err(err) => {
                self.inner.lock().await.state = ControllerState::Failed;

                let message = err.to_string();
                tracing::error!(error = %message, code = err.error_code(), "Bill submission failed");
                self.diagnostics.publish(FormEvent::SubmitFailed {
                    message: message.clone(),
                });
                SubmitOutcome::Failed { message }
            }
        }
    }
}

impl std::fmt::Debug for NewBillController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewBillController")
            .field("session", &self.session)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
