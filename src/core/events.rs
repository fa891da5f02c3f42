//! Diagnostic channel for the NewBill form
//!
//! Every observable outcome of the form (rejected receipt, upload, submission,
//! failure) is published on a [`DiagnosticBus`]. It uses `tokio::sync::broadcast`
//! so hosts and tests can subscribe without the controller knowing about them.
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = DiagnosticBus::new(64);
//! let mut rx = bus.subscribe();
//!
//! // ... submit the form ...
//!
//! if let Ok(envelope) = rx.recv().await {
//!     if let FormEvent::SubmitFailed { message } = envelope.event {
//!         eprintln!("{}", message);
//!     }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Something the form did that a host may want to report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FormEvent {
    /// A selected receipt was refused by the allow-list
    AttachmentRejected { file_name: String, reason: String },

    /// A receipt was uploaded and a bill key reserved
    AttachmentUploaded {
        bill_id: String,
        file_url: String,
        file_name: String,
    },

    /// The receipt upload failed
    UploadFailed { file_name: String, message: String },

    /// The bill was persisted
    Submitted { bill_id: Option<String> },

    /// Persisting the bill failed; `message` is the store's message verbatim
    SubmitFailed { message: String },

    /// The form asked the host to change page
    Navigated { route: String },
}

impl FormEvent {
    /// Get the action name
    pub fn action(&self) -> &str {
        match self {
            FormEvent::AttachmentRejected { .. } => "attachment_rejected",
            FormEvent::AttachmentUploaded { .. } => "attachment_uploaded",
            FormEvent::UploadFailed { .. } => "upload_failed",
            FormEvent::Submitted { .. } => "submitted",
            FormEvent::SubmitFailed { .. } => "submit_failed",
            FormEvent::Navigated { .. } => "navigated",
        }
    }

    /// Error message carried by failure events
    pub fn error_message(&self) -> Option<&str> {
        match self {
            FormEvent::UploadFailed { message, .. } | FormEvent::SubmitFailed { message } => {
                Some(message)
            }
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error_message().is_some()
    }
}

/// Envelope wrapping a form event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: FormEvent,
}

impl EventEnvelope {
    pub fn new(event: FormEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based diagnostic channel
///
/// Cheap to clone; all clones publish to the same subscribers.
#[derive(Debug, Clone)]
pub struct DiagnosticBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl DiagnosticBus {
    /// Create a bus buffering up to `capacity` events per lagging subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Returns the number of receivers that will see the event.
    pub fn publish(&self, event: FormEvent) -> usize {
        // send() only errs when nobody is listening
        self.sender.send(EventEnvelope::new(event)).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for DiagnosticBus {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Drain every event already buffered on `rx`
pub fn drain(rx: &mut broadcast::Receiver<EventEnvelope>) -> Vec<FormEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(envelope) => events.push(envelope.event),
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    events
}
