//! Core types shared by the form and the stores

pub mod attachment;
pub mod bill;
pub mod error;
pub mod events;
pub mod field;
pub mod routes;
pub mod session;
pub mod store;
pub mod validation;

pub use attachment::{Attachment, CreatedBill, FileUpload, UploadedAttachment};
pub use bill::{BillRecord, BillStatus, ExpenseType};
pub use error::{ConfigError, FormError, SessionError, StoreError, ValidationError};
pub use events::{DiagnosticBus, EventEnvelope, FormEvent};
pub use field::{FieldId, SUBMIT_TEST_ID};
pub use routes::Route;
pub use session::{Session, UserType};
pub use store::BillStore;
