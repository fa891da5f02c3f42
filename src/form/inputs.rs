//! Input surface of the NewBill page
//!
//! `NewBillForm` holds the raw values of every input, keyed by test id. Values
//! are stored exactly as typed; interpretation happens in the collector.

use crate::core::attachment::Attachment;
use crate::core::bill::ExpenseType;
use crate::core::error::{FieldValidationError, FormError, ValidationError};
use crate::core::field::FieldId;
use crate::core::validation::{FieldValidator, validators};
use std::collections::HashMap;

/// The `file` input: at most one selected receipt plus the message shown under it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInput {
    file: Option<Attachment>,
    message: Option<String>,
}

impl FileInput {
    /// Selected files, as the DOM `files` list exposes them
    pub fn files(&self) -> &[Attachment] {
        self.file.as_slice()
    }

    pub fn selected(&self) -> Option<&Attachment> {
        self.file.as_ref()
    }

    /// Input value as the browser reports it, empty when cleared
    pub fn value(&self) -> String {
        self.file
            .as_ref()
            .map(|f| format!(r"C:\fakepath\{}", f.file_name))
            .unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub(crate) fn select(&mut self, file: Attachment) {
        self.file = Some(file);
        self.message = None;
    }

    pub(crate) fn reject(&mut self, message: impl Into<String>) {
        self.file = None;
        self.message = Some(message.into());
    }

    pub(crate) fn clear(&mut self) {
        self.file = None;
        self.message = None;
    }
}

/// Values of the NewBill inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBillForm {
    values: HashMap<FieldId, String>,
    file: FileInput,
}

impl Default for NewBillForm {
    fn default() -> Self {
        let mut values = HashMap::new();
        // A select always has a value: its first option
        values.insert(
            FieldId::ExpenseType,
            ExpenseType::default().label().to_string(),
        );
        Self {
            values,
            file: FileInput::default(),
        }
    }
}

impl NewBillForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a text input, empty when never set
    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Current value by test id
    pub fn value_of(&self, test_id: &str) -> Result<&str, FormError> {
        let field: FieldId = test_id.parse()?;
        if field == FieldId::File {
            return Err(FormError::UnknownField {
                test_id: test_id.to_string(),
            });
        }
        Ok(self.value(field))
    }

    /// Type into a text input; the value is stored verbatim
    ///
    /// The file input cannot be typed into; use the controller's file-change
    /// handler instead.
    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) -> Result<(), FormError> {
        if field == FieldId::File {
            return Err(FormError::UnknownField {
                test_id: field.test_id().to_string(),
            });
        }
        self.values.insert(field, value.into());
        Ok(())
    }

    pub fn file_input(&self) -> &FileInput {
        &self.file
    }

    pub(crate) fn file_input_mut(&mut self) -> &mut FileInput {
        &mut self.file
    }

    /// Run the page's constraints, like `form.checkValidity()`
    ///
    /// Returns every failing field at once.
    pub fn check_validity(&self) -> Result<(), ValidationError> {
        let errors: Vec<FieldValidationError> = FieldId::TEXT_FIELDS
            .into_iter()
            .flat_map(|field| {
                let value = self.value(field);
                constraints(field)
                    .into_iter()
                    .filter_map(move |check| check(field.test_id(), value).err())
                    .take(1)
                    .map(move |message| FieldValidationError {
                        field: field.test_id().to_string(),
                        message,
                    })
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::from_fields(errors))
        }
    }
}

fn constraints(field: FieldId) -> Vec<FieldValidator> {
    let mut checks: Vec<FieldValidator> = Vec::new();
    if field.is_required() {
        checks.push(Box::new(validators::required()));
    }
    match field {
        FieldId::ExpenseType => checks.push(Box::new(validators::in_list(ExpenseType::labels()))),
        FieldId::Date => checks.push(Box::new(validators::iso_date())),
        FieldId::Amount => {
            checks.push(Box::new(validators::numeric()));
            checks.push(Box::new(validators::positive()));
        }
        FieldId::Vat | FieldId::Pct => checks.push(Box::new(validators::numeric())),
        FieldId::ExpenseName | FieldId::Commentary | FieldId::File => {}
    }
    checks
}
