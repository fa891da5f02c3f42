//! Turns the form's current values into a bill record

use crate::config::FormConfig;
use crate::core::attachment::UploadedAttachment;
use crate::core::bill::{BillRecord, BillStatus, ExpenseType};
use crate::core::field::FieldId;
use crate::core::session::Session;
use crate::core::validation::leading_integer;
use crate::form::inputs::NewBillForm;

/// Reads the inputs at submit time and assembles a [`BillRecord`]
///
/// Required-ness is the input layer's job (see [`NewBillForm::check_validity`]);
/// the collector takes whatever is there. Blank numbers become `None` and an
/// unknown expense type falls back to the first category.
#[derive(Debug, Clone)]
pub struct FormStateCollector {
    default_pct: i64,
    default_status: BillStatus,
}

impl FormStateCollector {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            default_pct: config.default_pct,
            default_status: config.default_status,
        }
    }

    pub fn collect(
        &self,
        form: &NewBillForm,
        session: &Session,
        attachment: Option<&UploadedAttachment>,
    ) -> BillRecord {
        let commentary = form.value(FieldId::Commentary);

        BillRecord {
            id: attachment.map(|a| a.bill_id.clone()),
            email: session.email.clone(),
            expense_type: ExpenseType::from_label(form.value(FieldId::ExpenseType))
                .unwrap_or_default(),
            name: form.value(FieldId::ExpenseName).to_string(),
            date: form.value(FieldId::Date).to_string(),
            amount: leading_integer(form.value(FieldId::Amount)),
            vat: form.value(FieldId::Vat).to_string(),
            pct: leading_integer(form.value(FieldId::Pct)).unwrap_or(self.default_pct),
            commentary: (!commentary.trim().is_empty()).then(|| commentary.to_string()),
            file_url: attachment.map(|a| a.file_url.clone()),
            file_name: attachment.map(|a| a.file_name.clone()),
            status: self.default_status,
        }
    }
}

impl Default for FormStateCollector {
    fn default() -> Self {
        Self::new(&FormConfig::default())
    }
}
