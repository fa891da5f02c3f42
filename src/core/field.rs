//! Form input identifiers
//!
//! Inputs are addressed by their `data-testid`, which is what hosts and tests
//! see on the page.

use crate::core::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Test id of the submit control
pub const SUBMIT_TEST_ID: &str = "btn-send";

/// A value-carrying input of the NewBill form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldId {
    ExpenseType,
    ExpenseName,
    Date,
    Amount,
    Vat,
    Pct,
    Commentary,
    File,
}

impl FieldId {
    /// Text inputs, in page order. The file input is handled separately.
    pub const TEXT_FIELDS: [FieldId; 7] = [
        FieldId::ExpenseType,
        FieldId::ExpenseName,
        FieldId::Date,
        FieldId::Amount,
        FieldId::Vat,
        FieldId::Pct,
        FieldId::Commentary,
    ];

    pub fn test_id(&self) -> &'static str {
        match self {
            FieldId::ExpenseType => "expense-type",
            FieldId::ExpenseName => "expense-name",
            FieldId::Date => "datepicker",
            FieldId::Amount => "amount",
            FieldId::Vat => "vat",
            FieldId::Pct => "pct",
            FieldId::Commentary => "commentary",
            FieldId::File => "file",
        }
    }

    /// Whether the page marks the input as `required`
    pub fn is_required(&self) -> bool {
        matches!(self, FieldId::ExpenseName | FieldId::Date | FieldId::Amount)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.test_id())
    }
}

impl FromStr for FieldId {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::TEXT_FIELDS
            .into_iter()
            .chain(std::iter::once(FieldId::File))
            .find(|f| f.test_id() == s)
            .ok_or_else(|| FormError::UnknownField {
                test_id: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_test_ids() {
        assert_eq!("datepicker".parse::<FieldId>().unwrap(), FieldId::Date);
        assert_eq!("file".parse::<FieldId>().unwrap(), FieldId::File);
        assert_eq!("expense-type".parse::<FieldId>().unwrap(), FieldId::ExpenseType);
    }

    #[test]
    fn test_parse_unknown_test_id() {
        let err = "icon-mail".parse::<FieldId>().unwrap_err();
        assert!(matches!(err, FormError::UnknownField { test_id } if test_id == "icon-mail"));
    }

    #[test]
    fn test_display_is_test_id() {
        for field in FieldId::TEXT_FIELDS {
            assert_eq!(field.to_string().parse::<FieldId>().unwrap(), field);
        }
    }

    #[test]
    fn test_required_fields() {
        assert!(FieldId::Date.is_required());
        assert!(FieldId::Amount.is_required());
        assert!(!FieldId::Commentary.is_required());
        assert!(!FieldId::Vat.is_required());
        assert!(!FieldId::File.is_required());
    }
}
