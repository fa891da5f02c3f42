//! Bill record submitted by an employee

use serde::{Deserialize, Serialize};

/// Review status of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }
}

/// Expense categories offered by the `expense-type` select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExpenseType {
    #[default]
    #[serde(rename = "Transports")]
    Transports,
    #[serde(rename = "Restaurants et bars")]
    Restaurants,
    #[serde(rename = "Hôtel et logement")]
    Hotel,
    #[serde(rename = "Services en ligne")]
    OnlineServices,
    #[serde(rename = "IT et électronique")]
    Electronics,
    #[serde(rename = "Equipement et matériel")]
    Equipment,
    #[serde(rename = "Fournitures de bureau")]
    OfficeSupplies,
}

impl ExpenseType {
    pub const ALL: [ExpenseType; 7] = [
        ExpenseType::Transports,
        ExpenseType::Restaurants,
        ExpenseType::Hotel,
        ExpenseType::OnlineServices,
        ExpenseType::Electronics,
        ExpenseType::Equipment,
        ExpenseType::OfficeSupplies,
    ];

    /// Label as shown in the select, which is also the stored value
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseType::Transports => "Transports",
            ExpenseType::Restaurants => "Restaurants et bars",
            ExpenseType::Hotel => "Hôtel et logement",
            ExpenseType::OnlineServices => "Services en ligne",
            ExpenseType::Electronics => "IT et électronique",
            ExpenseType::Equipment => "Equipement et matériel",
            ExpenseType::OfficeSupplies => "Fournitures de bureau",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|t| t.label().to_string()).collect()
    }
}

/// An expense report as persisted by the store
///
/// `id` is the key returned by the store when the receipt was uploaded. It stays
/// `None` when the employee submits without a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub email: String,

    #[serde(rename = "type")]
    pub expense_type: ExpenseType,

    /// Vendor or expense name
    pub name: String,

    /// ISO-8601 calendar date, stored as typed
    pub date: String,

    pub amount: Option<i64>,

    pub vat: String,

    pub pct: i64,

    #[serde(default)]
    pub commentary: Option<String>,

    pub file_url: Option<String>,

    pub file_name: Option<String>,

    pub status: BillStatus,
}

impl BillRecord {
    pub fn has_attachment(&self) -> bool {
        self.file_url.is_some()
    }
}
