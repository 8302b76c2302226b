//! Invoice types, datastore rows and form validation.

use super::rules;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Not yet sent to the customer
    #[default]
    Draft,
    /// Sent and awaiting payment
    Sent,
    /// Paid in full
    Paid,
}

impl InvoiceStatus {
    /// Stored representation (`draft`, `sent`, `paid`).
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
        }
    }

    /// Display label with the first letter capitalized.
    pub fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
        }
    }

    /// Whether payment is still expected.
    pub fn is_outstanding(self) -> bool {
        self != InvoiceStatus::Paid
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "draft" => Ok(InvoiceStatus::Draft),
            "sent" => Ok(InvoiceStatus::Sent),
            "paid" => Ok(InvoiceStatus::Paid),
            _ => Err(Error::Validation("Status must be draft, sent, or paid".into())),
        }
    }
}

/// An invoice as consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice identifier
    pub id: String,

    /// Customer (bill-to) name
    pub customer_name: String,

    /// Customer email
    pub customer_email: String,

    /// Amount due in the account's currency
    pub amount: f64,

    /// Due date (ISO-8601 date)
    pub due_date: String,

    /// Current status
    pub status: InvoiceStatus,

    /// Creation timestamp (ISO-8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Amount column, stored either as a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowAmount {
    Number(f64),
    Text(String),
}

impl RowAmount {
    /// Numeric value, if the column holds a finite number.
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            RowAmount::Number(value) => *value,
            RowAmount::Text(text) => text.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Invoice row as stored in the datastore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub amount: RowAmount,
    pub due_date: String,
    pub status: InvoiceStatus,
    pub created_at: Option<String>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = Error;

    fn try_from(row: InvoiceRow) -> Result<Self> {
        let amount = row.amount.value().ok_or_else(|| {
            Error::Datastore(format!("invoice {} has a non-numeric amount", row.id))
        })?;

        Ok(Invoice {
            id: row.id,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            amount,
            due_date: row.due_date,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

impl From<&Invoice> for InvoiceRow {
    fn from(invoice: &Invoice) -> Self {
        InvoiceRow {
            id: invoice.id.clone(),
            customer_name: invoice.customer_name.clone(),
            customer_email: invoice.customer_email.clone(),
            amount: RowAmount::Number(invoice.amount),
            due_date: invoice.due_date.clone(),
            status: invoice.status,
            created_at: invoice.created_at.clone(),
        }
    }
}

/// Raw invoice form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceInput {
    pub customer_name: String,
    pub customer_email: String,
    pub amount: String,
    pub due_date: String,
    pub status: String,
}

/// Validated invoice fields, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub customer_name: String,
    pub customer_email: String,
    pub amount: f64,
    pub due_date: String,
    pub status: InvoiceStatus,
}

impl InvoiceDraft {
    /// Attach an id and creation time.
    pub fn into_invoice(self, id: impl Into<String>, created_at: Option<String>) -> Invoice {
        Invoice {
            id: id.into(),
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            amount: self.amount,
            due_date: self.due_date,
            status: self.status,
            created_at,
        }
    }
}

impl InvoiceInput {
    /// Validate the submission; the first failing field wins.
    pub fn validate(&self) -> Result<InvoiceDraft> {
        let customer_name = self.customer_name.trim();
        if customer_name.chars().count() < 2 {
            return Err(Error::Validation("Customer name is required".into()));
        }

        if !rules::is_email(&self.customer_email) {
            return Err(Error::Validation("Enter a valid email".into()));
        }

        let amount = parse_amount(&self.amount)?;
        if amount <= 0.0 {
            return Err(Error::Validation("Amount must be greater than 0".into()));
        }

        if self.due_date.is_empty() {
            return Err(Error::Validation("Due date is required".into()));
        }

        let status = self.status.parse()?;

        Ok(InvoiceDraft {
            customer_name: customer_name.to_string(),
            customer_email: self.customer_email.clone(),
            amount,
            due_date: self.due_date.clone(),
            status,
        })
    }
}

/// Coerce a form value to a number; blank counts as zero.
fn parse_amount(value: &str) -> Result<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| Error::Validation("Amount must be a number".into()))
}
