//! Dashboard metrics.

use crate::model::{Invoice, InvoiceStatus};
use crate::render::{format_money, parse_date};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Summary figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_invoices: usize,

    /// Sum of invoices that are not paid yet
    pub pending_amount: f64,

    /// Sum of paid invoices created in the current month
    pub paid_this_month: f64,

    /// Currency the amounts are expressed in
    pub currency: String,
}

impl DashboardStats {
    /// Compute the figures for `today`.
    pub fn compute(invoices: &[Invoice], currency: &str, today: NaiveDate) -> Self {
        let mut pending_amount = 0.0;
        let mut paid_this_month = 0.0;

        for invoice in invoices {
            if invoice.status.is_outstanding() {
                pending_amount += invoice.amount;
            } else if invoice.status == InvoiceStatus::Paid
                && is_same_month(invoice.created_at.as_deref(), today)
            {
                paid_this_month += invoice.amount;
            }
        }

        Self {
            total_invoices: invoices.len(),
            pending_amount,
            paid_this_month,
            currency: currency.to_string(),
        }
    }

    pub fn formatted_pending(&self) -> String {
        format_money(self.pending_amount, &self.currency)
    }

    pub fn formatted_paid_this_month(&self) -> String {
        format_money(self.paid_this_month, &self.currency)
    }
}

fn is_same_month(timestamp: Option<&str>, today: NaiveDate) -> bool {
    timestamp
        .and_then(parse_date)
        .is_some_and(|date| date.year() == today.year() && date.month() == today.month())
}
