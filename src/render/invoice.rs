//! Invoice to line-list mapping.

use super::format::{format_date, format_money, format_naive_date};
use super::RenderOptions;
use crate::error::Result;
use crate::model::{AccountSettings, Invoice};
use crate::pdf::PdfDocumentBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Title used when the account has no company name.
pub const FALLBACK_TITLE: &str = "Invoice";

/// A single line of text placed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderLine {
    /// Formatted text, NFC-normalized
    pub text: String,
}

impl RenderLine {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: text.as_ref().nfc().collect(),
        }
    }

    /// A blank separator line.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Whether this is a blank separator.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

impl AsRef<str> for RenderLine {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for RenderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn labeled(label: &str, value: &str) -> RenderLine {
    if value.is_empty() {
        RenderLine::blank()
    } else {
        RenderLine::new(format!("{label}: {value}"))
    }
}

/// Assembles the ordered line list for one invoice.
#[derive(Debug, Clone)]
pub struct InvoiceRenderModel<'a> {
    invoice: &'a Invoice,
    settings: &'a AccountSettings,
    options: RenderOptions,
}

impl<'a> InvoiceRenderModel<'a> {
    pub fn new(invoice: &'a Invoice, settings: &'a AccountSettings, options: RenderOptions) -> Self {
        Self {
            invoice,
            settings,
            options,
        }
    }

    pub fn invoice(&self) -> &Invoice {
        self.invoice
    }

    fn invoice_date(&self) -> String {
        match &self.invoice.created_at {
            Some(created_at) => format_date(created_at),
            None => format_naive_date(self.options.fallback_date()),
        }
    }

    /// Every line in page order, including blank separators and the
    /// placeholders left by empty contact fields.
    pub fn lines(&self) -> Vec<RenderLine> {
        let settings = self.settings;
        let invoice = self.invoice;

        let title = if settings.company_name.is_empty() {
            FALLBACK_TITLE
        } else {
            settings.company_name.as_str()
        };
        let total = format_money(invoice.amount, &settings.default_currency);

        vec![
            RenderLine::new(title),
            RenderLine::new(&settings.company_address),
            labeled("Email", &settings.company_email),
            labeled("Phone", &settings.company_phone),
            RenderLine::blank(),
            RenderLine::new(format!("Invoice ID: {}", invoice.id)),
            RenderLine::new(format!("Invoice Date: {}", self.invoice_date())),
            RenderLine::new(format!("Due Date: {}", format_date(&invoice.due_date))),
            RenderLine::new(format!("Status: {}", invoice.status.label())),
            RenderLine::blank(),
            RenderLine::new(format!("Bill To: {}", invoice.customer_name)),
            RenderLine::new(format!("Customer Email: {}", invoice.customer_email)),
            RenderLine::blank(),
            RenderLine::new(format!(
                "Total Due ({}): {}",
                settings.default_currency, total
            )),
        ]
    }

    /// Lines that are actually drawn; blank entries are dropped.
    pub fn printable_lines(&self) -> Vec<RenderLine> {
        self.lines()
            .into_iter()
            .filter(|line| !line.is_blank())
            .collect()
    }

    /// Build the PDF for this invoice.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        let lines = self.printable_lines();
        log::debug!(
            "Rendering invoice {} with {} lines",
            self.invoice.id,
            lines.len()
        );
        PdfDocumentBuilder::with_options(self.options.layout.clone()).build(&lines)
    }
}
