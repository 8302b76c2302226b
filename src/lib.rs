//! # invoice-pdf
//!
//! Invoice rendering for a small invoicing service, built around a
//! hand-assembled single-page PDF writer.
//!
//! The library turns an invoice and its account settings into an ordered
//! list of text lines and serializes them into a minimal PDF 1.4 file:
//! five fixed objects, one content stream in built-in Helvetica, an exact
//! cross-reference table and trailer. No PDF library is involved.
//!
//! ## Quick Start
//!
//! ```
//! use invoice_pdf::{build_invoice_pdf, AccountSettings, Invoice, InvoiceStatus};
//!
//! fn main() -> invoice_pdf::Result<()> {
//!     let invoice = Invoice {
//!         id: "inv_1".into(),
//!         customer_name: "Acme Inc.".into(),
//!         customer_email: "billing@acme.com".into(),
//!         amount: 1200.0,
//!         due_date: "2026-03-01".into(),
//!         status: InvoiceStatus::Sent,
//!         created_at: Some("2026-02-01T00:00:00Z".into()),
//!     };
//!
//!     let pdf = build_invoice_pdf(&invoice, &AccountSettings::default())?;
//!     assert!(pdf.starts_with(b"%PDF-1.4\n"));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Minimal PDF writer**: byte-exact offsets, 20-byte xref entries
//! - **Invoice layout**: company header, invoice details, bill-to and total
//! - **Structural checks**: parse back the xref table and verify offsets
//! - **Service layer**: config and auth gating around a pluggable datastore
//! - **Parallel processing**: uses Rayon for batch rendering

pub mod auth;
pub mod batch;
pub mod config;
pub mod error;
pub mod inspect;
pub mod model;
pub mod pdf;
pub mod render;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use auth::{AuthProvider, StaticAuth};
pub use batch::{render_batch, BatchJob, BatchOptions, BatchOutput};
pub use config::BackendConfig;
pub use error::{Error, Result};
pub use inspect::{inspect_bytes, XrefReport};
pub use model::{
    AccountSettings, AccountSettingsRow, Invoice, InvoiceInput, InvoiceRow, InvoiceStatus,
    SettingsInput, User,
};
pub use pdf::{ControlCharPolicy, LayoutOptions, PdfDocumentBuilder};
pub use render::{InvoiceRenderModel, JsonFormat, RenderLine, RenderOptions};
pub use service::{DashboardStats, InvoiceService, PdfResponse};
pub use store::{Datastore, MemoryStore};

use std::path::Path;

/// Build a one-page PDF from plain text lines with the default layout.
///
/// # Example
///
/// ```
/// use invoice_pdf::build_pdf;
///
/// let pdf = build_pdf(&["Hello", "(World)"]).unwrap();
/// assert!(pdf.ends_with(b"%%EOF\n"));
/// ```
pub fn build_pdf<S: AsRef<str>>(lines: &[S]) -> Result<Vec<u8>> {
    PdfDocumentBuilder::new().build(lines)
}

/// Render an invoice to PDF bytes with default options.
pub fn build_invoice_pdf(invoice: &Invoice, settings: &AccountSettings) -> Result<Vec<u8>> {
    InvoiceRenderModel::new(invoice, settings, RenderOptions::default()).to_pdf()
}

/// The lines drawn for an invoice, blank separators removed.
pub fn invoice_lines(invoice: &Invoice, settings: &AccountSettings) -> Vec<RenderLine> {
    InvoiceRenderModel::new(invoice, settings, RenderOptions::default()).printable_lines()
}

/// Load an invoice from a JSON file (camelCase fields).
///
/// # Example
///
/// ```no_run
/// use invoice_pdf::load_invoice;
///
/// let invoice = load_invoice("invoice.json").unwrap();
/// println!("{}", invoice.id);
/// ```
pub fn load_invoice<P: AsRef<Path>>(path: P) -> Result<Invoice> {
    let data = std::fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// Load account settings from a JSON file; missing fields take defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<AccountSettings> {
    let data = std::fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// Builder for rendering invoices.
///
/// # Example
///
/// ```
/// use invoice_pdf::{AccountSettings, Invoice, InvoicePdf, InvoiceStatus};
///
/// let invoice = Invoice {
///     id: "INV-0001".into(),
///     customer_name: "Acme Inc.".into(),
///     customer_email: "billing@acme.com".into(),
///     amount: 99.0,
///     due_date: "2026-03-01".into(),
///     status: InvoiceStatus::Draft,
///     created_at: None,
/// };
///
/// let rendered = InvoicePdf::new()
///     .lenient()
///     .render(&invoice, &AccountSettings::default())?;
/// assert!(rendered.to_text().contains("Bill To: Acme Inc."));
/// # Ok::<(), invoice_pdf::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvoicePdf {
    render_options: RenderOptions,
}

impl InvoicePdf {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace control characters with spaces instead of failing.
    pub fn lenient(mut self) -> Self {
        self.render_options = self
            .render_options
            .with_control_chars(ControlCharPolicy::Replace);
        self
    }

    /// Set the page layout.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.render_options = self.render_options.with_layout(layout);
        self
    }

    /// Fix the invoice date used when the invoice has no creation time.
    pub fn with_issue_date(mut self, date: chrono::NaiveDate) -> Self {
        self.render_options = self.render_options.with_issue_date(date);
        self
    }

    /// Render an invoice into lines and PDF bytes.
    pub fn render(&self, invoice: &Invoice, settings: &AccountSettings) -> Result<RenderedInvoice> {
        let model = InvoiceRenderModel::new(invoice, settings, self.render_options.clone());
        Ok(RenderedInvoice {
            invoice_id: invoice.id.clone(),
            lines: model.printable_lines(),
            pdf: model.to_pdf()?,
        })
    }
}

/// Result of [`InvoicePdf::render`].
#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    invoice_id: String,
    lines: Vec<RenderLine>,
    pdf: Vec<u8>,
}

impl RenderedInvoice {
    pub fn invoice_id(&self) -> &str {
        &self.invoice_id
    }

    /// Lines drawn on the page, in order.
    pub fn lines(&self) -> &[RenderLine] {
        &self.lines
    }

    /// PDF file content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pdf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pdf
    }

    /// Lines as plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.lines)
    }

    /// Lines as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.lines, format)
    }

    /// Download filename, e.g. `invoice-INV-0001.pdf`.
    pub fn filename(&self) -> String {
        PdfResponse::filename_for(&self.invoice_id)
    }

    /// Write the PDF to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.pdf)?;
        Ok(())
    }
}
