//! Request-level operations.
//!
//! [`InvoiceService`] wires backend configuration, the auth provider and the
//! datastore around the renderer. Every operation checks configuration
//! first, then authentication, before touching the store.

mod dashboard;
mod response;

pub use dashboard::DashboardStats;
pub use response::{PdfResponse, PDF_CACHE_CONTROL, PDF_CONTENT_TYPE};

use crate::auth::AuthProvider;
use crate::config::BackendConfig;
use crate::error::{Error, Result};
use crate::model::{
    AccountSettings, Invoice, InvoiceInput, InvoiceRow, SettingsInput, User,
};
use crate::render::{InvoiceRenderModel, RenderOptions};
use crate::store::Datastore;
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

/// Invoice operations for the user behind the current request.
#[derive(Clone)]
pub struct InvoiceService {
    config: Option<BackendConfig>,
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn Datastore>,
    render_options: RenderOptions,
    fixed_now: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for InvoiceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceService")
            .field("config", &self.config)
            .field("render_options", &self.render_options)
            .field("fixed_now", &self.fixed_now)
            .finish_non_exhaustive()
    }
}

impl InvoiceService {
    /// Create a service. `config` is `None` when the backend is not set up.
    pub fn new(
        config: Option<BackendConfig>,
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn Datastore>,
    ) -> Self {
        Self {
            config,
            auth,
            store,
            render_options: RenderOptions::default(),
            fixed_now: None,
        }
    }

    /// Set the options used when rendering PDFs.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Pin the clock, for reproducible ids, dates and dashboards.
    pub fn with_fixed_time(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }

    /// Resolve the request's user, or fail with 503 / 401.
    pub fn require_user(&self) -> Result<User> {
        if self.config.is_none() {
            return Err(Error::NotConfigured);
        }
        self.auth.current_user().ok_or(Error::Unauthorized)
    }

    fn load_settings(&self, user: &User) -> Result<AccountSettings> {
        let row = self.store.find_settings(&user.id)?;
        Ok(AccountSettings::from_row(row.as_ref()))
    }

    fn load_invoice(&self, user: &User, id: &str) -> Result<Invoice> {
        let row = self
            .store
            .find_invoice(&user.id, id)?
            .ok_or_else(|| Error::InvoiceNotFound(id.to_string()))?;
        Invoice::try_from(row)
    }

    /// Render one invoice as a PDF download.
    pub fn invoice_pdf(&self, id: &str) -> Result<PdfResponse> {
        let user = self.require_user()?;
        let invoice = self.load_invoice(&user, id)?;
        let settings = self.load_settings(&user)?;

        let options = RenderOptions {
            issue_date: self
                .render_options
                .issue_date
                .or_else(|| Some(self.now().date_naive())),
            ..self.render_options.clone()
        };
        let body = InvoiceRenderModel::new(&invoice, &settings, options).to_pdf()?;

        log::info!(
            "Rendered invoice {} for user {} ({} bytes)",
            invoice.id,
            user.id,
            body.len()
        );
        Ok(PdfResponse::new(&invoice.id, body))
    }

    /// All invoices of the current user, newest first.
    pub fn list_invoices(&self) -> Result<Vec<Invoice>> {
        let user = self.require_user()?;
        self.store
            .list_invoices(&user.id)?
            .into_iter()
            .map(Invoice::try_from)
            .collect()
    }

    /// One invoice of the current user.
    pub fn get_invoice(&self, id: &str) -> Result<Invoice> {
        let user = self.require_user()?;
        self.load_invoice(&user, id)
    }

    /// Validate and store a new invoice numbered `<PREFIX>-<NNNN>`.
    pub fn create_invoice(&self, input: &InvoiceInput) -> Result<Invoice> {
        let user = self.require_user()?;
        let draft = input.validate()?;
        let settings = self.load_settings(&user)?;

        let number = self.store.next_invoice_number(&user.id)?;
        let id = format!("{}-{:04}", settings.invoice_prefix, number);
        let created_at = self.now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let invoice = draft.into_invoice(id, Some(created_at));

        self.store
            .insert_invoice(&user.id, InvoiceRow::from(&invoice))?;
        log::debug!("Created invoice {} for user {}", invoice.id, user.id);
        Ok(invoice)
    }

    /// Replace the editable fields of an invoice; id and creation time stay.
    pub fn update_invoice(&self, id: &str, input: &InvoiceInput) -> Result<Invoice> {
        let user = self.require_user()?;
        let draft = input.validate()?;
        let existing = self.load_invoice(&user, id)?;

        let invoice = draft.into_invoice(existing.id, existing.created_at);
        if !self
            .store
            .update_invoice(&user.id, InvoiceRow::from(&invoice))?
        {
            return Err(Error::InvoiceNotFound(id.to_string()));
        }
        Ok(invoice)
    }

    pub fn delete_invoice(&self, id: &str) -> Result<()> {
        let user = self.require_user()?;
        if !self.store.delete_invoice(&user.id, id)? {
            return Err(Error::InvoiceNotFound(id.to_string()));
        }
        log::debug!("Deleted invoice {} for user {}", id, user.id);
        Ok(())
    }

    /// Settings of the current user, defaults when never saved.
    pub fn settings(&self) -> Result<AccountSettings> {
        let user = self.require_user()?;
        self.load_settings(&user)
    }

    /// Validate and upsert the current user's settings.
    pub fn save_settings(&self, input: &SettingsInput) -> Result<AccountSettings> {
        let user = self.require_user()?;
        let settings = input.validate()?;
        self.store.upsert_settings(&user.id, settings.to_row())?;
        Ok(settings)
    }

    /// Due date a new invoice form should start with.
    pub fn default_due_date(&self) -> Result<String> {
        let user = self.require_user()?;
        let settings = self.load_settings(&user)?;
        Ok(settings.due_date_from(self.now().date_naive()))
    }

    /// Totals for the dashboard, in the user's default currency.
    pub fn dashboard(&self) -> Result<DashboardStats> {
        let invoices = self.list_invoices()?;
        let settings = self.settings()?;
        Ok(DashboardStats::compute(
            &invoices,
            &settings.default_currency,
            self.now().date_naive(),
        ))
    }
}
