//! Domain model for invoices and account settings.
//!
//! Types here mirror what the datastore holds (`*Row`), what the renderer
//! consumes ([`Invoice`], [`AccountSettings`]) and what forms submit
//! (`*Input`). Conversions between them normalize and validate.

mod invoice;
mod rules;
mod settings;
mod user;

pub use invoice::{Invoice, InvoiceDraft, InvoiceInput, InvoiceRow, InvoiceStatus, RowAmount};
pub use rules::is_currency_code;
pub use settings::{
    due_date_from_terms, AccountSettings, AccountSettingsRow, SettingsInput,
    DEFAULT_COMPANY_NAME, DEFAULT_CURRENCY, DEFAULT_INVOICE_PREFIX, DEFAULT_PAYMENT_TERMS_DAYS,
};
pub use user::User;
