//! Datastore boundary.
//!
//! Invoices and settings live in an external store queried by simple
//! field-equality filters. Every operation is scoped by the owning user id.

mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::model::{AccountSettingsRow, InvoiceRow};

/// Persistence for invoices and account settings.
pub trait Datastore: Send + Sync {
    /// Find one invoice by id for a user.
    fn find_invoice(&self, user_id: &str, id: &str) -> Result<Option<InvoiceRow>>;

    /// All invoices of a user, newest `created_at` first.
    fn list_invoices(&self, user_id: &str) -> Result<Vec<InvoiceRow>>;

    /// Insert a new invoice; fails if the id is taken.
    fn insert_invoice(&self, user_id: &str, row: InvoiceRow) -> Result<()>;

    /// Replace an existing invoice. Returns `false` if it does not exist.
    fn update_invoice(&self, user_id: &str, row: InvoiceRow) -> Result<bool>;

    /// Delete an invoice. Returns `false` if it does not exist.
    fn delete_invoice(&self, user_id: &str, id: &str) -> Result<bool>;

    /// Reserve the next sequential invoice number (starting at 1).
    fn next_invoice_number(&self, user_id: &str) -> Result<u64>;

    /// Settings row of a user, if one was ever saved.
    fn find_settings(&self, user_id: &str) -> Result<Option<AccountSettingsRow>>;

    /// Insert or replace the settings row of a user.
    fn upsert_settings(&self, user_id: &str, row: AccountSettingsRow) -> Result<()>;
}
