//! In-memory datastore.

use super::Datastore;
use crate::error::{Error, Result};
use crate::model::{AccountSettingsRow, InvoiceRow};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Account {
    invoices: Vec<InvoiceRow>,
    settings: Option<AccountSettingsRow>,
    last_number: u64,
}

/// Thread-safe datastore backed by a map of accounts.
///
/// Useful for tests, the CLI and embedding without a hosted backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Account>>> {
        self.accounts
            .read()
            .map_err(|_| Error::Datastore("store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Account>>> {
        self.accounts
            .write()
            .map_err(|_| Error::Datastore("store lock poisoned".into()))
    }
}

impl Datastore for MemoryStore {
    fn find_invoice(&self, user_id: &str, id: &str) -> Result<Option<InvoiceRow>> {
        let accounts = self.read()?;
        Ok(accounts
            .get(user_id)
            .and_then(|account| account.invoices.iter().find(|row| row.id == id))
            .cloned())
    }

    fn list_invoices(&self, user_id: &str) -> Result<Vec<InvoiceRow>> {
        let accounts = self.read()?;
        let mut rows = accounts
            .get(user_id)
            .map(|account| account.invoices.clone())
            .unwrap_or_default();
        // None sorts first ascending, so it ends up last here
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    fn insert_invoice(&self, user_id: &str, row: InvoiceRow) -> Result<()> {
        let mut accounts = self.write()?;
        let account = accounts.entry(user_id.to_string()).or_default();
        if account.invoices.iter().any(|existing| existing.id == row.id) {
            return Err(Error::Datastore(format!(
                "duplicate invoice id {}",
                row.id
            )));
        }
        account.invoices.push(row);
        Ok(())
    }

    fn update_invoice(&self, user_id: &str, row: InvoiceRow) -> Result<bool> {
        let mut accounts = self.write()?;
        let Some(existing) = accounts
            .get_mut(user_id)
            .and_then(|account| account.invoices.iter_mut().find(|r| r.id == row.id))
        else {
            return Ok(false);
        };
        *existing = row;
        Ok(true)
    }

    fn delete_invoice(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut accounts = self.write()?;
        let Some(account) = accounts.get_mut(user_id) else {
            return Ok(false);
        };
        let before = account.invoices.len();
        account.invoices.retain(|row| row.id != id);
        Ok(account.invoices.len() != before)
    }

    fn next_invoice_number(&self, user_id: &str) -> Result<u64> {
        let mut accounts = self.write()?;
        let account = accounts.entry(user_id.to_string()).or_default();
        account.last_number += 1;
        Ok(account.last_number)
    }

    fn find_settings(&self, user_id: &str) -> Result<Option<AccountSettingsRow>> {
        let accounts = self.read()?;
        Ok(accounts
            .get(user_id)
            .and_then(|account| account.settings.clone()))
    }

    fn upsert_settings(&self, user_id: &str, row: AccountSettingsRow) -> Result<()> {
        let mut accounts = self.write()?;
        accounts.entry(user_id.to_string()).or_default().settings = Some(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InvoiceStatus, RowAmount};

    fn row(id: &str, created_at: Option<&str>) -> InvoiceRow {
        InvoiceRow {
            id: id.into(),
            customer_name: "Acme".into(),
            customer_email: "billing@acme.com".into(),
            amount: RowAmount::Number(10.0),
            due_date: "2026-03-01".into(),
            status: InvoiceStatus::Draft,
            created_at: created_at.map(String::from),
        }
    }

    #[test]
    fn test_insert_and_find_scoped_by_user() {
        let store = MemoryStore::new();
        store.insert_invoice("u1", row("INV-0001", None)).unwrap();

        assert!(store.find_invoice("u1", "INV-0001").unwrap().is_some());
        assert!(store.find_invoice("u2", "INV-0001").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let store = MemoryStore::new();
        store.insert_invoice("u1", row("a", None)).unwrap();
        let err = store.insert_invoice("u1", row("a", None)).unwrap_err();
        assert!(matches!(err, Error::Datastore(_)));
    }

    #[test]
    fn test_list_newest_first() {
        let store = MemoryStore::new();
        store.insert_invoice("u1", row("old", Some("2026-01-01T00:00:00Z"))).unwrap();
        store.insert_invoice("u1", row("none", None)).unwrap();
        store.insert_invoice("u1", row("new", Some("2026-02-01T00:00:00Z"))).unwrap();

        let ids: Vec<_> = store
            .list_invoices("u1")
            .unwrap()
            .into_iter()
            .map(|row| row.id)
            .collect();
        assert_eq!(ids, vec!["new", "old", "none"]);
        assert!(store.list_invoices("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_update_and_delete() {
        let store = MemoryStore::new();
        assert!(!store.update_invoice("u1", row("a", None)).unwrap());

        store.insert_invoice("u1", row("a", None)).unwrap();
        let mut changed = row("a", None);
        changed.status = InvoiceStatus::Paid;
        assert!(store.update_invoice("u1", changed).unwrap());
        assert_eq!(
            store.find_invoice("u1", "a").unwrap().unwrap().status,
            InvoiceStatus::Paid
        );

        assert!(store.delete_invoice("u1", "a").unwrap());
        assert!(!store.delete_invoice("u1", "a").unwrap());
    }

    #[test]
    fn test_invoice_numbers_per_user() {
        let store = MemoryStore::new();
        assert_eq!(store.next_invoice_number("u1").unwrap(), 1);
        assert_eq!(store.next_invoice_number("u1").unwrap(), 2);
        assert_eq!(store.next_invoice_number("u2").unwrap(), 1);
    }

    #[test]
    fn test_settings_upsert_replaces() {
        let store = MemoryStore::new();
        assert!(store.find_settings("u1").unwrap().is_none());

        let mut settings = AccountSettingsRow {
            company_name: Some("First".into()),
            ..Default::default()
        };
        store.upsert_settings("u1", settings.clone()).unwrap();
        settings.company_name = Some("Second".into());
        store.upsert_settings("u1", settings).unwrap();

        let stored = store.find_settings("u1").unwrap().unwrap();
        assert_eq!(stored.company_name.as_deref(), Some("Second"));
    }
}
