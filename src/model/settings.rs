//! Account settings: defaults, datastore rows and form validation.

use super::rules;
use crate::error::{Error, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Company name used when an account has none.
pub const DEFAULT_COMPANY_NAME: &str = "Panatech Invoice";
/// Currency used when an account has none.
pub const DEFAULT_CURRENCY: &str = "USD";
/// Payment terms used when an account has none.
pub const DEFAULT_PAYMENT_TERMS_DAYS: u32 = 14;
/// Invoice prefix used when an account has none.
pub const DEFAULT_INVOICE_PREFIX: &str = "INV";

/// Per-account settings that shape rendered invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountSettings {
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_address: String,
    pub company_website: String,
    /// Three-letter uppercase currency code
    pub default_currency: String,
    pub payment_terms_days: u32,
    pub invoice_prefix: String,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            company_email: String::new(),
            company_phone: String::new(),
            company_address: String::new(),
            company_website: String::new(),
            default_currency: DEFAULT_CURRENCY.to_string(),
            payment_terms_days: DEFAULT_PAYMENT_TERMS_DAYS,
            invoice_prefix: DEFAULT_INVOICE_PREFIX.to_string(),
        }
    }
}

/// Settings row as stored in the datastore; every column is nullable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSettingsRow {
    pub company_name: Option<String>,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
    pub company_address: Option<String>,
    pub company_website: Option<String>,
    pub default_currency: Option<String>,
    pub payment_terms_days: Option<i64>,
    pub invoice_prefix: Option<String>,
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl AccountSettings {
    /// Normalize a stored row; a missing row yields the defaults.
    pub fn from_row(row: Option<&AccountSettingsRow>) -> Self {
        let Some(row) = row else {
            return Self::default();
        };

        let payment_terms_days = row
            .payment_terms_days
            .filter(|days| *days > 0)
            .and_then(|days| u32::try_from(days).ok())
            .unwrap_or(DEFAULT_PAYMENT_TERMS_DAYS);

        Self {
            company_name: or_default(trimmed(&row.company_name), DEFAULT_COMPANY_NAME),
            company_email: trimmed(&row.company_email),
            company_phone: trimmed(&row.company_phone),
            company_address: trimmed(&row.company_address),
            company_website: trimmed(&row.company_website),
            default_currency: or_default(
                trimmed(&row.default_currency).to_uppercase(),
                DEFAULT_CURRENCY,
            ),
            payment_terms_days,
            invoice_prefix: or_default(
                trimmed(&row.invoice_prefix).to_uppercase(),
                DEFAULT_INVOICE_PREFIX,
            ),
        }
    }

    /// Row to upsert; empty contact fields are stored as NULL.
    pub fn to_row(&self) -> AccountSettingsRow {
        AccountSettingsRow {
            company_name: Some(self.company_name.clone()),
            company_email: non_empty(&self.company_email),
            company_phone: non_empty(&self.company_phone),
            company_address: non_empty(&self.company_address),
            company_website: non_empty(&self.company_website),
            default_currency: Some(self.default_currency.clone()),
            payment_terms_days: Some(i64::from(self.payment_terms_days)),
            invoice_prefix: Some(self.invoice_prefix.clone()),
        }
    }

    /// Due date for an invoice issued on `today` under these terms.
    pub fn due_date_from(&self, today: NaiveDate) -> String {
        due_date_from_terms(today, self.payment_terms_days)
    }
}

/// ISO date `days` after `today`.
pub fn due_date_from_terms(today: NaiveDate, days: u32) -> String {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}

/// Raw settings form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsInput {
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_address: String,
    pub company_website: String,
    pub default_currency: String,
    pub payment_terms_days: String,
    pub invoice_prefix: String,
}

impl SettingsInput {
    /// Validate and normalize; the first failing field wins.
    pub fn validate(&self) -> Result<AccountSettings> {
        let invalid = |message: &str| Err(Error::Validation(message.to_string()));

        let company_name = self.company_name.trim();
        if company_name.chars().count() < 2 {
            return invalid("Company name is required");
        }

        let company_email = self.company_email.trim();
        if !company_email.is_empty() && !rules::is_email(company_email) {
            return invalid("Enter a valid company email");
        }

        let company_phone = self.company_phone.trim();
        if company_phone.chars().count() > 40 {
            return invalid("Phone number is too long");
        }

        let company_address = self.company_address.trim();
        if company_address.chars().count() > 200 {
            return invalid("Address is too long");
        }

        let company_website = self.company_website.trim();
        if !company_website.is_empty() && !rules::is_url(company_website) {
            return invalid("Website must be a valid URL");
        }

        let default_currency = self.default_currency.trim().to_uppercase();
        if !rules::is_currency_code(&default_currency) {
            return invalid("Currency must be a 3-letter code");
        }

        let payment_terms_days = parse_terms(&self.payment_terms_days)?;

        let invoice_prefix = self.invoice_prefix.trim().to_uppercase();
        let prefix_len = invoice_prefix.chars().count();
        if prefix_len < 2 {
            return invalid("Invoice prefix is required");
        }
        if prefix_len > 8 {
            return invalid("Invoice prefix must be 8 characters or fewer");
        }
        if !rules::is_invoice_prefix(&invoice_prefix) {
            return invalid("Invoice prefix can only use letters, numbers, and dashes");
        }

        Ok(AccountSettings {
            company_name: company_name.to_string(),
            company_email: company_email.to_string(),
            company_phone: company_phone.to_string(),
            company_address: company_address.to_string(),
            company_website: company_website.to_string(),
            default_currency,
            payment_terms_days,
            invoice_prefix,
        })
    }
}

fn parse_terms(value: &str) -> Result<u32> {
    let value = value.trim();
    let days = if value.is_empty() {
        0.0
    } else {
        value.parse::<f64>().unwrap_or(f64::NAN)
    };

    if !days.is_finite() || days.fract() != 0.0 {
        return Err(Error::Validation("Payment terms must be a whole number".into()));
    }
    if days < 1.0 {
        return Err(Error::Validation("Payment terms must be at least 1 day".into()));
    }
    if days > 180.0 {
        return Err(Error::Validation(
            "Payment terms must be 180 days or fewer".into(),
        ));
    }
    Ok(days as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> SettingsInput {
        SettingsInput {
            company_name: " Panatech Labs ".into(),
            company_email: "hello@panatech.example".into(),
            company_phone: "+1 555 0100".into(),
            company_address: "1 Main St, Springfield".into(),
            company_website: "https://panatech.example".into(),
            default_currency: " eur ".into(),
            payment_terms_days: "30".into(),
            invoice_prefix: "pt-".into(),
        }
    }

    fn message(input: &SettingsInput) -> String {
        match input.validate() {
            Err(Error::Validation(message)) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let settings = AccountSettings::default();
        assert_eq!(settings.company_name, "Panatech Invoice");
        assert_eq!(settings.default_currency, "USD");
        assert_eq!(settings.payment_terms_days, 14);
        assert_eq!(settings.invoice_prefix, "INV");
        assert!(settings.company_phone.is_empty());
    }

    #[test]
    fn test_from_missing_row() {
        assert_eq!(AccountSettings::from_row(None), AccountSettings::default());
    }

    #[test]
    fn test_from_row_normalizes() {
        let row = AccountSettingsRow {
            company_name: Some("   ".into()),
            company_email: Some(" a@b.co ".into()),
            company_phone: None,
            default_currency: Some(" gbp".into()),
            payment_terms_days: Some(-3),
            invoice_prefix: Some("".into()),
            ..Default::default()
        };
        let settings = AccountSettings::from_row(Some(&row));
        assert_eq!(settings.company_name, "Panatech Invoice");
        assert_eq!(settings.company_email, "a@b.co");
        assert_eq!(settings.company_phone, "");
        assert_eq!(settings.default_currency, "GBP");
        assert_eq!(settings.payment_terms_days, 14);
        assert_eq!(settings.invoice_prefix, "INV");
    }

    #[test]
    fn test_row_round_trip_keeps_empty_as_null() {
        let settings = AccountSettings::default();
        let row = settings.to_row();
        assert_eq!(row.company_phone, None);
        assert_eq!(row.payment_terms_days, Some(14));
        assert_eq!(AccountSettings::from_row(Some(&row)), settings);
    }

    #[test]
    fn test_due_date_from_terms() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
        assert_eq!(due_date_from_terms(today, 14), "2026-03-06");
        assert_eq!(AccountSettings::default().due_date_from(today), "2026-03-06");
    }

    #[test]
    fn test_validate_normalizes() {
        let settings = input().validate().unwrap();
        assert_eq!(settings.company_name, "Panatech Labs");
        assert_eq!(settings.default_currency, "EUR");
        assert_eq!(settings.payment_terms_days, 30);
        assert_eq!(settings.invoice_prefix, "PT-");
    }

    #[test]
    fn test_validate_allows_empty_optional_fields() {
        let mut sparse = input();
        sparse.company_email = "  ".into();
        sparse.company_website = String::new();
        let settings = sparse.validate().unwrap();
        assert!(settings.company_email.is_empty());
        assert!(settings.company_website.is_empty());
    }

    #[test]
    fn test_validate_messages() {
        let mut bad = input();
        bad.company_email = "nope".into();
        assert_eq!(message(&bad), "Enter a valid company email");

        let mut bad = input();
        bad.company_phone = "1".repeat(41);
        assert_eq!(message(&bad), "Phone number is too long");

        let mut bad = input();
        bad.company_website = "panatech".into();
        assert_eq!(message(&bad), "Website must be a valid URL");

        let mut bad = input();
        bad.default_currency = "dollars".into();
        assert_eq!(message(&bad), "Currency must be a 3-letter code");

        let mut bad = input();
        bad.payment_terms_days = "7.5".into();
        assert_eq!(message(&bad), "Payment terms must be a whole number");

        let mut bad = input();
        bad.payment_terms_days = "0".into();
        assert_eq!(message(&bad), "Payment terms must be at least 1 day");

        let mut bad = input();
        bad.payment_terms_days = "181".into();
        assert_eq!(message(&bad), "Payment terms must be 180 days or fewer");

        let mut bad = input();
        bad.invoice_prefix = "X".into();
        assert_eq!(message(&bad), "Invoice prefix is required");

        let mut bad = input();
        bad.invoice_prefix = "INVOICE-1".into();
        assert_eq!(message(&bad), "Invoice prefix must be 8 characters or fewer");

        let mut bad = input();
        bad.invoice_prefix = "IN V".into();
        assert_eq!(
            message(&bad),
            "Invoice prefix can only use letters, numbers, and dashes"
        );
    }
}
