//! Locale-independent money and date formatting.

use crate::model::{is_currency_code, DEFAULT_CURRENCY};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Conventional symbol for a currency code in en-US formatting.
fn currency_symbol(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CAD" => "CA$",
        "AUD" => "A$",
        "INR" => "₹",
        "CNY" => "CN¥",
        "KRW" => "₩",
        "MXN" => "MX$",
        "NZD" => "NZ$",
        "BRL" => "R$",
        "HKD" => "HK$",
        "ILS" => "₪",
        _ => return None,
    };
    Some(symbol)
}

/// Format an amount with thousands separators and exactly two decimals.
///
/// Codes that are not three uppercase letters fall back to USD. Codes
/// without a known symbol are written as a prefix: `CHF 1,200.00`.
///
/// # Example
///
/// ```
/// use invoice_pdf::render::format_money;
///
/// assert_eq!(format_money(1200.0, "USD"), "$1,200.00");
/// assert_eq!(format_money(-5.5, "EUR"), "-€5.50");
/// assert_eq!(format_money(10.0, "CHF"), "CHF 10.00");
/// ```
pub fn format_money(amount: f64, currency: &str) -> String {
    let currency = if is_currency_code(currency) {
        currency
    } else {
        log::warn!("Invalid currency code {:?}, using {}", currency, DEFAULT_CURRENCY);
        DEFAULT_CURRENCY
    };

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = amount.is_sign_negative() && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let sign = if negative { "-" } else { "" };
    let number = format!("{}.{}", group_thousands(whole), fraction);

    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{currency} {number}"),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Parse an ISO date or timestamp into a UTC calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    // Postgres style: "2026-02-01 00:00:00+00"
    if let Ok(timestamp) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|timestamp| timestamp.date())
}

/// Format a date as `Mon D, YYYY`.
pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format an ISO date or timestamp as `Mon D, YYYY`.
///
/// Input that does not parse is returned unchanged.
pub fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => format_naive_date(date),
        None => {
            log::warn!("Unparseable date {:?}, rendering as-is", value);
            value.to_string()
        }
    }
}
