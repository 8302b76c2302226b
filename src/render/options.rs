//! Rendering options and configuration.

use crate::pdf::{ControlCharPolicy, LayoutOptions};
use chrono::NaiveDate;

/// Options for turning an invoice into a PDF.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Page layout handed to the PDF builder
    pub layout: LayoutOptions,

    /// Invoice date used when the invoice has no creation timestamp
    /// (defaults to today, UTC)
    pub issue_date: Option<NaiveDate>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page layout.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Fix the fallback invoice date.
    pub fn with_issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Set how control characters in line text are handled.
    pub fn with_control_chars(mut self, policy: ControlCharPolicy) -> Self {
        self.layout.control_chars = policy;
        self
    }

    /// Date printed when the invoice carries no creation timestamp.
    pub fn fallback_date(&self) -> NaiveDate {
        self.issue_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let options = RenderOptions::new()
            .with_issue_date(date)
            .with_control_chars(ControlCharPolicy::Replace);
        assert_eq!(options.fallback_date(), date);
        assert_eq!(options.layout.control_chars, ControlCharPolicy::Replace);
        assert_eq!(options.layout.first_baseline, 790);
    }
}
