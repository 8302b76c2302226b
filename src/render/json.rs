//! JSON rendering for invoice lines.

use super::RenderLine;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert rendered lines to a JSON array.
pub fn to_json(lines: &[RenderLine], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(lines),
        JsonFormat::Compact => serde_json::to_string(lines),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
