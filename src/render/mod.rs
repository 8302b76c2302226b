//! Invoice rendering: from invoice and settings to lines, text, JSON or PDF.

mod format;
mod invoice;
mod json;
mod options;

pub use format::{format_date, format_money, format_naive_date, parse_date};
pub use invoice::{InvoiceRenderModel, RenderLine, FALLBACK_TITLE};
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;

/// Join lines as plain text, one per row.
pub fn to_text(lines: &[RenderLine]) -> String {
    let mut output = String::new();
    for line in lines {
        output.push_str(&line.text);
        output.push('\n');
    }
    output
}
