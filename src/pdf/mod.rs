//! Hand-assembled PDF output.
//!
//! Produces a minimal PDF 1.4 file without a document library: header, five
//! fixed objects, one content stream, the cross-reference table and the
//! trailer. All offset and length bookkeeping lives in [`PdfWriter`].

mod content;
mod document;
mod options;
mod writer;

pub use content::{escape_text, sanitize_line, ContentStream};
pub use document::PdfDocumentBuilder;
pub use options::{ControlCharPolicy, LayoutOptions};
pub use writer::{PdfWriter, XREF_ENTRY_LEN};

/// PDF version written in the header.
pub const PDF_VERSION: &str = "1.4";

/// Document catalog (trailer `/Root`).
pub const CATALOG_OBJECT: usize = 1;
/// Page tree root.
pub const PAGES_OBJECT: usize = 2;
/// The single page.
pub const PAGE_OBJECT: usize = 3;
/// Page content stream.
pub const CONTENT_OBJECT: usize = 4;
/// Built-in font.
pub const FONT_OBJECT: usize = 5;
/// Number of objects in every document.
pub const OBJECT_COUNT: usize = 5;

/// Resource name the content stream selects the font by.
pub const FONT_RESOURCE: &str = "F1";
/// Standard 14 font; no font program is embedded.
pub const BASE_FONT: &str = "Helvetica";
