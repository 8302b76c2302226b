//! Single-page document assembly.

use super::content::{sanitize_line, ContentStream};
use super::options::LayoutOptions;
use super::writer::PdfWriter;
use super::{
    BASE_FONT, CATALOG_OBJECT, CONTENT_OBJECT, FONT_OBJECT, FONT_RESOURCE, PAGES_OBJECT,
    PAGE_OBJECT, PDF_VERSION,
};
use crate::error::Result;

/// Builds a minimal one-page PDF with one line of Helvetica text per row.
///
/// The object graph is fixed: Catalog (1), Pages (2), Page (3), content
/// stream (4) and the built-in font (5). Each call is independent and the
/// builder holds no mutable state, so it can be shared across threads.
///
/// # Example
///
/// ```
/// use invoice_pdf::pdf::PdfDocumentBuilder;
///
/// let bytes = PdfDocumentBuilder::new()
///     .build(&["Panatech Invoice", "Invoice ID: inv_1"])
///     .unwrap();
/// assert!(bytes.starts_with(b"%PDF-1.4\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfDocumentBuilder {
    options: LayoutOptions,
}

impl PdfDocumentBuilder {
    /// Create a builder with the default US Letter layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom layout options.
    pub fn with_options(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Layout options in use.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Serialize `lines` into a complete PDF file.
    ///
    /// Lines are drawn top-down in the given order. Empty lines still occupy a
    /// row; callers that want them dropped filter beforehand.
    pub fn build<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<u8>> {
        let options = &self.options;

        let mut content = ContentStream::begin(options);
        for (index, line) in lines.iter().enumerate() {
            let line = sanitize_line(index, line.as_ref(), options.control_chars)?;
            content.push_line(&line, options);
        }
        let line_count = content.line_count();
        let payload = content.finish();

        let mut writer = PdfWriter::new(PDF_VERSION);

        let catalog = writer.write_object(
            format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_OBJECT).as_bytes(),
        );
        let pages = writer.write_object(
            format!(
                "<< /Type /Pages /Kids [{} 0 R] /Count 1 >>",
                PAGE_OBJECT
            )
            .as_bytes(),
        );
        let page = writer.write_object(
            format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Contents {} 0 R \
                 /Resources << /Font << /{} {} 0 R >> >> >>",
                PAGES_OBJECT,
                options.page_width,
                options.page_height,
                CONTENT_OBJECT,
                FONT_RESOURCE,
                FONT_OBJECT
            )
            .as_bytes(),
        );
        let stream = writer.write_object(&stream_object(&payload));
        let font = writer.write_object(
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} >>",
                BASE_FONT
            )
            .as_bytes(),
        );

        debug_assert_eq!(
            [catalog, pages, page, stream, font],
            [CATALOG_OBJECT, PAGES_OBJECT, PAGE_OBJECT, CONTENT_OBJECT, FONT_OBJECT]
        );

        let bytes = writer.finish(CATALOG_OBJECT);
        log::debug!(
            "Built PDF: {} lines, {} stream bytes, {} total bytes",
            line_count,
            payload.len(),
            bytes.len()
        );

        Ok(bytes)
    }
}

/// Body of a stream object whose `/Length` is the payload's byte count.
fn stream_object(payload: &[u8]) -> Vec<u8> {
    let header = format!("<< /Length {} >>\nstream\n", payload.len());
    let mut body = Vec::with_capacity(header.len() + payload.len() + 10);
    body.extend_from_slice(header.as_bytes());
    body.extend_from_slice(payload);
    body.extend_from_slice(b"\nendstream");
    body
}
