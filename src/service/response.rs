//! HTTP-shaped response for a rendered invoice.

/// MIME type of the response body.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
/// Rendered invoices are per-user and must not be cached by proxies.
pub const PDF_CACHE_CONTROL: &str = "private, no-store";

/// A rendered invoice ready to be served as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfResponse {
    /// HTTP status (always 200 for a successful render)
    pub status: u16,

    /// Response headers in emission order
    pub headers: Vec<(&'static str, String)>,

    /// PDF file content
    pub body: Vec<u8>,
}

impl PdfResponse {
    /// Wrap a PDF body for the invoice with the given id.
    pub fn new(invoice_id: &str, body: Vec<u8>) -> Self {
        let headers = vec![
            ("Content-Type", PDF_CONTENT_TYPE.to_string()),
            (
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", Self::filename_for(invoice_id)),
            ),
            ("Cache-Control", PDF_CACHE_CONTROL.to_string()),
        ];
        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Download filename for an invoice id.
    ///
    /// Path separators, quotes and control characters become `_`, so the
    /// result is always a single path component.
    pub fn filename_for(invoice_id: &str) -> String {
        let id: String = invoice_id
            .chars()
            .map(|c| match c {
                '/' | '\\' | '"' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        format!("invoice-{}.pdf", id)
    }

    /// Look up a header value, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers() {
        let response = PdfResponse::new("INV-0001", b"%PDF-1.4\n".to_vec());
        assert_eq!(response.status, 200);
        assert_eq!(response.header("content-type"), Some("application/pdf"));
        assert_eq!(
            response.header("Content-Disposition"),
            Some("attachment; filename=\"invoice-INV-0001.pdf\"")
        );
        assert_eq!(response.header("Cache-Control"), Some("private, no-store"));
        assert_eq!(response.header("ETag"), None);
    }

    #[test]
    fn test_filename_is_single_component() {
        assert_eq!(PdfResponse::filename_for("INV-0001"), "invoice-INV-0001.pdf");
        assert_eq!(
            PdfResponse::filename_for("../../etc/passwd"),
            "invoice-.._.._etc_passwd.pdf"
        );
        assert_eq!(PdfResponse::filename_for("a\\b\"c\nd"), "invoice-a_b_c_d.pdf");

        let name = PdfResponse::filename_for("../x");
        assert_eq!(std::path::Path::new(&name).components().count(), 1);
    }
}
