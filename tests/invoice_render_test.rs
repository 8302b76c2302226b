//! End-to-end tests: invoice and settings in, PDF out.

use invoice_pdf::render::{to_json, JsonFormat};
use invoice_pdf::{
    build_invoice_pdf, inspect_bytes, invoice_lines, AccountSettings, Invoice, InvoicePdf,
    InvoiceStatus,
};
use lopdf::content::Content;
use lopdf::{Document, Object};

fn sample_invoice() -> Invoice {
    serde_json::from_str(
        r#"{
            "id": "inv_1",
            "customerName": "Acme Inc.",
            "customerEmail": "billing@acme.com",
            "amount": 1200,
            "dueDate": "2026-03-01",
            "status": "sent",
            "createdAt": "2026-02-01T00:00:00Z"
        }"#,
    )
    .unwrap()
}

fn sample_settings() -> AccountSettings {
    AccountSettings {
        company_name: "Panatech Invoice".into(),
        default_currency: "USD".into(),
        company_email: String::new(),
        company_phone: String::new(),
        company_address: String::new(),
        company_website: String::new(),
        ..AccountSettings::default()
    }
}

fn shown_text(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match &op.operands[0] {
            Object::String(text, _) => Some(String::from_utf8(text.clone()).unwrap()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_end_to_end_scenario() {
    let bytes = build_invoice_pdf(&sample_invoice(), &sample_settings()).unwrap();
    let text = String::from_utf8_lossy(&bytes);

    for expected in [
        "Invoice ID: inv_1",
        "Due Date: Mar 1, 2026",
        "Status: Sent",
        "Bill To: Acme Inc.",
        "$1,200.00",
    ] {
        assert!(text.contains(expected), "missing {:?}", expected);
    }

    let report = inspect_bytes(&bytes).unwrap();
    report.verify(&bytes).unwrap();
}

#[test]
fn test_shown_lines_match_model() {
    let invoice = sample_invoice();
    let settings = sample_settings();
    let bytes = build_invoice_pdf(&invoice, &settings).unwrap();

    let expected: Vec<String> = invoice_lines(&invoice, &settings)
        .into_iter()
        .map(|line| line.text)
        .collect();
    assert_eq!(shown_text(&bytes), expected);
    assert_eq!(expected.last().unwrap(), "Total Due (USD): $1,200.00");
}

#[test]
fn test_phone_line_presence() {
    let invoice = sample_invoice();
    let mut settings = sample_settings();

    let without = shown_text(&build_invoice_pdf(&invoice, &settings).unwrap());
    assert!(!without.iter().any(|line| line.starts_with("Phone:")));

    settings.company_phone = "+1 (555) 0100".into();
    let with = shown_text(&build_invoice_pdf(&invoice, &settings).unwrap());
    let phones: Vec<_> = with.iter().filter(|line| line.starts_with("Phone:")).collect();
    assert_eq!(phones, vec!["Phone: +1 (555) 0100"]);
}

#[test]
fn test_customer_name_with_parentheses() {
    let mut invoice = sample_invoice();
    invoice.customer_name = "Acme (Test) \\Co".into();
    let bytes = build_invoice_pdf(&invoice, &sample_settings()).unwrap();

    assert!(shown_text(&bytes).contains(&"Bill To: Acme (Test) \\Co".to_string()));
}

#[test]
fn test_non_ascii_settings() {
    let invoice = Invoice {
        status: InvoiceStatus::Paid,
        ..sample_invoice()
    };
    let settings = AccountSettings {
        company_name: "Société Générale".into(),
        company_address: "Zürich".into(),
        default_currency: "EUR".into(),
        ..AccountSettings::default()
    };
    let bytes = build_invoice_pdf(&invoice, &settings).unwrap();
    let shown = shown_text(&bytes);

    assert_eq!(shown[0], "Société Générale");
    assert_eq!(shown[1], "Zürich");
    assert!(shown.contains(&"Status: Paid".to_string()));
    assert!(shown.contains(&"Total Due (EUR): €1,200.00".to_string()));
    inspect_bytes(&bytes).unwrap().verify(&bytes).unwrap();
}

#[test]
fn test_lines_json_output() {
    let rendered = InvoicePdf::new()
        .render(&sample_invoice(), &sample_settings())
        .unwrap();
    let json = to_json(rendered.lines(), JsonFormat::Pretty).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.as_array().unwrap().len(), 8);
    assert_eq!(parsed[0]["text"], "Panatech Invoice");
}
