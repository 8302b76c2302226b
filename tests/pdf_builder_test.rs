//! Integration tests for the PDF builder, checked with an independent parser.

use invoice_pdf::inspect::{inspect_bytes, stream_length_matches};
use invoice_pdf::pdf::{LayoutOptions, PdfDocumentBuilder, CONTENT_OBJECT, XREF_ENTRY_LEN};
use invoice_pdf::{build_pdf, ControlCharPolicy, Error};
use lopdf::content::Content;
use lopdf::{Document, Object};

fn decode_operations(bytes: &[u8]) -> Vec<(String, Vec<Object>)> {
    let doc = Document::load_mem(bytes).expect("generated PDF should parse");
    let pages = doc.get_pages();
    let page_id = *pages.values().next().expect("one page");
    let content = doc.get_page_content(page_id).unwrap();
    Content::decode(&content)
        .unwrap()
        .operations
        .into_iter()
        .map(|op| (op.operator, op.operands))
        .collect()
}

fn shown_strings(bytes: &[u8]) -> Vec<Vec<u8>> {
    decode_operations(bytes)
        .into_iter()
        .filter(|(operator, _)| operator == "Tj")
        .map(|(_, operands)| match &operands[0] {
            Object::String(text, _) => text.clone(),
            other => panic!("Tj operand is not a string: {:?}", other),
        })
        .collect()
}

fn baselines(bytes: &[u8]) -> Vec<(i64, i64)> {
    decode_operations(bytes)
        .into_iter()
        .filter(|(operator, _)| operator == "Tm")
        .map(|(_, operands)| {
            (
                operands[4].as_i64().unwrap(),
                operands[5].as_i64().unwrap(),
            )
        })
        .collect()
}

fn find_all(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, window)| *window == needle)
        .map(|(i, _)| i)
        .collect()
}

// ==================== Validity ====================

#[test]
fn test_parses_as_one_page_five_objects() {
    let bytes = build_pdf(&["Panatech Invoice", "Invoice ID: inv_1", "Status: Sent"]).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();

    assert_eq!(doc.get_pages().len(), 1);
    assert_eq!(doc.objects.len(), 5);
    assert_eq!(doc.version, "1.4");
}

#[test]
fn test_media_box_and_font() {
    let bytes = build_pdf(&["Hello"]).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();

    let page_id = *doc.get_pages().values().next().unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    let media_box: Vec<i64> = page
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert_eq!(media_box, vec![0, 0, 612, 792]);

    let font = doc.get_dictionary((5, 0)).unwrap();
    assert_eq!(font.get(b"Subtype").unwrap().as_name().unwrap(), b"Type1");
    assert_eq!(font.get(b"BaseFont").unwrap().as_name().unwrap(), b"Helvetica");
}

#[test]
fn test_xref_offsets_point_at_objects() {
    let lines = ["Caf\u{e9} \u{2014} \u{20ac}1,200.00", "Acme (Test) \\Co", "plain"];
    let bytes = build_pdf(&lines).unwrap();
    let report = inspect_bytes(&bytes).unwrap();

    assert_eq!(report.object_count(), 5);
    for entry in report.in_use() {
        let marker = format!("{} 0 obj", entry.object_number);
        assert!(
            bytes[entry.offset..].starts_with(marker.as_bytes()),
            "object {} not at offset {}",
            entry.object_number,
            entry.offset
        );
        assert_eq!(find_all(&bytes, marker.as_bytes()), vec![entry.offset]);
    }
    report.verify(&bytes).unwrap();
}

#[test]
fn test_xref_entries_are_twenty_bytes() {
    let bytes = build_pdf(&["Hello"]).unwrap();
    let report = inspect_bytes(&bytes).unwrap();

    let table_start = report.xref_offset + b"xref\n0 6\n".len();
    let table = &bytes[table_start..table_start + 6 * XREF_ENTRY_LEN];
    assert!(table.starts_with(b"0000000000 65535 f \n"));
    for entry in table.chunks(XREF_ENTRY_LEN) {
        assert_eq!(entry.len(), 20);
        assert!(entry.ends_with(b" \n"));
    }
}

#[test]
fn test_trailer_and_startxref() {
    let bytes = build_pdf(&["Hello"]).unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();

    assert!(text.contains("trailer\n<< /Size 6 /Root 1 0 R >>\nstartxref\n"));
    let xref_at = find_all(&bytes, b"xref\n0 6\n");
    assert_eq!(xref_at.len(), 1);
    assert!(text.ends_with(&format!("startxref\n{}\n%%EOF\n", xref_at[0])));
}

// ==================== Content Stream ====================

#[test]
fn test_escaping_round_trip() {
    let line = "Acme (Test) \\Co";
    let bytes = build_pdf(&[line]).unwrap();

    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("(Acme \\(Test\\) \\\\Co) Tj"));
    assert_eq!(shown_strings(&bytes), vec![line.as_bytes().to_vec()]);
}

#[test]
fn test_nested_and_unbalanced_parentheses() {
    let lines = ["((a))", ")(", "\\\\", "end\\"];
    let bytes = build_pdf(&lines).unwrap();
    let shown: Vec<_> = lines.iter().map(|l| l.as_bytes().to_vec()).collect();
    assert_eq!(shown_strings(&bytes), shown);
}

#[test]
fn test_line_positions() {
    let lines: Vec<String> = (0..10).map(|i| format!("Line {}", i)).collect();
    let bytes = build_pdf(&lines).unwrap();

    let expected: Vec<(i64, i64)> = (0..10).map(|i| (48, 790 - 20 * i)).collect();
    assert_eq!(baselines(&bytes), expected);
}

#[test]
fn test_overflow_is_not_clipped() {
    let lines: Vec<String> = (0..45).map(|i| format!("Row {}", i)).collect();
    let bytes = build_pdf(&lines).unwrap();

    let positions = baselines(&bytes);
    assert_eq!(positions.len(), 45);
    assert_eq!(positions[44], (48, 790 - 20 * 44));
    assert!(positions[44].1 < 0);
    assert_eq!(Document::load_mem(&bytes).unwrap().get_pages().len(), 1);
}

#[test]
fn test_font_selection() {
    let bytes = build_pdf(&["Hello"]).unwrap();
    let ops = decode_operations(&bytes);

    assert_eq!(ops.first().unwrap().0, "BT");
    assert_eq!(ops[1].0, "Tf");
    assert_eq!(ops[1].1[0].as_name().unwrap(), b"F1");
    assert_eq!(ops[1].1[1].as_i64().unwrap(), 12);
    assert_eq!(ops.last().unwrap().0, "ET");
}

#[test]
fn test_stream_length_counts_bytes() {
    let bytes = build_pdf(&["\u{20ac}\u{20ac}\u{20ac}", "\u{65e5}\u{672c}"]).unwrap();
    let report = inspect_bytes(&bytes).unwrap();
    assert!(stream_length_matches(&bytes, &report, CONTENT_OBJECT).unwrap());

    let doc = Document::load_mem(&bytes).unwrap();
    let stream = doc.get_object((4, 0)).unwrap().as_stream().unwrap();
    let declared = stream.dict.get(b"Length").unwrap().as_i64().unwrap() as usize;
    assert_eq!(declared, stream.content.len());
    assert!(declared > "BT\n/F1 12 Tf\n".len());
}

// ==================== Control Characters ====================

#[test]
fn test_newline_rejected_by_default() {
    let result = build_pdf(&["first", "second\nline"]);
    match result {
        Err(Error::InvalidLine { index, reason }) => {
            assert_eq!(index, 1);
            assert!(reason.contains("control character"));
        }
        other => panic!("expected InvalidLine, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn test_replace_policy_keeps_single_line() {
    let builder = PdfDocumentBuilder::with_options(
        LayoutOptions::new().with_control_chars(ControlCharPolicy::Replace),
    );
    let bytes = builder.build(&["second\nline\r\tend"]).unwrap();
    assert_eq!(shown_strings(&bytes), vec![b"second line  end".to_vec()]);
}

// ==================== Determinism ====================

#[test]
fn test_concurrent_builds_are_identical() {
    let builder = PdfDocumentBuilder::new();
    let expected = builder.build(&["Invoice ID: inv_1"]).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| builder.build(&["Invoice ID: inv_1"]).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
