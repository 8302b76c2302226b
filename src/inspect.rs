//! Structural inspection of PDF files.
//!
//! Reads the header, the classic cross-reference table and the trailer of a
//! file, and checks that recorded offsets and stream lengths agree with the
//! bytes. Only uncompressed xref tables (as written by [`crate::pdf`]) are
//! understood.

use crate::error::{Error, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.4"
const ENTRY_LEN: usize = crate::pdf::XREF_ENTRY_LEN;

/// One cross-reference entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrefEntry {
    /// Object number
    pub object_number: usize,
    /// Byte offset (in-use entries) or next free object (free entries)
    pub offset: usize,
    /// Generation number
    pub generation: u32,
    /// `n` entries are in use, `f` entries are free
    pub in_use: bool,
}

/// What was found in the file's cross-reference section and trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrefReport {
    /// Header version (e.g., "1.4")
    pub version: String,
    /// Offset of the `xref` keyword, as recorded after `startxref`
    pub xref_offset: usize,
    /// Entries in object-number order
    pub entries: Vec<XrefEntry>,
    /// Trailer `/Size`
    pub size: Option<usize>,
    /// Trailer `/Root` object number
    pub root: Option<usize>,
}

impl XrefReport {
    /// In-use entries.
    pub fn in_use(&self) -> impl Iterator<Item = &XrefEntry> {
        self.entries.iter().filter(|entry| entry.in_use)
    }

    /// Number of in-use objects.
    pub fn object_count(&self) -> usize {
        self.in_use().count()
    }

    /// Look up an entry by object number.
    pub fn entry(&self, object_number: usize) -> Option<&XrefEntry> {
        self.entries.get(object_number)
    }

    /// Check every recorded offset and the trailer against `data`.
    pub fn verify(&self, data: &[u8]) -> Result<()> {
        match self.entries.first() {
            Some(entry) if !entry.in_use && entry.generation == 65535 => {}
            _ => {
                return Err(Error::Corrupted(
                    "entry 0 must be free with generation 65535".into(),
                ))
            }
        }

        if self.size != Some(self.entries.len()) {
            return Err(Error::Corrupted(format!(
                "trailer /Size {:?} does not match {} xref entries",
                self.size,
                self.entries.len()
            )));
        }

        for entry in self.in_use() {
            let expected = format!("{} {} obj", entry.object_number, entry.generation);
            let found = data
                .get(entry.offset..)
                .is_some_and(|rest| rest.starts_with(expected.as_bytes()));
            if !found {
                return Err(Error::Corrupted(format!(
                    "offset {} of object {} does not begin \"{}\"",
                    entry.offset, entry.object_number, expected
                )));
            }
        }

        match self.root {
            Some(root) if self.entry(root).is_some_and(|entry| entry.in_use) => Ok(()),
            other => Err(Error::Corrupted(format!(
                "trailer /Root {:?} is not an in-use object",
                other
            ))),
        }
    }
}

/// Read the version from the `%PDF-x.y` header.
pub fn detect_version(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let valid = version[0].is_ascii_digit() && version[1] == b'.' && version[2].is_ascii_digit();
    if !valid {
        return Err(Error::UnknownFormat);
    }

    Ok(String::from_utf8_lossy(version).into_owned())
}

/// Check if bytes start with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_version(data).is_ok()
}

/// Inspect a PDF file on disk.
pub fn inspect_file<P: AsRef<Path>>(path: P) -> Result<XrefReport> {
    let data = fs::read(path)?;
    inspect_bytes(&data)
}

/// Parse the header, cross-reference table and trailer of `data`.
pub fn inspect_bytes(data: &[u8]) -> Result<XrefReport> {
    let version = detect_version(data)?;

    let startxref = rfind(data, b"startxref")
        .ok_or_else(|| Error::Corrupted("missing startxref".into()))?;
    let (offset_line, _) = read_line(data, skip_eol(data, startxref + b"startxref".len()))
        .ok_or_else(|| Error::Corrupted("missing xref offset".into()))?;
    let xref_offset = parse_number(offset_line)
        .ok_or_else(|| Error::Corrupted("xref offset is not a number".into()))?;

    let (keyword, next) = read_line(data, xref_offset)
        .ok_or_else(|| Error::Corrupted(format!("xref offset {} is out of range", xref_offset)))?;
    if keyword != b"xref" {
        return Err(Error::Corrupted(format!(
            "startxref {} does not point at the xref keyword",
            xref_offset
        )));
    }

    let (subsection, mut pos) =
        read_line(data, next).ok_or_else(|| Error::Corrupted("missing xref subsection".into()))?;
    let (first, count) = parse_subsection(subsection)
        .ok_or_else(|| Error::Corrupted("malformed xref subsection header".into()))?;
    if first != 0 {
        return Err(Error::Corrupted(format!(
            "xref subsection starts at {} instead of 0",
            first
        )));
    }

    let available = data.len().saturating_sub(pos) / ENTRY_LEN;
    if count > available {
        return Err(Error::Corrupted(format!(
            "xref subsection declares {} entries but only {} fit in the file",
            count, available
        )));
    }

    let mut entries = Vec::with_capacity(count);
    for object_number in 0..count {
        let raw = data
            .get(pos..pos + ENTRY_LEN)
            .ok_or_else(|| Error::Corrupted(format!("xref entry {} is truncated", object_number)))?;
        let entry = parse_entry(object_number, raw).ok_or_else(|| {
            Error::Corrupted(format!("xref entry {} is not 20 well-formed bytes", object_number))
        })?;
        entries.push(entry);
        pos += ENTRY_LEN;
    }

    let trailer_end = startxref.max(pos);
    let trailer = String::from_utf8_lossy(&data[pos..trailer_end]);
    if !trailer.trim_start().starts_with("trailer") {
        return Err(Error::Corrupted("missing trailer after xref table".into()));
    }

    Ok(XrefReport {
        version,
        xref_offset,
        entries,
        size: capture_number(size_pattern(), &trailer),
        root: capture_number(root_pattern(), &trailer),
    })
}

/// Check that a stream object's `/Length` equals the bytes between the
/// end-of-line after `stream` and the end-of-line before `endstream`.
pub fn stream_length_matches(data: &[u8], report: &XrefReport, object_number: usize) -> Result<bool> {
    let entry = report
        .entry(object_number)
        .filter(|entry| entry.in_use)
        .ok_or_else(|| Error::Corrupted(format!("object {} is not in use", object_number)))?;

    let object = &data[entry.offset.min(data.len())..];
    let header_end = find(object, b"endobj").unwrap_or(object.len());
    let keyword = find(&object[..header_end], b"stream")
        .ok_or_else(|| Error::Corrupted(format!("object {} has no stream", object_number)))?;
    let dictionary = String::from_utf8_lossy(&object[..keyword]);
    let declared = capture_number(length_pattern(), &dictionary)
        .ok_or_else(|| Error::Corrupted(format!("object {} has no /Length", object_number)))?;

    let start = skip_eol(object, keyword + b"stream".len());
    let Some(after) = start.checked_add(declared).and_then(|end| object.get(end..)) else {
        return Ok(false);
    };
    let after = after.strip_prefix(b"\r").unwrap_or(after);
    let after = after.strip_prefix(b"\n").unwrap_or(after);
    Ok(after.starts_with(b"endstream"))
}

fn size_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/Size\s+(\d+)").expect("valid regex"))
}

fn root_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/Root\s+(\d+)\s+\d+\s+R").expect("valid regex"))
}

fn length_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/Length\s+(\d+)").expect("valid regex"))
}

fn capture_number(pattern: &Regex, text: &str) -> Option<usize> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse().ok())
}

/// Parse one 20-byte entry: `oooooooooo ggggg n` + two-byte end-of-line.
fn parse_entry(object_number: usize, raw: &[u8]) -> Option<XrefEntry> {
    if raw[10] != b' ' || raw[16] != b' ' {
        return None;
    }
    let in_use = match raw[17] {
        b'n' => true,
        b'f' => false,
        _ => return None,
    };
    if !matches!(&raw[18..20], b" \n" | b" \r" | b"\r\n") {
        return None;
    }

    Some(XrefEntry {
        object_number,
        offset: parse_number(&raw[..10])?,
        generation: u32::try_from(parse_number(&raw[11..16])?).ok()?,
        in_use,
    })
}

fn parse_subsection(line: &[u8]) -> Option<(usize, usize)> {
    let text = std::str::from_utf8(line).ok()?;
    let mut parts = text.split_whitespace();
    let first = parts.next()?.parse().ok()?;
    let count = parts.next()?.parse().ok()?;
    Some((first, count))
}

fn parse_number(digits: &[u8]) -> Option<usize> {
    let text = std::str::from_utf8(digits).ok()?.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Line starting at `pos` (without its end-of-line) and the start of the next line.
fn read_line(data: &[u8], pos: usize) -> Option<(&[u8], usize)> {
    let rest = data.get(pos..)?;
    if rest.is_empty() {
        return None;
    }
    let end = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
    let line = rest[..end].strip_suffix(b"\r").unwrap_or(&rest[..end]);
    Some((line, pos + (end + 1).min(rest.len())))
}

fn skip_eol(data: &[u8], mut pos: usize) -> usize {
    if data.get(pos) == Some(&b'\r') {
        pos += 1;
    }
    if data.get(pos) == Some(&b'\n') {
        pos += 1;
    }
    pos
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}
