//! Byte buffer that tracks object offsets while a file is assembled.

use std::fmt::Write as _;

/// Width of every cross-reference entry including its end-of-line.
pub const XREF_ENTRY_LEN: usize = 20;

/// Append-only PDF byte buffer.
///
/// Offsets are measured in bytes of the final buffer as each chunk is
/// appended, so they stay correct for multi-byte UTF-8 text.
#[derive(Debug)]
pub struct PdfWriter {
    buffer: Vec<u8>,
    /// Offsets indexed by object number; slot 0 is the free entry.
    offsets: Vec<usize>,
}

impl PdfWriter {
    /// Start a file with the `%PDF-<version>` header line.
    pub fn new(version: &str) -> Self {
        let mut writer = Self {
            buffer: Vec::with_capacity(1024),
            offsets: vec![0],
        };
        writer.write_str("%PDF-");
        writer.write_str(version);
        writer.write_str("\n");
        writer
    }

    /// Current length of the buffer, i.e. the offset of the next byte.
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Number of objects written so far.
    pub fn object_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Recorded offset of an object, if it has been written.
    pub fn offset_of(&self, object_number: usize) -> Option<usize> {
        if object_number == 0 {
            return None;
        }
        self.offsets.get(object_number).copied()
    }

    fn write_str(&mut self, text: &str) {
        self.buffer.extend_from_slice(text.as_bytes());
    }

    /// Write the next indirect object as `"<n> 0 obj\n<body>\nendobj\n"`.
    ///
    /// Objects are numbered densely in write order; the assigned number is
    /// returned.
    pub fn write_object(&mut self, body: &[u8]) -> usize {
        let number = self.offsets.len();
        self.offsets.push(self.position());

        self.write_str(&format!("{} 0 obj\n", number));
        self.buffer.extend_from_slice(body);
        self.write_str("\nendobj\n");
        number
    }

    /// Emit the cross-reference table and trailer, consuming the writer.
    pub fn finish(mut self, root: usize) -> Vec<u8> {
        let xref_start = self.position();
        let size = self.offsets.len();

        let mut table = String::with_capacity(32 + size * XREF_ENTRY_LEN);
        let _ = write!(table, "xref\n0 {}\n", size);
        table.push_str("0000000000 65535 f \n");
        for offset in self.offsets.iter().skip(1) {
            let _ = write!(table, "{:010} 00000 n \n", offset);
        }
        let _ = write!(
            table,
            "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, root, xref_start
        );
        self.write_str(&table);

        self.buffer
    }
}
