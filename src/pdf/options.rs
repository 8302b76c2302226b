//! Page layout options for the document builder.

/// How control characters inside a line are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlCharPolicy {
    /// Fail the build with [`crate::Error::InvalidLine`].
    #[default]
    Reject,
    /// Replace each control character with a single space.
    Replace,
}

/// Layout of the single page produced by [`super::PdfDocumentBuilder`].
///
/// All values are in PDF points (1/72 inch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Page width (MediaBox)
    pub page_width: u32,

    /// Page height (MediaBox)
    pub page_height: u32,

    /// X position of every line
    pub margin_left: i32,

    /// Baseline of the first line
    pub first_baseline: i32,

    /// Vertical distance between consecutive baselines
    pub line_height: i32,

    /// Helvetica font size
    pub font_size: u32,

    /// Control character handling
    pub control_chars: ControlCharPolicy,
}

impl LayoutOptions {
    /// Create layout options with the US Letter defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, width: u32, height: u32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the left margin.
    pub fn with_margin_left(mut self, x: i32) -> Self {
        self.margin_left = x;
        self
    }

    /// Set the baseline of the first line.
    pub fn with_first_baseline(mut self, y: i32) -> Self {
        self.first_baseline = y;
        self
    }

    /// Set the line height.
    pub fn with_line_height(mut self, height: i32) -> Self {
        self.line_height = height;
        self
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the control character policy.
    pub fn with_control_chars(mut self, policy: ControlCharPolicy) -> Self {
        self.control_chars = policy;
        self
    }

    /// Replace control characters instead of rejecting them.
    pub fn lenient(mut self) -> Self {
        self.control_chars = ControlCharPolicy::Replace;
        self
    }

    /// Baseline of the line at `index` (0-based).
    ///
    /// Lines past the bottom edge get negative baselines; nothing is clipped.
    pub fn baseline(&self, index: usize) -> i64 {
        i64::from(self.first_baseline) - i64::from(self.line_height) * index as i64
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_width: 612,
            page_height: 792,
            margin_left: 48,
            first_baseline: 790,
            line_height: 20,
            font_size: 12,
            control_chars: ControlCharPolicy::Reject,
        }
    }
}
