//! Parsing statistics and row-level errors
//!
//! Row problems never abort an archive: they are counted, logged and the row
//! is skipped.

/// Skip messages kept per station; further skips are only counted
pub const MAX_ERROR_MESSAGES: usize = 100;

/// A data line that could not become a row
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    /// Field count differs from the header
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Timestamp columns missing or unparsable
    #[error("line {line}: invalid timestamp ({reason})")]
    Timestamp { line: u64, reason: String },

    /// Underlying reader failed; scanning stops and the bundle is rejected
    #[error("line {line}: read failure ({message})")]
    Read { line: u64, message: String },
}

/// Statistics collected while scanning one or more data entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseStats {
    /// Whether the header sentinel was found
    pub header_found: bool,

    /// Lines discarded before the header
    pub preamble_lines: usize,

    /// Data records seen after the header
    pub total_records: usize,

    /// Rows successfully produced
    pub rows_parsed: usize,

    /// Rows skipped because of a [`RowError`]
    pub rows_skipped: usize,

    /// Messages of the first [`MAX_ERROR_MESSAGES`] skipped rows
    pub errors: Vec<String>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped row
    pub fn record_error(&mut self, error: &RowError) {
        self.rows_skipped += 1;
        if self.errors.len() < MAX_ERROR_MESSAGES {
            self.errors.push(error.to_string());
        }
    }

    /// Fold the statistics of another scan into this one
    pub fn absorb(&mut self, other: ParseStats) {
        self.header_found |= other.header_found;
        self.preamble_lines += other.preamble_lines;
        self.total_records += other.total_records;
        self.rows_parsed += other.rows_parsed;
        self.rows_skipped += other.rows_skipped;
        let room = MAX_ERROR_MESSAGES.saturating_sub(self.errors.len());
        self.errors.extend(other.errors.into_iter().take(room));
    }

    /// Percentage of data records that became rows
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            return 100.0;
        }
        (self.rows_parsed as f64 / self.total_records as f64) * 100.0
    }
}
