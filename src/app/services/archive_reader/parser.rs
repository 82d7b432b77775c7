//! Lazy row scanner for provider data entries
//!
//! Lines before the header sentinel are discarded. Every later non-empty
//! line is zipped against the header names, trimmed and parsed best-effort.

use super::stats::{ParseStats, RowError};
use crate::app::models::{FieldValue, RawRow, TimedRow};
use crate::config::Provider;
use std::io::Read;
use tracing::{debug, trace};

/// Iterator over the rows of one data entry
///
/// Yields `Ok(TimedRow)` for every usable data line and `Err(RowError)` for
/// lines that must be skipped. A source without the sentinel yields nothing;
/// check [`RowReader::header`] afterwards to tell that apart from an empty
/// data section.
pub struct RowReader<R: Read> {
    records: csv::ByteRecordsIntoIter<R>,
    provider: Provider,
    header: Option<Vec<String>>,
    stats: ParseStats,
    finished: bool,
}

impl<R: Read> RowReader<R> {
    /// Create a scanner over a provider data entry
    pub fn new(source: R, provider: Provider) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(provider.delimiter())
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(source);

        Self {
            records: reader.into_byte_records(),
            provider,
            header: None,
            stats: ParseStats::new(),
            finished: false,
        }
    }

    /// Header names (canonicalised), once the sentinel has been seen
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Consume the scanner and return its statistics
    pub fn into_stats(self) -> ParseStats {
        self.stats
    }

    fn try_header(&mut self, fields: &[String]) -> bool {
        let sentinel = self.provider.header_sentinel();
        if !fields.iter().any(|field| field == sentinel) {
            self.stats.preamble_lines += 1;
            return false;
        }

        let names: Vec<String> = fields
            .iter()
            .map(|name| self.provider.canonical_column(name))
            .collect();
        debug!("Found header with {} columns: {:?}", names.len(), names);
        self.header = Some(names);
        self.stats.header_found = true;
        true
    }
}

fn parse_record(
    provider: Provider,
    header: &[String],
    fields: Vec<String>,
    line: u64,
) -> Result<TimedRow, RowError> {
    if fields.len() != header.len() {
        return Err(RowError::FieldCount {
            line,
            expected: header.len(),
            found: fields.len(),
        });
    }

    let timestamp = provider
        .row_timestamp(|column| {
            header
                .iter()
                .position(|name| name == column)
                .map(|index| fields[index].as_str())
                .filter(|value| !value.is_empty())
        })
        .map_err(|reason| RowError::Timestamp { line, reason })?;

    let mut row = RawRow::new();
    for (name, raw) in header.iter().zip(fields.iter()) {
        if let Some(value) = FieldValue::parse(raw) {
            row.insert(name.clone(), value);
        }
    }
    provider.apply_scaling(&mut row);

    Ok(TimedRow::new(timestamp, row))
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<TimedRow, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(error) => {
                    self.finished = true;
                    let line = error.position().map(|p| p.line()).unwrap_or(0);
                    return Some(Err(RowError::Read {
                        line,
                        message: error.to_string(),
                    }));
                }
            };

            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let fields: Vec<String> = record
                .iter()
                .map(|field| String::from_utf8_lossy(field).trim().to_string())
                .collect();

            if fields.iter().all(|field| field.is_empty()) {
                continue;
            }

            let Some(header) = self.header.as_deref() else {
                self.try_header(&fields);
                continue;
            };

            let parsed = parse_record(self.provider, header, fields, line);
            self.stats.total_records += 1;
            match parsed {
                Ok(row) => {
                    self.stats.rows_parsed += 1;
                    return Some(Ok(row));
                }
                Err(error) => {
                    trace!("Skipping row: {}", error);
                    return Some(Err(error));
                }
            }
        }
        None
    }
}
