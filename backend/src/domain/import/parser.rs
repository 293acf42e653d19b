//! Tolerant CSV decoding into string-keyed rows.
//!
//! Malformed records are reported in [`CsvParseOutcome::errors`] and skipped;
//! parsing always runs to the end of the buffer.

use std::collections::HashMap;

use csv::{ErrorKind, ReaderBuilder, StringRecord, Trim};

/// One data line keyed by header name, with cells trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRow {
    cells: HashMap<String, String>,
}

impl ParsedRow {
    fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_owned(), value.to_owned()))
            .collect();
        Self { cells }
    }

    /// Return the cell for `column` when it is present and non-blank.
    #[must_use]
    pub fn field(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for ParsedRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let cells = iter
            .into_iter()
            .map(|(key, value)| (key.into(), Into::<String>::into(value).trim().to_owned()))
            .collect();
        Self { cells }
    }
}

/// Rows decoded from one buffer plus any per-line errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvParseOutcome {
    /// Data rows in file order, header excluded.
    pub rows: Vec<ParsedRow>,
    /// One message per malformed line.
    pub errors: Vec<String>,
}

impl CsvParseOutcome {
    /// Number of data rows decoded successfully.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the whole buffer decoded cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Decode `payload` as comma-separated text with a header row.
///
/// A buffer without a header row yields an empty, clean outcome.
///
/// # Examples
/// ```
/// use backoffice::domain::import::parse_csv;
///
/// let outcome = parse_csv(b"id,name\n1,Ada\n2,Grace\n");
/// assert!(outcome.is_clean());
/// assert_eq!(outcome.rows[1].field("name"), Some("Grace"));
/// ```
#[must_use]
pub fn parse_csv(payload: &[u8]) -> CsvParseOutcome {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(payload);

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(error) => {
            return CsvParseOutcome {
                rows: Vec::new(),
                errors: vec![describe_error(&error)],
            };
        }
    };

    let mut outcome = CsvParseOutcome::default();
    if headers.is_empty() {
        return outcome;
    }

    for result in reader.records() {
        match result {
            Ok(record) => outcome.rows.push(ParsedRow::from_record(&headers, &record)),
            Err(error) => outcome.errors.push(describe_error(&error)),
        }
    }
    outcome
}

fn describe_error(error: &csv::Error) -> String {
    let line = error.position().map(csv::Position::line);
    match (error.kind(), line) {
        (
            ErrorKind::UnequalLengths {
                expected_len, len, ..
            },
            Some(line),
        ) => format!("Line {line}: expected {expected_len} fields but found {len}"),
        (ErrorKind::Utf8 { .. }, Some(line)) => format!("Line {line}: invalid UTF-8 data"),
        _ => error.to_string(),
    }
}
