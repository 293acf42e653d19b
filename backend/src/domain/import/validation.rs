//! Per-row validation and coercion shared by every import target.
//!
//! A row is checked field by field without short-circuiting, so one row can
//! contribute several messages. A batch is valid only when every row is.

use std::fmt;

use chrono::NaiveDate;

use super::ParsedRow;

/// Date layout accepted in CSV cells and rendered in reports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation message tied to a zero-based data row index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Zero-based index over data rows, header excluded.
    pub index: usize,
    /// Human-readable problem description.
    pub message: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.index, self.message)
    }
}

/// Validate every row with `parse_row`, returning typed records only when
/// all rows pass.
///
/// # Errors
///
/// Returns every row error, in row order, when at least one row fails.
pub fn validate_rows<R>(
    rows: &[ParsedRow],
    parse_row: impl Fn(&ParsedRow) -> Result<R, Vec<String>>,
) -> Result<Vec<R>, Vec<RowError>> {
    let mut records = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match parse_row(row) {
            Ok(record) => records.push(record),
            Err(messages) => errors.extend(
                messages
                    .into_iter()
                    .map(|message| RowError { index, message }),
            ),
        }
    }

    if errors.is_empty() {
        Ok(records)
    } else {
        Err(errors)
    }
}

/// Accumulating field accessor used by row parsers.
pub(crate) struct FieldReader<'a> {
    row: &'a ParsedRow,
    errors: Vec<String>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(row: &'a ParsedRow) -> Self {
        Self {
            row,
            errors: Vec::new(),
        }
    }

    pub(crate) fn text(&mut self, column: &str) -> Option<&'a str> {
        let value = self.row.field(column);
        if value.is_none() {
            self.errors.push(format!("Missing {column}"));
        }
        value
    }

    pub(crate) fn integer(&mut self, column: &str) -> Option<i64> {
        let raw = self.text(column)?;
        let parsed = raw.parse::<i64>().ok();
        if parsed.is_none() {
            self.errors.push(format!("{column} must be a valid number"));
        }
        parsed
    }

    pub(crate) fn decimal(&mut self, column: &str, invalid: &str) -> Option<f64> {
        let raw = self.text(column)?;
        let parsed = raw.parse::<f64>().ok().filter(|value| value.is_finite());
        if parsed.is_none() {
            self.errors.push(invalid.to_owned());
        }
        parsed
    }

    pub(crate) fn date(&mut self, column: &str) -> Option<NaiveDate> {
        let raw = self.text(column)?;
        let parsed = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok();
        if parsed.is_none() {
            self.errors.push(format!("{column} must be a valid date"));
        }
        parsed
    }

    pub(crate) fn check(&mut self, ok: bool, message: &str) {
        if !ok {
            self.errors.push(message.to_owned());
        }
    }

    /// Build the record when no check failed.
    pub(crate) fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, Vec<String>> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        build().ok_or(self.errors)
    }
}

/// Match `local@domain.tld`: no whitespace, exactly one `@`, and a dot with
/// characters on both sides somewhere in the domain part.
pub(crate) fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(at, ch)| ch == '.' && at > 0 && at + 1 < domain.len())
}
