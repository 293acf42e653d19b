//! Shared helpers for the backoffice integration tests.
//!
//! Each file under `tests/` compiles as its own crate, so helpers that more
//! than one suite needs live here and are pulled in with `mod support;`.

#![allow(dead_code, reason = "each test crate uses a different subset")]

pub mod cluster_skip;
pub mod embedded_postgres;
pub mod pg_embed;

/// Render a `postgres` error with its SQLSTATE and detail.
///
/// The `Display` impl of `postgres::Error` collapses server errors to
/// `db error`, which hides the useful part.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}
