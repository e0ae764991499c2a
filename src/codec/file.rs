//! Whole-file CSV encoding and decoding
//!
//! A file is a fixed header line followed by one record per expense, oldest
//! first, so the newest expense is the physically last line. On decode the
//! header is discarded, bad records are skipped, and the surviving expenses
//! are reversed so that the last line becomes the first entry. Encoding a
//! store and decoding the result gives back the same order.

use std::io::{self, Write};

use tracing::debug;

use super::line::{decode_expense, encode_expense};
use crate::models::Expense;

/// Header line written at the top of every file
pub const HEADER: &str = "id,amount,category,date,note";

/// Result of decoding a file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedFile {
    /// Decoded expenses, newest first
    pub expenses: Vec<Expense>,
    /// Number of records that could not be decoded
    pub skipped: usize,
}

/// Write the header and every expense, back to front
///
/// `expenses` is in store order (newest first).
pub fn encode_file<W: Write>(writer: &mut W, expenses: &[Expense]) -> io::Result<()> {
    writeln!(writer, "{}", HEADER)?;
    for expense in expenses.iter().rev() {
        writeln!(writer, "{}", encode_expense(expense))?;
    }
    Ok(())
}

/// Encode a whole file into a string
pub fn encode_to_string(expenses: &[Expense]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + expenses.len() * 64);
    out.push_str(HEADER);
    out.push('\n');
    for expense in expenses.iter().rev() {
        out.push_str(&encode_expense(expense));
        out.push('\n');
    }
    out
}

/// Decode a whole file
///
/// The first record is treated as the header and dropped without inspection.
/// Never fails: records that do not decode are counted in `skipped`.
pub fn decode_file(text: &str) -> DecodedFile {
    let mut decoded = DecodedFile::default();

    for record in split_records(text).into_iter().skip(1) {
        match decode_expense(record) {
            Some(expense) => decoded.expenses.push(expense),
            None if record.contains('\n') => {
                // An unbalanced quote can swallow the lines after it; salvage
                // whatever physical lines still decode on their own.
                for line in record.lines() {
                    match decode_expense(line) {
                        Some(expense) => decoded.expenses.push(expense),
                        None => decoded.skipped += 1,
                    }
                }
            }
            None => {
                debug!(record, "skipping undecodable record");
                decoded.skipped += 1;
            }
        }
    }

    decoded.expenses.reverse();
    decoded
}

/// Split file text into logical records
///
/// Line breaks inside a quoted field belong to the field, so a record may span
/// several physical lines. A `\r` before a record-ending `\n` is dropped. A
/// trailing line break does not produce an empty final record.
pub fn split_records(text: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut quoted = false;

    for (i, c) in text.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '\n' if !quoted => {
                records.push(trim_cr(&text[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < text.len() {
        records.push(trim_cr(&text[start..]));
    }

    records
}

fn trim_cr(record: &str) -> &str {
    record.strip_suffix('\r').unwrap_or(record)
}
