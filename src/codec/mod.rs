//! CSV codec for expense files
//!
//! `line` converts single expenses to and from CSV lines; `file` handles the
//! header, record splitting and ordering of a whole file. The same format is
//! used for the backing file and for CSV exports.

pub mod file;
pub mod line;

pub use file::{decode_file, encode_file, encode_to_string, split_records, DecodedFile, HEADER};
pub use line::{decode_expense, encode_expense, escape_field, split_fields};
