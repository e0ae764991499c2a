//! Single-record CSV encoding and decoding
//!
//! A record is written as `id,amount,category,date,note`. Text fields are
//! quoted only when they contain a reserved character, with embedded quotes
//! doubled. Decoding is quote-aware and never fails loudly: a line that does
//! not describe a valid expense simply yields `None`.

use chrono::NaiveDate;

use crate::models::{Expense, ExpenseId, Money, DATE_FORMAT};

/// Number of fields in every record line
pub const FIELD_COUNT: usize = 5;

/// Escape a text field for CSV output
///
/// Fields containing a comma, a double quote, or a line break are wrapped in
/// double quotes with every internal quote doubled; anything else is emitted
/// as-is.
pub fn escape_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Split a record line into its fields
///
/// Outside quotes a comma ends the current field. A double quote switches into
/// quoted mode, where `""` stands for one literal quote and a lone `"` switches
/// back out. Everything inside quotes, commas and newlines included, is taken
/// literally. The last field is always emitted, so an empty line yields one
/// empty field.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if quoted {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    quoted = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => quoted = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
    }
    fields.push(current);

    fields
}

/// Encode one expense as a CSV line (without the trailing newline)
pub fn encode_expense(expense: &Expense) -> String {
    format!(
        "{},{},{},{},{}",
        expense.id.to_full_string(),
        expense.amount.to_fixed(),
        escape_field(&expense.category),
        expense.date.format(DATE_FORMAT),
        escape_field(&expense.note)
    )
}

/// Decode one CSV line into an expense
///
/// Returns `None` when the line does not have exactly five fields or when the
/// id, amount or date does not parse. Category and note are taken verbatim.
/// The amount sign is not checked: values already on disk are trusted.
pub fn decode_expense(line: &str) -> Option<Expense> {
    let fields: [String; FIELD_COUNT] = split_fields(line).try_into().ok()?;
    let [id, amount, category, date, note] = fields;

    let id = ExpenseId::parse(&id).ok()?;
    let amount = Money::parse(&amount).ok()?;
    let date = NaiveDate::parse_from_str(&date, DATE_FORMAT).ok()?;

    Some(Expense::with_id(id, amount, category, date, note))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(note: &str) -> Expense {
        Expense::new(
            Money::from_cents(1250),
            "Food",
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            note,
        )
    }

    #[test]
    fn test_escape_plain_field_untouched() {
        assert_eq!(escape_field("groceries"), "groceries");
        assert_eq!(escape_field(""), "");
    }

    #[test]
    fn test_escape_reserved_characters() {
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("He said \"hi\""), "\"He said \"\"hi\"\"\"");
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn test_split_simple() {
        assert_eq!(split_fields("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_fields("a,,"), vec!["a", "", ""]);
        assert_eq!(split_fields(""), vec![""]);
    }

    #[test]
    fn test_split_quoted() {
        assert_eq!(
            split_fields("x,\"a,b\",\"say \"\"hi\"\"\""),
            vec!["x", "a,b", "say \"hi\""]
        );
        assert_eq!(split_fields("\"multi\nline\",z"), vec!["multi\nline", "z"]);
    }

    #[test]
    fn test_split_quote_mid_field() {
        // A quote anywhere outside quoted mode opens a quoted section.
        assert_eq!(split_fields("ab\"c,d\"e,f"), vec!["abc,de", "f"]);
    }

    #[test]
    fn test_encode_layout() {
        let expense = sample("");
        let line = encode_expense(&expense);
        assert_eq!(
            line,
            format!("{},12.50,Food,2025-03-09,", expense.id.to_full_string())
        );
    }

    #[test]
    fn test_encode_amount_two_decimals() {
        let mut expense = sample("");
        expense.amount = Money::parse("7").unwrap();
        assert!(encode_expense(&expense).contains(",7.00,"));
        expense.amount = Money::parse("1.005").unwrap();
        assert!(encode_expense(&expense).contains(",1.01,"));
    }

    #[test]
    fn test_round_trip_with_reserved_characters() {
        for note in ["", "plain", "a, b", "He said \"hi\"", "two\nlines", "\"\"", ",\",\n"] {
            let expense = sample(note);
            let decoded = decode_expense(&encode_expense(&expense)).unwrap();
            assert_eq!(decoded, expense, "note {:?}", note);
        }
    }

    #[test]
    fn test_round_trip_category_with_comma() {
        let mut expense = sample("x");
        expense.category = "Food, drinks".to_string();
        assert_eq!(decode_expense(&encode_expense(&expense)).unwrap(), expense);
    }

    #[test]
    fn test_quoted_note_encoding() {
        let expense = sample("He said \"hi\"");
        let line = encode_expense(&expense);
        assert!(line.ends_with(",\"He said \"\"hi\"\"\""));
    }

    #[test]
    fn test_decode_rejects_bad_amount() {
        let line = "550e8400-e29b-41d4-a716-446655440000,abc,Food,2025-01-01,";
        assert!(decode_expense(line).is_none());
    }

    #[test]
    fn test_decode_rejects_bad_date_and_id() {
        assert!(decode_expense("550e8400-e29b-41d4-a716-446655440000,1.00,Food,01/02/2025,").is_none());
        assert!(decode_expense("not-an-id,1.00,Food,2025-01-01,").is_none());
    }

    #[test]
    fn test_decode_rejects_wrong_field_count() {
        assert!(decode_expense("550e8400-e29b-41d4-a716-446655440000,1.00,Food,2025-01-01").is_none());
        assert!(decode_expense("550e8400-e29b-41d4-a716-446655440000,1.00,Food,2025-01-01,n,extra").is_none());
        assert!(decode_expense("").is_none());
    }

    #[test]
    fn test_decode_accepts_negative_amount() {
        let expense =
            decode_expense("550e8400-e29b-41d4-a716-446655440000,-4.20,Refund,2025-01-01,").unwrap();
        assert!(expense.amount.is_negative());
        assert_eq!(expense.amount, Money::from_cents(-420));
    }
}
