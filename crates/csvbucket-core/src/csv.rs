//! CSV Text Codec
//!
//! Minimal comma-separated-values reader and writer for the stored document.
//!
//! ## Writing
//! Fields are joined with `,` and each record ends with `\r\n`. A field is
//! wrapped in double quotes only when it contains a comma, a double quote,
//! `\r` or `\n`; embedded quotes are doubled.
//!
//! ## Reading
//! - `\n` and `\r\n` both end a record
//! - A quote opens a quoted field only at the start of a field; elsewhere it
//!   is a literal character
//! - Quoted fields may span lines and use `""` for a literal quote
//! - Blank lines produce no record
//! - A record left open by an unterminated quote at end of input is dropped

const DELIMITER: char = ',';
const QUOTE: char = '"';
const TERMINATOR: &str = "\r\n";

/// Append one encoded record (including its line terminator) to `out`.
pub fn write_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        write_field(out, field.as_ref());
    }
    out.push_str(TERMINATOR);
}

fn write_field(out: &mut String, field: &str) {
    if needs_quoting(field) {
        out.push(QUOTE);
        for c in field.chars() {
            if c == QUOTE {
                out.push(QUOTE);
            }
            out.push(c);
        }
        out.push(QUOTE);
    } else {
        out.push_str(field);
    }
}

fn needs_quoting(field: &str) -> bool {
    field
        .chars()
        .any(|c| c == DELIMITER || c == QUOTE || c == '\r' || c == '\n')
}

/// Split `input` into records of raw text fields.
///
/// Never fails: anything that cannot form a complete record is left out.
pub fn read_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();

    // Whether the current line produced anything at all
    let mut has_content = false;
    // Whether the current field opened with a quote
    let mut quoted = false;
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == QUOTE {
                if chars.peek() == Some(&QUOTE) {
                    chars.next();
                    field.push(QUOTE);
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            QUOTE if field.is_empty() && !quoted => {
                quoted = true;
                in_quotes = true;
                has_content = true;
            }
            DELIMITER => {
                record.push(std::mem::take(&mut field));
                quoted = false;
                has_content = true;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if has_content {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                field.clear();
                record.clear();
                quoted = false;
                has_content = false;
            }
            _ => {
                field.push(c);
                has_content = true;
            }
        }
    }

    if has_content && !in_quotes {
        record.push(field);
        records.push(record);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(fields: &[&str]) -> String {
        let mut out = String::new();
        write_record(&mut out, fields);
        out
    }

    #[test]
    fn test_write_plain_fields() {
        assert_eq!(encode(&["Ana", "30", "1.65"]), "Ana,30,1.65\r\n");
    }

    #[test]
    fn test_write_quotes_special_fields() {
        assert_eq!(encode(&["Pérez, Ana", "30", "1.65"]), "\"Pérez, Ana\",30,1.65\r\n");
        assert_eq!(encode(&["say \"hi\""]), "\"say \"\"hi\"\"\"\r\n");
        assert_eq!(encode(&["two\nlines"]), "\"two\nlines\"\r\n");
    }

    #[test]
    fn test_write_empty_field() {
        assert_eq!(encode(&["", "1"]), ",1\r\n");
    }

    #[test]
    fn test_read_mixed_line_endings() {
        let records = read_records("a,b\r\nc,d\ne,f");
        assert_eq!(
            records,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
                vec!["e".to_string(), "f".to_string()],
            ]
        );
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let records = read_records("\n\na,b\r\n\r\n\nc,d\n\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], vec!["c", "d"]);
    }

    #[test]
    fn test_read_quoted_fields() {
        let records = read_records("\"Pérez, Ana\",\"say \"\"hi\"\"\",\"two\nlines\"\n");
        assert_eq!(records, vec![vec!["Pérez, Ana", "say \"hi\"", "two\nlines"]]);
    }

    #[test]
    fn test_read_mid_field_quote_is_literal() {
        let records = read_records("ab\"c,d\n");
        assert_eq!(records, vec![vec!["ab\"c", "d"]]);
    }

    #[test]
    fn test_read_trailing_delimiter_keeps_empty_field() {
        let records = read_records("a,b,\n");
        assert_eq!(records, vec![vec!["a", "b", ""]]);
    }

    #[test]
    fn test_read_drops_unterminated_quote() {
        let records = read_records("a,b,c\n\"open,1,2\n");
        assert_eq!(records, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_written_records_read_back() {
        let mut out = String::new();
        write_record(&mut out, &["nombre", "edad", "altura"]);
        write_record(&mut out, &["O\"Brien, Jo", "51", "1.7"]);
        let records = read_records(&out);
        assert_eq!(records[1], vec!["O\"Brien, Jo", "51", "1.7"]);
    }
}
