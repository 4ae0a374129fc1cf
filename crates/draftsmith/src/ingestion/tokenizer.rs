//! Quote-aware field splitting for one line of delimited text

/// Split one line of delimited text into its fields.
///
/// A double quote toggles quoted mode and is consumed, not emitted; while
/// quoted, the delimiter is literal text. Fields are trimmed of surrounding
/// whitespace. The final field is always emitted, so an empty line yields a
/// single empty field. Unbalanced quotes are not an error: the rest of the
/// line is swallowed into the current field, delimiters included.
///
/// This is not RFC 4180: doubled quotes ("") are not un-escaped, and embedded
/// quote characters are dropped rather than preserved.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }

    fields.push(current.trim().to_string());
    fields
}
