//! Delimited-text parsing into header-keyed row mappings

use super::tokenizer::split_line;

/// One parsed data row: an insertion-ordered mapping of header name to value.
///
/// Duplicate header names overwrite in place (last column wins, first position
/// kept), so iteration order is deterministic across repeated parses of the
/// same input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    /// Insert a field, overwriting an existing key in place
    pub fn insert(&mut self, key: String, value: String) {
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    /// Look up a field by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Strip literal quote characters left over after tokenizing
fn strip_quotes(s: &str) -> String {
    s.replace('"', "")
}

/// Parse a whole delimited-text blob into row mappings.
///
/// The first line supplies the header names (lower-cased, quote-stripped);
/// each subsequent non-blank line is zipped against the headers positionally,
/// with missing trailing fields mapped to the empty string and extra fields
/// ignored. Blank lines are skipped, one trailing empty line is discarded,
/// and an input with fewer than two lines (header only, or nothing) yields an
/// empty result rather than an error.
pub fn parse_table(text: &str, delimiter: char) -> Vec<Row> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    if lines.len() < 2 {
        return Vec::new();
    }

    let headers: Vec<String> = split_line(lines[0], delimiter)
        .into_iter()
        .map(|h| strip_quotes(&h).to_lowercase())
        .collect();

    let mut rows = Vec::new();
    for line in &lines[1..] {
        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<String> = split_line(line, delimiter)
            .into_iter()
            .map(|v| strip_quotes(&v))
            .collect();

        let mut row = Row::default();
        for (i, header) in headers.iter().enumerate() {
            let value = values.get(i).cloned().unwrap_or_default();
            row.insert(header.clone(), value);
        }
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_match_header_shape() {
        let rows = parse_table("name,price,city\nWidget,10,Sandy\nGadget,20,Draper\n", ',');
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.len(), 3);
        }
        assert_eq!(rows[0].get("name"), Some("Widget"));
        assert_eq!(rows[1].get("city"), Some("Draper"));
    }

    #[test]
    fn test_headers_lowercased_and_quote_stripped() {
        let rows = parse_table("\"Name\",PRICE\nWidget,10", ',');
        assert_eq!(rows[0].get("name"), Some("Widget"));
        assert_eq!(rows[0].get("price"), Some("10"));
    }

    #[test]
    fn test_short_rows_padded_with_empty_string() {
        let rows = parse_table("a,b,c\n1,2\n", ',');
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("c"), Some(""));
        assert_eq!(rows[0].len(), 3);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let rows = parse_table("a,b\n1,2\n\n3,4\n", ',');
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("a"), Some("3"));
    }

    #[test]
    fn test_header_only_yields_nothing() {
        assert!(parse_table("a,b,c", ',').is_empty());
        assert!(parse_table("a,b,c\n", ',').is_empty());
        assert!(parse_table("", ',').is_empty());
    }

    #[test]
    fn test_duplicate_header_last_column_wins() {
        let rows = parse_table("name,name\nfirst,second", ',');
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].get("name"), Some("second"));
    }

    #[test]
    fn test_quoted_value_with_delimiter() {
        let rows = parse_table("item,note\nwidget,\"cheap, cheerful\"", ',');
        assert_eq!(rows[0].get("note"), Some("cheap, cheerful"));
    }

    #[test]
    fn test_reparse_is_identical() {
        let text = "name,price,image_url\nWidget,10,http://x\nGadget,,http://y\n";
        assert_eq!(parse_table(text, ','), parse_table(text, ','));
    }

    #[test]
    fn test_crlf_line_endings() {
        let rows = parse_table("a,b\r\n1,2\r\n", ',');
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("b"), Some("2"));
    }
}
