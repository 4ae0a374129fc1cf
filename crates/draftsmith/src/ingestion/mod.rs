//! Batch file ingestion: parsing, normalization, and the ingestion driver

pub mod batch;
pub mod normalizer;
pub mod tabular;
pub mod tokenizer;

pub use batch::{ingest, BatchResult};
pub use normalizer::{normalize_json, normalize_row, Candidate, CSV_SOURCE};
pub use tabular::{parse_table, Row};
pub use tokenizer::split_line;

use serde_json::Value;

use crate::error::{Error, Result};

/// Default provenance label for JSON uploads without their own `source`
pub const JSON_SOURCE: &str = "Uploaded JSON";

/// CSV files use a comma delimiter
const CSV_DELIMITER: char = ',';

/// Parse an uploaded batch file into ingestion candidates.
///
/// Dispatches on the filename suffix: `.json` accepts an array of
/// `{content, source?}` objects or a single such object; `.csv` goes through
/// the tabular parser and row normalizer. Structural failures abort before
/// any write: a CSV with no parseable rows is `EmptyInput`, invalid JSON or a
/// file with no surviving candidate is `MalformedFile`, and any other suffix
/// is `UnsupportedFileType`.
pub fn parse_batch_file(filename: &str, data: &[u8]) -> Result<Vec<Candidate>> {
    let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match extension.as_str() {
        "json" => parse_json_file(filename, data),
        "csv" => parse_csv_file(filename, data),
        _ => Err(Error::UnsupportedFileType(extension)),
    }
}

fn parse_json_file(filename: &str, data: &[u8]) -> Result<Vec<Candidate>> {
    let value: Value = serde_json::from_slice(data)
        .map_err(|e| Error::malformed_file(filename, format!("invalid JSON: {}", e)))?;

    let items: Vec<Value> = match value {
        Value::Array(items) => items,
        other => vec![other],
    };

    let candidates: Vec<Candidate> = items
        .iter()
        .filter_map(|item| normalize_json(item, JSON_SOURCE))
        .collect();

    if candidates.is_empty() {
        return Err(Error::malformed_file(
            filename,
            "no item with a usable content field",
        ));
    }

    Ok(candidates)
}

fn parse_csv_file(filename: &str, data: &[u8]) -> Result<Vec<Candidate>> {
    let text = String::from_utf8_lossy(data);
    let rows = parse_table(&text, CSV_DELIMITER);

    if rows.is_empty() {
        return Err(Error::EmptyInput(filename.to_string()));
    }

    let candidates: Vec<Candidate> = rows.iter().filter_map(normalize_row).collect();

    if candidates.is_empty() {
        return Err(Error::malformed_file(
            filename,
            "no row survived normalization",
        ));
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array_dispatch() {
        let data = br#"[
            {"content": "Competitor X raised prices to $50", "source": "Field notes"},
            {"content": "Customers love the new simulators"},
            {"source": "no content here"}
        ]"#;
        let candidates = parse_batch_file("facts.json", data).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].source, "Field notes");
        assert_eq!(candidates[1].source, JSON_SOURCE);
    }

    #[test]
    fn test_single_json_object() {
        let data = br#"{"content": "League night fills up fast"}"#;
        let candidates = parse_batch_file("fact.json", data).unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse_batch_file("broken.json", b"{not json").unwrap_err();
        assert!(matches!(err, Error::MalformedFile { .. }));
    }

    #[test]
    fn test_json_with_no_usable_item_is_malformed() {
        let err = parse_batch_file("empty.json", b"[{\"content\": \"\"}]").unwrap_err();
        assert!(matches!(err, Error::MalformedFile { .. }));
    }

    #[test]
    fn test_csv_end_to_end_shape() {
        let data = b"name,price,image_url\n\
                     Pro membership,120,http://example.com/a.png\n\
                     Weekday pass,,http://example.com/b.png\n\
                     League night special,45,http://example.com/c.png\n";
        let candidates = parse_batch_file("products.csv", data).unwrap();
        assert_eq!(candidates.len(), 3);
        for candidate in &candidates {
            assert!(!candidate.content.contains("http://"));
            assert!(!candidate.content.contains("image_url"));
            assert_eq!(candidate.source, CSV_SOURCE);
        }
        // Row 2 has an empty price, so only its name column contributes.
        assert_eq!(candidates[1].content, "name: Weekday pass");
    }

    #[test]
    fn test_header_only_csv_is_empty_input() {
        let err = parse_batch_file("empty.csv", b"name,price\n").unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[test]
    fn test_csv_with_only_short_rows_is_malformed() {
        let err = parse_batch_file("short.csv", b"a\n1\n2\n").unwrap_err();
        assert!(matches!(err, Error::MalformedFile { .. }));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = parse_batch_file("notes.txt", b"whatever").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }

    #[test]
    fn test_reparse_yields_identical_candidates() {
        let data = b"name,note\nWidget,\"cheap, cheerful\"\nGadget,rugged build\n";
        let first = parse_batch_file("items.csv", data).unwrap();
        let second = parse_batch_file("items.csv", data).unwrap();
        assert_eq!(first, second);
    }
}
