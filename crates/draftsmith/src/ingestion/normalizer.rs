//! Normalization of parsed rows into ingestion candidates

use serde_json::Value;

use super::tabular::Row;

/// Provenance label attached to candidates from delimited-text uploads
pub const CSV_SOURCE: &str = "CSV Upload";

/// Joined content at or below this many characters is discarded
const MIN_CONTENT_LEN: usize = 10;

/// A normalized `{content, source}` pair awaiting enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub content: String,
    pub source: String,
}

/// Returns true for columns that carry links or image references rather than
/// facts worth enriching
fn is_excluded_key(key: &str) -> bool {
    key.contains("url") || key.contains("image")
}

/// Normalize one delimited-text row into a candidate.
///
/// Every entry with a non-empty trimmed value and a key that names neither a
/// url nor an image is rendered as `key: value`; entries are joined with
/// `" | "` in column order. Rows whose joined content is 10 characters or
/// shorter carry too little signal and are skipped.
pub fn normalize_row(row: &Row) -> Option<Candidate> {
    let content = row
        .iter()
        .filter(|(key, value)| !value.trim().is_empty() && !is_excluded_key(key))
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join(" | ");

    if content.chars().count() <= MIN_CONTENT_LEN {
        return None;
    }

    Some(Candidate {
        content,
        source: CSV_SOURCE.to_string(),
    })
}

/// Normalize one item of an uploaded JSON array.
///
/// The item must carry a non-empty `content` field (after trimming); it is
/// forwarded as-is. `source` comes from the item itself when present,
/// otherwise from the caller-supplied default label.
pub fn normalize_json(item: &Value, default_source: &str) -> Option<Candidate> {
    let content = item.get("content")?.as_str()?;
    if content.trim().is_empty() {
        return None;
    }

    let source = item
        .get("source")
        .and_then(|s| s.as_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_source);

    Some(Candidate {
        content: content.to_string(),
        source: source.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(fields: &[(&str, &str)]) -> Row {
        let mut row = Row::default();
        for (k, v) in fields {
            row.insert(k.to_string(), v.to_string());
        }
        row
    }

    #[test]
    fn test_joins_fields_in_column_order() {
        let candidate = normalize_row(&row(&[("name", "Widget"), ("price", "10")])).unwrap();
        assert_eq!(candidate.content, "name: Widget | price: 10");
        assert_eq!(candidate.source, CSV_SOURCE);
    }

    #[test]
    fn test_excludes_url_and_image_columns() {
        let candidate = normalize_row(&row(&[
            ("name", "Widget deluxe"),
            ("image_url", "http://example.com/w.png"),
            ("thumbnail_image", "http://example.com/t.png"),
        ]))
        .unwrap();
        assert_eq!(candidate.content, "name: Widget deluxe");
        assert!(!candidate.content.contains("http://"));
    }

    #[test]
    fn test_empty_values_dropped() {
        let candidate = normalize_row(&row(&[
            ("name", "Widget deluxe"),
            ("price", ""),
            ("city", "   "),
        ]))
        .unwrap();
        assert_eq!(candidate.content, "name: Widget deluxe");
    }

    #[test]
    fn test_skip_rule_boundary() {
        // "a: 12345" is 8 chars, "a: 123456" is 9, "a: 1234567" is 10,
        // "a: 12345678" is 11; only the last survives the <= 10 rule.
        assert!(normalize_row(&row(&[("a", "12345")])).is_none());
        assert!(normalize_row(&row(&[("a", "1234567")])).is_none());
        let kept = normalize_row(&row(&[("a", "12345678")])).unwrap();
        assert_eq!(kept.content.chars().count(), 11);
    }

    #[test]
    fn test_all_excluded_yields_skip() {
        assert!(normalize_row(&row(&[("image_url", "http://example.com/a.png")])).is_none());
        assert!(normalize_row(&Row::default()).is_none());
    }

    #[test]
    fn test_json_item_requires_content() {
        assert!(normalize_json(&json!({"source": "crm"}), "Uploaded JSON").is_none());
        assert!(normalize_json(&json!({"content": "   "}), "Uploaded JSON").is_none());
        assert!(normalize_json(&json!({"content": 42}), "Uploaded JSON").is_none());
    }

    #[test]
    fn test_json_item_source_defaulting() {
        let own = normalize_json(
            &json!({"content": "League night fills up fast", "source": "CRM Export"}),
            "Uploaded JSON",
        )
        .unwrap();
        assert_eq!(own.source, "CRM Export");

        let defaulted =
            normalize_json(&json!({"content": "League night fills up fast"}), "Uploaded JSON")
                .unwrap();
        assert_eq!(defaulted.source, "Uploaded JSON");
    }

    #[test]
    fn test_json_content_forwarded_as_is() {
        let candidate = normalize_json(&json!({"content": "  padded fact  "}), "x").unwrap();
        assert_eq!(candidate.content, "  padded fact  ");
    }
}
