//! Knowledge-base record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed category labels assigned by the enrichment service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    /// Intelligence about a competitor
    #[serde(rename = "Competitor Intel")]
    CompetitorIntel,
    /// Customer feedback or sentiment
    #[serde(rename = "Customer Sentiment")]
    CustomerSentiment,
    /// A feature or capability of the business itself
    #[serde(rename = "Business Feature")]
    BusinessFeature,
    /// An event or promotion
    #[serde(rename = "Event/Promo")]
    EventPromo,
    /// No category could be assigned
    #[serde(rename = "Uncategorized")]
    Uncategorized,
    /// Enrichment failed; content stored as-is
    #[serde(rename = "Raw Data")]
    RawData,
}

impl Category {
    /// Display label, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompetitorIntel => "Competitor Intel",
            Self::CustomerSentiment => "Customer Sentiment",
            Self::BusinessFeature => "Business Feature",
            Self::EventPromo => "Event/Promo",
            Self::Uncategorized => "Uncategorized",
            Self::RawData => "Raw Data",
        }
    }

    /// Parse a label as returned by the enrichment service
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Competitor Intel" => Some(Self::CompetitorIntel),
            "Customer Sentiment" => Some(Self::CustomerSentiment),
            "Business Feature" => Some(Self::BusinessFeature),
            "Event/Promo" => Some(Self::EventPromo),
            "Uncategorized" => Some(Self::Uncategorized),
            "Raw Data" => Some(Self::RawData),
            _ => None,
        }
    }

    /// The labels the enrichment prompt offers the model
    pub fn assignable_labels() -> [&'static str; 4] {
        [
            "Competitor Intel",
            "Customer Sentiment",
            "Business Feature",
            "Event/Promo",
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a record came from manual entry or an uploaded file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Manually typed entry
    Internal,
    /// File-sourced entry
    External,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

/// A stored, categorized fact used as generation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    /// Unique record ID (store-assigned)
    pub id: Uuid,
    /// Unmodified input fact; never empty after trimming
    pub content: String,
    /// One-sentence summary from the enrichment service; absent when
    /// enrichment failed or was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Assigned category
    pub category: Category,
    /// Free-text provenance label (e.g. "Manual Entry", "CSV Upload")
    pub source: String,
    /// Manual vs file-sourced
    #[serde(rename = "type")]
    pub source_type: SourceType,
    /// Creation timestamp (store-assigned, descending sort key)
    pub created_at: DateTime<Utc>,
}

impl KnowledgeRecord {
    /// Text to render for this record: the summary when present, otherwise
    /// the raw content. Consumers must never assume a summary exists.
    pub fn display_text(&self) -> &str {
        self.summary.as_deref().unwrap_or(&self.content)
    }
}

/// Create-side shape for a knowledge record; the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewKnowledge {
    pub content: String,
    pub summary: Option<String>,
    pub category: Category,
    pub source: String,
    pub source_type: SourceType,
}

impl NewKnowledge {
    /// Fallback record for content whose enrichment failed: the original
    /// text stands in for the summary and the category marks it raw.
    pub fn fallback(content: String, source: String, source_type: SourceType) -> Self {
        Self {
            summary: Some(content.clone()),
            content,
            category: Category::RawData,
            source,
            source_type,
        }
    }
}

/// Result of one enrichment call: a category plus a one-sentence summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrichment {
    pub category: Category,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_round_trip() {
        for label in Category::assignable_labels() {
            let category = Category::from_label(label).unwrap();
            assert_eq!(category.as_str(), label);
        }
        assert_eq!(Category::from_label("Raw Data"), Some(Category::RawData));
        assert_eq!(Category::from_label("  Event/Promo "), Some(Category::EventPromo));
        assert_eq!(Category::from_label("Gossip"), None);
    }

    #[test]
    fn test_display_text_falls_back_to_content() {
        let record = KnowledgeRecord {
            id: Uuid::new_v4(),
            content: "Competitor X raised prices to $50".to_string(),
            summary: None,
            category: Category::RawData,
            source: "Manual Entry".to_string(),
            source_type: SourceType::Internal,
            created_at: Utc::now(),
        };
        assert_eq!(record.display_text(), "Competitor X raised prices to $50");

        let summarized = KnowledgeRecord {
            summary: Some("Competitor X now charges $50.".to_string()),
            ..record
        };
        assert_eq!(summarized.display_text(), "Competitor X now charges $50.");
    }

    #[test]
    fn test_category_serde_uses_display_labels() {
        let json = serde_json::to_string(&Category::EventPromo).unwrap();
        assert_eq!(json, "\"Event/Promo\"");

        let parsed: Category = serde_json::from_str("\"Raw Data\"").unwrap();
        assert_eq!(parsed, Category::RawData);
    }
}
