//! Generated draft types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Target social platform for a draft
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Platform {
    Instagram,
    Facebook,
    LinkedIn,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::LinkedIn => "LinkedIn",
        }
    }

    /// Parse a stored platform label
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Instagram" => Some(Self::Instagram),
            "Facebook" => Some(Self::Facebook),
            "LinkedIn" => Some(Self::LinkedIn),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review status of a draft.
///
/// `Draft` and `Posted` are the two known states and either can revert to the
/// other; unknown labels pass through untouched so older data (e.g.
/// "Scheduled") survives round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DraftStatus {
    Draft,
    Posted,
    Custom(String),
}

impl DraftStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "Draft",
            Self::Posted => "Posted",
            Self::Custom(label) => label,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }

    pub fn is_posted(&self) -> bool {
        matches!(self, Self::Posted)
    }
}

impl From<String> for DraftStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Draft" => Self::Draft,
            "Posted" => Self::Posted,
            _ => Self::Custom(label),
        }
    }
}

impl From<DraftStatus> for String {
    fn from(status: DraftStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated, human-reviewable social post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRecord {
    /// Unique record ID (store-assigned)
    pub id: Uuid,
    /// Target platform
    pub platform: Platform,
    /// Generated post text, mutable by human edit
    pub content: String,
    /// Review status
    pub status: DraftStatus,
    /// Tone the post was generated with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    /// Topic focus the post was generated with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Promotional message folded into the post
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_message: Option<String>,
    /// Whether web search augmentation was enabled
    pub web_search_enabled: bool,
    /// Generated image, as a data URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation timestamp (store-assigned, descending sort key)
    pub created_at: DateTime<Utc>,
}

/// Create-side shape for a draft; the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewDraft {
    pub platform: Platform,
    pub content: String,
    pub status: DraftStatus,
    pub tone: Option<String>,
    pub topic: Option<String>,
    pub promo_message: Option<String>,
    pub web_search_enabled: bool,
    pub image_url: Option<String>,
}

/// Partial field patch for update-by-id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftPatch {
    /// New post text (human edit)
    pub content: Option<String>,
    /// New status (e.g. Draft ⇄ Posted)
    pub status: Option<DraftStatus>,
}

impl DraftPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_known_labels() {
        assert_eq!(DraftStatus::from("Draft".to_string()), DraftStatus::Draft);
        assert_eq!(DraftStatus::from("Posted".to_string()), DraftStatus::Posted);
        assert!(DraftStatus::Draft.is_draft());
        assert!(DraftStatus::Posted.is_posted());
    }

    #[test]
    fn test_status_custom_label_round_trips() {
        let status = DraftStatus::from("Scheduled".to_string());
        assert_eq!(status, DraftStatus::Custom("Scheduled".to_string()));
        assert_eq!(String::from(status), "Scheduled");

        let json = serde_json::to_string(&DraftStatus::Custom("Rejected".into())).unwrap();
        assert_eq!(json, "\"Rejected\"");
        let parsed: DraftStatus = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(parsed.as_str(), "Rejected");
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(DraftPatch::default().is_empty());
        let patch = DraftPatch {
            status: Some(DraftStatus::Posted),
            content: None,
        };
        assert!(!patch.is_empty());
    }
}
