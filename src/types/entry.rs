//! Journal entry model
//!
//! Stored as camelCase JSON, the layout the browser journal exported.
//! Missing list fields load as empty lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One journal record describing a single dream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamEntry {
    /// Opaque unique identifier
    pub id: String,
    pub title: String,
    pub description: String,
    /// Illustration supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Themes and symbols (no duplicates within one entry)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Felt emotions (no duplicates within one entry)
    #[serde(default)]
    pub emotions: Vec<String>,
    /// Creation time, used for recency ordering
    pub created_at: DateTime<Utc>,
    /// Owner, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Shown in the public gallery
    #[serde(default)]
    pub is_public: bool,
    /// Owner opted into community insights
    #[serde(default)]
    pub share_insights: bool,
}

impl DreamEntry {
    /// Does this entry carry the tag?
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Does this entry carry the emotion?
    pub fn has_emotion(&self, emotion: &str) -> bool {
        self.emotions.iter().any(|e| e == emotion)
    }

    /// Is this entry owned by `user_id`?
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }

    /// Counts toward community insights
    pub fn is_shared(&self) -> bool {
        self.is_public && self.share_insights && self.user_id.is_some()
    }
}

/// Caller input for a new entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub share_insights: bool,
}

fn default_public() -> bool {
    true
}

/// Partial update of an entry; absent fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub emotions: Option<Vec<String>>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub share_insights: Option<bool>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.tags.is_none()
            && self.emotions.is_none()
            && self.is_public.is_none()
            && self.share_insights.is_none()
    }
}
