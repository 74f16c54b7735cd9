//! Journal: turns drafts into entries
//!
//! Validation happens here, upstream of storage and analysis:
//! - title and description are required
//! - tags and emotions are trimmed and collapsed (first occurrence wins)
//! - emotions must come from the journal palette

use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::types::{DreamDraft, DreamEntry, EntryPatch, EntryReason};

/// Emotions a dreamer can pick
pub const EMOTION_PALETTE: &[&str] = &[
    "joy", "sadness", "fear", "anger", "surprise", "love", "peace", "anxiety", "confusion",
    "excitement", "wonder", "surreal", "nostalgia", "freedom", "curiosity", "determination",
];

/// Longest accepted tag, in characters
pub const MAX_TAG_CHARS: usize = 48;

lazy_static! {
    // Separators in free-text tag input: commas, hashes, and the space around them
    static ref RE_TAG_SEPARATOR: Regex = Regex::new(r"\s*[,#;]\s*").unwrap();
    // Inner whitespace runs collapse to one space
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Split free-text input like `"flying, mountains #freedom"` into tags
pub fn parse_tag_list(text: &str) -> Vec<String> {
    let raw: Vec<String> = RE_TAG_SEPARATOR.split(text).map(str::to_string).collect();
    normalize_labels(&raw)
}

/// Trim, collapse inner whitespace, drop blanks and duplicates
pub fn normalize_labels(labels: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        let label = RE_WHITESPACE.replace_all(label.trim(), " ").into_owned();
        if !label.is_empty() && !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

/// Is the emotion in the palette? Case-insensitive.
pub fn is_known_emotion(emotion: &str) -> bool {
    EMOTION_PALETTE.iter().any(|e| e.eq_ignore_ascii_case(emotion))
}

/// Build a new entry from a draft, stamped at `now`
pub fn record(draft: DreamDraft, now: DateTime<Utc>) -> Result<DreamEntry, EntryReason> {
    let title = required(&draft.title, EntryReason::R101_TITLE_MISSING)?;
    let description = required(&draft.description, EntryReason::R101_DESCRIPTION_MISSING)?;
    let tags = checked_tags(&draft.tags)?;
    let emotions = checked_emotions(&draft.emotions)?;

    Ok(DreamEntry {
        id: Uuid::new_v4().to_string(),
        title,
        description,
        image_url: draft.image_url.filter(|u| !u.trim().is_empty()),
        tags,
        emotions,
        created_at: now,
        user_id: draft.user_id.filter(|u| !u.trim().is_empty()),
        is_public: draft.is_public,
        share_insights: draft.share_insights,
    })
}

/// Apply a patch. Id, creation time and owner never change.
pub fn apply_patch(entry: &DreamEntry, patch: EntryPatch) -> Result<DreamEntry, EntryReason> {
    if patch.is_empty() {
        return Err(EntryReason::R103_PATCH_EMPTY);
    }

    let mut updated = entry.clone();
    if let Some(title) = patch.title {
        updated.title = required(&title, EntryReason::R101_TITLE_MISSING)?;
    }
    if let Some(description) = patch.description {
        updated.description = required(&description, EntryReason::R101_DESCRIPTION_MISSING)?;
    }
    if let Some(image_url) = patch.image_url {
        updated.image_url = Some(image_url).filter(|u| !u.trim().is_empty());
    }
    if let Some(tags) = patch.tags {
        updated.tags = checked_tags(&tags)?;
    }
    if let Some(emotions) = patch.emotions {
        updated.emotions = checked_emotions(&emotions)?;
    }
    if let Some(is_public) = patch.is_public {
        updated.is_public = is_public;
    }
    if let Some(share_insights) = patch.share_insights {
        updated.share_insights = share_insights;
    }
    Ok(updated)
}

fn required(text: &str, reason: EntryReason) -> Result<String, EntryReason> {
    let text = text.trim();
    if text.is_empty() {
        Err(reason)
    } else {
        Ok(text.to_string())
    }
}

fn checked_tags(tags: &[String]) -> Result<Vec<String>, EntryReason> {
    let tags = normalize_labels(tags);
    if tags.iter().any(|t| t.chars().count() > MAX_TAG_CHARS) {
        return Err(EntryReason::R102_TAG_TOO_LONG);
    }
    Ok(tags)
}

fn checked_emotions(emotions: &[String]) -> Result<Vec<String>, EntryReason> {
    let emotions: Vec<String> = normalize_labels(emotions)
        .into_iter()
        .map(|e| e.to_lowercase())
        .collect();
    if !emotions.iter().all(|e| is_known_emotion(e)) {
        return Err(EntryReason::R102_EMOTION_UNKNOWN);
    }
    // Lowercasing can merge "Joy" and "joy"
    Ok(normalize_labels(&emotions))
}

/// The three dreams a fresh journal starts with
pub fn sample_entries() -> Vec<DreamEntry> {
    let sample = |id: &str,
                  title: &str,
                  description: &str,
                  image_url: &str,
                  tags: &[&str],
                  emotions: &[&str],
                  created_at: DateTime<Utc>| DreamEntry {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        image_url: Some(image_url.to_string()),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        emotions: emotions.iter().map(|s| s.to_string()).collect(),
        created_at,
        user_id: None,
        is_public: true,
        share_insights: false,
    };

    vec![
        sample(
            "1",
            "Flying Over Mountains",
            "I dreamt I was flying over purple mountains, feeling completely free and weightless. \
             The sky was filled with stars even though it was daytime.",
            "https://images.pexels.com/photos/4577790/pexels-photo-4577790.jpeg",
            &["flying", "mountains", "freedom"],
            &["joy", "freedom", "peace"],
            Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
        ),
        sample(
            "2",
            "Underwater City",
            "I discovered a city beneath the ocean where people lived in bubble-like structures. \
             The buildings were made of coral and glowed with bioluminescent light.",
            "https://images.pexels.com/photos/7021429/pexels-photo-7021429.jpeg",
            &["underwater", "city", "exploration"],
            &["wonder", "curiosity", "surreal"],
            Utc.with_ymd_and_hms(2025, 1, 10, 15, 30, 0).unwrap(),
        ),
        sample(
            "3",
            "Time Loop",
            "I was trapped in a time loop, experiencing the same day over and over. \
             Each time I noticed different details that helped me understand how to break free.",
            "https://images.pexels.com/photos/1097930/pexels-photo-1097930.jpeg",
            &["time", "loop", "puzzle"],
            &["confusion", "determination", "anxiety"],
            Utc.with_ymd_and_hms(2025, 1, 5, 9, 45, 0).unwrap(),
        ),
    ]
}

// =============================================================================
// TESTS
// =============================================================================
