//! Reason codes for rejected journal entries

use serde::{Deserialize, Serialize};

/// Why a draft or patch was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum EntryReason {
    // =========================================================================
    // R101: Required text
    // =========================================================================
    /// Title empty or whitespace
    R101_TITLE_MISSING,
    /// Description empty or whitespace
    R101_DESCRIPTION_MISSING,

    // =========================================================================
    // R102: Labels
    // =========================================================================
    /// Emotion outside the journal palette
    R102_EMOTION_UNKNOWN,
    /// Tag longer than the allowed length
    R102_TAG_TOO_LONG,

    // =========================================================================
    // R103: Patches
    // =========================================================================
    /// Patch carries no field
    R103_PATCH_EMPTY,
}

impl EntryReason {
    /// Get the code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_TITLE_MISSING => "R101_TITLE_MISSING",
            Self::R101_DESCRIPTION_MISSING => "R101_DESCRIPTION_MISSING",
            Self::R102_EMOTION_UNKNOWN => "R102_EMOTION_UNKNOWN",
            Self::R102_TAG_TOO_LONG => "R102_TAG_TOO_LONG",
            Self::R103_PATCH_EMPTY => "R103_PATCH_EMPTY",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_TITLE_MISSING => "Please provide a title for your dream",
            Self::R101_DESCRIPTION_MISSING => "Please provide a description of your dream",
            Self::R102_EMOTION_UNKNOWN => "Emotion is not in the journal palette",
            Self::R102_TAG_TOO_LONG => "Tag exceeds the maximum length",
            Self::R103_PATCH_EMPTY => "Nothing to update",
        }
    }
}

impl std::fmt::Display for EntryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
