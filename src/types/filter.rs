//! Gallery filter and dream categories

use serde::{Deserialize, Serialize};

/// Broad category matched against tags and emotions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DreamCategory {
    Surreal,
    Adventure,
    Emotional,
    Mystical,
    Nature,
    Urban,
}

impl DreamCategory {
    pub const ALL: [DreamCategory; 6] = [
        DreamCategory::Surreal,
        DreamCategory::Adventure,
        DreamCategory::Emotional,
        DreamCategory::Mystical,
        DreamCategory::Nature,
        DreamCategory::Urban,
    ];

    /// Lowercase tags/emotions belonging to this category
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            DreamCategory::Surreal => &["surreal", "bizarre", "strange", "weird", "abstract"],
            DreamCategory::Adventure => &["exploration", "journey", "quest", "discovery", "adventure"],
            DreamCategory::Emotional => &["joy", "sadness", "fear", "anger", "love", "peace"],
            DreamCategory::Mystical => &["magic", "spiritual", "supernatural", "cosmic", "divine"],
            DreamCategory::Nature => &["mountains", "ocean", "forest", "animals", "landscape"],
            DreamCategory::Urban => &["city", "buildings", "streets", "modern", "urban"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DreamCategory::Surreal => "Surreal",
            DreamCategory::Adventure => "Adventure",
            DreamCategory::Emotional => "Emotional",
            DreamCategory::Mystical => "Mystical",
            DreamCategory::Nature => "Nature",
            DreamCategory::Urban => "Urban",
        }
    }

    /// Case-insensitive lookup by name
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for DreamCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Gallery query. Empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryFilter {
    /// Substring of title or description, case-insensitive
    pub search: Option<String>,
    /// Every one of these tags must be present
    pub tags: Vec<String>,
    /// Any one of these categories must match
    pub categories: Vec<DreamCategory>,
    /// Also show this user's private dreams
    pub viewer: Option<String>,
}
