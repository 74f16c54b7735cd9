//! Core types for Dream Catcher

mod analysis;
mod community;
mod entry;
mod filter;
mod reason;
mod trend;

pub use analysis::{DreamAnalysis, Insight, InsightKind, MoodTrend, ThemeSummary};
pub use community::{CommunityInsights, CommunityMood, CommunityTheme};
pub use entry::{DreamDraft, DreamEntry, EntryPatch};
pub use filter::{DreamCategory, GalleryFilter};
pub use reason::EntryReason;
pub use trend::Trend;
