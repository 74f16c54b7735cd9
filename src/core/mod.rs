//! Core modules for Dream Catcher

pub mod analyzer;
pub mod api;
pub mod cache;
pub mod community;
pub mod gallery;
pub mod journal;
pub mod repository;

pub use analyzer::{analyze, DreamAnalyzer};
pub use api::{create_router, run_server};
pub use cache::{fingerprint, AnalysisCache};
pub use community::CommunityAggregator;
pub use journal::{parse_tag_list, record, sample_entries};
pub use repository::{DreamRepository, InMemoryRepository, JsonFileRepository};
