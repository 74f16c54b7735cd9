//! Dream Catcher: dream journal core
//!
//! Pattern analysis over journal entries, community insights, gallery
//! filtering, and the storage seam the CLI and HTTP API build on.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{Error, Result};

// =============================================================================
// ANALYSIS LIMITS
// =============================================================================

/// Number of mood trends and themes kept in an analysis
pub const TOP_RESULTS: usize = 5;

/// Related tags named in the "Recurring Theme" insight
pub const INSIGHT_RELATED_TAGS: usize = 2;

/// Community rankings length
pub const COMMUNITY_TOP_RESULTS: usize = 5;

// =============================================================================
// SERVICE DEFAULTS
// =============================================================================

/// Default HTTP bind address
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default JSON store location
pub const DEFAULT_STORE_PATH: &str = "./dreams.json";

/// Analyses kept by the cache before it is flushed
pub const ANALYSIS_CACHE_CAPACITY: usize = 64;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.1.0";
