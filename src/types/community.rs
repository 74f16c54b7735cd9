//! Community-wide aggregates over opted-in dreamers

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::Trend;

/// An emotion ranked by how many dreamers have it in their top moods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityMood {
    pub emotion: String,
    /// Dreamers with this emotion among their top moods
    pub dreamers: usize,
    /// Majority direction across those dreamers
    pub trend: Trend,
}

/// A theme ranked by how many dreamers have it in their top themes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityTheme {
    pub theme: String,
    pub dreamers: usize,
}

/// Anonymized community rankings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityInsights {
    pub moods: Vec<CommunityMood>,
    pub themes: Vec<CommunityTheme>,
    /// Distinct owners contributing
    pub dreamers: usize,
    /// Entries that were eligible
    pub total_dreams: usize,
}

impl CommunityInsights {
    /// Format for terminal display
    pub fn to_terminal_string(&self, color: bool) -> String {
        if self.dreamers == 0 {
            return "No dreamers are sharing insights yet.".to_string();
        }

        let mut out = format!(
            "{} dreamers sharing {} dreams\n",
            self.dreamers, self.total_dreams
        );

        let title = "Community mood trends";
        out.push_str(&if color { title.bold().magenta().to_string() } else { title.to_string() });
        out.push('\n');
        for mood in &self.moods {
            let line = format!("  {:<14} {:>3} dreamers  {}", mood.emotion, mood.dreamers, mood.trend.symbol());
            if color {
                out.push_str(&line.color(mood.trend.color()).to_string());
            } else {
                out.push_str(&line);
            }
            out.push('\n');
        }

        let title = "Popular dream themes";
        out.push_str(&if color { title.bold().magenta().to_string() } else { title.to_string() });
        out.push('\n');
        for theme in &self.themes {
            out.push_str(&format!("  {:<14} {:>3} dreamers\n", theme.theme, theme.dreamers));
        }

        out
    }
}
