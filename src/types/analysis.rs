//! Output structures of the pattern analyzer

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::Trend;

/// Frequency and direction of one emotion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodTrend {
    pub emotion: String,
    /// Number of entries containing the emotion
    pub frequency: usize,
    pub trend: Trend,
}

/// Frequency of one tag and the tags it appeared alongside
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSummary {
    pub theme: String,
    /// Number of entries carrying the tag
    pub frequency: usize,
    /// Tags sharing at least one entry with `theme`, never `theme` itself
    pub related_tags: Vec<String>,
}

/// What an insight talks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Mood,
    Theme,
    Pattern,
}

/// Narrative summary line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

/// Complete result of one analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamAnalysis {
    pub insights: Vec<Insight>,
    pub mood_trends: Vec<MoodTrend>,
    pub recurring_themes: Vec<ThemeSummary>,
}

impl DreamAnalysis {
    pub fn is_empty(&self) -> bool {
        self.insights.is_empty() && self.mood_trends.is_empty() && self.recurring_themes.is_empty()
    }

    /// Format for terminal display
    pub fn to_terminal_string(&self, color: bool) -> String {
        if self.is_empty() {
            return "No dreams to analyze yet.".to_string();
        }

        let mut out = String::new();

        out.push_str(&heading("Mood trends", color));
        for mood in &self.mood_trends {
            let line = format!("  {:<14} {:>3}  {} {}", mood.emotion, mood.frequency, mood.trend.symbol(), mood.trend);
            out.push_str(&paint(&line, mood.trend, color));
            out.push('\n');
        }

        out.push_str(&heading("Recurring themes", color));
        for theme in &self.recurring_themes {
            out.push_str(&format!("  {:<14} {:>3}", theme.theme, theme.frequency));
            if !theme.related_tags.is_empty() {
                out.push_str(&format!("  (with {})", theme.related_tags.join(", ")));
            }
            out.push('\n');
        }

        out.push_str(&heading("Insights", color));
        for insight in &self.insights {
            let title = if color { insight.title.bold().to_string() } else { insight.title.clone() };
            out.push_str(&format!("  {}: {}\n", title, insight.description));
        }

        out
    }
}

fn heading(text: &str, color: bool) -> String {
    if color {
        format!("{}\n", text.bold().magenta())
    } else {
        format!("{}\n", text)
    }
}

fn paint(line: &str, trend: Trend, color: bool) -> String {
    if color {
        line.color(trend.color()).to_string()
    } else {
        line.to_string()
    }
}
