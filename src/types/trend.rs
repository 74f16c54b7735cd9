//! Trend direction of an emotion over time

use colored::Color;
use serde::{Deserialize, Serialize};

/// Direction of an emotion's presence, recent half vs older half of a journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// More present in the recent half
    Increasing,
    /// Less present in the recent half
    Decreasing,
    /// Equally present in both halves
    Stable,
}

impl Trend {
    /// Classify by comparing recent vs older counts
    pub fn from_counts(recent: usize, older: usize) -> Self {
        if recent > older {
            Trend::Increasing
        } else if recent < older {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }

    pub fn is_stable(&self) -> bool {
        *self == Trend::Stable
    }

    /// Terminal color for display
    pub fn color(&self) -> Color {
        match self {
            Trend::Increasing => Color::Green,
            Trend::Decreasing => Color::Red,
            Trend::Stable => Color::BrightBlack,
        }
    }

    /// Arrow for display
    pub fn symbol(&self) -> &'static str {
        match self {
            Trend::Increasing => "↑",
            Trend::Decreasing => "↓",
            Trend::Stable => "–",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        };
        write!(f, "{}", name)
    }
}
