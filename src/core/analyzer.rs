//! Dream Pattern Analyzer
//!
//! Read-only reducer over a list of journal entries:
//! - emotion frequencies with a recency trend
//! - tag frequencies with co-occurring tags
//! - up to three narrative insights
//!
//! Trend: entries sorted newest first and split at `len / 2`. The first half
//! is "recent", the rest (including the odd extra entry) is "older". An
//! emotion is increasing when more recent entries carry it than older ones.

use std::collections::{HashMap, HashSet};

use crate::types::{DreamAnalysis, DreamEntry, Insight, InsightKind, MoodTrend, ThemeSummary, Trend};
use crate::{INSIGHT_RELATED_TAGS, TOP_RESULTS};

/// Analyze entries with the default limits
pub fn analyze(entries: &[DreamEntry]) -> DreamAnalysis {
    DreamAnalyzer::new().analyze(entries)
}

/// Pattern analyzer
#[derive(Debug, Clone)]
pub struct DreamAnalyzer {
    /// Mood trends and themes kept
    top_results: usize,
    /// Related tags named in the theme insight
    insight_related_tags: usize,
}

impl Default for DreamAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DreamAnalyzer {
    /// Create analyzer with default limits (top 5, two related tags)
    pub fn new() -> Self {
        Self {
            top_results: TOP_RESULTS,
            insight_related_tags: INSIGHT_RELATED_TAGS,
        }
    }

    /// Create analyzer keeping `top_results` moods and themes
    pub fn with_top_results(top_results: usize) -> Self {
        Self {
            top_results,
            ..Self::new()
        }
    }

    /// Analyze a list of entries. Total over any input, never mutates it.
    pub fn analyze(&self, entries: &[DreamEntry]) -> DreamAnalysis {
        let mut sorted: Vec<&DreamEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let moods = self.mood_trends(&sorted);
        let themes = self.recurring_themes(&sorted);
        let insights = self.insights(&moods, &themes);

        tracing::debug!(
            entries = entries.len(),
            emotions = moods.len(),
            tags = themes.len(),
            insights = insights.len(),
            "dream analysis computed"
        );

        DreamAnalysis {
            insights,
            mood_trends: moods.into_iter().take(self.top_results).collect(),
            recurring_themes: themes.into_iter().take(self.top_results).collect(),
        }
    }

    /// All mood trends, most frequent first (untruncated)
    fn mood_trends(&self, sorted: &[&DreamEntry]) -> Vec<MoodTrend> {
        let mid = sorted.len() / 2;
        let (recent, older) = sorted.split_at(mid);

        let counts = count_distinct(sorted, |entry| &entry.emotions);

        let mut moods: Vec<MoodTrend> = counts
            .into_iter()
            .map(|(emotion, frequency)| {
                let recent_count = recent.iter().filter(|e| e.has_emotion(emotion)).count();
                let older_count = older.iter().filter(|e| e.has_emotion(emotion)).count();
                MoodTrend {
                    emotion: emotion.to_string(),
                    frequency,
                    trend: Trend::from_counts(recent_count, older_count),
                }
            })
            .collect();

        // Stable: ties keep encounter order
        moods.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        moods
    }

    /// All themes with related tags, most frequent first (untruncated)
    fn recurring_themes(&self, sorted: &[&DreamEntry]) -> Vec<ThemeSummary> {
        let counts = count_distinct(sorted, |entry| &entry.tags);

        let mut relations: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut seen_pairs: HashSet<(&str, &str)> = HashSet::new();
        for entry in sorted {
            let tags = distinct(&entry.tags);
            for &tag in &tags {
                for &other in &tags {
                    if tag != other && seen_pairs.insert((tag, other)) {
                        relations.entry(tag).or_default().push(other);
                    }
                }
            }
        }

        let mut themes: Vec<ThemeSummary> = counts
            .into_iter()
            .map(|(tag, frequency)| ThemeSummary {
                theme: tag.to_string(),
                frequency,
                related_tags: relations
                    .get(tag)
                    .map(|related| related.iter().map(|t| t.to_string()).collect())
                    .unwrap_or_default(),
            })
            .collect();

        themes.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        themes
    }

    /// Dominant emotion, recurring theme, and the first non-stable mood
    fn insights(&self, moods: &[MoodTrend], themes: &[ThemeSummary]) -> Vec<Insight> {
        let mut insights = Vec::new();

        if let Some(dominant) = moods.first() {
            insights.push(Insight {
                kind: InsightKind::Mood,
                title: "Dominant Emotion".to_string(),
                description: format!(
                    "Your dreams frequently express {}, appearing in {} dreams.",
                    dominant.emotion, dominant.frequency
                ),
                value: Some(dominant.frequency),
                trend: Some(dominant.trend),
            });
        }

        if let Some(theme) = themes.first() {
            let related: Vec<&str> = theme
                .related_tags
                .iter()
                .take(self.insight_related_tags)
                .map(String::as_str)
                .collect();
            let description = if related.is_empty() {
                format!("\"{}\" is a prominent theme in your dreams.", theme.theme)
            } else {
                format!(
                    "\"{}\" is a prominent theme in your dreams, often connected with {}.",
                    theme.theme,
                    related.join(" and ")
                )
            };
            insights.push(Insight {
                kind: InsightKind::Theme,
                title: "Recurring Theme".to_string(),
                description,
                value: Some(theme.frequency),
                trend: None,
            });
        }

        // First non-stable mood in frequency order, not the largest swing
        if let Some(shift) = moods.iter().find(|m| !m.trend.is_stable()) {
            insights.push(Insight {
                kind: InsightKind::Pattern,
                title: "Emotional Pattern".to_string(),
                description: format!(
                    "Your dreams show a {} presence of {}.",
                    shift.trend, shift.emotion
                ),
                value: None,
                trend: Some(shift.trend),
            });
        }

        insights
    }
}

/// Values of a list field in first-seen order, duplicates collapsed
fn distinct(values: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(String::as_str)
        .filter(|v| seen.insert(*v))
        .collect()
}

/// Per value, the number of entries containing it, in encounter order
fn count_distinct<'a, F>(sorted: &[&'a DreamEntry], field: F) -> Vec<(&'a str, usize)>
where
    F: Fn(&'a DreamEntry) -> &'a Vec<String>,
{
    let mut order: Vec<(&'a str, usize)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for &entry in sorted {
        for value in distinct(field(entry)) {
            match index.get(value) {
                Some(&i) => order[i].1 += 1,
                None => {
                    index.insert(value, order.len());
                    order.push((value, 1));
                }
            }
        }
    }

    order
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn entry(id: &str, days_ago: i64, emotions: &[&str], tags: &[&str]) -> DreamEntry {
        let base = Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap();
        DreamEntry {
            id: id.to_string(),
            title: format!("Dream {}", id),
            description: "A dream".to_string(),
            image_url: None,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            emotions: emotions.iter().map(|s| s.to_string()).collect(),
            created_at: base - Duration::days(days_ago),
            user_id: None,
            is_public: true,
            share_insights: false,
        }
    }

    #[test]
    fn test_empty_input() {
        let analysis = analyze(&[]);
        assert!(analysis.mood_trends.is_empty());
        assert!(analysis.recurring_themes.is_empty());
        assert!(analysis.insights.is_empty());
    }

    #[test]
    fn test_two_entries_split_evenly_are_stable() {
        let entries = vec![
            entry("1", 0, &["joy"], &["flying"]),
            entry("2", 1, &["joy"], &["flying"]),
        ];
        let analysis = analyze(&entries);

        assert_eq!(
            analysis.mood_trends,
            vec![MoodTrend { emotion: "joy".to_string(), frequency: 2, trend: Trend::Stable }]
        );
        // No pattern insight when everything is stable
        assert_eq!(analysis.insights.len(), 2);
    }

    #[test]
    fn test_single_entry_goes_to_older_half() {
        let entries = vec![entry("1", 0, &["fear"], &[])];
        let analysis = analyze(&entries);

        // recent is empty, older holds the entry: 0 < 1
        assert_eq!(analysis.mood_trends[0].trend, Trend::Decreasing);
    }

    #[test]
    fn test_odd_length_extra_entry_is_older() {
        // newest first: 1 | 2, 3
        let entries = vec![
            entry("3", 2, &[], &["underwater"]),
            entry("1", 0, &["wonder"], &["underwater"]),
            entry("2", 1, &[], &["underwater"]),
        ];
        let analysis = analyze(&entries);

        assert_eq!(analysis.mood_trends[0].trend, Trend::Increasing);
        assert_eq!(analysis.recurring_themes[0].frequency, 3);
    }

    #[test]
    fn test_duplicates_within_entry_collapse() {
        let entries = vec![entry("1", 0, &["joy", "joy"], &["sea", "sea", "sky"])];
        let analysis = analyze(&entries);

        assert_eq!(analysis.mood_trends[0].frequency, 1);
        assert_eq!(analysis.recurring_themes[0].frequency, 1);
        assert_eq!(analysis.recurring_themes[0].related_tags, vec!["sky".to_string()]);
    }

    #[test]
    fn test_ties_keep_newest_first_encounter_order() {
        let entries = vec![
            entry("old", 5, &["anger"], &[]),
            entry("new", 0, &["peace"], &[]),
        ];
        let analysis = analyze(&entries);

        let order: Vec<&str> = analysis.mood_trends.iter().map(|m| m.emotion.as_str()).collect();
        assert_eq!(order, vec!["peace", "anger"]);
    }

    #[test]
    fn test_truncates_to_top_results() {
        let entries = vec![entry(
            "1",
            0,
            &["a", "b", "c", "d", "e", "f", "g"],
            &["t1", "t2", "t3", "t4", "t5", "t6"],
        )];
        let analysis = analyze(&entries);

        assert_eq!(analysis.mood_trends.len(), TOP_RESULTS);
        assert_eq!(analysis.recurring_themes.len(), TOP_RESULTS);
    }

    #[test]
    fn test_custom_top_results() {
        let entries = vec![entry("1", 0, &["a", "b", "c"], &["x", "y"])];
        let analysis = DreamAnalyzer::with_top_results(1).analyze(&entries);

        assert_eq!(analysis.mood_trends.len(), 1);
        assert_eq!(analysis.recurring_themes.len(), 1);
    }

    #[test]
    fn test_theme_insight_without_related_tags() {
        let entries = vec![entry("1", 0, &[], &["alone"])];
        let analysis = analyze(&entries);

        assert_eq!(analysis.insights.len(), 1);
        assert_eq!(
            analysis.insights[0].description,
            "\"alone\" is a prominent theme in your dreams."
        );
    }

    #[test]
    fn test_pattern_uses_first_non_stable_mood() {
        // newest first: n1, n2 | o1, o2
        let entries = vec![
            entry("n1", 0, &["calm", "joy"], &[]),
            entry("n2", 1, &["calm", "joy"], &[]),
            entry("o1", 2, &["calm", "fear"], &[]),
            entry("o2", 3, &["calm", "fear", "joy"], &[]),
        ];
        let analysis = analyze(&entries);

        // calm 4 (stable), joy 3 (2 vs 1 increasing), fear 2 (0 vs 2 decreasing)
        let pattern = analysis
            .insights
            .iter()
            .find(|i| i.kind == InsightKind::Pattern)
            .unwrap();
        assert_eq!(pattern.trend, Some(Trend::Increasing));
        assert_eq!(pattern.description, "Your dreams show a increasing presence of joy.");
    }
}
