//! Community aggregation
//!
//! Only public entries whose owner opted into sharing count. Each owner is
//! analyzed on their own, then the per-owner top moods and themes are tallied
//! by dreamer, so one prolific dreamer weighs the same as any other.

use std::collections::HashMap;

use crate::core::analyzer::DreamAnalyzer;
use crate::types::{CommunityInsights, CommunityMood, CommunityTheme, DreamAnalysis, DreamEntry, Trend};
use crate::COMMUNITY_TOP_RESULTS;

#[derive(Debug, Default)]
struct MoodTally {
    dreamers: usize,
    increasing: usize,
    decreasing: usize,
}

impl MoodTally {
    fn trend(&self) -> Trend {
        Trend::from_counts(self.increasing, self.decreasing)
    }
}

/// Aggregates analyses across dreamers
#[derive(Debug, Default)]
pub struct CommunityAggregator {
    analyzer: DreamAnalyzer,
}

impl CommunityAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build community insights from every entry in the journal
    pub fn aggregate(&self, entries: &[DreamEntry]) -> CommunityInsights {
        let groups = group_by_owner(entries);
        let total_dreams: usize = groups.iter().map(|(_, dreams)| dreams.len()).sum();

        let analyses: Vec<DreamAnalysis> = groups
            .iter()
            .map(|(_, dreams)| self.analyzer.analyze(dreams))
            .collect();

        let insights = CommunityInsights {
            moods: tally_moods(&analyses),
            themes: tally_themes(&analyses),
            dreamers: groups.len(),
            total_dreams,
        };

        tracing::debug!(
            dreamers = insights.dreamers,
            dreams = insights.total_dreams,
            "community insights aggregated"
        );

        insights
    }
}

/// Shared entries grouped by owner, owners in first-seen order
fn group_by_owner(entries: &[DreamEntry]) -> Vec<(&str, Vec<DreamEntry>)> {
    let mut groups: Vec<(&str, Vec<DreamEntry>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries.iter().filter(|e| e.is_shared()) {
        let Some(owner) = entry.user_id.as_deref() else {
            continue;
        };
        match index.get(owner) {
            Some(&i) => groups[i].1.push(entry.clone()),
            None => {
                index.insert(owner, groups.len());
                groups.push((owner, vec![entry.clone()]));
            }
        }
    }

    groups
}

fn tally_moods(analyses: &[DreamAnalysis]) -> Vec<CommunityMood> {
    let mut order: Vec<(String, MoodTally)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for mood in analyses.iter().flat_map(|a| a.mood_trends.iter()) {
        let i = *index.entry(mood.emotion.clone()).or_insert_with(|| {
            order.push((mood.emotion.clone(), MoodTally::default()));
            order.len() - 1
        });
        let tally = &mut order[i].1;
        tally.dreamers += 1;
        match mood.trend {
            Trend::Increasing => tally.increasing += 1,
            Trend::Decreasing => tally.decreasing += 1,
            Trend::Stable => {}
        }
    }

    let mut moods: Vec<CommunityMood> = order
        .into_iter()
        .map(|(emotion, tally)| CommunityMood {
            trend: tally.trend(),
            dreamers: tally.dreamers,
            emotion,
        })
        .collect();
    moods.sort_by(|a, b| b.dreamers.cmp(&a.dreamers));
    moods.truncate(COMMUNITY_TOP_RESULTS);
    moods
}

fn tally_themes(analyses: &[DreamAnalysis]) -> Vec<CommunityTheme> {
    let mut themes: Vec<CommunityTheme> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for theme in analyses.iter().flat_map(|a| a.recurring_themes.iter()) {
        match index.get(&theme.theme) {
            Some(&i) => themes[i].dreamers += 1,
            None => {
                index.insert(theme.theme.clone(), themes.len());
                themes.push(CommunityTheme {
                    theme: theme.theme.clone(),
                    dreamers: 1,
                });
            }
        }
    }

    themes.sort_by(|a, b| b.dreamers.cmp(&a.dreamers));
    themes.truncate(COMMUNITY_TOP_RESULTS);
    themes
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn shared(id: &str, owner: &str, days_ago: i64, emotions: &[&str], tags: &[&str]) -> DreamEntry {
        DreamEntry {
            id: id.to_string(),
            title: id.to_string(),
            description: "dream".to_string(),
            image_url: None,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            emotions: emotions.iter().map(|s| s.to_string()).collect(),
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap() - Duration::days(days_ago),
            user_id: Some(owner.to_string()),
            is_public: true,
            share_insights: true,
        }
    }

    #[test]
    fn test_no_shared_entries() {
        let mut private = shared("1", "ana", 0, &["joy"], &["sea"]);
        private.is_public = false;
        let mut not_opted = shared("2", "ben", 0, &["joy"], &["sea"]);
        not_opted.share_insights = false;

        let insights = CommunityAggregator::new().aggregate(&[private, not_opted]);

        assert_eq!(insights, CommunityInsights::default());
    }

    #[test]
    fn test_counts_dreamers_not_entries() {
        let entries = vec![
            shared("1", "ana", 0, &["joy"], &["sea"]),
            shared("2", "ana", 1, &["joy"], &["sea"]),
            shared("3", "ana", 2, &["joy"], &["sea"]),
            shared("4", "ben", 0, &["joy"], &["forest"]),
        ];

        let insights = CommunityAggregator::new().aggregate(&entries);

        assert_eq!(insights.dreamers, 2);
        assert_eq!(insights.total_dreams, 4);
        assert_eq!(insights.moods[0].emotion, "joy");
        assert_eq!(insights.moods[0].dreamers, 2);
        assert_eq!(insights.themes.len(), 2);
        assert!(insights.themes.iter().all(|t| t.dreamers == 1));
    }

    #[test]
    fn test_majority_trend() {
        // ana: fear on the newest of two -> increasing
        // ben: fear on the newest of two -> increasing
        // cid: fear on the oldest of two -> decreasing
        let entries = vec![
            shared("a1", "ana", 0, &["fear"], &[]),
            shared("a2", "ana", 1, &["calm"], &[]),
            shared("b1", "ben", 0, &["fear"], &[]),
            shared("b2", "ben", 1, &["calm"], &[]),
            shared("c1", "cid", 0, &["calm"], &[]),
            shared("c2", "cid", 1, &["fear"], &[]),
        ];

        let insights = CommunityAggregator::new().aggregate(&entries);
        let fear = insights.moods.iter().find(|m| m.emotion == "fear").unwrap();

        assert_eq!(fear.dreamers, 3);
        assert_eq!(fear.trend, Trend::Increasing);
    }

    #[test]
    fn test_unowned_entries_are_ignored() {
        let mut anonymous = shared("1", "x", 0, &["joy"], &[]);
        anonymous.user_id = None;

        let insights = CommunityAggregator::new().aggregate(&[anonymous]);

        assert_eq!(insights.dreamers, 0);
        assert_eq!(insights.total_dreams, 0);
    }
}
