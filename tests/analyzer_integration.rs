//! Integration tests for the pattern analyzer
//!
//! Properties checked over a varied journal:
//! - every output label comes from the input, and nothing is lost except by truncation
//! - frequencies count entries, not occurrences
//! - lists are sorted by frequency
//! - related tags are exactly the co-occurring tags
//! - the analyzer is deterministic and does not touch its input

use std::collections::{BTreeSet, HashSet};

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use dreamcatcher::core::{analyze, sample_entries, DreamAnalyzer};
use dreamcatcher::types::{DreamEntry, InsightKind, MoodTrend, Trend};

fn dream(id: &str, days_ago: i64, emotions: &[&str], tags: &[&str]) -> DreamEntry {
    DreamEntry {
        id: id.to_string(),
        title: format!("Dream {}", id),
        description: "Something happened".to_string(),
        image_url: None,
        tags: tags.iter().map(|s| s.to_string()).collect(),
        emotions: emotions.iter().map(|s| s.to_string()).collect(),
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 7, 30, 0).unwrap() - Duration::days(days_ago),
        user_id: Some("dreamer".to_string()),
        is_public: true,
        share_insights: false,
    }
}

fn journal() -> Vec<DreamEntry> {
    vec![
        dream("a", 3, &["joy", "wonder"], &["flying", "sky"]),
        dream("b", 0, &["fear"], &["falling", "sky", "night"]),
        dream("c", 7, &["joy"], &["flying", "ocean"]),
        dream("d", 1, &["fear", "anxiety", "fear"], &["night", "chase"]),
        dream("e", 12, &["peace"], &["ocean"]),
        dream("f", 5, &["wonder", "joy"], &["sky"]),
        dream("g", 2, &[], &[]),
    ]
}

fn distinct_labels(entries: &[DreamEntry], pick: fn(&DreamEntry) -> &Vec<String>) -> BTreeSet<String> {
    entries.iter().flat_map(|e| pick(e).iter().cloned()).collect()
}

#[test]
fn test_labels_come_from_input_and_none_are_lost() {
    let entries = journal();
    let analysis = DreamAnalyzer::with_top_results(usize::MAX).analyze(&entries);

    let emotions: BTreeSet<String> = analysis.mood_trends.iter().map(|m| m.emotion.clone()).collect();
    let tags: BTreeSet<String> = analysis.recurring_themes.iter().map(|t| t.theme.clone()).collect();

    assert_eq!(emotions, distinct_labels(&entries, |e| &e.emotions));
    assert_eq!(tags, distinct_labels(&entries, |e| &e.tags));
}

#[test]
fn test_frequency_counts_entries() {
    let entries = journal();
    let analysis = DreamAnalyzer::with_top_results(usize::MAX).analyze(&entries);

    for mood in &analysis.mood_trends {
        let expected = entries.iter().filter(|e| e.has_emotion(&mood.emotion)).count();
        assert_eq!(mood.frequency, expected, "emotion {}", mood.emotion);
    }
    for theme in &analysis.recurring_themes {
        let expected = entries.iter().filter(|e| e.has_tag(&theme.theme)).count();
        assert_eq!(theme.frequency, expected, "tag {}", theme.theme);
    }

    // "fear" twice in one entry still counts once for that entry
    let fear = analysis.mood_trends.iter().find(|m| m.emotion == "fear").unwrap();
    assert_eq!(fear.frequency, 2);
}

#[test]
fn test_sorted_by_frequency() {
    let analysis = analyze(&journal());

    assert!(analysis.mood_trends.windows(2).all(|w| w[0].frequency >= w[1].frequency));
    assert!(analysis.recurring_themes.windows(2).all(|w| w[0].frequency >= w[1].frequency));
    assert!(analysis.mood_trends.len() <= 5);
    assert!(analysis.recurring_themes.len() <= 5);
}

#[test]
fn test_related_tags_are_exact_co_occurrences() {
    let entries = journal();
    let analysis = DreamAnalyzer::with_top_results(usize::MAX).analyze(&entries);

    for theme in &analysis.recurring_themes {
        let related: HashSet<&str> = theme.related_tags.iter().map(String::as_str).collect();
        assert!(!related.contains(theme.theme.as_str()));
        assert_eq!(related.len(), theme.related_tags.len(), "no duplicates");

        let expected: HashSet<&str> = entries
            .iter()
            .filter(|e| e.has_tag(&theme.theme))
            .flat_map(|e| e.tags.iter().map(String::as_str))
            .filter(|t| *t != theme.theme)
            .collect();
        assert_eq!(related, expected, "tag {}", theme.theme);
    }
}

#[test]
fn test_idempotent_and_input_untouched() {
    let entries = journal();
    let before = entries.clone();

    let first = analyze(&entries);
    let second = analyze(&entries);

    assert_eq!(first, second);
    assert_eq!(entries, before);
}

#[test]
fn test_input_order_does_not_matter() {
    let entries = journal();
    let mut reversed = entries.clone();
    reversed.reverse();

    assert_eq!(analyze(&entries), analyze(&reversed));
}

#[test]
fn test_two_entries_one_per_half() {
    let entries = vec![
        dream("1", 0, &["joy"], &["flying"]),
        dream("2", 1, &["joy"], &["flying"]),
    ];

    assert_eq!(
        analyze(&entries).mood_trends,
        vec![MoodTrend {
            emotion: "joy".to_string(),
            frequency: 2,
            trend: Trend::Stable,
        }]
    );
}

#[test]
fn test_recent_only_emotion_is_increasing() {
    // three entries, all tagged underwater; recent half is the newest one
    let three = vec![
        dream("1", 0, &["wonder"], &["underwater"]),
        dream("2", 1, &[], &["underwater"]),
        dream("3", 2, &[], &["underwater"]),
    ];
    assert_eq!(analyze(&three).mood_trends[0].trend, Trend::Increasing);

    // four entries: present in both of the two most recent, absent from the older half
    let four = vec![
        dream("1", 0, &["wonder"], &["underwater"]),
        dream("2", 1, &["wonder"], &["underwater"]),
        dream("3", 2, &[], &["underwater"]),
        dream("4", 3, &[], &["underwater"]),
    ];
    let analysis = analyze(&four);
    assert_eq!(analysis.mood_trends[0].trend, Trend::Increasing);
    assert_eq!(analysis.recurring_themes[0].frequency, 4);
}

#[test]
fn test_journal_trends() {
    let analysis = analyze(&journal());

    // newest first: b d g | a f c e  (mid = 3)
    let trend_of = |emotion: &str| {
        analysis
            .mood_trends
            .iter()
            .find(|m| m.emotion == emotion)
            .map(|m| m.trend)
    };
    assert_eq!(trend_of("fear"), Some(Trend::Increasing));
    assert_eq!(trend_of("joy"), Some(Trend::Decreasing));
    assert_eq!(trend_of("wonder"), Some(Trend::Decreasing));
}

#[test]
fn test_insights_for_sample_journal() {
    let analysis = analyze(&sample_entries());

    // nine emotions tie at one; the newest dream's come first
    let emotions: Vec<&str> = analysis.mood_trends.iter().map(|m| m.emotion.as_str()).collect();
    assert_eq!(emotions, vec!["joy", "freedom", "peace", "wonder", "curiosity"]);

    let kinds: Vec<InsightKind> = analysis.insights.iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec![InsightKind::Mood, InsightKind::Theme, InsightKind::Pattern]);

    assert_eq!(
        analysis.insights[0].description,
        "Your dreams frequently express joy, appearing in 1 dreams."
    );
    assert_eq!(
        analysis.insights[1].description,
        "\"flying\" is a prominent theme in your dreams, often connected with mountains and freedom."
    );
    // recent half is only the newest dream, so joy moved up
    assert_eq!(
        analysis.insights[2].description,
        "Your dreams show a increasing presence of joy."
    );
}

#[test]
fn test_missing_lists_deserialize_empty() {
    let json = r#"[{"id":"x","title":"T","description":"D","createdAt":"2025-01-01T00:00:00Z"}]"#;
    let entries: Vec<DreamEntry> = serde_json::from_str(json).unwrap();

    assert!(entries[0].tags.is_empty());
    assert!(entries[0].emotions.is_empty());
    assert!(!entries[0].is_public);

    let analysis = analyze(&entries);
    assert!(analysis.is_empty());
}

#[test]
fn test_pattern_found_below_the_top_five() {
    // five moods in both halves stay stable; fear only in the older half ranks sixth
    let stable = ["joy", "peace", "wonder", "love", "curiosity"];
    let mut older = stable.to_vec();
    older.push("fear");
    let entries = vec![dream("new", 0, &stable, &[]), dream("old", 1, &older, &[])];

    let analysis = analyze(&entries);

    assert_eq!(analysis.mood_trends.len(), 5);
    assert!(analysis.mood_trends.iter().all(|m| m.trend == Trend::Stable));
    assert!(analysis.mood_trends.iter().all(|m| m.emotion != "fear"));

    let pattern = analysis
        .insights
        .iter()
        .find(|i| i.kind == InsightKind::Pattern)
        .expect("pattern insight from the untruncated list");
    assert_eq!(pattern.trend, Some(Trend::Decreasing));
    assert_eq!(pattern.description, "Your dreams show a decreasing presence of fear.");
}
