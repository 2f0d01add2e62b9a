//! Year grouping.
//!
//! The single grouping engine behind every timeline rendering (desktop,
//! mobile, tooltip, year detail).
//!
//! Ordering:
//! - groups ascend by year, one group per year
//! - within a group, primary events come first, then secondary
//! - inside each category, ascending date, then event key
//!
//! The key tie-break makes the output independent of input order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use timeline_types::Episode;

use crate::flatten::{flatten_episodes, FlattenedEvent};

/// All timeline events sharing one calendar year.
#[derive(Debug, Clone, Serialize)]
pub struct YearGroup<'a> {
    pub year: i32,

    /// Never empty when produced by [`group_by_year`]
    pub events: Vec<FlattenedEvent<'a>>,
}

impl<'a> YearGroup<'a> {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events shown for this year point.
    pub fn event_count(&self) -> usize {
        self.len()
    }

    /// Primary events (the episodes themselves), in group order.
    pub fn episodes(&self) -> impl Iterator<Item = &FlattenedEvent<'a>> {
        self.events.iter().filter(|e| e.is_primary)
    }

    /// Secondary events (nested historical events), in group order.
    pub fn historical_events(&self) -> impl Iterator<Item = &FlattenedEvent<'a>> {
        self.events.iter().filter(|e| !e.is_primary)
    }

    /// Whether at least one episode is anchored in this year.
    pub fn has_episode(&self) -> bool {
        self.events.iter().any(|e| e.is_primary)
    }

    /// Whether any member carries an approximate date.
    pub fn has_approximate_date(&self) -> bool {
        self.events.iter().any(|e| e.date_is_approximate)
    }
}

fn compare_within_year(a: &FlattenedEvent<'_>, b: &FlattenedEvent<'_>) -> Ordering {
    b.is_primary
        .cmp(&a.is_primary)
        .then_with(|| a.date.cmp(&b.date))
        .then_with(|| a.key.cmp(&b.key))
}

/// Group flattened events by year.
///
/// Empty input yields no groups. Single-event years are ordinary groups.
pub fn group_by_year(events: Vec<FlattenedEvent<'_>>) -> Vec<YearGroup<'_>> {
    let mut buckets: BTreeMap<i32, Vec<FlattenedEvent<'_>>> = BTreeMap::new();
    for event in events {
        buckets.entry(event.year).or_default().push(event);
    }

    let groups: Vec<YearGroup<'_>> = buckets
        .into_iter()
        .map(|(year, mut events)| {
            events.sort_by(compare_within_year);
            YearGroup { year, events }
        })
        .collect();

    debug!(groups = groups.len(), "Grouped timeline events by year");
    groups
}

/// Flatten and group in one pass, dropping unreadable records.
pub fn timeline_groups<'a, I>(episodes: I) -> Vec<YearGroup<'a>>
where
    I: IntoIterator<Item = &'a Episode>,
{
    group_by_year(flatten_episodes(episodes).events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use timeline_types::TimelineEvent;

    use crate::event_key::EventKey;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> Vec<Episode> {
        vec![
            Episode::new("a", "Atari 2600", d(1977, 9, 11)),
            Episode::new("b", "O Crash de 1983", d(1983, 12, 1))
                .with_timeline_events(vec![TimelineEvent::new("1", d(1977, 6, 1), "Arcade Boom")]),
        ]
    }

    fn keys(group: &YearGroup<'_>) -> Vec<String> {
        group.events.iter().map(|e| e.key.to_string()).collect()
    }

    #[test]
    fn test_nested_event_joins_its_own_year() {
        let episodes = sample();
        let groups = timeline_groups(&episodes);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].year, 1977);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].year, 1983);
        assert_eq!(groups[1].len(), 1);
        assert!(groups[1].events[0].is_primary);
        assert_eq!(groups[1].events[0].episode.id, "b");
    }

    #[test]
    fn test_primary_before_secondary_even_if_later() {
        let episodes = sample();
        let groups = timeline_groups(&episodes);

        // Arcade Boom (June) is earlier than Atari (September) but nested
        assert_eq!(keys(&groups[0]), vec!["event:a", "event:b:1"]);
    }

    #[test]
    fn test_primaries_sorted_by_date() {
        let episodes = vec![
            Episode::new("late", "Late", d(1985, 10, 18)),
            Episode::new("early", "Early", d(1985, 1, 2)),
        ];
        let groups = timeline_groups(&episodes);

        assert_eq!(keys(&groups[0]), vec!["event:early", "event:late"]);
    }

    #[test]
    fn test_secondaries_sorted_by_date() {
        let episodes = vec![Episode::new("x", "X", d(1990, 1, 1)).with_timeline_events(vec![
            TimelineEvent::new("z", d(1972, 11, 29), "Pong"),
            TimelineEvent::new("y", d(1972, 5, 24), "Magnavox Odyssey"),
        ])];
        let groups = timeline_groups(&episodes);

        assert_eq!(groups[0].year, 1972);
        assert_eq!(keys(&groups[0]), vec!["event:x:y", "event:x:z"]);
    }

    #[test]
    fn test_years_strictly_increasing_and_nothing_lost() {
        let episodes = vec![
            Episode::new("c", "C", d(1995, 12, 3)),
            Episode::new("a", "A", d(1972, 11, 29)).with_timeline_events(vec![
                TimelineEvent::new("1", d(1995, 1, 1), "N1"),
                TimelineEvent::new("2", d(1989, 1, 1), "N2"),
            ]),
            Episode::new("b", "B", d(1989, 8, 14)),
        ];
        let flat = flatten_episodes(&episodes);
        let total = flat.events.len();
        let groups = group_by_year(flat.events);

        assert!(groups.windows(2).all(|w| w[0].year < w[1].year));
        assert_eq!(groups.iter().map(YearGroup::len).sum::<usize>(), total);

        let mut seen: Vec<EventKey> = groups
            .iter()
            .flat_map(|g| g.events.iter().map(|e| e.key.clone()))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn test_output_independent_of_input_order() {
        let forward = vec![
            Episode::new("a", "A", d(1985, 5, 5)),
            Episode::new("b", "B", d(1985, 5, 5)),
        ];
        let backward: Vec<Episode> = forward.iter().rev().cloned().collect();

        let g1 = timeline_groups(&forward);
        let g2 = timeline_groups(&backward);

        assert_eq!(keys(&g1[0]), keys(&g2[0]));
        assert_eq!(keys(&g1[0]), vec!["event:a", "event:b"]);
    }

    #[test]
    fn test_grouping_is_repeatable() {
        let episodes = sample();
        let first: Vec<Vec<String>> = timeline_groups(&episodes).iter().map(keys).collect();
        let second: Vec<Vec<String>> = timeline_groups(&episodes).iter().map(keys).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_no_groups() {
        assert!(group_by_year(Vec::new()).is_empty());
    }

    #[test]
    fn test_group_flags() {
        let episodes = vec![Episode::new("x", "X", d(1990, 1, 1)).with_timeline_events(vec![
            TimelineEvent::new("1", d(1972, 1, 1), "Pong").with_approximate_date(true),
        ])];
        let groups = timeline_groups(&episodes);

        let y1972 = &groups[0];
        assert!(!y1972.has_episode());
        assert!(y1972.has_approximate_date());
        assert_eq!(y1972.historical_events().count(), 1);

        let y1990 = &groups[1];
        assert!(y1990.has_episode());
        assert!(!y1990.has_approximate_date());
    }
}
