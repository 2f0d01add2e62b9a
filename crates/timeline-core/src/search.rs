//! Free-text episode filter.
//!
//! Runs before flattening. An episode matches when the term appears,
//! case-insensitively, in its title or description, or in the title or
//! description of any nested event.

use timeline_types::Episode;

/// Normalize a search term; None means "no filter".
fn normalize(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn contains(text: Option<&str>, needle: &str) -> bool {
    text.is_some_and(|t| t.to_lowercase().contains(needle))
}

/// Check one episode against an already lowercased, non-empty needle.
fn matches_needle(episode: &Episode, needle: &str) -> bool {
    contains(Some(episode.title.as_str()), needle)
        || contains(episode.description.as_deref(), needle)
        || episode.timeline_events.iter().any(|ev| {
            contains(Some(ev.title.as_str()), needle) || contains(ev.description.as_deref(), needle)
        })
}

/// Whether `episode` matches `term`. A blank term matches everything.
pub fn episode_matches(episode: &Episode, term: &str) -> bool {
    match normalize(term) {
        Some(needle) => matches_needle(episode, &needle),
        None => true,
    }
}

/// Filter episodes by a free-text term.
///
/// Returns a new view over the input, preserving order. A blank or
/// whitespace-only term returns every episode.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use timeline_core::filter_episodes;
/// use timeline_types::Episode;
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let episodes = vec![
///     Episode::new("a", "Atari 2600", d(1977, 9, 11)),
///     Episode::new("b", "O Crash de 1983", d(1983, 12, 1)),
/// ];
///
/// let hits = filter_episodes(&episodes, "atari");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "a");
/// ```
pub fn filter_episodes<'a>(episodes: &'a [Episode], term: &str) -> Vec<&'a Episode> {
    match normalize(term) {
        Some(needle) => episodes
            .iter()
            .filter(|e| matches_needle(e, &needle))
            .collect(),
        None => episodes.iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use timeline_types::TimelineEvent;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> Vec<Episode> {
        vec![
            Episode::new("a", "Atari 2600", d(1977, 9, 11)),
            Episode::new("b", "O Crash de 1983", d(1983, 12, 1))
                .with_description("A grande crise da industria")
                .with_timeline_events(vec![TimelineEvent::new("1", d(1977, 6, 1), "Arcade Boom")
                    .with_description("Space Invaders chega aos bares")]),
        ]
    }

    fn ids(hits: &[&Episode]) -> Vec<String> {
        hits.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_title_match_case_insensitive() {
        let episodes = sample();
        assert_eq!(ids(&filter_episodes(&episodes, "Atari")), vec!["a"]);
        assert_eq!(ids(&filter_episodes(&episodes, "ATARI")), vec!["a"]);
    }

    #[test]
    fn test_description_match() {
        let episodes = sample();
        assert_eq!(ids(&filter_episodes(&episodes, "crise")), vec!["b"]);
    }

    #[test]
    fn test_nested_event_title_and_description_match() {
        let episodes = sample();
        assert_eq!(ids(&filter_episodes(&episodes, "arcade")), vec!["b"]);
        assert_eq!(ids(&filter_episodes(&episodes, "space invaders")), vec!["b"]);
    }

    #[test]
    fn test_blank_term_returns_everything_in_order() {
        let episodes = sample();
        assert_eq!(ids(&filter_episodes(&episodes, "")), vec!["a", "b"]);
        assert_eq!(ids(&filter_episodes(&episodes, "   \t")), vec!["a", "b"]);
    }

    #[test]
    fn test_term_is_trimmed() {
        let episodes = sample();
        assert_eq!(ids(&filter_episodes(&episodes, "  atari  ")), vec!["a"]);
    }

    #[test]
    fn test_no_match() {
        let episodes = sample();
        assert!(filter_episodes(&episodes, "playstation").is_empty());
    }

    #[test]
    fn test_every_hit_contains_term() {
        let episodes = sample();
        for term in ["19", "a", "boom", "o "] {
            for hit in filter_episodes(&episodes, term) {
                assert!(episode_matches(hit, term));
            }
        }
    }
}
