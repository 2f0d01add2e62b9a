//! Keys for flattened timeline events.
//!
//! A nested event's id is only unique inside its episode, so list keys are
//! composed from both ids.
//! Format: "event:{episode_id}" or "event:{episode_id}:{event_id}", with
//! '%' and ':' in the episode id written as "%25" and "%3A".

use std::fmt;

use serde::{Serialize, Serializer};

/// Unique key of a flattened event across the whole timeline.
///
/// Episode keys order before nested keys, then by episode and event id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKey {
    /// The episode itself
    Episode { episode_id: String },
    /// A timeline event nested in an episode
    Nested { episode_id: String, event_id: String },
}

impl EventKey {
    pub fn episode(episode_id: impl Into<String>) -> Self {
        EventKey::Episode {
            episode_id: episode_id.into(),
        }
    }

    pub fn nested(episode_id: impl Into<String>, event_id: impl Into<String>) -> Self {
        EventKey::Nested {
            episode_id: episode_id.into(),
            event_id: event_id.into(),
        }
    }

    /// Id of the owning episode.
    pub fn episode_id(&self) -> &str {
        match self {
            EventKey::Episode { episode_id } | EventKey::Nested { episode_id, .. } => episode_id,
        }
    }

    /// Id of the nested event, None for the episode itself.
    pub fn event_id(&self) -> Option<&str> {
        match self {
            EventKey::Episode { .. } => None,
            EventKey::Nested { event_id, .. } => Some(event_id),
        }
    }

    /// Parse a key produced by `Display`.
    pub fn parse(key: &str) -> Option<Self> {
        let mut parts = key.splitn(3, ':');
        if parts.next() != Some("event") {
            return None;
        }

        let episode_id = parts.next().filter(|s| !s.is_empty())?;
        let episode_id = unescape_episode_id(episode_id)?;
        match parts.next() {
            None => Some(EventKey::episode(episode_id)),
            Some(event_id) if !event_id.is_empty() => Some(EventKey::nested(episode_id, event_id)),
            Some(_) => None,
        }
    }
}

fn escape_episode_id(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for c in id.chars() {
        match c {
            '%' => out.push_str("%25"),
            ':' => out.push_str("%3A"),
            c => out.push(c),
        }
    }
    out
}

/// Reverse of `escape_episode_id`; None on an unknown escape.
fn unescape_episode_id(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let escape = rest.get(pos..pos + 3)?;
        match escape {
            "%25" => out.push('%'),
            "%3A" => out.push(':'),
            _ => return None,
        }
        rest = &rest[pos + 3..];
    }
    out.push_str(rest);
    Some(out)
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKey::Episode { episode_id } => {
                write!(f, "event:{}", escape_episode_id(episode_id))
            }
            EventKey::Nested {
                episode_id,
                event_id,
            } => write!(f, "event:{}:{event_id}", escape_episode_id(episode_id)),
        }
    }
}

impl Serialize for EventKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
