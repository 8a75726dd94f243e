//! Session identifier generation.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Opaque unique identifier of a chat session.
///
/// Rendered and persisted as the decimal string of the millisecond timestamp
/// the session was created at. Uniqueness within one user's session set is
/// guaranteed by [`IdGenerator`]; ordering across clock adjustments is not.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_millis(ms: i64) -> Self {
        Self(ms.to_string())
    }

    /// Numeric token, when the id is a plain millisecond timestamp.
    fn as_millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for SessionId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Produces strictly increasing millisecond tokens.
///
/// Two creations in the same millisecond, or after a backwards clock
/// adjustment, still get distinct ids: the candidate is bumped past the last
/// token handed out.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    last_ms: i64,
}

impl IdGenerator {
    /// Next unique session id.
    pub(crate) fn next(&mut self) -> SessionId {
        let now = Utc::now().timestamp_millis();
        let token = if now > self.last_ms { now } else { self.last_ms + 1 };
        self.last_ms = token;
        SessionId::from_millis(token)
    }

    /// Seed the generator past an id restored from persistence, so freshly
    /// generated ids never collide with restored ones.
    pub(crate) fn observe(&mut self, id: &SessionId) {
        if let Some(ms) = id.as_millis() {
            self.last_ms = self.last_ms.max(ms);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rapid_ids_are_distinct() {
        let mut generator = IdGenerator::default();
        let ids: Vec<SessionId> = (0..100).map(|_| generator.next()).collect();
        for pair in ids.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_observe_seeds_past_restored_ids() {
        let mut generator = IdGenerator::default();
        let far_future = Utc::now().timestamp_millis() + 1_000_000;
        generator.observe(&SessionId::from_millis(far_future));
        let next = generator.next();
        assert_eq!(next.as_millis().unwrap(), far_future + 1);
    }

    #[test]
    fn test_observe_ignores_non_numeric_ids() {
        let mut generator = IdGenerator::default();
        generator.observe(&SessionId::from("legacy-id"));
        let next = generator.next();
        assert!(next.as_millis().is_some());
    }

    #[test]
    fn test_round_trips_through_serde_as_string() {
        let id = SessionId::from("1712000000000");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1712000000000\"");
        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
