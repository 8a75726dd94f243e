//! Mutation notifications emitted by the store.

use super::ids::SessionId;

/// Emitted after each store mutation, once in-memory state has settled.
///
/// Observers run synchronously on the caller's thread of control and must
/// not call back into the store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreEvent {
    /// A user became active and state was restored from persistence.
    Activated {
        /// The now-active user identifier.
        user: String,
        /// Number of sessions after restoration.
        session_count: usize,
    },
    /// A new session was created and made active.
    SessionCreated(SessionId),
    /// A message was appended to a session.
    MessageAppended(SessionId),
    /// A session title changed, by rename or first-message derivation.
    SessionRenamed(SessionId),
    /// A session was removed.
    SessionDeleted(SessionId),
    /// The active session switched.
    ActiveSessionChanged(SessionId),
    /// The cart contents changed.
    CartChanged {
        /// Number of distinct lines after the change.
        line_count: usize,
    },
}

/// Registered observer callback.
pub(crate) type Observer = Box<dyn Fn(&StoreEvent)>;
