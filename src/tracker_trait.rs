// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! The Tracker trait defines the interface shared by every chat tracker.
//!
//! Both the hash-indexed [`ChatTracker`](crate::ChatTracker) and the
//! linear-scan [`SlowChatTracker`](crate::SlowChatTracker) implement it,
//! enabling:
//! - Conformance testing with shared test suites
//! - Cross-checking one implementation against the other
//! - Benchmarking across implementations

/// Chat membership and contribution tracking.
///
/// Users and chats are opaque strings compared for exact equality. A user's
/// current chat is the one they most recently joined or re-joined and have
/// not left.
pub trait Tracker {
    /// Join `chat`, making it the user's current chat.
    ///
    /// Re-joining a chat the user is already active in keeps its count and
    /// only promotes it to current. Re-joining after leaving starts a fresh
    /// membership at zero.
    fn join(&mut self, user: &str, chat: &str);

    /// End `chat`, returning the total contributions ever made to it.
    ///
    /// Counts from users who already left are included. Returns 0 for an
    /// unknown chat as well as for a chat nobody contributed to.
    fn terminate(&mut self, chat: &str) -> u64;

    /// Record a contribution to the user's current chat.
    ///
    /// Returns the new count, or 0 if the user has no current chat.
    fn contribute(&mut self, user: &str) -> u64;

    /// Leave a specific chat, returning its count, or `None` if the user is
    /// not active in it.
    fn leave(&mut self, user: &str, chat: &str) -> Option<u64>;

    /// Leave the current chat, returning its count, or `None` if the user
    /// has no current chat.
    fn leave_current(&mut self, user: &str) -> Option<u64>;
}
