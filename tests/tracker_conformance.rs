// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Conformance test suite for Tracker implementations.
//!
//! All implementations of the `Tracker` trait must pass these tests.
//! The tests verify:
//!
//! 1. Basic operations: join, contribute, leave, terminate
//! 2. Current-chat tracking across joins, re-joins and leaves
//! 3. Termination totals including departed members
//! 4. Edge cases: unknown users and chats, empty names, many users
//!
//! # Usage
//!
//! To test a new implementation, add it to the bottom of this file with
//! `run_conformance_tests!`.

use chat_tracker::Tracker;

// =============================================================================
// Basic Operation Tests
// =============================================================================

/// Joining then leaving yields a zero count, and a second leave fails.
pub fn test_join_then_leave<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("u", "c");
    assert_eq!(t.leave("u", "c"), Some(0));
    assert_eq!(t.leave("u", "c"), None);
}

/// The Nth consecutive contribution returns N.
pub fn test_contribute_counts<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("u", "c");
    for n in 1..=20 {
        assert_eq!(t.contribute("u"), n);
    }
}

/// Contributing without a chat returns 0.
pub fn test_contribute_without_chat<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    assert_eq!(t.contribute("ghost"), 0);
    t.join("u", "c");
    assert_eq!(t.contribute("ghost"), 0);
}

/// Leaving a chat the user never joined fails.
pub fn test_leave_unknown<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    assert_eq!(t.leave("u", "c"), None);
    assert_eq!(t.leave_current("u"), None);
    t.join("u", "c");
    assert_eq!(t.leave("u", "d"), None);
    assert_eq!(t.leave("v", "c"), None);
}

// =============================================================================
// Current Chat Tests
// =============================================================================

/// Only the most recently joined chat receives contributions.
pub fn test_latest_join_is_current<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("u", "c1");
    t.join("u", "c2");
    assert_eq!(t.contribute("u"), 1);
    assert_eq!(t.leave_current("u"), Some(1));
    // c1 is still active and untouched
    assert_eq!(t.contribute("u"), 1);
    assert_eq!(t.leave("u", "c1"), Some(1));
}

/// Re-joining an active chat keeps its count.
pub fn test_rejoin_keeps_count<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("u", "c");
    t.contribute("u");
    t.join("u", "c");
    assert_eq!(t.leave("u", "c"), Some(1));
}

/// Re-joining an older chat makes it current again.
pub fn test_rejoin_promotes<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("u", "a");
    t.join("u", "b");
    t.join("u", "c");
    t.join("u", "a");
    assert_eq!(t.contribute("u"), 1);
    assert_eq!(t.leave_current("u"), Some(1));
    assert_eq!(t.contribute("u"), 1);
    assert_eq!(t.leave("u", "c"), Some(1));
}

/// Leaving a non-current chat does not change the current one.
pub fn test_leave_other_chat<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("u", "a");
    t.join("u", "b");
    assert_eq!(t.leave("u", "a"), Some(0));
    assert_eq!(t.contribute("u"), 1);
    assert_eq!(t.leave("u", "b"), Some(1));
}

/// Leaving the current chat falls back to the previous one.
pub fn test_leave_falls_back<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("u", "a");
    t.contribute("u");
    t.join("u", "b");
    assert_eq!(t.leave_current("u"), Some(0));
    assert_eq!(t.contribute("u"), 2);
    assert_eq!(t.leave_current("u"), Some(2));
    assert_eq!(t.leave_current("u"), None);
}

/// Users never see each other's current chats.
pub fn test_users_are_independent<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("a", "x");
    t.join("b", "y");
    t.join("a", "z");
    assert_eq!(t.contribute("b"), 1);
    assert_eq!(t.leave_current("b"), Some(1));
    assert_eq!(t.leave_current("a"), Some(0));
    assert_eq!(t.leave_current("a"), Some(0));
}

// =============================================================================
// Termination Tests
// =============================================================================

/// Terminating an unknown chat returns 0, twice.
pub fn test_terminate_unknown<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    assert_eq!(t.terminate("x"), 0);
    assert_eq!(t.terminate("x"), 0);
}

/// Terminate sums every member's contributions.
pub fn test_terminate_sums<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("A", "x");
    t.join("B", "x");
    t.contribute("A");
    t.contribute("A");
    t.contribute("B");
    assert_eq!(t.terminate("x"), 3);
    assert_eq!(t.terminate("x"), 0);
}

/// Departed and re-joined memberships are both counted.
pub fn test_terminate_counts_departed<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("A", "x");
    t.contribute("A");
    t.leave("A", "x");
    t.join("A", "x");
    t.contribute("A");
    assert_eq!(t.terminate("x"), 2);
}

/// Terminating removes the chat from every member.
pub fn test_terminate_removes_memberships<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("A", "x");
    t.join("B", "x");
    t.terminate("x");
    assert_eq!(t.leave("A", "x"), None);
    assert_eq!(t.contribute("B"), 0);
}

/// After termination the previous chat becomes current again.
pub fn test_terminate_current_falls_back<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("A", "x");
    t.join("A", "y");
    t.contribute("A");
    assert_eq!(t.terminate("y"), 1);
    assert_eq!(t.contribute("A"), 1);
    assert_eq!(t.terminate("x"), 1);
}

/// A chat can be re-created after termination, starting from zero.
pub fn test_chat_reused_after_terminate<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("A", "x");
    t.contribute("A");
    t.terminate("x");
    t.join("A", "x");
    assert_eq!(t.contribute("A"), 1);
    assert_eq!(t.terminate("x"), 1);
}

/// A chat nobody spoke in terminates to 0, like an unknown one.
pub fn test_silent_chat<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("A", "x");
    t.leave_current("A");
    assert_eq!(t.terminate("x"), 0);
}

// =============================================================================
// Edge Case Tests
// =============================================================================

/// Empty strings are valid names.
pub fn test_empty_names<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("", "");
    t.join("u", "");
    assert_eq!(t.contribute(""), 1);
    assert_eq!(t.contribute("u"), 1);
    assert_eq!(t.terminate(""), 2);
}

/// Names differing only in case or spacing are distinct.
pub fn test_names_compare_exactly<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    t.join("u", "Chat");
    t.join("U", "chat");
    t.contribute("u");
    assert_eq!(t.terminate("chat"), 0);
    assert_eq!(t.terminate("Chat "), 0);
    assert_eq!(t.terminate("Chat"), 1);
}

/// Many users in many chats.
pub fn test_many_users<T: Tracker>(make_empty: impl Fn() -> T) {
    let mut t = make_empty();
    for i in 0..200 {
        let user = format!("user{}", i);
        t.join(&user, &format!("chat{}", i % 10));
        for _ in 0..(i % 3) {
            t.contribute(&user);
        }
    }
    // users i with i % 10 == k contribute i % 3 each
    let mut expected = [0u64; 10];
    for i in 0..200u64 {
        expected[(i % 10) as usize] += i % 3;
    }
    for (k, want) in expected.iter().enumerate() {
        assert_eq!(t.terminate(&format!("chat{}", k)), *want);
    }
}

// =============================================================================
// Test Runner Macro
// =============================================================================

#[macro_export]
macro_rules! run_conformance_tests {
    ($name:ident, $make_empty:expr) => {
        mod $name {
            use super::*;

            #[test]
            fn join_then_leave() {
                test_join_then_leave($make_empty);
            }

            #[test]
            fn contribute_counts() {
                test_contribute_counts($make_empty);
            }

            #[test]
            fn contribute_without_chat() {
                test_contribute_without_chat($make_empty);
            }

            #[test]
            fn leave_unknown() {
                test_leave_unknown($make_empty);
            }

            #[test]
            fn latest_join_is_current() {
                test_latest_join_is_current($make_empty);
            }

            #[test]
            fn rejoin_keeps_count() {
                test_rejoin_keeps_count($make_empty);
            }

            #[test]
            fn rejoin_promotes() {
                test_rejoin_promotes($make_empty);
            }

            #[test]
            fn leave_other_chat() {
                test_leave_other_chat($make_empty);
            }

            #[test]
            fn leave_falls_back() {
                test_leave_falls_back($make_empty);
            }

            #[test]
            fn users_are_independent() {
                test_users_are_independent($make_empty);
            }

            #[test]
            fn terminate_unknown() {
                test_terminate_unknown($make_empty);
            }

            #[test]
            fn terminate_sums() {
                test_terminate_sums($make_empty);
            }

            #[test]
            fn terminate_counts_departed() {
                test_terminate_counts_departed($make_empty);
            }

            #[test]
            fn terminate_removes_memberships() {
                test_terminate_removes_memberships($make_empty);
            }

            #[test]
            fn terminate_current_falls_back() {
                test_terminate_current_falls_back($make_empty);
            }

            #[test]
            fn chat_reused_after_terminate() {
                test_chat_reused_after_terminate($make_empty);
            }

            #[test]
            fn silent_chat() {
                test_silent_chat($make_empty);
            }

            #[test]
            fn empty_names() {
                test_empty_names($make_empty);
            }

            #[test]
            fn names_compare_exactly() {
                test_names_compare_exactly($make_empty);
            }

            #[test]
            fn many_users() {
                test_many_users($make_empty);
            }
        }
    };
}

// =============================================================================
// Tests for implementations
// =============================================================================

use chat_tracker::{ChatTracker, SlowChatTracker};

fn make_default() -> ChatTracker {
    return ChatTracker::new();
}

/// Every key collides.
fn make_single_bucket() -> ChatTracker {
    return ChatTracker::with_buckets(1);
}

fn make_small() -> ChatTracker {
    return ChatTracker::with_buckets(7);
}

fn make_slow() -> SlowChatTracker {
    return SlowChatTracker::new();
}

run_conformance_tests!(chat_tracker_default, make_default);
run_conformance_tests!(chat_tracker_single_bucket, make_single_bucket);
run_conformance_tests!(chat_tracker_small, make_small);
run_conformance_tests!(slow_chat_tracker, make_slow);
