//! AFL Fuzz harness for the chat tracker
//!
//! Every operation is applied to both the hash-indexed tracker and the
//! linear-scan reference, and their answers must agree. The hash tracker runs
//! with a handful of buckets so collisions are the common case.
//!
//! Model: a small population of users and chats, so joins, leaves and
//! terminations keep hitting the same memberships.

use afl::fuzz;
use chat_tracker::{ChatTracker, Command, SlowChatTracker, Tracker};

const NUM_USERS: u8 = 6;
const NUM_CHATS: u8 = 4;
const NUM_BUCKETS: usize = 3;

fn user(byte: u8) -> String {
    format!("u{}", byte % NUM_USERS)
}

fn chat(byte: u8) -> String {
    format!("chat {}", byte % NUM_CHATS)
}

/// Decode one command from the front of the input.
fn command_from_bytes(bytes: &[u8]) -> Option<(Command, &[u8])> {
    if bytes.is_empty() {
        return None;
    }

    let op_type = bytes[0] % 5;
    let rest = &bytes[1..];

    match op_type {
        0 if rest.len() >= 2 => {
            let op = Command::Join { user: user(rest[0]), chat: chat(rest[1]) };
            Some((op, &rest[2..]))
        }
        1 if !rest.is_empty() => Some((Command::Contribute { user: user(rest[0]) }, &rest[1..])),
        2 if rest.len() >= 2 => {
            let op = Command::Leave { user: user(rest[0]), chat: chat(rest[1]) };
            Some((op, &rest[2..]))
        }
        3 if !rest.is_empty() => Some((Command::LeaveCurrent { user: user(rest[0]) }, &rest[1..])),
        4 if !rest.is_empty() => Some((Command::Terminate { chat: chat(rest[0]) }, &rest[1..])),
        _ => None,
    }
}

fn main() {
    fuzz!(|data: &[u8]| {
        let mut fast = ChatTracker::with_buckets(NUM_BUCKETS);
        let mut reference = SlowChatTracker::new();
        let mut remaining = data;
        let mut op_num = 0usize;

        while let Some((op, rest)) = command_from_bytes(remaining) {
            remaining = rest;
            op_num += 1;

            let actual = op.apply(&mut fast);
            let expected = op.apply(&mut reference);
            assert_eq!(actual, expected, "Op {}: {:?} disagrees with reference", op_num, op);
        }

        // Verify internal consistency
        fast.assert_consistent();

        // Terminating every chat must empty the tracker
        for c in 0..NUM_CHATS {
            let name = chat(c);
            assert_eq!(
                fast.terminate(&name),
                reference.terminate(&name),
                "Terminate {:?} disagrees with reference",
                name
            );
        }
        assert!(fast.is_empty(), "Records survived terminating every chat");
    });
}
