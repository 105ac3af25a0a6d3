// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Linear-scan reference tracker for correctness testing.
//!
//! Keeps memberships in two plain vectors ordered by recency. Every operation
//! is O(n), which is fine for checking [`ChatTracker`](crate::ChatTracker)
//! against, and hopeless for anything else.

use crate::tracker_trait::Tracker;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    user: String,
    chat: String,
    count: u64,
}

/// Reference implementation of [`Tracker`].
#[derive(Clone, Debug, Default)]
pub struct SlowChatTracker {
    /// Live memberships, most recent last.
    active: Vec<Entry>,
    /// Memberships users left, awaiting termination.
    departed: Vec<Entry>,
}

impl SlowChatTracker {
    pub fn new() -> SlowChatTracker {
        return SlowChatTracker::default();
    }

    fn depart(&mut self, pos: usize) -> u64 {
        let entry = self.active.remove(pos);
        let count = entry.count;
        self.departed.push(entry);
        return count;
    }
}

impl Tracker for SlowChatTracker {
    fn join(&mut self, user: &str, chat: &str) {
        if let Some(pos) = self.active.iter().rposition(|e| e.user == user && e.chat == chat) {
            let entry = self.active.remove(pos);
            self.active.push(entry);
            return;
        }
        self.active.push(Entry {
            user: user.to_owned(),
            chat: chat.to_owned(),
            count: 0,
        });
    }

    fn terminate(&mut self, chat: &str) -> u64 {
        let mut total = 0;
        for list in [&mut self.active, &mut self.departed] {
            list.retain(|e| {
                if e.chat == chat {
                    total += e.count;
                    return false;
                }
                return true;
            });
        }
        return total;
    }

    fn contribute(&mut self, user: &str) -> u64 {
        match self.active.iter_mut().rev().find(|e| e.user == user) {
            Some(entry) => {
                entry.count += 1;
                entry.count
            }
            None => 0,
        }
    }

    fn leave(&mut self, user: &str, chat: &str) -> Option<u64> {
        let pos = self.active.iter().rposition(|e| e.user == user && e.chat == chat)?;
        return Some(self.depart(pos));
    }

    fn leave_current(&mut self, user: &str) -> Option<u64> {
        let pos = self.active.iter().rposition(|e| e.user == user)?;
        return Some(self.depart(pos));
    }
}
