// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Hash-indexed chat tracker.
//!
//! Three sub-indexes built on [`BucketList`]:
//!
//! - `active`: records a user is currently a member of, bucketed by user.
//!   Within a bucket, the record nearest the tail with a given user is that
//!   user's current chat, because `join` always appends or promotes to tail.
//! - `departed`: records a user explicitly left, bucketed by user. Kept so
//!   `terminate` can still count their contributions.
//! - `chats`: one `Membership` per record ever created, bucketed by chat.
//!   Only used to find which users to visit when a chat terminates.
//!
//! A record is owned by exactly one of `active` or `departed`. Leaving moves
//! it; nothing is cloned, so its count travels with it.
//!
//! With a reasonable hash spread every operation touches a constant number of
//! short buckets. `terminate` is proportional to the chat's membership plus
//! the buckets of the users it visits.

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::config::TrackerConfig;
use crate::index::{BucketList, Idx};
use crate::tracker_trait::Tracker;

/// One (user, chat) membership episode.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Record {
    user: String,
    chat: String,
    /// Contributions made during this episode.
    count: u64,
}

impl Record {
    fn new(user: &str, chat: &str) -> Record {
        return Record {
            user: user.to_owned(),
            chat: chat.to_owned(),
            count: 0,
        };
    }

    #[inline]
    fn is(&self, user: &str, chat: &str) -> bool {
        return self.user == user && self.chat == chat;
    }
}

/// Chat index entry. Carries no count; the record holds the authoritative one.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Membership {
    user: String,
    chat: String,
}

/// Tracks chat membership and contributions with average O(1) operations.
pub struct ChatTracker {
    active: BucketList<Record>,
    departed: BucketList<Record>,
    chats: BucketList<Membership>,
}

impl Default for ChatTracker {
    fn default() -> Self {
        return Self::new();
    }
}

impl ChatTracker {
    /// Create a tracker with the default 20000 buckets per index.
    pub fn new() -> ChatTracker {
        return ChatTracker::with_config(TrackerConfig::default());
    }

    /// Create a tracker with `buckets` buckets per index.
    pub fn with_buckets(buckets: usize) -> ChatTracker {
        return ChatTracker::with_config(TrackerConfig::with_buckets(buckets));
    }

    pub fn with_config(config: TrackerConfig) -> ChatTracker {
        let buckets = config.effective_buckets();
        return ChatTracker {
            active: BucketList::new(buckets),
            departed: BucketList::new(buckets),
            chats: BucketList::new(buckets),
        };
    }

    /// Buckets per index.
    pub fn bucket_count(&self) -> usize {
        return self.active.bucket_count();
    }

    /// Number of live memberships.
    pub fn active_len(&self) -> usize {
        return self.active.len();
    }

    /// Number of departed records still awaiting their chat's termination.
    pub fn departed_len(&self) -> usize {
        return self.departed.len();
    }

    /// Number of chat index entries.
    pub fn chat_entry_len(&self) -> usize {
        return self.chats.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.active.is_empty() && self.departed.is_empty() && self.chats.is_empty();
    }

    /// Drop all records in all three indexes.
    pub fn clear(&mut self) {
        self.active.clear();
        self.departed.clear();
        self.chats.clear();
    }

    /// Bucket shared by `active` and `departed` for a user.
    #[inline]
    fn user_bucket(&self, user: &str) -> usize {
        return self.active.bucket_for(user);
    }

    /// The user's current record, if any.
    fn current(&self, bucket: usize, user: &str) -> Option<Idx> {
        return self.active.find_back(bucket, |record| record.user == user);
    }

    /// The user's current chat, if any.
    pub fn current_chat(&self, user: &str) -> Option<&str> {
        let bucket = self.user_bucket(user);
        let idx = self.current(bucket, user)?;
        return self.active.get(idx).map(|record| record.chat.as_str());
    }

    /// The user's running count in a chat they are active in.
    pub fn count(&self, user: &str, chat: &str) -> Option<u64> {
        let bucket = self.user_bucket(user);
        let idx = self.active.find_back(bucket, |record| record.is(user, chat))?;
        return self.active.get(idx).map(|record| record.count);
    }

    /// Join `chat`, making it the user's current chat.
    pub fn join(&mut self, user: &str, chat: &str) {
        let bucket = self.user_bucket(user);

        if let Some(idx) = self.active.find_back(bucket, |record| record.is(user, chat)) {
            trace!(user, chat, "join: promote existing membership");
            self.active.move_to_back(bucket, idx);
            return;
        }

        trace!(user, chat, "join: new membership");
        self.active.push_back(bucket, Record::new(user, chat));
        let chat_bucket = self.chats.bucket_for(chat);
        self.chats.push_back(
            chat_bucket,
            Membership {
                user: user.to_owned(),
                chat: chat.to_owned(),
            },
        );
    }

    /// Leave `chat`, returning its count, or `None` if the user is not in it.
    pub fn leave(&mut self, user: &str, chat: &str) -> Option<u64> {
        let bucket = self.user_bucket(user);
        let idx = self.active.find_back(bucket, |record| record.is(user, chat))?;
        return Some(self.depart(bucket, idx));
    }

    /// Leave the current chat, returning its count, or `None` if there is none.
    pub fn leave_current(&mut self, user: &str) -> Option<u64> {
        let bucket = self.user_bucket(user);
        let idx = self.current(bucket, user)?;
        return Some(self.depart(bucket, idx));
    }

    /// Move an active record into `departed`.
    fn depart(&mut self, bucket: usize, idx: Idx) -> u64 {
        let record = self.active.remove(bucket, idx);
        let count = record.count;
        trace!(user = %record.user, chat = %record.chat, count, "leave");
        self.departed.push_back(bucket, record);
        return count;
    }

    /// Record a contribution to the user's current chat.
    pub fn contribute(&mut self, user: &str) -> u64 {
        let bucket = self.user_bucket(user);
        let Some(idx) = self.current(bucket, user) else {
            return 0;
        };
        let Some(record) = self.active.get_mut(idx) else {
            return 0;
        };
        record.count += 1;
        trace!(user, chat = %record.chat, count = record.count, "contribute");
        return record.count;
    }

    /// End `chat` and return every contribution ever made to it.
    pub fn terminate(&mut self, chat: &str) -> u64 {
        let chat_bucket = self.chats.bucket_for(chat);
        let ChatTracker {
            active,
            departed,
            chats,
        } = self;

        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut total = 0u64;
        for (_, entry) in chats.iter(chat_bucket) {
            if entry.chat != chat || !visited.insert(entry.user.as_str()) {
                continue;
            }
            let user_bucket = active.bucket_for(&entry.user);
            total += purge(active, user_bucket, &entry.user, chat);
            total += purge(departed, user_bucket, &entry.user, chat);
        }

        if visited.is_empty() {
            return 0;
        }
        let users = visited.len();

        let entries = chats.remove_where(chat_bucket, |entry| entry.chat == chat).len();
        debug!(chat, users, entries, total, "terminate");
        return total;
    }

    /// Check the cross-index invariants. O(n); meant for tests and fuzzing.
    ///
    /// - every list is internally consistent
    /// - at most one active record per (user, chat)
    /// - records sit in the bucket their user hashes to
    /// - every record still has a chat index entry
    pub fn assert_consistent(&self) {
        self.active.assert_consistent();
        self.departed.assert_consistent();
        self.chats.assert_consistent();

        let mut memberships: FxHashSet<(&str, &str)> = FxHashSet::default();
        for bucket in 0..self.chats.bucket_count() {
            for (_, entry) in self.chats.iter(bucket) {
                assert_eq!(self.chats.bucket_for(&entry.chat), bucket, "chat entry in wrong bucket");
                memberships.insert((entry.user.as_str(), entry.chat.as_str()));
            }
        }

        let mut live: FxHashSet<(&str, &str)> = FxHashSet::default();
        for bucket in 0..self.active.bucket_count() {
            for (_, record) in self.active.iter(bucket) {
                let key = (record.user.as_str(), record.chat.as_str());
                assert_eq!(self.user_bucket(&record.user), bucket, "active record in wrong bucket");
                assert!(live.insert(key), "duplicate active record {:?}", key);
                assert!(memberships.contains(&key), "active record {:?} missing from chat index", key);
            }
            for (_, record) in self.departed.iter(bucket) {
                let key = (record.user.as_str(), record.chat.as_str());
                assert_eq!(self.user_bucket(&record.user), bucket, "departed record in wrong bucket");
                assert!(memberships.contains(&key), "departed record {:?} missing from chat index", key);
            }
        }
    }
}

/// Remove a user's records for `chat` from one list and sum their counts.
fn purge(list: &mut BucketList<Record>, bucket: usize, user: &str, chat: &str) -> u64 {
    return list
        .remove_where(bucket, |record| record.is(user, chat))
        .iter()
        .map(|record| record.count)
        .sum();
}

impl Tracker for ChatTracker {
    fn join(&mut self, user: &str, chat: &str) {
        ChatTracker::join(self, user, chat);
    }

    fn terminate(&mut self, chat: &str) -> u64 {
        return ChatTracker::terminate(self, chat);
    }

    fn contribute(&mut self, user: &str) -> u64 {
        return ChatTracker::contribute(self, user);
    }

    fn leave(&mut self, user: &str, chat: &str) -> Option<u64> {
        return ChatTracker::leave(self, user, chat);
    }

    fn leave_current(&mut self, user: &str) -> Option<u64> {
        return ChatTracker::leave_current(self, user);
    }
}
