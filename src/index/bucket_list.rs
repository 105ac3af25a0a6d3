// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Bucketed Doubly-Linked List
//!
//! A fixed number of hash buckets, each holding an ordered doubly-linked list.
//! All nodes live in one arena and are linked by index, so removing a node from
//! the middle of a bucket is O(1) given its handle and no pointer can dangle.
//!
//! # Operations
//!
//! - `push_back(bucket, item)`: O(1) - append at the bucket's tail
//! - `remove(bucket, idx)`: O(1) - unlink a node by handle, returns its item
//! - `move_to_back(bucket, idx)`: O(1) - relink a node at the bucket's tail
//! - `find_back(bucket, pred)`: O(bucket) - scan tail to head
//! - `iter(bucket)`: O(bucket) - scan head to tail
//! - `remove_where(bucket, pred)`: O(bucket) - unlink every matching node
//!
//! # Structure
//!
//! ```text
//! heads[0] -> A <-> C <-> F <- tails[0]
//! heads[1] -> NULL         NULL <- tails[1]
//! heads[2] -> B <-> D <- tails[2]
//! ```
//!
//! The bucket count is fixed at construction. There is no rehashing, so a
//! skewed key distribution degrades towards O(n) per bucket rather than
//! growing the table.

use std::hash::BuildHasher;

use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

/// Node index type. u32 saves space vs usize on 64-bit.
pub type Idx = u32;

/// Null index marker.
pub const NULL: Idx = Idx::MAX;

/// A node in a bucket's list.
struct Node<T> {
    /// The item, `None` while the slot sits on the free list.
    item: Option<T>,
    prev: Idx,
    next: Idx,
}

/// A fixed-size table of doubly-linked lists sharing one node arena.
pub struct BucketList<T> {
    /// Arena of nodes.
    nodes: Vec<Node<T>>,
    /// First node of each bucket.
    heads: Box<[Idx]>,
    /// Last node of each bucket.
    tails: Box<[Idx]>,
    /// Free list for reusing removed node slots.
    free_list: Vec<Idx>,
    /// Number of live items across all buckets.
    len: usize,
}

impl<T> BucketList<T> {
    /// Create a list with `buckets` empty buckets (at least one).
    pub fn new(buckets: usize) -> BucketList<T> {
        let buckets = buckets.max(1);
        return BucketList {
            nodes: Vec::new(),
            heads: vec![NULL; buckets].into_boxed_slice(),
            tails: vec![NULL; buckets].into_boxed_slice(),
            free_list: Vec::new(),
            len: 0,
        };
    }

    /// Number of buckets, fixed at construction.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        return self.heads.len();
    }

    /// Number of live items across all buckets.
    #[inline]
    pub fn len(&self) -> usize {
        return self.len;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// The bucket a key hashes into.
    ///
    /// Uses FxHash with a fixed seed, so the mapping is stable across runs.
    #[inline]
    pub fn bucket_for(&self, key: &str) -> usize {
        let hash = FxBuildHasher.hash_one(key);
        return (hash % self.heads.len() as u64) as usize;
    }

    /// Get an item by handle.
    pub fn get(&self, idx: Idx) -> Option<&T> {
        return self.nodes.get(idx as usize)?.item.as_ref();
    }

    /// Get a mutable item by handle.
    pub fn get_mut(&mut self, idx: Idx) -> Option<&mut T> {
        return self.nodes.get_mut(idx as usize)?.item.as_mut();
    }

    /// Whether the bucket has no nodes.
    #[cfg(test)]
    fn bucket_is_empty(&self, bucket: usize) -> bool {
        return self.heads[bucket] == NULL;
    }

    /// The tail node of a bucket, if any.
    #[cfg(test)]
    fn back(&self, bucket: usize) -> Option<Idx> {
        let tail = self.tails[bucket];
        return (tail != NULL).then_some(tail);
    }

    // --- Node access helpers ---

    fn node(&self, idx: Idx) -> &Node<T> {
        &self.nodes[idx as usize]
    }

    fn node_mut(&mut self, idx: Idx) -> &mut Node<T> {
        &mut self.nodes[idx as usize]
    }

    fn alloc_node(&mut self, item: T) -> Idx {
        if let Some(idx) = self.free_list.pop() {
            let node = self.node_mut(idx);
            node.item = Some(item);
            node.prev = NULL;
            node.next = NULL;
            idx
        } else {
            let idx = self.nodes.len() as Idx;
            assert!(idx != NULL, "bucket list arena exhausted");
            self.nodes.push(Node {
                item: Some(item),
                prev: NULL,
                next: NULL,
            });
            idx
        }
    }

    // --- Link surgery ---

    /// Attach a detached node at the tail of a bucket.
    fn link_back(&mut self, bucket: usize, idx: Idx) {
        let tail = self.tails[bucket];
        {
            let node = self.node_mut(idx);
            node.prev = tail;
            node.next = NULL;
        }
        if tail == NULL {
            self.heads[bucket] = idx;
        } else {
            self.node_mut(tail).next = idx;
        }
        self.tails[bucket] = idx;
    }

    /// Detach a node from its bucket, leaving the item in place.
    fn unlink(&mut self, bucket: usize, idx: Idx) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };

        if prev == NULL {
            self.heads[bucket] = next;
        } else {
            self.node_mut(prev).next = next;
        }

        if next == NULL {
            self.tails[bucket] = prev;
        } else {
            self.node_mut(next).prev = prev;
        }

        let node = self.node_mut(idx);
        node.prev = NULL;
        node.next = NULL;
    }

    // --- Core operations ---

    /// Append an item at the tail of a bucket and return its handle.
    pub fn push_back(&mut self, bucket: usize, item: T) -> Idx {
        let idx = self.alloc_node(item);
        self.link_back(bucket, idx);
        self.len += 1;
        self.check_invariants(bucket);
        return idx;
    }

    /// Unlink a node from `bucket` and hand back its item.
    ///
    /// `idx` must be a live node of `bucket`.
    pub fn remove(&mut self, bucket: usize, idx: Idx) -> T {
        debug_assert!(self.get(idx).is_some(), "remove of a free slot");
        self.unlink(bucket, idx);
        let item = self.node_mut(idx).item.take();
        self.free_list.push(idx);
        self.len -= 1;
        self.check_invariants(bucket);
        match item {
            Some(item) => item,
            None => unreachable!("linked node without an item"),
        }
    }

    /// Relink a node as the tail of its bucket. A no-op if it already is.
    pub fn move_to_back(&mut self, bucket: usize, idx: Idx) {
        if self.tails[bucket] == idx {
            return;
        }
        self.unlink(bucket, idx);
        self.link_back(bucket, idx);
        self.check_invariants(bucket);
    }

    /// Scan a bucket from tail to head and return the first node matching `pred`.
    pub fn find_back(&self, bucket: usize, mut pred: impl FnMut(&T) -> bool) -> Option<Idx> {
        let mut idx = self.tails[bucket];
        while idx != NULL {
            let node = self.node(idx);
            if let Some(item) = &node.item {
                if pred(item) {
                    return Some(idx);
                }
            }
            idx = node.prev;
        }
        return None;
    }

    /// Iterate a bucket from head to tail.
    pub fn iter(&self, bucket: usize) -> Iter<'_, T> {
        return Iter {
            list: self,
            idx: self.heads[bucket],
        };
    }

    /// Unlink every node in `bucket` matching `pred`, returning their items in
    /// list order.
    pub fn remove_where(
        &mut self,
        bucket: usize,
        mut pred: impl FnMut(&T) -> bool,
    ) -> SmallVec<[T; 4]> {
        let mut removed = SmallVec::new();
        let mut idx = self.heads[bucket];
        while idx != NULL {
            // Capture the successor before the node is unlinked.
            let next = self.node(idx).next;
            let hit = self.node(idx).item.as_ref().is_some_and(&mut pred);
            if hit {
                removed.push(self.remove(bucket, idx));
            }
            idx = next;
        }
        return removed;
    }

    /// Drop every item, keeping the bucket count.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.heads.fill(NULL);
        self.tails.fill(NULL);
        self.len = 0;
    }

    // --- Invariant checking ---

    #[cfg(debug_assertions)]
    fn check_invariants(&self, bucket: usize) {
        let head = self.heads[bucket];
        let tail = self.tails[bucket];
        assert_eq!(
            head == NULL,
            tail == NULL,
            "INVARIANT VIOLATED: bucket {} head={} tail={}",
            bucket, head, tail
        );
        if head != NULL {
            assert_eq!(self.node(head).prev, NULL, "INVARIANT VIOLATED: head has a prev link");
            assert_eq!(self.node(tail).next, NULL, "INVARIANT VIOLATED: tail has a next link");
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_invariants(&self, _bucket: usize) {}

    /// Walk every bucket both ways and check links, counts and occupancy.
    ///
    /// O(n); meant for tests and fuzzing.
    pub fn assert_consistent(&self) {
        let mut seen = 0usize;
        for bucket in 0..self.bucket_count() {
            let mut forward = Vec::new();
            let mut prev = NULL;
            let mut idx = self.heads[bucket];
            while idx != NULL {
                let node = self.node(idx);
                assert!(node.item.is_some(), "INVARIANT VIOLATED: free slot {} is linked", idx);
                assert_eq!(node.prev, prev, "INVARIANT VIOLATED: broken prev link at {}", idx);
                forward.push(idx);
                prev = idx;
                idx = node.next;
            }
            assert_eq!(self.tails[bucket], prev, "INVARIANT VIOLATED: stale tail in bucket {}", bucket);

            let mut backward = Vec::new();
            let mut idx = self.tails[bucket];
            while idx != NULL {
                backward.push(idx);
                idx = self.node(idx).prev;
            }
            backward.reverse();
            assert_eq!(forward, backward, "INVARIANT VIOLATED: bucket {} walks disagree", bucket);
            seen += forward.len();
        }
        assert_eq!(seen, self.len, "INVARIANT VIOLATED: linked={} != len={}", seen, self.len);
        assert_eq!(
            self.nodes.len() - self.free_list.len(),
            self.len,
            "INVARIANT VIOLATED: arena occupancy disagrees with len"
        );
    }
}

/// Head-to-tail iterator over one bucket, yielding `(handle, item)`.
pub struct Iter<'a, T> {
    list: &'a BucketList<T>,
    idx: Idx,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Idx, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while self.idx != NULL {
            let idx = self.idx;
            let node = self.list.node(idx);
            self.idx = node.next;
            if let Some(item) = &node.item {
                return Some((idx, item));
            }
        }
        None
    }
}
