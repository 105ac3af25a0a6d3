// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Index primitives shared by the tracker's sub-indexes.
//!
//! ## Lists
//! - `BucketList`: fixed-size hash table of doubly-linked lists over a node
//!   arena, with O(1) append, removal by handle and move-to-tail.

pub mod bucket_list;

pub use bucket_list::BucketList;
pub use bucket_list::Idx;
