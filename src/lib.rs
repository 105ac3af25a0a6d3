// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Chat Tracker - chat membership and contribution counts in average O(1).
//!
//! # Quick Start
//!
//! ```
//! use chat_tracker::ChatTracker;
//!
//! let mut tracker = ChatTracker::new();
//!
//! tracker.join("Fred", "Breadmaking");
//! tracker.join("Ethel", "Breadmaking");
//! assert_eq!(tracker.contribute("Fred"), 1);
//! assert_eq!(tracker.contribute("Ethel"), 1);
//!
//! // Leaving keeps the contribution on the books until the chat ends.
//! assert_eq!(tracker.leave_current("Ethel"), Some(1));
//! assert_eq!(tracker.terminate("Breadmaking"), 2);
//! ```

pub mod command;
pub mod config;
pub mod index;
pub mod script;
pub mod slow;
pub mod tracker;
pub mod tracker_trait;
pub mod workload;

pub use command::{Command, CommandError, Outcome};
pub use config::TrackerConfig;
pub use script::{Mismatch, Script, ScriptError};
pub use slow::SlowChatTracker;
pub use tracker::ChatTracker;
pub use tracker_trait::Tracker;
pub use workload::Workload;
