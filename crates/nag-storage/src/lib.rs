//! Nag Storage - Snapshot persistence for the nag to-do manager
//!
//! This crate provides the file-backed implementation of the task store's
//! persistence seam: the whole task list is written to a single JSON file
//! on every save and re-read on open.
//!
//! # Overview
//!
//! The snapshot format is deliberately dumb:
//! - One pretty-printed JSON array holding the complete list
//! - Each record carries exactly `id`, `description`, and `status`
//! - A missing file loads as an empty list
//! - Records that fail to decode are dropped on load, with the dropped
//!   count logged, so one bad entry never loses the rest
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │         Application Layer                   │
//! │  (CLI session, reminder loop)               │
//! └─────────────────┬───────────────────────────┘
//!                   │ SnapshotStore trait
//! ┌─────────────────▼───────────────────────────┐
//! │         Nag Storage (this crate)            │
//! │  • JsonSnapshotStore                        │
//! │  • read_snapshot / write_snapshot           │
//! │  • per-record validation on load            │
//! └─────────────────┬───────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────┐
//! │         JSON file                           │
//! │  • ~/.nag/tasks.json                        │
//! │  • full list rewritten on every save        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use nag_core::{SnapshotStore, Task};
//! use nag_storage::JsonSnapshotStore;
//!
//! # async fn example() -> nag_core::Result<()> {
//! let store = JsonSnapshotStore::new("tasks.json");
//!
//! store.save(&[Task::new(1, "Buy milk")]).await?;
//! let tasks = store.load().await?;
//! assert_eq!(tasks.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod snapshot_io;

// Re-export the file-backed store and its free functions for convenience
pub use snapshot_io::{read_snapshot, write_snapshot, JsonSnapshotStore};
