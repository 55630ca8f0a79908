//! Core types and traits for the nag to-do manager.
//!
//! This crate provides the task data model, the task store with its
//! dense-id invariant, the persistence seam, and user-level configuration.

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::{nag_home, NagConfig, ReminderSettings, CONFIG_FILE, DATA_FILE};
pub use error::{Error, Result};
pub use store::{SnapshotStore, TaskStore};
pub use types::{Status, Task};
