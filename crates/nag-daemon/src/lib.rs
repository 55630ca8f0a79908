//! Background reminder daemon for the nag to-do manager.
//!
//! Provides the reminder loop that periodically reads the shared task
//! store and emits a notification for every task that is not complete.
//!
//! # Features
//!
//! - **Fixed-interval sweeps**: Wakes on a configurable interval and reads
//!   a shared view of the task store
//! - **Pluggable delivery**: Notifications go through the [`Notifier`]
//!   trait, so backends are swappable and testable
//! - **Graceful shutdown**: [`ReminderHandle::stop`] ends the loop; it
//!   also stops on its own when every handle has been dropped
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use nag_core::TaskStore;
//! use nag_daemon::{Reminder, ReminderConfig};
//! use tokio::sync::RwLock;
//! # struct NoopNotifier;
//! # #[async_trait::async_trait]
//! # impl nag_daemon::Notifier for NoopNotifier {
//! #     async fn notify(&self, _: &str, _: &str, _: u32) -> nag_core::Result<()> { Ok(()) }
//! # }
//!
//! # async fn example(store: Arc<RwLock<TaskStore>>) {
//! let (reminder, handle) =
//!     Reminder::new(store, Arc::new(NoopNotifier), ReminderConfig::default());
//! let join = reminder.run();
//! // ... interactive work ...
//! handle.stop().await;
//! let _ = join.await;
//! # }
//! ```

pub mod notify;
pub mod reminder;

pub use notify::Notifier;
pub use reminder::{
    reminder_message, Reminder, ReminderConfig, ReminderHandle, DEFAULT_INTERVAL_SECS,
    DEFAULT_NOTIFY_TIMEOUT_SECS, REMINDER_TITLE,
};
