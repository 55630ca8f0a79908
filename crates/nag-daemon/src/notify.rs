//! Notification delivery seam.

use async_trait::async_trait;
use nag_core::Result;

/// Delivers one user-facing notification.
///
/// The reminder loop treats delivery as fire-and-forget: an `Err` from
/// [`notify`](Self::notify) is logged and the sweep moves on to the next
/// task, so implementations should fail fast rather than retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification. `timeout_secs` is a hint for how long the
    /// notification should stay visible; backends may ignore it.
    async fn notify(&self, title: &str, message: &str, timeout_secs: u32) -> Result<()>;
}
