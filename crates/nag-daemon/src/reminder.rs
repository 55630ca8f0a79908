//! The reminder loop: fixed-interval sweeps over the shared task store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, warn};

use nag_core::{Task, TaskStore};

use crate::notify::Notifier;

/// Notification title used for every reminder.
pub const REMINDER_TITLE: &str = "Task Reminder";

/// Default seconds between reminder sweeps.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Default timeout hint handed to the notification backend, in seconds.
pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u32 = 10;

/// Reminder loop configuration.
#[derive(Debug, Clone)]
pub struct ReminderConfig {
    /// How long to wait between sweeps.
    pub interval: Duration,

    /// Timeout hint passed through to the notifier, in seconds.
    pub notify_timeout_secs: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            notify_timeout_secs: DEFAULT_NOTIFY_TIMEOUT_SECS,
        }
    }
}

/// The reminder message for one task description.
pub fn reminder_message(description: &str) -> String {
    format!("Reminder: Complete your task - '{}'!", description)
}

/// Handle used to stop a running [`Reminder`].
///
/// Cloneable. The loop stops when [`stop`](Self::stop) is called or when
/// every handle has been dropped, so it can never outlive the surface
/// that holds the handles.
#[derive(Clone)]
pub struct ReminderHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl ReminderHandle {
    /// Ask the loop to stop. Returns once the signal is queued; await the
    /// join handle returned by [`Reminder::run`] to observe the exit.
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Background task that wakes on a fixed interval and emits one
/// notification per task whose status is not `Complete`.
pub struct Reminder {
    store: Arc<RwLock<TaskStore>>,
    notifier: Arc<dyn Notifier>,
    config: ReminderConfig,
    shutdown_rx: mpsc::Receiver<()>,
}

impl Reminder {
    /// Create a reminder over a shared store view, along with the handle
    /// that stops it.
    pub fn new(
        store: Arc<RwLock<TaskStore>>,
        notifier: Arc<dyn Notifier>,
        config: ReminderConfig,
    ) -> (Self, ReminderHandle) {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        (
            Self {
                store,
                notifier,
                config,
                shutdown_rx,
            },
            ReminderHandle { shutdown_tx },
        )
    }

    /// Spawn the loop onto the runtime.
    ///
    /// The first sweep happens one full interval after start, never
    /// immediately. A zero interval is raised to one millisecond.
    pub fn run(mut self) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Reminder loop started (interval: {}s)",
                self.config.interval.as_secs()
            );

            // tokio's interval panics on a zero period
            let period = self.config.interval.max(Duration::from_millis(1));
            let mut ticks = interval_at(Instant::now() + period, period);

            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        self.sweep().await;
                    }
                    _ = self.shutdown_rx.recv() => {
                        // Fires on an explicit stop and when the last
                        // handle is dropped.
                        break;
                    }
                }
            }

            info!("Reminder loop stopped");
        })
    }

    /// One wake cycle: snapshot the pending tasks under a read lock, drop
    /// the lock, then notify task by task. The snapshot may be stale by up
    /// to one interval; a task deleted after the snapshot still gets its
    /// reminder, which is accepted behavior.
    async fn sweep(&self) {
        let pending: Vec<Task> = {
            let store = self.store.read().await;
            store
                .tasks()
                .iter()
                .filter(|task| task.is_pending())
                .cloned()
                .collect()
        };

        debug!("Reminder sweep: {} pending task(s)", pending.len());

        for task in pending {
            let message = reminder_message(&task.description);
            if let Err(e) = self
                .notifier
                .notify(REMINDER_TITLE, &message, self.config.notify_timeout_secs)
                .await
            {
                warn!("Failed to deliver reminder for task #{}: {}", task.id, e);
            }
        }
    }
}
