//! The task store: owns the ordered list and keeps its ids dense.
//!
//! All mutations go through [`TaskStore`]. Every mutation that changes list
//! content finishes by saving the full list through the injected
//! [`SnapshotStore`]; failed operations leave the list untouched and save
//! nothing.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::Task;

/// Persistence collaborator for the task list.
///
/// `load` returns an empty list when no prior state exists. Implementations
/// drop records they cannot decode instead of failing the whole load.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Replace any previously saved snapshot with `tasks`.
    async fn save(&self, tasks: &[Task]) -> Result<()>;

    /// Load the most recently saved snapshot.
    async fn load(&self) -> Result<Vec<Task>>;
}

/// Owns the ordered task list and enforces the dense-id invariant:
/// after any mutation, sorting tasks by id yields `1..=N` with no gaps.
pub struct TaskStore {
    tasks: Vec<Task>,
    snapshots: Box<dyn SnapshotStore>,
}

impl TaskStore {
    /// Create an empty store backed by `snapshots`.
    pub fn new(snapshots: Box<dyn SnapshotStore>) -> Self {
        Self {
            tasks: Vec::new(),
            snapshots,
        }
    }

    /// Restore a store from whatever `snapshots` has persisted.
    ///
    /// Loading does not renumber and does not save: the list is taken
    /// exactly as the collaborator returns it.
    pub async fn open(snapshots: Box<dyn SnapshotStore>) -> Result<Self> {
        let tasks = snapshots.load().await?;
        Ok(Self { tasks, snapshots })
    }

    /// Add one task per non-empty trimmed line of `input`.
    ///
    /// Each new task gets a fresh id (current max + 1) and status
    /// `Incomplete`; afterwards the whole list is renumbered and saved.
    /// Returns the added tasks as they exist after renumbering.
    pub async fn add(&mut self, input: &str) -> Result<Vec<Task>> {
        let descriptions: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if descriptions.is_empty() {
            return Err(Error::EmptyInput);
        }

        for description in descriptions.iter() {
            let task = Task::new(self.next_id(), *description);
            self.tasks.push(task);
        }
        self.renumber();
        self.save().await?;

        let start = self.tasks.len() - descriptions.len();
        Ok(self.tasks[start..].to_vec())
    }

    /// Replace the description of the task at `index`, preserving its id
    /// and status.
    pub async fn edit(&mut self, index: usize, new_description: &str) -> Result<Task> {
        self.ensure_selected(index)?;
        let description = new_description.trim();
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        self.tasks[index].description = description.to_string();
        self.save().await?;
        Ok(self.tasks[index].clone())
    }

    /// Remove the task at `index` and renumber. Returns the removed task
    /// with the id it was displayed under.
    pub async fn delete(&mut self, index: usize) -> Result<Task> {
        self.ensure_selected(index)?;
        let removed = self.tasks.remove(index);
        self.renumber();
        self.save().await?;
        Ok(removed)
    }

    /// Advance the status of the task at `index` one step along the cycle
    /// `Incomplete -> In-Progress -> Complete -> Incomplete`.
    pub async fn cycle_status(&mut self, index: usize) -> Result<Task> {
        self.ensure_selected(index)?;
        self.tasks[index].status = self.tasks[index].status.cycled();
        self.save().await?;
        Ok(self.tasks[index].clone())
    }

    /// Remove every task. The yes/no confirmation gate belongs to the
    /// caller; the store assumes consent. Returns how many tasks were
    /// removed.
    pub async fn clear(&mut self) -> Result<usize> {
        let removed = self.tasks.len();
        self.tasks.clear();
        self.renumber();
        self.save().await?;
        Ok(removed)
    }

    /// Persist the full current list through the snapshot collaborator.
    pub async fn save(&self) -> Result<()> {
        self.snapshots.save(&self.tasks).await
    }

    /// The tasks in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Reassign ids as `1, 2, 3, ...` over the tasks sorted by their
    /// current ids. Sorting by old id first keeps earlier-created tasks
    /// numbered lower no matter how the list was reshaped by deletions.
    fn renumber(&mut self) {
        self.tasks.sort_by_key(|task| task.id);
        for (position, task) in self.tasks.iter_mut().enumerate() {
            task.id = position as u32 + 1;
        }
    }

    /// One past the current maximum id, saturating at the `u32` ceiling.
    /// A saturated duplicate is harmless: the stable sort in `renumber`
    /// keeps the older task first.
    fn next_id(&self) -> u32 {
        self.tasks
            .iter()
            .map(|task| task.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }

    fn ensure_selected(&self, index: usize) -> Result<()> {
        if index >= self.tasks.len() {
            return Err(Error::Selection {
                index,
                count: self.tasks.len(),
            });
        }
        Ok(())
    }
}
