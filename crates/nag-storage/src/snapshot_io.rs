//! Snapshot I/O for the task list JSON file.
//!
//! The whole task list lives in a single JSON array; each record carries
//! exactly the fields `id`, `description`, and `status`. Records that fail
//! to decode are dropped on load so one bad entry never loses the rest.

use async_trait::async_trait;
use nag_core::{Result, SnapshotStore, Task};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Read the task snapshot from `path`.
///
/// Records are decoded individually: any record missing one of the three
/// required fields (or carrying a value of the wrong shape) is dropped,
/// and the dropped count is logged as a warning. A missing file is an
/// empty list, not an error; a file whose top level is not a JSON array
/// fails the whole load.
///
/// # Arguments
/// * `path` - Full path to the snapshot JSON file
///
/// # Returns
/// * `Ok(Vec<Task>)` - All decodable tasks, in file order
/// * `Err(Error)` - File I/O error, or the file is not a JSON array
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use nag_storage::read_snapshot;
///
/// #[tokio::main]
/// async fn main() -> nag_core::Result<()> {
///     let tasks = read_snapshot(Path::new("tasks.json")).await?;
///     println!("Loaded {} tasks", tasks.len());
///     Ok(())
/// }
/// ```
pub async fn read_snapshot(path: &Path) -> Result<Vec<Task>> {
    debug!("Reading task snapshot: {}", path.display());

    let data = match fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Snapshot file does not exist, returning empty list");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let records: Vec<serde_json::Value> = serde_json::from_slice(&data)?;
    let total = records.len();

    let mut tasks = Vec::with_capacity(total);
    for record in records {
        // Decode record by record so one bad entry is skipped, not fatal
        match serde_json::from_value::<Task>(record) {
            Ok(task) => tasks.push(task),
            Err(e) => {
                debug!("Skipping malformed task record: {}", e);
            }
        }
    }

    let dropped = total - tasks.len();
    if dropped > 0 {
        warn!(
            "Dropped {} malformed task record(s) from {}",
            dropped,
            path.display()
        );
    }

    debug!("Successfully read {} task(s)", tasks.len());
    Ok(tasks)
}

/// Write the full task list to `path` as a pretty-printed JSON array.
///
/// Creates parent directories if they don't exist.
///
/// # Arguments
/// * `path` - Full path to the snapshot JSON file
/// * `tasks` - The complete task list to persist
///
/// # Returns
/// * `Ok(())` - Successfully written
/// * `Err(Error)` - Directory creation error or write error
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use nag_core::Task;
/// use nag_storage::write_snapshot;
///
/// #[tokio::main]
/// async fn main() -> nag_core::Result<()> {
///     let tasks = vec![Task::new(1, "Buy milk")];
///     write_snapshot(Path::new("tasks.json"), &tasks).await?;
///     Ok(())
/// }
/// ```
pub async fn write_snapshot(path: &Path, tasks: &[Task]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let data = serde_json::to_vec_pretty(tasks)?;

    debug!("Writing {} task(s) to {}", tasks.len(), path.display());
    fs::write(path, data).await?;

    Ok(())
}

/// [`SnapshotStore`] backed by a single JSON file on disk.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn save(&self, tasks: &[Task]) -> Result<()> {
        write_snapshot(&self.path, tasks).await
    }

    async fn load(&self) -> Result<Vec<Task>> {
        read_snapshot(&self.path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nag_core::{Error, Status};
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_tasks() -> Vec<Task> {
        let mut second = Task::new(2, "Call Alice");
        second.status = Status::InProgress;
        vec![Task::new(1, "Buy milk"), second]
    }

    #[tokio::test]
    async fn test_write_and_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");
        let tasks = sample_tasks();

        write_snapshot(&path, &tasks).await.unwrap();
        let loaded = read_snapshot(&path).await.unwrap();

        assert_eq!(loaded, tasks);
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty_list() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("does-not-exist.json");

        let loaded = read_snapshot(&path).await.unwrap();

        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_records_are_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");

        let records = json!([
            {"id": 1, "description": "Buy milk", "status": "Incomplete"},
            {"id": 2, "description": "No status field"},
            {"id": 3, "status": "Complete"},
            {"description": "No id", "status": "Incomplete"},
            {"id": 4, "description": "Bogus status", "status": "Someday"},
            {"id": 5, "description": "Call Alice", "status": "In-Progress"},
        ]);
        fs::write(&path, serde_json::to_vec(&records).unwrap())
            .await
            .unwrap();

        let loaded = read_snapshot(&path).await.unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].description, "Buy milk");
        assert_eq!(loaded[1].description, "Call Alice");
        assert_eq!(loaded[1].status, Status::InProgress);
    }

    #[tokio::test]
    async fn test_extra_fields_are_tolerated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");

        let records = json!([
            {"id": 1, "description": "Buy milk", "status": "Incomplete", "note": "legacy"},
        ]);
        fs::write(&path, serde_json::to_vec(&records).unwrap())
            .await
            .unwrap();

        let loaded = read_snapshot(&path).await.unwrap();

        assert_eq!(loaded, vec![Task::new(1, "Buy milk")]);
    }

    #[tokio::test]
    async fn test_non_array_snapshot_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");
        fs::write(&path, b"{\"id\": 1}").await.unwrap();

        let err = read_snapshot(&path).await.unwrap_err();

        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("deeper").join("tasks.json");

        write_snapshot(&path, &sample_tasks()).await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_snapshot_store_trait_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonSnapshotStore::new(temp_dir.path().join("tasks.json"));
        let tasks = sample_tasks();

        store.save(&tasks).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded, tasks);
    }
}
