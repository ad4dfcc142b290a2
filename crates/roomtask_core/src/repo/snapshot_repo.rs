//! Snapshot repository contracts and implementations.
//!
//! # Responsibility
//! - Provide load/save APIs over the `rooms` and `tasks` buckets.
//! - Keep serialization and file-layout details inside this module.
//!
//! # Invariants
//! - The two buckets are independent; there is no cross-bucket transaction.
//!   A crash between two saves can leave them inconsistent, which the store
//!   repairs on the next open.
//! - A missing or unreadable bucket loads as the default seed for that
//!   bucket only. I/O failures other than not-found still propagate.

use crate::model::room::Room;
use crate::model::task::Task;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Newest bucket layout written by `save`.
const SNAPSHOT_VERSION: u32 = 1;

const ROOMS_BUCKET: &str = "rooms";
const TASKS_BUCKET: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for snapshot load/save operations.
#[derive(Debug)]
pub enum RepoError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize snapshot: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Two-bucket snapshot storage contract.
///
/// Every save rewrites the named bucket from the full post-mutation
/// collection; loads return complete collections, falling back to the
/// per-bucket default seed when prior contents are absent or unreadable.
pub trait SnapshotRepository {
    fn load_rooms(&self) -> RepoResult<Vec<Room>>;
    fn load_tasks(&self) -> RepoResult<Vec<Task>>;
    fn save_rooms(&self, rooms: &[Room]) -> RepoResult<()>;
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// Versioned on-disk bucket layout.
///
/// A bare top-level JSON array is also accepted on load as the legacy
/// pre-versioning layout.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEnvelope<T> {
    version: u32,
    items: Vec<T>,
}

/// File-backed snapshot repository.
///
/// Stores each bucket as `<data_dir>/<bucket>.json`. Writes go to a
/// sibling temp file first and are renamed into place so one bucket is
/// never left torn mid-write.
pub struct JsonSnapshotRepository {
    data_dir: PathBuf,
}

impl JsonSnapshotRepository {
    /// Opens a repository rooted at `data_dir`, creating the directory
    /// when it does not exist yet.
    pub fn open(data_dir: impl AsRef<Path>) -> RepoResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn bucket_path(&self, bucket: &str) -> PathBuf {
        self.data_dir.join(format!("{bucket}.json"))
    }

    fn load_bucket<T, F>(&self, bucket: &str, seed: F) -> RepoResult<Vec<T>>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Vec<T>,
    {
        let path = self.bucket_path(bucket);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("event=snapshot_load module=repo status=seed bucket={bucket}");
                return Ok(seed());
            }
            Err(err) => return Err(err.into()),
        };

        match parse_bucket(&raw) {
            Some(items) => {
                debug!(
                    "event=snapshot_load module=repo status=ok bucket={bucket} count={}",
                    items.len()
                );
                Ok(items)
            }
            None => {
                warn!(
                    "event=snapshot_load module=repo status=fallback bucket={bucket} \
                     error_code=unreadable_snapshot path={}",
                    path.display()
                );
                Ok(seed())
            }
        }
    }

    fn save_bucket<T: Serialize>(&self, bucket: &str, items: &[T]) -> RepoResult<()> {
        let envelope = SnapshotEnvelope {
            version: SNAPSHOT_VERSION,
            items: items.iter().collect::<Vec<_>>(),
        };
        let raw = serde_json::to_vec_pretty(&envelope).map_err(RepoError::Serialize)?;

        let path = self.bucket_path(bucket);
        let tmp_path = self.data_dir.join(format!("{bucket}.json.tmp"));
        std::fs::write(&tmp_path, raw)?;
        std::fs::rename(&tmp_path, &path)?;

        debug!(
            "event=snapshot_save module=repo status=ok bucket={bucket} count={}",
            items.len()
        );
        Ok(())
    }
}

impl SnapshotRepository for JsonSnapshotRepository {
    fn load_rooms(&self) -> RepoResult<Vec<Room>> {
        self.load_bucket(ROOMS_BUCKET, || vec![Room::general()])
    }

    fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        self.load_bucket(TASKS_BUCKET, Vec::new)
    }

    fn save_rooms(&self, rooms: &[Room]) -> RepoResult<()> {
        self.save_bucket(ROOMS_BUCKET, rooms)
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        self.save_bucket(TASKS_BUCKET, tasks)
    }
}

/// Accepts the current envelope layout or the legacy bare-array layout.
///
/// Returns `None` for anything unreadable, including an envelope written
/// by a newer layout version than this build understands.
fn parse_bucket<T: DeserializeOwned>(raw: &str) -> Option<Vec<T>> {
    if let Ok(envelope) = serde_json::from_str::<SnapshotEnvelope<T>>(raw) {
        if envelope.version > SNAPSHOT_VERSION {
            return None;
        }
        return Some(envelope.items);
    }
    serde_json::from_str::<Vec<T>>(raw).ok()
}

/// In-memory snapshot repository for tests and smoke probes.
///
/// Starts from the first-run seed; saves replace the stored bucket.
#[derive(Default)]
pub struct MemorySnapshotRepository {
    rooms: RefCell<Option<Vec<Room>>>,
    tasks: RefCell<Option<Vec<Task>>>,
}

impl MemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotRepository for MemorySnapshotRepository {
    fn load_rooms(&self) -> RepoResult<Vec<Room>> {
        Ok(self
            .rooms
            .borrow()
            .clone()
            .unwrap_or_else(|| vec![Room::general()]))
    }

    fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        Ok(self.tasks.borrow().clone().unwrap_or_default())
    }

    fn save_rooms(&self, rooms: &[Room]) -> RepoResult<()> {
        *self.rooms.borrow_mut() = Some(rooms.to_vec());
        Ok(())
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        *self.tasks.borrow_mut() = Some(tasks.to_vec());
        Ok(())
    }
}
