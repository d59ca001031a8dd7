//! Persisted integers, and the win counter built on top of them.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::runner::RunResult;

pub const TOTAL_WINS_KEY: &str = "totalWins";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("{path:?} is not a valid store file: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode store: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal get/set of named integers.
pub trait KeyValueStore {
    fn get_int(&self, key: &str) -> Result<Option<u64>, StoreError>;
    fn set_int(&mut self, key: &str, value: u64) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Flat JSON object of integers kept in a single file.
///
/// The whole object is rewritten on every `set_int`, through a temporary file
/// renamed over the old one.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, u64>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let values = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no store at {:?} yet, starting empty", path);
                BTreeMap::new()
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let write_err = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(write_err)?;
            }
        }

        let json = serde_json::to_vec_pretty(&self.values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_int(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

/// Total wins across every round ever played.
#[derive(Debug)]
pub struct WinCounter<S: KeyValueStore> {
    store: S,
    total: u64,
}

impl<S: KeyValueStore> WinCounter<S> {
    pub fn load(store: S) -> Result<Self, StoreError> {
        let total = store.get_int(TOTAL_WINS_KEY)?.unwrap_or(0);
        info!("loaded win counter: {} total wins", total);

        Ok(Self { store, total })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Counts `result` if the bunny made it to the goal.
    /// Returns whether it was counted.
    pub fn record(&mut self, result: &RunResult) -> Result<bool, StoreError> {
        if !result.is_win() {
            return Ok(false);
        }

        let total = self.total + 1;
        self.store.set_int(TOTAL_WINS_KEY, total)?;
        self.total = total;
        info!("win recorded, {} total", total);

        Ok(true)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod test_store {
    use super::*;
    use crate::grids::obstacle_grid::Maze;
    use crate::grids::Direction::*;
    use crate::runner;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

    fn scratch_path(name: &str) -> PathBuf {
        let n = NEXT_FILE.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir()
            .join(format!("bunny-maze-test-{}-{}", std::process::id(), n))
            .join(name)
    }

    #[test]
    fn memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_int("a").unwrap(), None);
        store.set_int("a", 3).unwrap();
        assert_eq!(store.get_int("a").unwrap(), Some(3));
    }

    #[test]
    fn counter_counts_wins_only() {
        let mut maze = Maze::with_size(3);
        maze.set_obstacle(maze.goal().step_clamped(Up, 3), true);
        let mut wins = WinCounter::load(MemoryStore::new()).unwrap();

        let win = runner::run(&maze, &[Down, Down, Right, Right]);
        let bump = runner::run(&maze, &[Right, Right, Down]);
        let short = runner::run(&maze, &[Down]);

        assert!(!wins.record(&bump).unwrap());
        assert!(!wins.record(&short).unwrap());
        assert_eq!(wins.total(), 0);

        assert!(wins.record(&win).unwrap());
        assert_eq!(wins.total(), 1);
        assert_eq!(wins.store().get_int(TOTAL_WINS_KEY).unwrap(), Some(1));

        assert!(wins.record(&win).unwrap());
        assert_eq!(wins.total(), 2);
    }

    #[test]
    fn json_store_survives_reopen() {
        let path = scratch_path("wins.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get_int(TOTAL_WINS_KEY).unwrap(), None);
        store.set_int(TOTAL_WINS_KEY, 41).unwrap();
        store.set_int("other", 2).unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get_int(TOTAL_WINS_KEY).unwrap(), Some(41));
        assert_eq!(reopened.get_int("other").unwrap(), Some(2));

        let mut wins = WinCounter::load(reopened).unwrap();
        assert_eq!(wins.total(), 41);
        let win = runner::run(&Maze::with_size(1), &[]);
        wins.record(&win).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get_int(TOTAL_WINS_KEY).unwrap(), Some(42));

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = scratch_path("wins.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{ not json").unwrap();

        match JsonFileStore::open(&path) {
            Err(StoreError::Corrupt { .. }) => {}
            other => panic!("expected corrupt store, got {:?}", other),
        }

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
