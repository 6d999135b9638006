use std::{path::PathBuf, sync::Mutex};

use budget_tracker::{config::Config, storage::JsonFileStore, Session};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a session backed by a JSON store at `path`.
pub fn open_session(path: &PathBuf) -> (Session, Vec<String>) {
    let store = JsonFileStore::open(path).expect("open json store");
    Session::open(Box::new(store), &Config::default()).expect("open session")
}
