use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::DiaryResult;

/// File-backed key-value store, one file per key under a root directory.
///
/// Values are opaque strings; callers own the serialization. A missing key
/// reads as `None` rather than an error.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn get(&self, key: &str) -> DiaryResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> DiaryResult<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn get_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("food_log").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("food_log", "[1,2,3]").unwrap();
        assert_eq!(store.get("food_log").unwrap().as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn set_creates_the_root_directory() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("data"));
        store.set("food_log", "[]").unwrap();
        assert_eq!(store.get("food_log").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("food_log", "old").unwrap();
        store.set("food_log", "new").unwrap();
        assert_eq!(store.get("food_log").unwrap().as_deref(), Some("new"));
    }
}
