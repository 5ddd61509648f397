use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::r#trait::{KeyValueStorage, StorageError};

/// Directory-backed key/value storage: one `<key>.json` file per key.
///
/// Writes land in a temporary sibling file that is then renamed over the
/// target, so a crash mid-write never leaves a truncated value behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tablebook-file-storage-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn missing_file_reads_as_none() {
        let storage = FileStorage::new(scratch_dir("missing"));
        assert!(storage.get("milos-reservations").unwrap().is_none());
    }

    #[test]
    fn set_creates_directory_and_round_trips() {
        let dir = scratch_dir("roundtrip");
        let storage = FileStorage::new(&dir);
        storage.set("milos-reservations", "[]").unwrap();
        assert_eq!(
            storage.get("milos-reservations").unwrap().as_deref(),
            Some("[]")
        );
        assert!(dir.join("milos-reservations.json").exists());
        assert!(!dir.join(".milos-reservations.json.tmp").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let storage = FileStorage::new(scratch_dir("keys"));
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(storage.get(key), Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
