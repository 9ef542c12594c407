use crate::{
    error::{Result, VibeWallError},
    history::{traits::HistoryStorage, HISTORY_KEY},
};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the history as a JSON array in `<dir>/vibewall_history.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", HISTORY_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStorage for JsonFileStorage {
    fn read(&self) -> Result<Vec<String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw).map_err(|e| {
            VibeWallError::HistoryError(format!("{}: {}", self.path.display(), e))
        })
    }

    fn write(&self, entries: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        assert!(storage.read().unwrap().is_empty());
        assert!(storage.delete().is_ok());
    }

    #[test]
    fn write_then_read_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        storage.write(&["b".to_string(), "a".to_string()]).unwrap();

        assert_eq!(storage.read().unwrap(), vec!["b", "a"]);
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), r#"["b","a"]"#);
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        fs::write(storage.path(), "{not json").unwrap();
        assert!(matches!(storage.read(), Err(VibeWallError::HistoryError(_))));
    }
}
