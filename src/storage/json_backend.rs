use std::{
    env, fs,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::Result;

use super::StorageBackend;

const SLOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_DIR_NAME: &str = ".spendifix";

/// File-backed slot storage rooted at a data directory: one
/// `<slot>.json` file per slot, written atomically via a temp file and
/// rename.
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// Creates storage rooted at `root`, creating the directory if needed.
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    /// Storage under the default data directory (`$SPENDIFIX_HOME` or
    /// `~/.spendifix`).
    pub fn new_default() -> Result<Self> {
        Self::new(default_data_dir())
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.root.join(format!("{}.{}", slot, SLOT_EXTENSION))
    }
}

/// Returns the application data directory, honouring the
/// `SPENDIFIX_HOME` override and defaulting to `~/.spendifix`.
pub fn default_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("SPENDIFIX_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

impl StorageBackend for JsonFileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, slot: &str, data: &str) -> Result<()> {
        let path = self.slot_path(slot);
        let tmp = tmp_path(&path);
        write_file(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn storage_with_temp_dir() -> (JsonFileStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonFileStorage::new(temp.path().to_path_buf()).expect("storage");
        (storage, temp)
    }

    #[test]
    fn write_and_read_round_trip() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.write("transactions", "[]").expect("write slot");
        let data = storage.read("transactions").expect("read slot");
        assert_eq!(data, Some("[]".to_string()));
    }

    #[test]
    fn missing_slot_reads_as_none() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.read("currency").expect("read slot").is_none());
    }

    #[test]
    fn writes_replace_previous_content() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.write("theme", "\"light\"").expect("first write");
        storage.write("theme", "\"dark\"").expect("second write");
        assert_eq!(
            storage.read("theme").expect("read slot"),
            Some("\"dark\"".to_string())
        );
    }

    #[test]
    fn slot_files_land_under_the_root() {
        let (storage, guard) = storage_with_temp_dir();
        storage.write("transactions", "[]").expect("write slot");
        assert!(guard.path().join("transactions.json").exists());
        assert!(!guard.path().join("transactions.json.tmp").exists());
    }

    #[test]
    fn new_creates_the_root_directory() {
        let temp = TempDir::new().expect("temp dir");
        let nested = temp.path().join("data").join("spendifix");
        let storage = JsonFileStorage::new(nested.clone()).expect("storage");
        storage.write("theme", "\"light\"").expect("write slot");
        assert!(nested.join("theme.json").exists());
    }
}
