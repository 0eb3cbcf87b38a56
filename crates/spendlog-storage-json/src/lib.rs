//! spendlog-storage-json
//!
//! Filesystem-backed key-value store: one JSON document per storage key.

use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use spendlog_core::{CoreError, KeyValueStore, StorageAdapter};
use spendlog_domain::Expense;

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each key as `<root>/<canonical-key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), FILE_EXTENSION))
    }

    /// Keys currently present on disk, sorted.
    pub fn list_keys(&self) -> Result<Vec<String>, CoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Convenience wrapper producing the fail-soft adapter the store expects.
    pub fn into_adapter(self) -> StorageAdapter<Self> {
        StorageAdapter::new(self)
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::trace!(key, path = %path.display(), "stored value");
        Ok(())
    }
}

/// Writes an expense list to an arbitrary path, e.g. for exports.
pub fn save_expenses_to_path(expenses: &[Expense], path: &Path) -> Result<(), CoreError> {
    let json = serde_json::to_string_pretty(expenses)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reads an expense list previously written by [`save_expenses_to_path`] or
/// by the store itself.
pub fn load_expenses_from_path(path: &Path) -> Result<Vec<Expense>, CoreError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches(|c| c == '_' || c == '-').is_empty() {
        "store".into()
    } else {
        sanitized
    }
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

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_keeps_dashes_and_replaces_the_rest() {
        assert_eq!(canonical_key("budget-expenses"), "budget-expenses");
        assert_eq!(canonical_key(" My Settings/2 "), "my_settings_2");
        assert_eq!(canonical_key("///"), "store");
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/data/budget-settings.json"));
        assert_eq!(tmp, PathBuf::from("/data/budget-settings.json.tmp"));
    }
}
