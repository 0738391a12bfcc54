//! 基于 JSON 文件的键值存储
//!
//! 文件内容是一个 `{ key: value }` 对象，每次写入都会整体重写（先写临时文件再重命名）

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::StorageError;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 打开状态文件，父目录不存在时一并创建
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self::new(path);
        if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: store.path.clone(),
                source,
            })?;
        }
        Ok(store)
    }

    /// 文件不存在时视为空存储
    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// 写入前读取：内容无法解析时按空存储处理，随后的写入会覆盖它
    ///
    /// 返回值的第二项表示文件是否被重置
    fn read_entries_for_update(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
        match self.read_entries() {
            Ok(entries) => Ok((entries, false)),
            Err(StorageError::Serde(e)) => {
                warn!("⚠️ 状态文件 {} 内容无效，将被覆盖: {}", self.path.display(), e);
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("tmp");

        fs::write(&tmp_path, content)
            .and_then(|_| fs::rename(&tmp_path, &self.path))
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })?;

        debug!("状态文件已更新: {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let (mut entries, _) = self.read_entries_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let (mut entries, reset) = self.read_entries_for_update()?;
        if entries.remove(key).is_some() || reset {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));

        assert_eq!(store.get("selectedQuestions").unwrap(), None);
    }

    #[test]
    fn test_values_survive_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = FileStore::new(&path);
        store.set("selectedQuestions", r#"["0","2"]"#).unwrap();
        store.set("other", "x").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("selectedQuestions").unwrap().as_deref(),
            Some(r#"["0","2"]"#)
        );
    }

    #[test]
    fn test_remove_deletes_only_that_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("state.json"));
        store.set("selectedQuestions", "[]").unwrap();
        store.set("other", "x").unwrap();

        tokio_test::assert_ok!(store.remove("selectedQuestions"));
        tokio_test::assert_ok!(store.remove("never-set"));

        assert_eq!(store.get("selectedQuestions").unwrap(), None);
        assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        let err = tokio_test::assert_err!(store.get("k"));
        assert!(matches!(err, StorageError::Serde(_)));
    }

    #[test]
    fn test_corrupt_file_is_overwritten_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ truncated").unwrap();

        let mut store = FileStore::new(&path);
        tokio_test::assert_ok!(store.set("selectedQuestions", r#"["1"]"#));

        assert_eq!(
            store.get("selectedQuestions").unwrap().as_deref(),
            Some(r#"["1"]"#)
        );
    }

    #[test]
    fn test_remove_resets_a_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ truncated").unwrap();

        let mut store = FileStore::new(&path);
        tokio_test::assert_ok!(store.remove("selectedQuestions"));

        assert_eq!(store.get("selectedQuestions").unwrap(), None);
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");
    }

    #[test]
    fn test_open_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut store = tokio_test::assert_ok!(FileStore::open(&path));
        store.set("k", "v").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = tokio_test::assert_err!(FileStore::open(blocker.join("state.json")));
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
