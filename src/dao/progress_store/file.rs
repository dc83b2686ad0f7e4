use std::{io::ErrorKind, path::PathBuf, sync::Arc};

use futures::future::BoxFuture;
use tokio::fs;

use super::KeyValueStore;
use crate::dao::storage::{SlotAction, StorageError, StorageResult};

/// Key-value store keeping one `<key>.json` file per slot inside a directory.
#[derive(Clone)]
pub struct FileKeyValueStore {
    dir: Arc<PathBuf>,
}

impl FileKeyValueStore {
    /// Use `dir` as the storage area; it is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir.into()),
        }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>> {
        let path = self.slot_path(key);
        Box::pin(async move {
            match fs::read_to_string(&path).await {
                Ok(contents) => Ok(Some(contents)),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(err) => Err(StorageError::io(SlotAction::Read, &path, err)),
            }
        })
    }

    fn set(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>> {
        let dir = Arc::clone(&self.dir);
        let path = self.slot_path(key);
        Box::pin(async move {
            fs::create_dir_all(dir.as_path())
                .await
                .map_err(|err| StorageError::io(SlotAction::Write, dir.as_path(), err))?;
            fs::write(&path, value)
                .await
                .map_err(|err| StorageError::io(SlotAction::Write, &path, err))
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.slot_path(key);
        Box::pin(async move {
            match fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(StorageError::io(SlotAction::Remove, &path, err)),
            }
        })
    }
}
