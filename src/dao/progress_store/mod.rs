#[cfg(feature = "file-store")]
mod file;
mod memory;

#[cfg(feature = "file-store")]
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

use futures::future::BoxFuture;

use crate::dao::storage::StorageResult;

/// String-valued key-value slot storage, the persistence seam of the progress store.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot; `None` when it was never written.
    fn get(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>>;
    /// Overwrite a slot.
    fn set(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Delete a slot; removing a missing slot succeeds.
    fn remove(&self, key: &str) -> BoxFuture<'static, StorageResult<()>>;
}
