//! Failures of the key-value backends behind the progress store.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias for slot operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Slot operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    /// Reading a slot.
    Read,
    /// Writing a slot, including creating its directory.
    Write,
    /// Deleting a slot.
    Remove,
}

impl SlotAction {
    fn as_str(self) -> &'static str {
        match self {
            SlotAction::Read => "read",
            SlotAction::Write => "write",
            SlotAction::Remove => "remove",
        }
    }
}

/// Error raised by a key-value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage area rejected the operation (permissions, full disk, not a directory).
    #[error("cannot {} slot at `{}`", .action.as_str(), .path.display())]
    Io {
        /// Operation being attempted.
        action: SlotAction,
        /// File backing the slot.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The storage area is switched off for this session.
    #[error("storage disabled")]
    Disabled,
}

impl StorageError {
    /// Wrap an I/O failure on the slot stored at `path`.
    pub fn io(action: SlotAction, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
