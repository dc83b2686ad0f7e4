/// Persisted record shapes.
pub mod models;
/// Best-score persistence with error-swallowing semantics.
pub mod progress;
/// Key-value backends holding the serialized best record.
pub mod progress_store;
/// Storage error types shared by every backend.
pub mod storage;
