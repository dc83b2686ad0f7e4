//! Library crate for trivia-round, exposing the round controller to the terminal front-end and integration tests.

/// Trivia service access.
pub mod client;
/// Runtime configuration.
pub mod config;
/// Terminal front-end.
pub mod console;
/// Best-score persistence.
pub mod dao;
/// Input and output shapes exchanged with presentation layers.
pub mod dto;
/// Controller error type.
pub mod error;
/// Round controller.
pub mod services;
/// Round phases and round data.
pub mod state;
/// Text decoding and shuffling helpers.
pub mod utils;
