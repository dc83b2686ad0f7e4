/// Round controller driving the quiz flow.
pub mod round_service;

pub use round_service::{RoundService, RoundSettings, SharedRoundService};
