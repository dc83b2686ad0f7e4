/// Data of the round in progress.
pub mod round;
/// Phases, events and transition rules of a round.
pub mod state_machine;

pub use self::round::{Question, RoundState};
pub use self::state_machine::{
    InvalidTransition, RoundEvent, RoundPhase, RoundStateMachine, Snapshot,
};
