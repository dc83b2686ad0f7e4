use thiserror::Error;

/// High-level phases a round can be in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundPhase {
    /// No round is running; the start form is shown.
    Idle,
    /// Token and questions are being requested.
    Loading,
    /// Questions are being shown and answered one at a time.
    Answering,
    /// Every question has been answered; the summary is shown.
    Finished,
    /// Loading failed; the reason is kept for display until the player leaves.
    ErrorStopped {
        /// Human-readable failure reason.
        message: String,
    },
}

/// Events that can be applied to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    /// Validated start request from the form.
    Start,
    /// Replay with the same player after a finished round.
    PlayAgain,
    /// Token and questions arrived and were normalized.
    QuestionsLoaded,
    /// Token or question request failed.
    LoadFailed(String),
    /// An answer was recorded and more questions remain.
    AnswerRecorded,
    /// The last question was answered.
    Complete,
    /// Player left for the start screen.
    Quit,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The phase the state machine was in when the invalid event was received.
    pub from: RoundPhase,
    /// The event that cannot be applied from this phase.
    pub event: RoundEvent,
}

/// Snapshot of the current state machine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Current phase of the state machine.
    pub phase: RoundPhase,
    /// Number of transitions applied so far.
    pub version: usize,
}

/// State machine implementing the round flow.
#[derive(Debug, Clone)]
pub struct RoundStateMachine {
    phase: RoundPhase,
    version: usize,
}

impl Default for RoundStateMachine {
    fn default() -> Self {
        Self {
            phase: RoundPhase::Idle,
            version: 0,
        }
    }
}

impl RoundStateMachine {
    /// Create a new state machine initialised in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    /// Create a snapshot of the current state machine state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase.clone(),
            version: self.version,
        }
    }

    /// Apply `event`, moving to the next phase when the transition is allowed.
    pub fn apply(&mut self, event: RoundEvent) -> Result<RoundPhase, InvalidTransition> {
        let next = self.compute_transition(event)?;
        self.phase = next;
        self.version += 1;
        Ok(self.phase.clone())
    }

    /// Compute a transition from an event if the transition is valid.
    fn compute_transition(&self, event: RoundEvent) -> Result<RoundPhase, InvalidTransition> {
        let next = match (&self.phase, event) {
            (RoundPhase::Idle, RoundEvent::Start) => RoundPhase::Loading,
            (RoundPhase::Finished, RoundEvent::PlayAgain) => RoundPhase::Loading,
            (RoundPhase::Loading, RoundEvent::QuestionsLoaded) => RoundPhase::Answering,
            (RoundPhase::Loading, RoundEvent::LoadFailed(message)) => {
                RoundPhase::ErrorStopped { message }
            }
            (RoundPhase::Answering, RoundEvent::AnswerRecorded) => RoundPhase::Answering,
            (RoundPhase::Answering, RoundEvent::Complete) => RoundPhase::Finished,
            (
                RoundPhase::Loading
                | RoundPhase::Answering
                | RoundPhase::Finished
                | RoundPhase::ErrorStopped { .. },
                RoundEvent::Quit,
            ) => RoundPhase::Idle,
            (from, event) => {
                return Err(InvalidTransition {
                    from: from.clone(),
                    event,
                });
            }
        };

        Ok(next)
    }
}
