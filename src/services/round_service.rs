//! Round controller: the single owner of round state.
//!
//! Presentation layers call the entry points below and draw the returned
//! [`RoundView`]; they never touch the state directly.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::{
    client::{QuestionQuery, TriviaError, TriviaResult, TriviaSource},
    dao::{models::BestRecord, progress::ProgressStore},
    dto::{
        start::{Player, StartRequest},
        view::RoundView,
    },
    error::ServiceError,
    state::{
        InvalidTransition, Question, RoundEvent, RoundPhase, RoundState, RoundStateMachine,
        Snapshot,
    },
};

/// Number of questions requested per round when not configured.
pub const DEFAULT_ROUND_AMOUNT: u32 = 10;

/// Controller handle shared between the presentation layer and background tasks.
pub type SharedRoundService = Arc<RoundService>;

/// Tunables of the round flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSettings {
    /// Questions requested per round.
    pub amount: u32,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            amount: DEFAULT_ROUND_AMOUNT,
        }
    }
}

#[derive(Default)]
struct RoundSession {
    machine: RoundStateMachine,
    round: Option<RoundState>,
}

/// Owns the state machine, the current round, and the cached session token.
pub struct RoundService {
    source: Arc<dyn TriviaSource>,
    progress: ProgressStore,
    settings: RoundSettings,
    token: Mutex<Option<String>>,
    session: RwLock<RoundSession>,
}

impl RoundService {
    /// Construct a controller in the idle phase, wrapped in an [`Arc`] so it can be shared.
    pub fn new(
        source: Arc<dyn TriviaSource>,
        progress: ProgressStore,
        settings: RoundSettings,
    ) -> SharedRoundService {
        Arc::new(Self {
            source,
            progress,
            settings,
            token: Mutex::new(None),
            session: RwLock::new(RoundSession::default()),
        })
    }

    /// Validate the start form and run the loading flow for a new round.
    ///
    /// Trivia service failures are not returned as errors: they leave the round
    /// in [`RoundPhase::ErrorStopped`] and the returned view carries the reason.
    pub async fn start_round(&self, request: StartRequest) -> Result<RoundView, ServiceError> {
        let player = request.into_player()?;
        self.run_round(RoundEvent::Start, player).await
    }

    /// Start another round with the player of the round that just finished.
    pub async fn play_again(&self) -> Result<RoundView, ServiceError> {
        let player = {
            let session = self.session.read().await;
            match (session.machine.phase(), session.round.as_ref()) {
                (RoundPhase::Finished, Some(round)) => round.player.clone(),
                (from, _) => {
                    return Err(InvalidTransition {
                        from: from.clone(),
                        event: RoundEvent::PlayAgain,
                    }
                    .into());
                }
            }
        };
        self.run_round(RoundEvent::PlayAgain, player).await
    }

    /// Record the player's choice for the current question.
    ///
    /// Answering the last question finishes the round and updates the best record.
    pub async fn submit_answer(&self, choice: impl Into<String>) -> Result<RoundView, ServiceError> {
        {
            let mut guard = self.session.write().await;
            let session = &mut *guard;

            if session.machine.phase() != &RoundPhase::Answering {
                return Err(InvalidTransition {
                    from: session.machine.phase().clone(),
                    event: RoundEvent::AnswerRecorded,
                }
                .into());
            }
            let round = session
                .round
                .as_mut()
                .ok_or_else(|| ServiceError::MissingRound("no round is being answered".into()))?;

            let correct = round
                .record_answer(choice.into())
                .ok_or_else(|| ServiceError::MissingRound("no question is awaiting an answer".into()))?;
            debug!(round_id = %round.id, correct, score = round.score(), "answer recorded");

            if round.is_complete() {
                session.machine.apply(RoundEvent::Complete)?;
                let total = u32::try_from(round.total()).unwrap_or(u32::MAX);
                let best = self.progress.record_completion(round.score(), total).await;
                info!(
                    round_id = %round.id,
                    score = round.score(),
                    total,
                    attempts = best.attempts,
                    "round finished"
                );
            } else {
                session.machine.apply(RoundEvent::AnswerRecorded)?;
            }
        }

        Ok(self.view().await)
    }

    /// Leave the current round for the start screen without saving anything.
    ///
    /// An in-flight load keeps running; its result is dropped when it arrives.
    pub async fn quit(&self) -> RoundView {
        {
            let mut session = self.session.write().await;
            if session.machine.phase() != &RoundPhase::Idle {
                if let Err(err) = session.machine.apply(RoundEvent::Quit) {
                    warn!(error = %err, "failed to quit round");
                }
                if let Some(round) = session.round.take() {
                    info!(round_id = %round.id, "round abandoned");
                }
            }
        }
        self.view().await
    }

    /// Erase the stored best record.
    pub async fn reset_progress(&self) -> RoundView {
        self.progress.clear().await;
        info!("best record reset");
        self.view().await
    }

    /// Current best record from storage.
    pub async fn best_record(&self) -> BestRecord {
        self.progress.load().await
    }

    /// Snapshot of the state machine, for diagnostics.
    pub async fn snapshot(&self) -> Snapshot {
        self.session.read().await.machine.snapshot()
    }

    /// Current view of the round for presentation.
    pub async fn view(&self) -> RoundView {
        let best = self.progress.load().await;
        let session = self.session.read().await;
        RoundView::build(session.machine.phase(), session.round.as_ref(), best)
    }

    /// Enter loading, fetch the questions, then move to answering or to the error phase.
    async fn run_round(&self, event: RoundEvent, player: Player) -> Result<RoundView, ServiceError> {
        let round = RoundState::new(player.clone());
        let round_id = round.id;
        {
            let mut session = self.session.write().await;
            session.machine.apply(event)?;
            session.round = Some(round);
        }
        info!(%round_id, mode = %player.mode, category = ?player.category, "round loading");

        let outcome = self.load_questions(&player).await;

        {
            let mut guard = self.session.write().await;
            let session = &mut *guard;

            let round = match session.round.as_mut() {
                Some(round)
                    if round.id == round_id && session.machine.phase() == &RoundPhase::Loading =>
                {
                    round
                }
                _ => {
                    debug!(%round_id, "discarding result of abandoned round");
                    return Err(ServiceError::Abandoned { round_id });
                }
            };

            match outcome {
                Ok(questions) => {
                    info!(%round_id, count = questions.len(), "questions ready");
                    round.load_questions(questions);
                    session.machine.apply(RoundEvent::QuestionsLoaded)?;
                }
                Err(message) => {
                    session.machine.apply(RoundEvent::LoadFailed(message))?;
                }
            }
        }

        Ok(self.view().await)
    }

    /// Token (cached) then question batch, strictly in that order.
    ///
    /// Failures are logged and flattened into their display message.
    async fn load_questions(&self, player: &Player) -> Result<Vec<Question>, String> {
        let result = async {
            let token = self.session_token().await?;
            let query = QuestionQuery {
                amount: self.settings.amount,
                difficulty: player.mode,
                category: player.category,
                token: Some(token),
            };
            let raw = self.source.fetch_questions(query).await?;
            if raw.is_empty() {
                return Err(TriviaError::EmptyBatch);
            }
            Ok::<_, TriviaError>(raw)
        }
        .await;

        match result {
            Ok(raw) => Ok(raw.into_iter().map(Question::from).collect()),
            Err(err) => {
                warn!(error = %err, kind = ?err.kind(), "trivia request failed");
                if err.invalidates_token() {
                    self.token.lock().await.take();
                    debug!("dropped cached session token");
                }
                Err(err.to_string())
            }
        }
    }

    /// Return the cached session token, requesting one on first use.
    async fn session_token(&self) -> TriviaResult<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }
        let token = self.source.acquire_token().await?;
        debug!("acquired session token");
        *cached = Some(token.clone());
        Ok(token)
    }
}
