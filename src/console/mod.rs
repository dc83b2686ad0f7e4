//! Terminal presentation layer.
//!
//! Reads commands line by line, forwards them to the round controller and
//! prints the returned views. It holds no round state of its own.

/// Text rendering of views.
pub mod render;

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tracing::debug;

use crate::{
    dto::{
        start::{Difficulty, StartRequest},
        view::RoundView,
    },
    error::ServiceError,
    services::SharedRoundService,
    state::RoundPhase,
};

use self::render::{render_question, render_summary, render_validation, resolve_choice};

/// Line-oriented terminal front-end driving a [`SharedRoundService`].
pub struct Console<R, W> {
    service: SharedRoundService,
    input: Lines<BufReader<R>>,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Attach the controller to an input and an output stream.
    pub fn new(service: SharedRoundService, input: R, output: W) -> Self {
        Self {
            service,
            input: BufReader::new(input).lines(),
            output,
        }
    }

    /// Run the start screen until the player exits or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            let best = self.service.best_record().await;
            self.say(&format!("\n{best}")).await?;

            let Some(command) = self
                .prompt("[s] start quiz  [r] reset best score  [q] exit > ")
                .await?
            else {
                return Ok(());
            };

            match command.trim().to_ascii_lowercase().as_str() {
                "s" | "start" => {
                    if !self.start().await? {
                        return Ok(());
                    }
                }
                "r" | "reset" => {
                    self.service.reset_progress().await;
                    self.say("Best score reset.").await?;
                }
                "q" | "quit" | "exit" => return Ok(()),
                other => debug!(command = other, "unknown command"),
            }
        }
    }

    /// Collect the start form and play the round. Returns `false` once input is exhausted.
    async fn start(&mut self) -> io::Result<bool> {
        let Some(request) = self.read_start_form().await? else {
            return Ok(false);
        };

        self.say("Loading questions...").await?;
        match self.service.start_round(request).await {
            Ok(view) => self.play(view).await,
            Err(ServiceError::Validation(errors)) => {
                for message in render_validation(&errors) {
                    self.say(&message).await?;
                }
                Ok(true)
            }
            Err(err) => {
                self.say(&err.to_string()).await?;
                Ok(true)
            }
        }
    }

    async fn read_start_form(&mut self) -> io::Result<Option<StartRequest>> {
        let Some(name) = self.prompt("Name: ").await? else {
            return Ok(None);
        };
        let Some(email) = self.prompt("Email: ").await? else {
            return Ok(None);
        };

        let category = loop {
            let Some(raw) = self.prompt("Category id (blank for any): ").await? else {
                return Ok(None);
            };
            let raw = raw.trim();
            if raw.is_empty() {
                break None;
            }
            match raw.parse::<u32>() {
                Ok(id) => break Some(id),
                Err(_) => self.say("Category must be a number.").await?,
            }
        };

        let mode = loop {
            let Some(raw) = self.prompt("Difficulty [easy/medium/hard] (blank for easy): ").await?
            else {
                return Ok(None);
            };
            if raw.trim().is_empty() {
                break Difficulty::default();
            }
            match raw.parse::<Difficulty>() {
                Ok(mode) => break mode,
                Err(err) => self.say(&err.to_string()).await?,
            }
        };

        Ok(Some(StartRequest {
            name,
            email,
            category,
            mode,
        }))
    }

    /// Drive one round from its first view until the player returns home.
    async fn play(&mut self, mut view: RoundView) -> io::Result<bool> {
        loop {
            let snapshot = self.service.snapshot().await;
            debug!(phase = ?snapshot.phase, version = snapshot.version, "drawing round view");

            match &view.phase {
                RoundPhase::Answering => {
                    if let Some(text) = render_question(&view) {
                        self.say(&text).await?;
                    }
                    let Some(input) = self.prompt("Your answer (number, or q to quit) > ").await?
                    else {
                        self.service.quit().await;
                        return Ok(false);
                    };
                    if input.trim().eq_ignore_ascii_case("q") {
                        self.service.quit().await;
                        return Ok(true);
                    }
                    let Some(choice) = resolve_choice(&view, &input) else {
                        self.say("Pick one of the listed numbers.").await?;
                        continue;
                    };
                    view = match self.service.submit_answer(choice).await {
                        Ok(next) => next,
                        Err(err) => {
                            self.say(&err.to_string()).await?;
                            return Ok(true);
                        }
                    };
                }
                RoundPhase::Finished => {
                    if let Some(summary) = &view.summary {
                        self.say(&render_summary(summary)).await?;
                    }
                    self.say(&view.best.to_string()).await?;
                    let Some(input) = self.prompt("[p] play again  [h] home > ").await? else {
                        return Ok(false);
                    };
                    if input.trim().eq_ignore_ascii_case("p") {
                        self.say("Loading questions...").await?;
                        view = match self.service.play_again().await {
                            Ok(next) => next,
                            Err(err) => {
                                self.say(&err.to_string()).await?;
                                return Ok(true);
                            }
                        };
                    } else {
                        self.service.quit().await;
                        return Ok(true);
                    }
                }
                RoundPhase::ErrorStopped { message } => {
                    self.say(&format!("Error: {message}")).await?;
                    let more = self.prompt("Press Enter to return home > ").await?.is_some();
                    self.service.quit().await;
                    return Ok(more);
                }
                RoundPhase::Idle | RoundPhase::Loading => return Ok(true),
            }
        }
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        if !text.ends_with('\n') {
            self.output.write_all(b"\n").await?;
        }
        self.output.flush().await
    }

    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.output.write_all(label.as_bytes()).await?;
        self.output.flush().await?;
        self.input.next_line().await
    }
}
