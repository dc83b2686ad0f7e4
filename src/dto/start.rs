//! Start-form payload and the player it produces.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::dto::validation::{trim_form_input, validate_player_email, validate_player_name};

/// Question difficulty requested from the trivia service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    /// Easy questions.
    Easy,
    /// Medium questions.
    Medium,
    /// Hard questions.
    Hard,
}

impl Difficulty {
    /// Wire name used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a difficulty name is not one of `easy`, `medium`, `hard`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(value.to_string())),
        }
    }
}

/// Raw start-form input as typed by the player.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartRequest {
    /// Display name, checked after trimming.
    pub name: String,
    /// Contact email, checked after trimming.
    pub email: String,
    /// Category id; `None` lets the service pick from any category.
    #[serde(default)]
    pub category: Option<u32>,
    /// Requested difficulty.
    #[serde(default)]
    pub mode: Difficulty,
}

impl Validate for StartRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        // Both fields are checked so every problem is reported at once.
        if let Err(e) = validate_player_name(trim_form_input(&self.name)) {
            errors.add("name", e);
        }
        if let Err(e) = validate_player_email(trim_form_input(&self.email)) {
            errors.add("email", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl StartRequest {
    /// Validate the form and build the player for the next round.
    pub fn into_player(self) -> Result<Player, ValidationErrors> {
        self.validate()?;
        Ok(Player {
            name: trim_form_input(&self.name).to_string(),
            email: trim_form_input(&self.email).to_string(),
            category: self.category,
            mode: self.mode,
        })
    }
}

/// Identity and preferences of the person playing a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    /// Trimmed display name.
    pub name: String,
    /// Trimmed contact email.
    pub email: String,
    /// Requested category id.
    pub category: Option<u32>,
    /// Requested difficulty.
    pub mode: Difficulty,
}
