//! Level catalog and question data
//!
//! This module defines the static data the game is played from: a catalog
//! of levels, each holding a question and its ranked answers with hidden
//! point values. The catalog is supplied at startup as structured data,
//! validated up front, and looked up by stable level id for navigation.

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matcher;

/// Errors that can occur while navigating the catalog
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No level in the catalog carries the requested id
    #[error("no level with id {0:?}")]
    UnknownLevel(String),
}

/// One canonical answer on the board with its hidden point value
///
/// Required wire shape: `{ "text": ..., "points": ... }`. The revealed
/// flag is runtime state and lives on [`crate::round::Answer`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AnswerConfig {
    /// Canonical display phrase
    #[garde(length(chars, min = 1, max = crate::constants::answer_text::MAX_LENGTH))]
    pub text: String,
    /// Point value added to the round score when the phrase is matched
    #[garde(range(min = 1))]
    pub points: u64,
}

/// Validates that answer texts within a level are case-insensitively distinct
///
/// # Errors
///
/// Returns a `garde::Error` if two answers normalize to the same phrase.
fn distinct_answer_texts(answers: &[AnswerConfig], _ctx: &()) -> garde::Result {
    if answers
        .iter()
        .map(|answer| matcher::normalize(&answer.text))
        .all_unique()
    {
        Ok(())
    } else {
        Err(garde::Error::new(
            "answer texts must be case-insensitively distinct",
        ))
    }
}

/// One question and its ranked answer set
///
/// The answer order is display order, conventionally descending by points;
/// order has no effect on matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Level {
    /// Stable identifier used for direct navigation between levels
    #[garde(length(chars, min = 1, max = crate::constants::level::MAX_ID_LENGTH))]
    pub id: String,
    /// Prompt text shown above the board
    #[garde(length(chars, max = crate::constants::level::MAX_QUESTION_LENGTH))]
    pub question: String,
    /// Ranked answers in display order
    #[garde(
        length(max = crate::constants::level::MAX_ANSWER_COUNT),
        dive,
        custom(distinct_answer_texts)
    )]
    pub answers: Vec<AnswerConfig>,
}

/// An ordered collection of levels supplied at startup
///
/// Serializes as a bare sequence of level records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct Catalog {
    /// Levels in play order
    #[garde(length(max = crate::constants::catalog::MAX_LEVEL_COUNT), dive)]
    pub levels: Vec<Level>,
}

impl Catalog {
    /// Returns the number of levels in this catalog
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Checks if this catalog contains any levels
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Looks up a level by its stable id
    ///
    /// # Arguments
    ///
    /// * `id` - The id to look up
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLevel`] if no level carries the id.
    pub fn get(&self, id: &str) -> Result<&Level, Error> {
        self.levels
            .iter()
            .find(|level| level.id == id)
            .ok_or_else(|| Error::UnknownLevel(id.to_owned()))
    }

    /// Returns the position of a level in play order, if present
    pub fn position(&self, id: &str) -> Option<usize> {
        self.levels.iter().position(|level| level.id == id)
    }
}
