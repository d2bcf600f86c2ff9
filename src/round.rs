//! Round state and guess bookkeeping
//!
//! This module owns the mutable state of one attempt at a level: the
//! working copy of the board with per-answer reveal flags, the accumulated
//! round score, the pool of lives, and the cosmetic wrong-guess pulse.
//! Guess processing consults the matcher for every unrevealed answer;
//! misses consume lives and, once the pool is exhausted, force-reveal the
//! rest of the board without crediting its points.

use serde::{Deserialize, Serialize};

use crate::{catalog::Level, matcher};

/// One entry on the board during a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Canonical display phrase
    pub text: String,
    /// Point value added to the round score when matched
    pub points: u64,
    /// Whether the entry has been revealed; never reverts within a round
    pub revealed: bool,
}

/// Result of processing one submitted guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The input was empty after trimming, or the round was already
    /// life-exhausted; nothing changed
    Ignored,
    /// At least one unrevealed answer matched the guess
    Hit {
        /// Indexes of the answers revealed by this guess, in display order
        revealed: Vec<usize>,
        /// Points added to the round score by this guess
        gained: u64,
    },
    /// No unrevealed answer matched; a life was consumed
    Miss {
        /// Whether this miss exhausted the life pool
        exhausted: bool,
        /// Indexes force-revealed by exhaustion, in display order
        force_revealed: Vec<usize>,
    },
}

/// Messages sent to the display about incremental round changes
#[derive(Debug, Serialize, Clone)]
pub enum UpdateMessage {
    /// A board entry was revealed
    AnswerRevealed {
        /// Index of the entry in display order
        index: usize,
        /// Display phrase of the entry
        text: String,
        /// Point value of the entry
        points: u64,
        /// Round score after this reveal; unchanged for force-reveals
        round_score: u64,
    },
    /// A guess matched nothing
    GuessMissed {
        /// Lives remaining after the miss
        lives: i32,
        /// Whether the miss exhausted the life pool
        exhausted: bool,
    },
    /// The wrong-guess pulse timed out
    WrongFlashCleared,
}

/// Messages used for deferred, cosmetic state transitions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Clears the wrong-guess pulse
    ClearWrongFlash {
        /// Generation of the round that armed this alarm; stale
        /// generations are dropped by the controller
        generation: u64,
    },
}

/// Mutable state of one attempt at a level
///
/// Created from a [`Level`] whenever a level is selected; replaced
/// wholesale on navigation. Reveal flags are monotonic within a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// Id of the level being played
    level_id: String,
    /// Prompt text shown above the board
    question: String,
    /// Working copy of the level's answers
    answers: Vec<Answer>,
    /// Sum of points of all answers revealed by matching
    round_score: u64,
    /// Misses remaining; the pool is exhausted at exactly -1
    lives: i32,
    /// Cosmetic wrong-guess pulse, cleared by a scheduled alarm
    wrong_flash: bool,
}

impl Round {
    /// Creates a fresh round from a level
    ///
    /// # Arguments
    ///
    /// * `level` - The level to play
    /// * `starting_lives` - The mode's starting life pool
    pub fn new(level: &Level, starting_lives: i32) -> Self {
        Self {
            level_id: level.id.clone(),
            question: level.question.clone(),
            answers: level
                .answers
                .iter()
                .map(|answer| Answer {
                    text: answer.text.clone(),
                    points: answer.points,
                    revealed: false,
                })
                .collect(),
            round_score: 0,
            lives: starting_lives,
            wrong_flash: false,
        }
    }

    /// Returns the id of the level being played
    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    /// Returns the prompt text
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns the board in display order
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Returns the sum of points of all answers revealed by matching
    pub fn round_score(&self) -> u64 {
        self.round_score
    }

    /// Returns the lives remaining
    pub fn lives(&self) -> i32 {
        self.lives
    }

    /// Returns whether the wrong-guess pulse is currently on
    pub fn wrong_flash(&self) -> bool {
        self.wrong_flash
    }

    /// Whether the round has ended for scoring purposes
    ///
    /// True once `lives` has reached zero or every answer is revealed.
    /// Note the deliberate asymmetry with [`Round::is_exhausted`]: a miss
    /// that brings lives to exactly zero completes the round, but only
    /// the following miss (taking lives negative) force-reveals the
    /// board. Both thresholds are part of the observable difficulty
    /// curve.
    pub fn is_complete(&self) -> bool {
        self.lives <= 0 || self.answers.iter().all(|answer| answer.revealed)
    }

    /// Whether a miss has taken the life pool strictly below zero
    pub fn is_exhausted(&self) -> bool {
        self.lives < 0
    }

    /// Processes one submitted guess
    ///
    /// Empty input (after trimming) and guesses on a life-exhausted round
    /// are ignored; rejecting empty input here also structurally prevents
    /// the matcher's vacuous empty-guess match. Otherwise every currently
    /// unrevealed answer is tested in display order and all matches are
    /// revealed, so one guess may legitimately reveal several
    /// near-duplicate entries. A guess that reveals nothing consumes a
    /// life, turns the wrong-guess pulse on, and force-reveals the rest
    /// of the board (without crediting points) once lives go negative.
    ///
    /// # Arguments
    ///
    /// * `raw` - The text typed by the moderator
    ///
    /// # Returns
    ///
    /// The [`GuessOutcome`] describing what changed
    pub fn submit_guess(&mut self, raw: &str) -> GuessOutcome {
        if raw.trim().is_empty() || self.is_exhausted() {
            return GuessOutcome::Ignored;
        }

        let mut revealed = Vec::new();
        let mut gained = 0;
        for (index, answer) in self.answers.iter_mut().enumerate() {
            if !answer.revealed && matcher::matches(raw, &answer.text) {
                answer.revealed = true;
                gained += answer.points;
                revealed.push(index);
            }
        }

        if !revealed.is_empty() {
            self.round_score += gained;
            return GuessOutcome::Hit { revealed, gained };
        }

        self.lives -= 1;
        self.wrong_flash = true;

        let exhausted = self.lives < 0;
        let force_revealed = if exhausted {
            self.reveal_remaining()
        } else {
            Vec::new()
        };

        GuessOutcome::Miss {
            exhausted,
            force_revealed,
        }
    }

    /// Manual show-all override
    ///
    /// Reveals every remaining answer without crediting points, consuming
    /// lives, or flagging exhaustion; independent of the miss-handling
    /// path.
    ///
    /// # Returns
    ///
    /// Indexes of the answers newly revealed, in display order
    pub fn reveal_all(&mut self) -> Vec<usize> {
        self.reveal_remaining()
    }

    /// Takes the accumulated round score, leaving zero behind
    ///
    /// Used by the award operation; board and lives are untouched.
    pub fn take_score(&mut self) -> u64 {
        std::mem::take(&mut self.round_score)
    }

    /// Turns the wrong-guess pulse off
    ///
    /// # Returns
    ///
    /// `true` if the pulse was on, `false` if there was nothing to clear
    pub fn clear_wrong_flash(&mut self) -> bool {
        std::mem::take(&mut self.wrong_flash)
    }

    /// Reveals every remaining unrevealed answer without crediting points
    fn reveal_remaining(&mut self) -> Vec<usize> {
        let mut revealed = Vec::new();
        for (index, answer) in self.answers.iter_mut().enumerate() {
            if !answer.revealed {
                answer.revealed = true;
                revealed.push(index);
            }
        }
        revealed
    }
}
