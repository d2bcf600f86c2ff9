//! # Feud Game Library
//!
//! This library provides the core game logic for a "guess the popular
//! answer" trivia game. A moderator reveals ranked answers to an
//! open-ended question by typing guesses; correct guesses accumulate a
//! round score, wrong guesses consume lives, and an optional two-team
//! mode awards completed rounds to persistent team totals. Rendering is
//! delegated entirely to an external presentation layer.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod constants;
pub mod game;
pub mod matcher;
pub mod round;
pub mod scoreboard;
pub mod session;

/// Messages sent to synchronize a display with the current game state
///
/// Sync messages carry complete snapshots and are sent when a display
/// connects or reconnects mid-game.
#[derive(Debug, Serialize, Clone, derive_more::From)]
pub enum SyncMessage {
    /// Full game snapshots
    Game(game::SyncMessage),
}

impl SyncMessage {
    /// Converts the sync message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Messages sent to update a display about incremental state changes
///
/// Update messages notify the display about changes that affect its
/// current view: reveals, misses, navigation, and team totals.
#[derive(Debug, Serialize, Clone, derive_more::From)]
pub enum UpdateMessage {
    /// Game-level updates (navigation, team totals)
    Game(game::UpdateMessage),
    /// Board-level updates (reveals, misses, the wrong-guess pulse)
    Round(round::UpdateMessage),
}

impl UpdateMessage {
    /// Converts the update message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Alarm messages for deferred, cosmetic state transitions
///
/// The engine hands these to a caller-supplied scheduler together with a
/// delay; the host environment feeds them back through
/// [`game::Game::receive_alarm`] when the delay elapses.
#[derive(Debug, Clone, Copy, derive_more::From, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Round-scoped alarms (the wrong-guess pulse)
    Round(round::AlarmMessage),
}
