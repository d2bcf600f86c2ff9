//! Configuration constants for the feud game system
//!
//! This module contains the configuration limits and tuning knobs used
//! throughout the game system, grouped by the component that consumes them.

/// Catalog-wide limits
pub mod catalog {
    /// Maximum number of levels allowed in a single catalog
    pub const MAX_LEVEL_COUNT: usize = 100;
}

/// Per-level limits
pub mod level {
    /// Maximum length of a level id in characters
    pub const MAX_ID_LENGTH: usize = 100;
    /// Maximum length of a question prompt in characters
    pub const MAX_QUESTION_LENGTH: usize = 200;
    /// Maximum number of answers on a single board
    pub const MAX_ANSWER_COUNT: usize = 8;
}

/// Answer text configuration constants
pub mod answer_text {
    /// Maximum length of an answer phrase in characters
    pub const MAX_LENGTH: usize = 200;
}

/// Round tuning knobs
pub mod round {
    /// Lives at the start of a single-player round
    pub const SOLO_STARTING_LIVES: i32 = 3;
    /// Lives at the start of a team-mode round
    pub const TEAM_STARTING_LIVES: i32 = 4;
    /// How long the wrong-guess pulse stays on, in milliseconds
    pub const WRONG_FLASH_MILLIS: u64 = 500;
}
