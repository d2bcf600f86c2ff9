//! Core game logic and state management
//!
//! This module contains the main game struct: the round controller that
//! owns the level catalog, the active round, and (in team mode) the
//! persistent scoreboard. It routes the moderator's incoming messages,
//! schedules and receives the cosmetic wrong-flash alarm, and pushes
//! rendering instructions to the presentation layer through a tunnel.

use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    AlarmMessage,
    catalog::{Catalog, Level},
    constants::round::{SOLO_STARTING_LIVES, TEAM_STARTING_LIVES, WRONG_FLASH_MILLIS},
    round::{self, GuessOutcome, Round},
    scoreboard::{Scoreboard, Team},
    session::Tunnel,
};

/// Global configuration options for the game session
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, Validate)]
pub struct Options {
    /// Two-team mode: round scores can be awarded to persistent team
    /// totals, and rounds start with an extra life
    #[garde(skip)]
    pub teams: bool,
}

impl Options {
    /// Returns the life pool a fresh round starts with under these options
    pub fn starting_lives(self) -> i32 {
        if self.teams {
            TEAM_STARTING_LIVES
        } else {
            SOLO_STARTING_LIVES
        }
    }
}

/// Messages sent by the moderator to drive the game
#[derive(Debug, Deserialize, Clone)]
pub enum IncomingMessage {
    /// Free-text guess submitted against the current board
    Guess(String),
    /// Direct navigation to a level by id
    GoToLevel(String),
    /// Advance to the next level in catalog order, wrapping at the end
    NextLevel,
    /// Manual show-all override for the current board
    RevealAll,
    /// Credit the completed round's score to a team (team mode only)
    AwardTeam(Team),
}

/// Update messages sent to the display about game-level changes
#[derive(Debug, Serialize, Clone)]
pub enum UpdateMessage {
    /// A new round started on the given level
    LevelChanged {
        /// Id of the level now in play
        id: String,
        /// Prompt text of the new board
        question: String,
        /// Number of answers on the new board
        answer_count: usize,
        /// Starting lives of the new round
        lives: i32,
    },
    /// Team totals after an award
    TeamTotals {
        /// Cumulative total of the first team
        team1: u64,
        /// Cumulative total of the second team
        team2: u64,
    },
}

/// Obscured view of one board entry
///
/// Text and point value are omitted from the wire entirely while the
/// entry is unrevealed, so a display client cannot leak hidden answers.
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub struct AnswerView {
    /// Whether the entry is revealed
    pub revealed: bool,
    /// Display phrase, present once revealed
    pub text: Option<String>,
    /// Point value, present once revealed
    pub points: Option<u64>,
}

/// Sync messages carrying a complete snapshot of the game state
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub enum SyncMessage {
    /// Complete view of the current round
    Board {
        /// Id of the level in play
        level_id: String,
        /// Prompt text
        question: String,
        /// Board entries in display order, hidden entries obscured
        answers: Vec<AnswerView>,
        /// Current round score
        round_score: u64,
        /// Lives remaining
        lives: i32,
        /// Whether the wrong-guess pulse is on
        wrong_flash: bool,
        /// Whether the round has ended for scoring purposes
        complete: bool,
        /// Team totals, present in team mode only
        team_totals: Option<(u64, u64)>,
    },
    /// The catalog is empty; there is nothing to play
    Idle,
}

/// The main game controller
///
/// Owns the catalog, the active round, and the optional scoreboard. One
/// round is active at a time; navigation replaces it wholesale and bumps
/// the round generation used to invalidate stale wrong-flash alarms.
#[derive(Debug, Serialize, Deserialize)]
pub struct Game {
    /// Level catalog supplied at startup
    catalog: Catalog,
    /// Game configuration options
    options: Options,
    /// Persistent team totals (team mode only)
    scoreboard: Option<Scoreboard>,
    /// State of the active round; `None` only for an empty catalog
    round: Option<Round>,
    /// Bumped on every navigation; stamps wrong-flash alarms
    round_generation: u64,
}

impl Game {
    /// Creates a new game starting on the first catalog level
    ///
    /// An empty catalog yields a game with no active round; every
    /// operation then degrades to a no-op.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The ordered level catalog
    /// * `options` - Game configuration options
    pub fn new(catalog: Catalog, options: Options) -> Self {
        let round = catalog
            .levels
            .first()
            .map(|level| Round::new(level, options.starting_lives()));

        Self {
            catalog,
            options,
            scoreboard: options.teams.then(Scoreboard::default),
            round,
            round_generation: 0,
        }
    }

    /// Returns the active round, if any
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Returns the game configuration options
    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns the persistent scoreboard (team mode only)
    pub fn scoreboard(&self) -> Option<&Scoreboard> {
        self.scoreboard.as_ref()
    }

    /// Whether the active round has ended for scoring purposes
    ///
    /// Vacuously true when the catalog is empty and no round exists.
    pub fn is_round_complete(&self) -> bool {
        self.round.as_ref().is_none_or(Round::is_complete)
    }

    /// Handles an incoming message from the moderator
    ///
    /// All state transitions happen synchronously inside this call; the
    /// only deferred work is the wrong-flash clear handed to
    /// `schedule_message`.
    ///
    /// # Arguments
    ///
    /// * `message` - The incoming message to process
    /// * `schedule_message` - Function to schedule delayed alarm messages
    /// * `tunnel` - The display to notify of resulting changes
    pub fn receive_message<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        message: IncomingMessage,
        mut schedule_message: S,
        tunnel: &T,
    ) {
        match message {
            IncomingMessage::Guess(raw) => self.submit_guess(&raw, &mut schedule_message, tunnel),
            IncomingMessage::GoToLevel(id) => self.go_to_level(&id, tunnel),
            IncomingMessage::NextLevel => self.next_level(tunnel),
            IncomingMessage::RevealAll => self.reveal_all(tunnel),
            IncomingMessage::AwardTeam(team) => self.award_team(team, tunnel),
        }
    }

    /// Handles a scheduled alarm message
    ///
    /// Alarms are stamped with the round generation that armed them; an
    /// alarm surviving from an abandoned round is dropped so a stale
    /// timer never mutates a fresh round. Within one round overlapping
    /// re-arms are allowed and whichever alarm fires first clears the
    /// pulse; later ones find nothing to do.
    ///
    /// # Arguments
    ///
    /// * `message` - The alarm message to process
    /// * `tunnel` - The display to notify of resulting changes
    pub fn receive_alarm<T: Tunnel>(&mut self, message: AlarmMessage, tunnel: &T) {
        match message {
            AlarmMessage::Round(round::AlarmMessage::ClearWrongFlash { generation }) => {
                if generation != self.round_generation {
                    return;
                }
                if let Some(round) = &mut self.round {
                    if round.clear_wrong_flash() {
                        tunnel.send_message(&round::UpdateMessage::WrongFlashCleared.into());
                    }
                }
            }
        }
    }

    /// Returns the message necessary to synchronize a display's state
    pub fn state_message(&self) -> crate::SyncMessage {
        match &self.round {
            Some(round) => SyncMessage::Board {
                level_id: round.level_id().to_owned(),
                question: round.question().to_owned(),
                answers: round
                    .answers()
                    .iter()
                    .map(|answer| AnswerView {
                        revealed: answer.revealed,
                        text: answer.revealed.then(|| answer.text.clone()),
                        points: answer.revealed.then_some(answer.points),
                    })
                    .collect(),
                round_score: round.round_score(),
                lives: round.lives(),
                wrong_flash: round.wrong_flash(),
                complete: round.is_complete(),
                team_totals: self
                    .scoreboard
                    .as_ref()
                    .map(|scoreboard| (scoreboard.total(Team::One), scoreboard.total(Team::Two))),
            }
            .into(),
            None => SyncMessage::Idle.into(),
        }
    }

    /// Sends the full current state to a newly connected display
    pub fn update_session<T: Tunnel>(&self, tunnel: &T) {
        tunnel.send_state(&self.state_message());
    }

    /// Processes a guess and announces the resulting changes
    fn submit_guess<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        raw: &str,
        schedule_message: &mut S,
        tunnel: &T,
    ) {
        let Some(round) = &mut self.round else {
            return;
        };

        match round.submit_guess(raw) {
            GuessOutcome::Ignored => {}
            GuessOutcome::Hit { revealed, .. } => {
                for index in revealed {
                    let answer = &round.answers()[index];
                    tunnel.send_message(
                        &round::UpdateMessage::AnswerRevealed {
                            index,
                            text: answer.text.clone(),
                            points: answer.points,
                            round_score: round.round_score(),
                        }
                        .into(),
                    );
                }
            }
            GuessOutcome::Miss {
                exhausted,
                force_revealed,
            } => {
                tunnel.send_message(
                    &round::UpdateMessage::GuessMissed {
                        lives: round.lives(),
                        exhausted,
                    }
                    .into(),
                );

                for index in force_revealed {
                    let answer = &round.answers()[index];
                    tunnel.send_message(
                        &round::UpdateMessage::AnswerRevealed {
                            index,
                            text: answer.text.clone(),
                            points: answer.points,
                            round_score: round.round_score(),
                        }
                        .into(),
                    );
                }

                schedule_message(
                    round::AlarmMessage::ClearWrongFlash {
                        generation: self.round_generation,
                    }
                    .into(),
                    web_time::Duration::from_millis(WRONG_FLASH_MILLIS),
                );
            }
        }
    }

    /// Navigates to a level by id; unknown ids are reported and ignored
    fn go_to_level<T: Tunnel>(&mut self, id: &str, tunnel: &T) {
        match self.catalog.get(id) {
            Ok(level) => {
                let level = level.clone();
                self.start_round(&level, tunnel);
            }
            Err(error) => log::warn!("navigation ignored: {error}"),
        }
    }

    /// Advances to the next level in catalog order, wrapping at the end
    fn next_level<T: Tunnel>(&mut self, tunnel: &T) {
        if self.catalog.is_empty() {
            return;
        }

        let next = match self
            .round
            .as_ref()
            .and_then(|round| self.catalog.position(round.level_id()))
        {
            Some(index) => (index + 1) % self.catalog.len(),
            None => 0,
        };

        let level = self.catalog.levels[next].clone();
        self.start_round(&level, tunnel);
    }

    /// Reveals the whole board without touching lives or score
    fn reveal_all<T: Tunnel>(&mut self, tunnel: &T) {
        let Some(round) = &mut self.round else {
            return;
        };

        for index in round.reveal_all() {
            let answer = &round.answers()[index];
            tunnel.send_message(
                &round::UpdateMessage::AnswerRevealed {
                    index,
                    text: answer.text.clone(),
                    points: answer.points,
                    round_score: round.round_score(),
                }
                .into(),
            );
        }
    }

    /// Credits the completed round's score to a team (team mode only)
    ///
    /// No-op unless the round is complete and its score is positive.
    /// Board reveal state and lives are left untouched; the following
    /// navigation clears them.
    fn award_team<T: Tunnel>(&mut self, team: Team, tunnel: &T) {
        let Some(scoreboard) = &mut self.scoreboard else {
            return;
        };
        let Some(round) = &mut self.round else {
            return;
        };

        if !round.is_complete() || round.round_score() == 0 {
            return;
        }

        scoreboard.award(team, round.take_score());
        tunnel.send_message(
            &UpdateMessage::TeamTotals {
                team1: scoreboard.total(Team::One),
                team2: scoreboard.total(Team::Two),
            }
            .into(),
        );
    }

    /// Replaces the round wholesale and invalidates pending alarms
    fn start_round<T: Tunnel>(&mut self, level: &Level, tunnel: &T) {
        self.round_generation += 1;

        let round = Round::new(level, self.options.starting_lives());
        tunnel.send_message(
            &UpdateMessage::LevelChanged {
                id: level.id.clone(),
                question: level.question.clone(),
                answer_count: level.answers.len(),
                lives: round.lives(),
            }
            .into(),
        );

        self.round = Some(round);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::catalog::AnswerConfig;

    fn create_test_catalog() -> Catalog {
        Catalog {
            levels: vec![
                Level {
                    id: "foods".to_string(),
                    question: "Name a popular food item you'd find at a restaurant.".to_string(),
                    answers: vec![
                        AnswerConfig {
                            text: "Pizza".to_string(),
                            points: 35,
                        },
                        AnswerConfig {
                            text: "Burger".to_string(),
                            points: 25,
                        },
                    ],
                },
                Level {
                    id: "health".to_string(),
                    question: "Name something people do to stay healthy.".to_string(),
                    answers: vec![
                        AnswerConfig {
                            text: "Exercise".to_string(),
                            points: 40,
                        },
                        AnswerConfig {
                            text: "Sleep".to_string(),
                            points: 15,
                        },
                    ],
                },
            ],
        }
    }

    fn solo_game() -> Game {
        Game::new(create_test_catalog(), Options::default())
    }

    fn team_game() -> Game {
        Game::new(create_test_catalog(), Options { teams: true })
    }

    // Mock implementations for testing
    mod mocks {
        use std::sync::{Arc, Mutex};

        use crate::session::Tunnel;

        #[derive(Debug, Clone, Default)]
        pub struct MockTunnel {
            pub messages: Arc<Mutex<Vec<String>>>,
        }

        impl MockTunnel {
            pub fn sent(&self) -> Vec<String> {
                self.messages.lock().unwrap().clone()
            }
        }

        impl Tunnel for MockTunnel {
            fn send_message(&self, message: &crate::UpdateMessage) {
                self.messages.lock().unwrap().push(message.to_message());
            }

            fn send_state(&self, state: &crate::SyncMessage) {
                self.messages.lock().unwrap().push(state.to_message());
            }

            fn close(self) {}
        }

        pub fn mock_schedule_message() -> impl FnMut(crate::AlarmMessage, web_time::Duration) {
            move |_message, _duration| {}
        }
    }

    fn guess(game: &mut Game, tunnel: &mocks::MockTunnel, raw: &str) {
        game.receive_message(
            IncomingMessage::Guess(raw.to_string()),
            mocks::mock_schedule_message(),
            tunnel,
        );
    }

    #[test]
    fn test_new_game_starts_on_first_level() {
        let game = solo_game();
        let round = game.round().unwrap();

        assert_eq!(round.level_id(), "foods");
        assert_eq!(round.lives(), 3);
        assert!(!game.is_round_complete());
    }

    #[test]
    fn test_team_mode_starts_with_four_lives() {
        let game = team_game();
        assert_eq!(game.round().unwrap().lives(), 4);
        assert!(game.scoreboard().is_some());
    }

    #[test]
    fn test_solo_mode_has_no_scoreboard() {
        let game = solo_game();
        assert!(game.scoreboard().is_none());
    }

    #[test]
    fn test_guess_announces_reveal() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();

        guess(&mut game, &tunnel, "pizza");

        let sent = tunnel.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("AnswerRevealed"));
        assert!(sent[0].contains("Pizza"));
        assert_eq!(game.round().unwrap().round_score(), 35);
    }

    #[test]
    fn test_miss_announces_and_schedules_flash_clear() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();
        let mut alarms = Vec::new();

        game.receive_message(
            IncomingMessage::Guess("xyz".to_string()),
            |alarm, duration| alarms.push((alarm, duration)),
            &tunnel,
        );

        let sent = tunnel.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("GuessMissed"));
        assert_eq!(alarms.len(), 1);
        assert_eq!(
            alarms[0].1,
            web_time::Duration::from_millis(WRONG_FLASH_MILLIS)
        );
        assert!(game.round().unwrap().wrong_flash());
    }

    #[test]
    fn test_exhaustion_announces_forced_reveals() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();

        guess(&mut game, &tunnel, "pizza");
        for _ in 0..4 {
            guess(&mut game, &tunnel, "xyz");
        }

        let round = game.round().unwrap();
        assert!(round.is_exhausted());
        assert_eq!(round.round_score(), 35);

        // Last miss message carries the exhaustion flag, followed by the
        // forced reveal of the remaining entry.
        let sent = tunnel.sent();
        assert!(sent[sent.len() - 2].contains("\"exhausted\":true"));
        assert!(sent[sent.len() - 1].contains("Burger"));
    }

    #[test]
    fn test_empty_guess_changes_nothing() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();
        let mut alarms = Vec::new();

        game.receive_message(
            IncomingMessage::Guess("   ".to_string()),
            |alarm, duration| alarms.push((alarm, duration)),
            &tunnel,
        );

        assert!(tunnel.sent().is_empty());
        assert!(alarms.is_empty());
        assert_eq!(game.round().unwrap().lives(), 3);
    }

    #[test]
    fn test_go_to_level_resets_round() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();

        guess(&mut game, &tunnel, "pizza");
        game.receive_message(
            IncomingMessage::GoToLevel("health".to_string()),
            mocks::mock_schedule_message(),
            &tunnel,
        );

        let round = game.round().unwrap();
        assert_eq!(round.level_id(), "health");
        assert_eq!(round.round_score(), 0);
        assert_eq!(round.lives(), 3);
        assert!(round.answers().iter().all(|answer| !answer.revealed));
    }

    #[test]
    fn test_go_to_unknown_level_is_a_no_op() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();

        guess(&mut game, &tunnel, "pizza");
        let sent_before = tunnel.sent().len();

        game.receive_message(
            IncomingMessage::GoToLevel("desserts".to_string()),
            mocks::mock_schedule_message(),
            &tunnel,
        );

        let round = game.round().unwrap();
        assert_eq!(round.level_id(), "foods");
        assert_eq!(round.round_score(), 35);
        assert!(round.answers()[0].revealed);
        assert_eq!(tunnel.sent().len(), sent_before);
    }

    #[test]
    fn test_next_level_wraps_around() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();

        game.receive_message(
            IncomingMessage::NextLevel,
            mocks::mock_schedule_message(),
            &tunnel,
        );
        assert_eq!(game.round().unwrap().level_id(), "health");

        game.receive_message(
            IncomingMessage::NextLevel,
            mocks::mock_schedule_message(),
            &tunnel,
        );
        assert_eq!(game.round().unwrap().level_id(), "foods");
    }

    #[test]
    fn test_navigation_forfeits_unawarded_score() {
        let mut game = team_game();
        let tunnel = mocks::MockTunnel::default();

        guess(&mut game, &tunnel, "pizza");
        game.receive_message(
            IncomingMessage::NextLevel,
            mocks::mock_schedule_message(),
            &tunnel,
        );

        assert_eq!(game.round().unwrap().round_score(), 0);
        assert_eq!(game.scoreboard().unwrap().total(Team::One), 0);
        assert_eq!(game.scoreboard().unwrap().total(Team::Two), 0);
    }

    #[test]
    fn test_award_requires_team_mode() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();

        guess(&mut game, &tunnel, "pizza");
        guess(&mut game, &tunnel, "burger");
        assert!(game.is_round_complete());

        game.receive_message(
            IncomingMessage::AwardTeam(Team::One),
            mocks::mock_schedule_message(),
            &tunnel,
        );
        assert_eq!(game.round().unwrap().round_score(), 60);
    }

    #[test]
    fn test_award_gated_on_completion() {
        let mut game = team_game();
        let tunnel = mocks::MockTunnel::default();

        guess(&mut game, &tunnel, "pizza");
        assert!(!game.is_round_complete());

        game.receive_message(
            IncomingMessage::AwardTeam(Team::One),
            mocks::mock_schedule_message(),
            &tunnel,
        );

        assert_eq!(game.scoreboard().unwrap().total(Team::One), 0);
        assert_eq!(game.round().unwrap().round_score(), 35);
    }

    #[test]
    fn test_award_gated_on_positive_score() {
        let mut game = team_game();
        let tunnel = mocks::MockTunnel::default();

        // Exhaust the round without matching anything.
        for _ in 0..5 {
            guess(&mut game, &tunnel, "xyz");
        }
        assert!(game.is_round_complete());
        assert_eq!(game.round().unwrap().round_score(), 0);

        game.receive_message(
            IncomingMessage::AwardTeam(Team::Two),
            mocks::mock_schedule_message(),
            &tunnel,
        );
        assert_eq!(game.scoreboard().unwrap().total(Team::Two), 0);
    }

    #[test]
    fn test_award_credits_and_resets_score_only() {
        let mut game = team_game();
        let tunnel = mocks::MockTunnel::default();

        guess(&mut game, &tunnel, "pizza");
        guess(&mut game, &tunnel, "burger");
        assert!(game.is_round_complete());

        game.receive_message(
            IncomingMessage::AwardTeam(Team::One),
            mocks::mock_schedule_message(),
            &tunnel,
        );

        assert_eq!(game.scoreboard().unwrap().total(Team::One), 60);
        let round = game.round().unwrap();
        assert_eq!(round.round_score(), 0);
        assert_eq!(round.lives(), 4);
        assert!(round.answers().iter().all(|answer| answer.revealed));

        let sent = tunnel.sent();
        assert!(sent.last().unwrap().contains("TeamTotals"));

        // A second award finds a zero score and is a no-op.
        game.receive_message(
            IncomingMessage::AwardTeam(Team::Two),
            mocks::mock_schedule_message(),
            &tunnel,
        );
        assert_eq!(game.scoreboard().unwrap().total(Team::Two), 0);
    }

    #[test]
    fn test_totals_accumulate_across_rounds() {
        let mut game = team_game();
        let tunnel = mocks::MockTunnel::default();

        guess(&mut game, &tunnel, "pizza");
        guess(&mut game, &tunnel, "burger");
        game.receive_message(
            IncomingMessage::AwardTeam(Team::One),
            mocks::mock_schedule_message(),
            &tunnel,
        );

        game.receive_message(
            IncomingMessage::NextLevel,
            mocks::mock_schedule_message(),
            &tunnel,
        );
        guess(&mut game, &tunnel, "exercise");
        guess(&mut game, &tunnel, "sleep");
        game.receive_message(
            IncomingMessage::AwardTeam(Team::One),
            mocks::mock_schedule_message(),
            &tunnel,
        );

        assert_eq!(game.scoreboard().unwrap().total(Team::One), 115);
        assert_eq!(game.scoreboard().unwrap().awards().len(), 2);
    }

    #[test]
    fn test_reveal_all_is_manual_override() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();

        game.receive_message(
            IncomingMessage::RevealAll,
            mocks::mock_schedule_message(),
            &tunnel,
        );

        let round = game.round().unwrap();
        assert!(round.answers().iter().all(|answer| answer.revealed));
        assert_eq!(round.round_score(), 0);
        assert_eq!(round.lives(), 3);
        assert!(!round.is_exhausted());
        assert_eq!(tunnel.sent().len(), 2);
    }

    #[test]
    fn test_alarm_clears_flash_for_current_round() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();
        let mut alarms = Vec::new();

        game.receive_message(
            IncomingMessage::Guess("xyz".to_string()),
            |alarm, _| alarms.push(alarm),
            &tunnel,
        );
        assert!(game.round().unwrap().wrong_flash());

        game.receive_alarm(alarms.remove(0), &tunnel);
        assert!(!game.round().unwrap().wrong_flash());
        assert!(tunnel.sent().last().unwrap().contains("WrongFlashCleared"));
    }

    #[test]
    fn test_stale_alarm_is_dropped_after_navigation() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();
        let mut alarms = Vec::new();

        game.receive_message(
            IncomingMessage::Guess("xyz".to_string()),
            |alarm, _| alarms.push(alarm),
            &tunnel,
        );

        // Navigate away, then miss again on the fresh round.
        game.receive_message(
            IncomingMessage::NextLevel,
            mocks::mock_schedule_message(),
            &tunnel,
        );
        guess(&mut game, &tunnel, "xyz");
        assert!(game.round().unwrap().wrong_flash());

        // The alarm armed before navigation must not clear the new pulse.
        let sent_before = tunnel.sent().len();
        game.receive_alarm(alarms.remove(0), &tunnel);
        assert!(game.round().unwrap().wrong_flash());
        assert_eq!(tunnel.sent().len(), sent_before);
    }

    #[test]
    fn test_overlapping_alarms_within_one_round() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();
        let mut alarms = Vec::new();

        game.receive_message(
            IncomingMessage::Guess("xyz".to_string()),
            |alarm, _| alarms.push(alarm),
            &tunnel,
        );
        game.receive_message(
            IncomingMessage::Guess("abc".to_string()),
            |alarm, _| alarms.push(alarm),
            &tunnel,
        );
        assert_eq!(alarms.len(), 2);

        // First alarm clears the pulse; the second finds nothing to do.
        game.receive_alarm(alarms.remove(0), &tunnel);
        assert!(!game.round().unwrap().wrong_flash());

        let sent_before = tunnel.sent().len();
        game.receive_alarm(alarms.remove(0), &tunnel);
        assert_eq!(tunnel.sent().len(), sent_before);
    }

    #[test]
    fn test_sync_snapshot_obscures_unrevealed_answers() {
        let mut game = solo_game();
        let tunnel = mocks::MockTunnel::default();

        guess(&mut game, &tunnel, "pizza");
        let snapshot = game.state_message().to_message();

        assert!(snapshot.contains("Pizza"));
        assert!(!snapshot.contains("Burger"));
        assert!(!snapshot.contains("25"));
    }

    #[test]
    fn test_sync_snapshot_includes_team_totals_in_team_mode() {
        let game = team_game();
        let snapshot = game.state_message().to_message();
        assert!(snapshot.contains("team_totals"));

        let solo_snapshot = solo_game().state_message().to_message();
        assert!(!solo_snapshot.contains("team_totals"));
    }

    #[test]
    fn test_empty_catalog_is_harmless() {
        let mut game = Game::new(Catalog::default(), Options::default());
        let tunnel = mocks::MockTunnel::default();

        assert!(game.round().is_none());
        assert!(game.is_round_complete());

        guess(&mut game, &tunnel, "pizza");
        game.receive_message(
            IncomingMessage::NextLevel,
            mocks::mock_schedule_message(),
            &tunnel,
        );
        game.receive_message(
            IncomingMessage::RevealAll,
            mocks::mock_schedule_message(),
            &tunnel,
        );

        assert!(tunnel.sent().is_empty());
        assert!(matches!(
            game.state_message(),
            crate::SyncMessage::Game(SyncMessage::Idle)
        ));
    }

    #[test]
    fn test_update_session_sends_snapshot() {
        let game = solo_game();
        let tunnel = mocks::MockTunnel::default();

        game.update_session(&tunnel);
        assert_eq!(tunnel.sent().len(), 1);
        assert!(tunnel.sent()[0].contains("Board"));
    }
}
