//! Communication session management
//!
//! This module defines the trait for tunneling messages between the game
//! engine and the presentation layer (the moderator's screen and any
//! spectator display). The tunnel abstraction keeps the engine free of any
//! rendering or transport concern.

use super::{SyncMessage, UpdateMessage};

/// Trait for sending messages through a communication tunnel
///
/// This trait abstracts the mechanism used to deliver rendering
/// instructions to the display. Implementations might paint a terminal,
/// push over a WebSocket, or simply collect messages in tests.
pub trait Tunnel {
    /// Sends an update message to the display
    ///
    /// Update messages notify the display about incremental changes:
    /// an answer being revealed, a miss, the wrong-guess pulse ending.
    ///
    /// # Arguments
    ///
    /// * `message` - The update message to send
    fn send_message(&self, message: &UpdateMessage);

    /// Sends a state synchronization message to the display
    ///
    /// Sync messages carry a complete snapshot of the current round,
    /// typically used when a display connects or reconnects mid-game.
    ///
    /// # Arguments
    ///
    /// * `state` - The synchronization message to send
    fn send_state(&self, state: &SyncMessage);

    /// Closes the communication tunnel
    ///
    /// This method should be called when the display disconnects or
    /// when the communication is no longer needed.
    fn close(self);
}
