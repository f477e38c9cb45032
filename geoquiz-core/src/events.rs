//! Signals emitted by the session alongside guess outcomes.

use serde::{Deserialize, Serialize};

/// Why a session stopped accepting guesses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The player ended the game.
    Manual,
    /// The timed-mode countdown reached zero.
    TimeExpired,
}

/// Session lifecycle events for the surrounding caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Every primary member of a group has been guessed. Fires at most
    /// once per group per session.
    GroupCompleted { group: String },
    SessionEnded { reason: EndReason },
}
