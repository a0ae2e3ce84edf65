use crate::store::Writable;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    Parse(String),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid state document: {msg}"),
        }
    }
}

impl std::error::Error for StateError {}

impl From<serde_json::Error> for StateError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Client-side UI state shared between views, the room connection and
/// the audio player.
///
/// Built once at startup and cloned into whatever needs it; clones share
/// the same cells.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub room_id: Writable<String>,
    pub name: Writable<String>,
    pub game_type: Writable<String>,
    pub joined_room: Writable<bool>,
    pub error: Writable<String>,
    pub play_audio: Writable<bool>,
}

/// Plain copy of every [`AppState`] cell, used for JSON import/export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSnapshot {
    pub room_id: String,
    pub name: String,
    pub game_type: String,
    pub joined_room: bool,
    pub error: String,
    pub play_audio: bool,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            room_id: self.room_id.get(),
            name: self.name.get(),
            game_type: self.game_type.get(),
            joined_room: self.joined_room.get(),
            error: self.error.get(),
            play_audio: self.play_audio.get(),
        }
    }

    /// Writes every cell from `snapshot`. Subscribers see one notification per cell.
    pub fn restore(&self, snapshot: &StateSnapshot) {
        log::debug!("restoring client state for room {:?}", snapshot.room_id);
        self.room_id.set(snapshot.room_id.clone());
        self.name.set(snapshot.name.clone());
        self.game_type.set(snapshot.game_type.clone());
        self.joined_room.set(snapshot.joined_room);
        self.error.set(snapshot.error.clone());
        self.play_audio.set(snapshot.play_audio);
    }

    pub fn reset(&self) {
        log::debug!("resetting client state");
        self.restore(&StateSnapshot::default());
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Builds a fresh state from a JSON document. Missing fields keep their
    /// initial values.
    pub fn from_json(text: &str) -> Result<Self, StateError> {
        let snapshot = serde_json::from_str::<StateSnapshot>(text).map_err(|e| {
            log::warn!("Error parsing state: {e}");
            StateError::from(e)
        })?;
        let state = Self::new();
        state.restore(&snapshot);
        Ok(state)
    }
}
