//! Error types.
//!
//! Gameplay mistakes (unknown command, wrong tool, missing door) are never
//! errors: they surface as [`GameEvent`](crate::events::GameEvent)s and the
//! turn loop continues. The types here cover integration failures while a
//! world is being assembled, plus the two movement refusals that the session
//! converts into events.

use thiserror::Error;

/// A world-construction contract violation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("{what} name must not be empty")]
    EmptyName { what: &'static str },
    #[error("{what} `{name}` needs a description")]
    EmptyDescription { what: &'static str, name: String },
    #[error("oxygen cylinder `{name}` has negative yield {value}")]
    NegativeYield { name: String, value: f32 },
    #[error("room `{room}` starts with oxygen {value}; expected 0, 0.5, 1.0 or 1.5")]
    InvalidOxygen { room: String, value: f32 },
    #[error("room `{0}` is defined twice")]
    DuplicateRoom(String),
    #[error("`{owner}` already holds a {what} named `{name}`")]
    DuplicateEntry {
        owner: String,
        what: &'static str,
        name: String,
    },
    #[error("room `{room}` has a door `{direction}` to unknown room `{destination}`")]
    UnknownDestination {
        room: String,
        direction: String,
        destination: String,
    },
    #[error("start room `{0}` does not exist")]
    UnknownStart(String),
    #[error("room id {0} is outside the world")]
    InvalidRoomId(u32),
}

/// Failure to load a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Why the player could not leave a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("there is no door in that direction")]
    NoDoor,
    #[error("the door is locked")]
    Locked,
}

/// Why a key did not open a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnlockError {
    #[error("there is no door in that direction")]
    NoDoor,
    #[error("the door is not locked")]
    NotLocked,
    #[error("the door cannot be opened with that")]
    WrongKey,
}
