//! Pure game logic for Adrift.
//!
//! This crate contains all game rules that are independent of the terminal.
//! Functions take plain data and return results or [`events::GameEvent`]s,
//! making them unit-testable and usable from the interactive CLI as well as
//! the headless simulation harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`backpack`] | Ordered tool inventory carried by the player |
//! | [`command`] | Fixed-token command tokenizing (`go`, `pick`, `use`, ...) |
//! | [`error`] | Construction-time and movement error types |
//! | [`events`] | Informational events produced by the session |
//! | [`object`] | Interactive room fixtures and their `use` rules |
//! | [`oxygen`] | Per-room air constants and status assessment |
//! | [`room`] | Rooms, doors, and the index-addressed world arena |
//! | [`scenario`] | JSON scenario data and world construction |
//! | [`session`] | Turn protocol: oxygen gate, dispatch, win/loss |
//! | [`tool`] | Portable tools and their kinds |

pub mod backpack;
pub mod command;
pub mod error;
pub mod events;
pub mod object;
pub mod oxygen;
pub mod room;
pub mod scenario;
pub mod session;
pub mod tool;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::backpack::Backpack;
    pub use crate::command::Command;
    pub use crate::error::{ConstructionError, MoveError, ScenarioError, UnlockError};
    pub use crate::events::GameEvent;
    pub use crate::object::{InteractiveObject, ObjectKind};
    pub use crate::room::{Room, RoomId, RoomView, World};
    pub use crate::scenario::ScenarioSpec;
    pub use crate::session::{Ending, GameSession, SessionState};
    pub use crate::tool::{Tool, ToolKind};
}
