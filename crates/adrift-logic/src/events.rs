//! Informational events produced by the session.
//!
//! The core never prints. Every operation that has something to tell the
//! player pushes a [`GameEvent`]; the front end decides how to render it.
//! `Display` gives the plain-text rendering used by the CLI.

use std::fmt;

use crate::command::HELP_TEXT;
use crate::session::Ending;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    // ── Oxygen ──
    RoomSafe { room: String },
    LowOxygen { reserve: f32 },
    OutOfOxygen,
    CylinderContaminated { tool: String },
    OxygenRestored { tool: String, reserve: f32 },
    /// A clean cylinder was opened in a room that was already full.
    OxygenVented { tool: String },

    // ── Movement ──
    Moved { from: String, to: String },
    DoorLocked { direction: String },
    NoDoor { direction: String },
    DoorUnlocked { direction: String, tool: String },
    KeyDoesNotFit { direction: String, tool: String },
    DoorNotLocked { direction: String },

    // ── Tools ──
    PickedUp { tool: String },
    ToolNotHere { tool: String },
    NotInBackpack { tool: String },
    ToolUsed { tool: String },
    ToolConsumed { tool: String },
    Inventory { names: String },

    // ── Objects ──
    NoSuchTarget { target: String },
    ToolRevealed { object: String, tool: String },
    CabinetUnlocked { object: String },
    AlreadyUnlocked { object: String },
    NothingInside { object: String },
    ReactorPowered { object: String },
    NothingHappened { object: String },
    ToolDoesNotFit { tool: String, object: String },
    ShipRepaired { object: String },

    // ── Session ──
    Help,
    MissingArgument { verb: String },
    InvalidCommand { input: String },
    GameOver(Ending),
}

impl GameEvent {
    /// Whether the event reports a problem rather than progress.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            GameEvent::LowOxygen { .. }
                | GameEvent::OxygenVented { .. }
                | GameEvent::DoorLocked { .. }
                | GameEvent::NoDoor { .. }
                | GameEvent::KeyDoesNotFit { .. }
                | GameEvent::DoorNotLocked { .. }
                | GameEvent::ToolNotHere { .. }
                | GameEvent::NotInBackpack { .. }
                | GameEvent::NoSuchTarget { .. }
                | GameEvent::NothingInside { .. }
                | GameEvent::NothingHappened { .. }
                | GameEvent::ToolDoesNotFit { .. }
                | GameEvent::MissingArgument { .. }
                | GameEvent::InvalidCommand { .. }
        )
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::RoomSafe { room } => write!(f, "{} is a safe zone.", room),
            GameEvent::LowOxygen { reserve } => {
                write!(f, "{} Warning! The air in this room is running out!", reserve)
            }
            GameEvent::OutOfOxygen => write!(f, "There is no oxygen left in this room!"),
            GameEvent::CylinderContaminated { tool } => {
                write!(f, "You breathed from {}. It was contaminated!", tool)
            }
            GameEvent::OxygenRestored { tool, reserve } => write!(
                f,
                "You opened {}. You now have enough oxygen to keep exploring ({}).",
                tool, reserve
            ),
            GameEvent::OxygenVented { tool } => write!(
                f,
                "The room was already full of air. The oxygen from {} was wasted.",
                tool
            ),
            GameEvent::Moved { to, .. } => write!(f, "You walk into {}.", to),
            GameEvent::DoorLocked { direction } => {
                write!(f, "The door to the {} is locked.", direction)
            }
            GameEvent::NoDoor { direction } => {
                write!(f, "There is no door to the {}.", direction)
            }
            GameEvent::DoorUnlocked { direction, tool } => {
                write!(f, "You used {} to unlock the door to the {}.", tool, direction)
            }
            GameEvent::KeyDoesNotFit { direction, tool } => {
                write!(f, "{} does not open the door to the {}.", tool, direction)
            }
            GameEvent::DoorNotLocked { direction } => {
                write!(f, "The door to the {} is not locked.", direction)
            }
            GameEvent::PickedUp { tool } => {
                write!(f, "You picked up {} and put it in your backpack.", tool)
            }
            GameEvent::ToolNotHere { tool } => write!(f, "There is no {} to pick up here.", tool),
            GameEvent::NotInBackpack { tool } => {
                write!(f, "You don't have {} in your backpack.", tool)
            }
            GameEvent::ToolUsed { tool } => write!(f, "You used {}.", tool),
            GameEvent::ToolConsumed { tool } => write!(f, "{} was used up.", tool),
            GameEvent::Inventory { names } if names.is_empty() => {
                write!(f, "Your backpack is empty.")
            }
            GameEvent::Inventory { names } => write!(f, "In your backpack: {}", names),
            GameEvent::NoSuchTarget { target } => {
                write!(f, "There is no {} here to use that on.", target)
            }
            GameEvent::ToolRevealed { object, tool } => {
                write!(f, "You found {} in {}. It is now in your backpack.", tool, object)
            }
            GameEvent::CabinetUnlocked { object } => write!(f, "You unlocked {}.", object),
            GameEvent::AlreadyUnlocked { object } => {
                write!(f, "{} is already open. Whatever was inside is gone.", object)
            }
            GameEvent::NothingInside { object } => {
                write!(f, "There is nothing left in {}.", object)
            }
            GameEvent::ReactorPowered { object } => write!(
                f,
                "You connected the power cable to {}. The station has power again!",
                object
            ),
            GameEvent::NothingHappened { object } => {
                write!(f, "You tried using it on {}, but nothing happened.", object)
            }
            GameEvent::ToolDoesNotFit { tool, object } => {
                write!(f, "{} does not work on {}.", tool, object)
            }
            GameEvent::ShipRepaired { object } => {
                write!(f, "You installed the star tracker in {}.", object)
            }
            GameEvent::Help => write!(f, "{}", HELP_TEXT),
            GameEvent::MissingArgument { verb } => {
                write!(f, "'{}' needs something to act on.", verb)
            }
            GameEvent::InvalidCommand { input } => write!(f, "Invalid command: '{}'.", input),
            GameEvent::GameOver(ending) => write!(f, "{}", ending),
        }
    }
}
