//! The game session: one player, one backpack, one world.
//!
//! A turn runs in a fixed order:
//!
//! 1. **Oxygen gate** ([`GameSession::check_oxygen`]). An airless room forces
//!    the player to breathe from a cylinder in the backpack. No cylinder, or
//!    a contaminated one, ends the game.
//! 2. **Display** ([`GameSession::room_view`]), done by the front end.
//! 3. **Input** ([`GameSession::handle_input`]): one line, tokenized and
//!    dispatched.
//!
//! Bad input never ends the game. Only the oxygen rules lose it, and only
//! repairing the ship with the star tracker wins it. Once ended, the session
//! stays ended and ignores further input.

use std::fmt;

use crate::backpack::Backpack;
use crate::command::Command;
use crate::error::{ConstructionError, MoveError, UnlockError};
use crate::events::GameEvent;
use crate::object::Interaction;
use crate::oxygen::{self, OxygenStatus};
use crate::room::{RoomId, RoomView, World};
use crate::tool::{Tool, ToolKind};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The ship was repaired with the star tracker.
    Won,
    /// The room ran out of air and there was no cylinder to breathe from.
    Suffocated,
    /// The player breathed from a contaminated cylinder.
    Poisoned,
    /// The player gave up.
    Quit,
}

impl Ending {
    pub fn is_loss(self) -> bool {
        matches!(self, Ending::Suffocated | Ending::Poisoned)
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ending::Won => write!(
                f,
                "You did it! Your ship is repaired, and with the star tracker you can find your way home!"
            ),
            Ending::Suffocated => write!(f, "You ran out of oxygen. Game over."),
            Ending::Poisoned => write!(
                f,
                "Unfortunately you breathed from a contaminated cylinder and lost the game!"
            ),
            Ending::Quit => write!(f, "Game over."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    Ended(Ending),
}

/// Orchestrates the world, the backpack and the termination state.
#[derive(Debug)]
pub struct GameSession {
    world: World,
    current: RoomId,
    backpack: Backpack,
    state: SessionState,
}

impl GameSession {
    /// Start a session with the player standing in `start`.
    pub fn new(world: World, start: RoomId) -> Result<Self, ConstructionError> {
        if !world.contains(start) {
            return Err(ConstructionError::InvalidRoomId(start.0));
        }
        Ok(Self {
            world,
            current: start,
            backpack: Backpack::new(),
            state: SessionState::Playing,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn ending(&self) -> Option<Ending> {
        match self.state {
            SessionState::Playing => None,
            SessionState::Ended(ending) => Some(ending),
        }
    }

    pub fn current_room(&self) -> RoomId {
        self.current
    }

    pub fn backpack(&self) -> &Backpack {
        &self.backpack
    }

    pub fn backpack_mut(&mut self) -> &mut Backpack {
        &mut self.backpack
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Oxygen reserve of the room the player stands in.
    pub fn current_oxygen(&self) -> f32 {
        self.world
            .room(self.current)
            .map(|r| r.oxygen())
            .unwrap_or_default()
    }

    /// Display snapshot of the current room.
    pub fn room_view(&self) -> Option<RoomView> {
        self.world.room_view(self.current)
    }

    /// Run a whole turn: the oxygen gate, then the command if the player
    /// is still alive.
    pub fn play_turn(&mut self, line: &str) -> Vec<GameEvent> {
        let mut events = self.check_oxygen();
        if self.is_playing() {
            events.extend(self.handle_input(line));
        }
        events
    }

    /// The oxygen gate at the start of every turn.
    pub fn check_oxygen(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.is_playing() {
            return events;
        }
        let reserve = self.current_oxygen();
        match oxygen::assess(reserve) {
            OxygenStatus::Exhausted => {
                events.push(GameEvent::OutOfOxygen);
                match self.backpack.take_oxygen_cylinder() {
                    Some(cylinder) => self.breathe(cylinder, &mut events),
                    None => self.end(Ending::Suffocated, &mut events),
                }
            }
            OxygenStatus::Low => events.push(GameEvent::LowOxygen { reserve }),
            OxygenStatus::Safe => {
                let room = self
                    .world
                    .room(self.current)
                    .map(|r| r.name().to_string())
                    .unwrap_or_default();
                events.push(GameEvent::RoomSafe { room });
            }
        }
        events
    }

    /// Tokenize and dispatch one line of input.
    pub fn handle_input(&mut self, line: &str) -> Vec<GameEvent> {
        self.execute(Command::parse(line))
    }

    /// Dispatch one command.
    pub fn execute(&mut self, command: Command) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.is_playing() {
            return events;
        }
        match command {
            Command::Go { direction } => self.go(&direction, &mut events),
            Command::Pick { tool } => self.pick(&tool, &mut events),
            Command::Use { tool, target } => self.use_tool(&tool, target.as_deref(), &mut events),
            Command::Inventory => events.push(GameEvent::Inventory {
                names: self.backpack.list_names(),
            }),
            Command::Help => events.push(GameEvent::Help),
            Command::Quit => self.end(Ending::Quit, &mut events),
            Command::Empty => {}
            Command::Missing { verb } => events.push(GameEvent::MissingArgument { verb }),
            Command::Invalid(input) => events.push(GameEvent::InvalidCommand { input }),
        }
        events
    }

    fn go(&mut self, direction: &str, events: &mut Vec<GameEvent>) {
        match self.world.exit(self.current, direction) {
            Ok(destination) => {
                let from = self.room_name(self.current);
                let to = self.room_name(destination);
                self.current = destination;
                events.push(GameEvent::Moved { from, to });
            }
            Err(MoveError::Locked) => events.push(GameEvent::DoorLocked {
                direction: direction.to_string(),
            }),
            Err(MoveError::NoDoor) => events.push(GameEvent::NoDoor {
                direction: direction.to_string(),
            }),
        }
    }

    fn pick(&mut self, name: &str, events: &mut Vec<GameEvent>) {
        let picked = self
            .world
            .room_mut(self.current)
            .and_then(|room| room.pick_up_tool(name));
        match picked {
            Some(tool) => {
                events.push(GameEvent::PickedUp {
                    tool: tool.name().to_string(),
                });
                self.backpack.store(tool);
            }
            None => events.push(GameEvent::ToolNotHere {
                tool: name.to_string(),
            }),
        }
    }

    fn use_tool(&mut self, name: &str, target: Option<&str>, events: &mut Vec<GameEvent>) {
        let Some(tool) = self.backpack.take(name) else {
            events.push(GameEvent::NotInBackpack {
                tool: name.to_string(),
            });
            return;
        };

        // Opening a cylinder always goes through the contamination check,
        // whatever it was aimed at.
        if tool.is_oxygen_cylinder() {
            self.breathe(tool, events);
            return;
        }

        let consumed = match target {
            Some(target) => self.use_on_target(&tool, target, events),
            None => {
                if tool.use_alone() {
                    events.push(GameEvent::ToolUsed {
                        tool: tool.name().to_string(),
                    });
                }
                false
            }
        };
        if !consumed {
            self.backpack.store(tool);
        }
    }

    /// Use a tool on an object, or on a door when no object has that name.
    /// Returns whether the tool was used up.
    fn use_on_target(&mut self, tool: &Tool, target: &str, events: &mut Vec<GameEvent>) -> bool {
        let current = self.current;
        let Some(room) = self.world.room_mut(current) else {
            return false;
        };

        if let Some(object) = room.object_mut(target) {
            let mut ctx = Interaction::new(&mut self.backpack, events);
            let success = object.use_tool(tool, &mut ctx);
            let consumed = ctx.consume_tool;
            if success && tool.kind() == ToolKind::StarTracker && object.is_ship() {
                self.end(Ending::Won, events);
            }
            return consumed;
        }

        if room.door(target).is_some() {
            self.unlock(tool, target, events);
        } else {
            events.push(GameEvent::NoSuchTarget {
                target: target.to_string(),
            });
        }
        false
    }

    fn unlock(&mut self, tool: &Tool, direction: &str, events: &mut Vec<GameEvent>) {
        let event = match self.world.unlock_door(self.current, direction, tool) {
            Ok(()) => GameEvent::DoorUnlocked {
                direction: direction.to_string(),
                tool: tool.name().to_string(),
            },
            Err(UnlockError::NotLocked) => GameEvent::DoorNotLocked {
                direction: direction.to_string(),
            },
            Err(UnlockError::WrongKey) => GameEvent::KeyDoesNotFit {
                direction: direction.to_string(),
                tool: tool.name().to_string(),
            },
            Err(UnlockError::NoDoor) => GameEvent::NoDoor {
                direction: direction.to_string(),
            },
        };
        events.push(event);
    }

    /// Open a cylinder in the current room. The cylinder is spent either way.
    fn breathe(&mut self, cylinder: Tool, events: &mut Vec<GameEvent>) {
        let name = cylinder.name().to_string();
        if cylinder.use_alone() {
            events.push(GameEvent::CylinderContaminated { tool: name });
            self.end(Ending::Poisoned, events);
            return;
        }

        let amount = cylinder.oxygen_yield().unwrap_or(oxygen::CYLINDER_YIELD);
        let added = self
            .world
            .room_mut(self.current)
            .is_some_and(|room| room.add_oxygen(amount));
        if added {
            events.push(GameEvent::OxygenRestored {
                tool: name,
                reserve: self.current_oxygen(),
            });
        } else {
            events.push(GameEvent::OxygenVented { tool: name });
        }
    }

    fn end(&mut self, ending: Ending, events: &mut Vec<GameEvent>) {
        if !self.is_playing() {
            return;
        }
        log::info!("session ended: {:?}", ending);
        self.state = SessionState::Ended(ending);
        events.push(GameEvent::GameOver(ending));
    }

    fn room_name(&self, id: RoomId) -> String {
        self.world
            .room(id)
            .map(|r| r.name().to_string())
            .unwrap_or_default()
    }
}
