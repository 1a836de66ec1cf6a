//! Interactive room fixtures.
//!
//! Objects never leave the room they were placed in. Some hide tools that
//! are handed to the player when the right tool is used on them. Each
//! [`ObjectKind`] carries its own rule and whatever mutable state that rule
//! needs, so `use_tool` is a single match instead of a class per fixture.
//!
//! | Kind | Accepts | Effect |
//! |------|---------|--------|
//! | `LockedCabinet` | key, tool kit | unlocks once, hands over the hidden tool |
//! | `UnlockedCabinet` | tool kit | hands over the hidden tool |
//! | `SealedCrate` | laser cutter | hands over the hidden tool |
//! | `Computer` | access card | hands over the hidden tool, eats the card |
//! | `ReactorTerminal` | power cable | restores power |
//! | `Greenhouse` | flashlight | hands over the hidden tool |
//! | `InfirmaryBed` | nothing | never does anything |
//! | `Ship` | star tracker | repaired (the session decides the win) |
//!
//! Every rule matches on the tool's [`ToolKind`], never on its name, so a
//! renamed flashlight still lights the greenhouse.

use serde::{Deserialize, Serialize};

use crate::backpack::Backpack;
use crate::error::ConstructionError;
use crate::events::GameEvent;
use crate::tool::{Tool, ToolKind};

/// Fixture kinds and their per-kind state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ObjectKind {
    LockedCabinet {
        #[serde(default)]
        unlocked: bool,
    },
    UnlockedCabinet,
    SealedCrate,
    Computer,
    ReactorTerminal {
        #[serde(default)]
        powered: bool,
    },
    Greenhouse,
    InfirmaryBed,
    Ship,
}

/// Everything an object may touch while a tool is used on it.
///
/// Passed in explicitly for the duration of one `use` call, so objects never
/// hold a reference back to the session.
#[derive(Debug)]
pub struct Interaction<'a> {
    pub backpack: &'a mut Backpack,
    pub events: &'a mut Vec<GameEvent>,
    /// Set by the object when the tool is used up and must not go back into
    /// the backpack.
    pub consume_tool: bool,
}

impl<'a> Interaction<'a> {
    pub fn new(backpack: &'a mut Backpack, events: &'a mut Vec<GameEvent>) -> Self {
        Self {
            backpack,
            events,
            consume_tool: false,
        }
    }
}

/// A named fixture inside a room.
#[derive(Debug)]
pub struct InteractiveObject {
    name: String,
    description: String,
    kind: ObjectKind,
    hidden: Vec<Tool>,
}

impl InteractiveObject {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ObjectKind,
    ) -> Result<Self, ConstructionError> {
        let name = name.into();
        let description = description.into();
        if name.trim().is_empty() {
            return Err(ConstructionError::EmptyName { what: "object" });
        }
        if description.trim().is_empty() {
            return Err(ConstructionError::EmptyDescription {
                what: "object",
                name,
            });
        }
        Ok(Self {
            name,
            description,
            kind,
            hidden: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Hide a tool inside the object.
    pub fn hide(&mut self, tool: Tool) -> Result<(), ConstructionError> {
        if self.hidden.iter().any(|t| t.name() == tool.name()) {
            return Err(ConstructionError::DuplicateEntry {
                owner: self.name.clone(),
                what: "hidden tool",
                name: tool.name().to_string(),
            });
        }
        self.hidden.push(tool);
        Ok(())
    }

    pub fn hidden_tools(&self) -> &[Tool] {
        &self.hidden
    }

    /// Hand over the next hidden tool, or `None` once everything was taken.
    pub fn reveal(&mut self) -> Option<Tool> {
        if self.hidden.is_empty() {
            None
        } else {
            Some(self.hidden.remove(0))
        }
    }

    pub fn is_ship(&self) -> bool {
        self.kind == ObjectKind::Ship
    }

    /// Use a tool on this object.
    ///
    /// Returns whether the action had its intended effect. Never panics: a
    /// hidden tool that is already gone is reported as failure.
    pub fn use_tool(&mut self, tool: &Tool, ctx: &mut Interaction<'_>) -> bool {
        let tool_kind = tool.kind();
        let kind = self.kind;
        match kind {
            ObjectKind::LockedCabinet { unlocked } => {
                let fits = matches!(tool_kind, ToolKind::Key | ToolKind::ToolKit);
                if !fits {
                    self.reject(tool, ctx)
                } else if unlocked {
                    ctx.events.push(GameEvent::AlreadyUnlocked {
                        object: self.name.clone(),
                    });
                    true
                } else {
                    self.kind = ObjectKind::LockedCabinet { unlocked: true };
                    ctx.events.push(GameEvent::CabinetUnlocked {
                        object: self.name.clone(),
                    });
                    // The cabinet counts as open even if nothing was inside.
                    self.hand_over(ctx);
                    true
                }
            }
            ObjectKind::UnlockedCabinet if tool_kind == ToolKind::ToolKit => self.hand_over(ctx),
            ObjectKind::SealedCrate if tool_kind == ToolKind::LaserCutter => self.hand_over(ctx),
            ObjectKind::Greenhouse if tool_kind == ToolKind::Flashlight => self.hand_over(ctx),
            ObjectKind::Computer if tool_kind == ToolKind::AccessCard => {
                let granted = self.hand_over(ctx);
                if granted {
                    ctx.consume_tool = true;
                    ctx.events.push(GameEvent::ToolConsumed {
                        tool: tool.name().to_string(),
                    });
                }
                granted
            }
            ObjectKind::ReactorTerminal { .. } if tool_kind == ToolKind::PowerCable => {
                self.kind = ObjectKind::ReactorTerminal { powered: true };
                ctx.events.push(GameEvent::ReactorPowered {
                    object: self.name.clone(),
                });
                true
            }
            ObjectKind::InfirmaryBed => {
                ctx.events.push(GameEvent::NothingHappened {
                    object: self.name.clone(),
                });
                false
            }
            ObjectKind::Ship if tool_kind == ToolKind::StarTracker => {
                ctx.events.push(GameEvent::ShipRepaired {
                    object: self.name.clone(),
                });
                true
            }
            _ => self.reject(tool, ctx),
        }
    }

    /// Move the next hidden tool into the backpack.
    fn hand_over(&mut self, ctx: &mut Interaction<'_>) -> bool {
        match self.reveal() {
            Some(found) => {
                ctx.events.push(GameEvent::ToolRevealed {
                    object: self.name.clone(),
                    tool: found.name().to_string(),
                });
                ctx.backpack.store(found);
                true
            }
            None => {
                ctx.events.push(GameEvent::NothingInside {
                    object: self.name.clone(),
                });
                false
            }
        }
    }

    fn reject(&self, tool: &Tool, ctx: &mut Interaction<'_>) -> bool {
        ctx.events.push(GameEvent::ToolDoesNotFit {
            tool: tool.name().to_string(),
            object: self.name.clone(),
        });
        false
    }
}
