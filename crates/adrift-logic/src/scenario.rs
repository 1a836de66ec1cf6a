//! Scenario data and world construction.
//!
//! A scenario is plain JSON: rooms with their air, tools, objects (and the
//! tools hidden inside them) and doors, plus the name of the start room.
//! [`ScenarioSpec::build`] turns it into a [`World`] and fails fast on any
//! contract violation, so a broken scenario never reaches the turn loop.
//!
//! ```
//! use adrift_logic::scenario::ScenarioSpec;
//!
//! let spec = ScenarioSpec::from_json(r#"{
//!     "name": "tiny",
//!     "start": "hangar",
//!     "rooms": [{ "name": "hangar", "description": "A hangar.", "oxygen": 1.5 }]
//! }"#).unwrap();
//! let (world, start) = spec.build().unwrap();
//! assert_eq!(world.room(start).unwrap().oxygen(), 1.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConstructionError, ScenarioError};
use crate::object::{InteractiveObject, ObjectKind};
use crate::oxygen;
use crate::room::{Room, RoomId, World};
use crate::session::GameSession;
use crate::tool::{Tool, ToolKind};

/// The bundled research-station scenario.
pub const STATION_JSON: &str = include_str!("../../../data/station.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    /// Name of the room the player starts in.
    pub start: String,
    pub rooms: Vec<RoomSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSpec {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub oxygen: f32,
    #[serde(default)]
    pub tools: Vec<ToolSpec>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
    #[serde(default)]
    pub doors: Vec<DoorSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub kind: ToolKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub kind: ObjectKind,
    /// Tools handed over when the right tool is used on the object.
    #[serde(default)]
    pub hidden: Vec<ToolSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorSpec {
    pub direction: String,
    /// Destination room name.
    pub to: String,
    #[serde(default)]
    pub locked: bool,
    /// Key that opens the door. A door with a key always starts locked.
    #[serde(default)]
    pub key: Option<String>,
}

impl ToolSpec {
    fn build(&self) -> Result<Tool, ConstructionError> {
        Tool::new(self.name.as_str(), self.description.as_str(), self.kind)
    }
}

impl ScenarioSpec {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The bundled station scenario.
    pub fn station() -> Result<Self, ScenarioError> {
        Self::from_json(STATION_JSON)
    }

    /// Assemble the world and locate the start room.
    pub fn build(&self) -> Result<(World, RoomId), ConstructionError> {
        let mut world = World::new();
        let mut ids = Vec::with_capacity(self.rooms.len());

        // Pass 1: rooms and their contents.
        for spec in &self.rooms {
            if world.find_room(&spec.name).is_some() {
                return Err(ConstructionError::DuplicateRoom(spec.name.clone()));
            }
            if !oxygen::is_starting_level(spec.oxygen) {
                return Err(ConstructionError::InvalidOxygen {
                    room: spec.name.clone(),
                    value: spec.oxygen,
                });
            }
            let mut room = Room::new(spec.name.as_str(), spec.description.as_str())?;
            room.add_oxygen(spec.oxygen);
            for tool in &spec.tools {
                room.add_tool(tool.build()?)?;
            }
            for object_spec in &spec.objects {
                let mut object = InteractiveObject::new(
                    object_spec.name.as_str(),
                    object_spec.description.as_str(),
                    object_spec.kind,
                )?;
                for hidden in &object_spec.hidden {
                    object.hide(hidden.build()?)?;
                }
                room.add_object(object)?;
            }
            ids.push(world.add_room(room));
        }

        // Pass 2: doors, now that every destination has an id.
        for (spec, &from) in self.rooms.iter().zip(&ids) {
            for door in &spec.doors {
                let to = world.find_room(&door.to).ok_or_else(|| {
                    ConstructionError::UnknownDestination {
                        room: spec.name.clone(),
                        direction: door.direction.clone(),
                        destination: door.to.clone(),
                    }
                })?;
                let room = world
                    .room_mut(from)
                    .ok_or(ConstructionError::InvalidRoomId(from.0))?;
                match &door.key {
                    Some(key) => room.create_locked_door(door.direction.as_str(), to, key.as_str()),
                    None => room.create_door(door.direction.as_str(), to, door.locked),
                }
            }
        }

        let start = world
            .find_room(&self.start)
            .ok_or_else(|| ConstructionError::UnknownStart(self.start.clone()))?;

        let reachable = world.reachable_from(start);
        if reachable.len() < world.room_count() {
            for id in world.room_ids().filter(|id| !reachable.contains(id)) {
                if let Some(room) = world.room(id) {
                    log::warn!("{}: room `{}` is unreachable from the start", self.name, room.name());
                }
            }
        }

        log::info!(
            "Built scenario '{}': {} rooms, start '{}'",
            self.name,
            world.room_count(),
            self.start
        );
        Ok((world, start))
    }

    /// Build the world and start a session in it.
    pub fn start_session(&self) -> Result<GameSession, ConstructionError> {
        let (world, start) = self.build()?;
        GameSession::new(world, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ROOMS: &str = r#"{
        "name": "test",
        "start": "lab",
        "rooms": [
            {
                "name": "lab",
                "description": "A lab.",
                "oxygen": 1.0,
                "tools": [
                    { "name": "card", "description": "An access card.", "kind": "access-card" },
                    { "name": "air", "description": "Air.", "kind": "oxygen-cylinder", "yield": 1.0 }
                ],
                "objects": [
                    {
                        "name": "computer",
                        "description": "A computer.",
                        "kind": "computer",
                        "hidden": [{ "name": "key-1", "description": "A key.", "kind": "key" }]
                    }
                ],
                "doors": [{ "direction": "east", "to": "dorms", "key": "key-1" }]
            },
            {
                "name": "dorms",
                "description": "Bunks.",
                "doors": [{ "direction": "west", "to": "lab" }]
            }
        ]
    }"#;

    #[test]
    fn test_build_two_rooms() {
        let spec = ScenarioSpec::from_json(TWO_ROOMS).unwrap();
        let (world, start) = spec.build().unwrap();
        assert_eq!(world.room_count(), 2);

        let lab = world.room(start).unwrap();
        assert_eq!(lab.name(), "lab");
        assert_eq!(lab.oxygen(), 1.0);
        assert_eq!(lab.tool_names(), vec!["card".to_string(), "air".to_string()]);
        assert_eq!(
            lab.object("computer").unwrap().hidden_tools()[0].name(),
            "key-1"
        );

        let door = lab.door("east").unwrap();
        assert!(door.locked);
        assert_eq!(door.key.as_deref(), Some("key-1"));

        let dorms = world.find_room("dorms").unwrap();
        assert!(!world.room(dorms).unwrap().door("west").unwrap().locked);
    }

    #[test]
    fn test_cylinder_yield_from_json() {
        let spec = ScenarioSpec::from_json(TWO_ROOMS).unwrap();
        assert_eq!(
            spec.rooms[0].tools[1].kind,
            ToolKind::OxygenCylinder {
                contaminated: false,
                oxygen_yield: 1.0
            }
        );
    }

    #[test]
    fn test_unknown_destination_fails() {
        let mut spec = ScenarioSpec::from_json(TWO_ROOMS).unwrap();
        spec.rooms[1].doors[0].to = "nowhere".into();
        assert!(matches!(
            spec.build(),
            Err(ConstructionError::UnknownDestination { .. })
        ));
    }

    #[test]
    fn test_unknown_start_fails() {
        let mut spec = ScenarioSpec::from_json(TWO_ROOMS).unwrap();
        spec.start = "bridge".into();
        assert_eq!(
            spec.build().unwrap_err(),
            ConstructionError::UnknownStart("bridge".into())
        );
    }

    #[test]
    fn test_duplicate_room_fails() {
        let mut spec = ScenarioSpec::from_json(TWO_ROOMS).unwrap();
        spec.rooms[1].name = "lab".into();
        assert_eq!(
            spec.build().unwrap_err(),
            ConstructionError::DuplicateRoom("lab".into())
        );
    }

    #[test]
    fn test_invalid_starting_oxygen_fails() {
        for value in [-1.0, 0.25, 3.0] {
            let mut spec = ScenarioSpec::from_json(TWO_ROOMS).unwrap();
            spec.rooms[0].oxygen = value;
            assert_eq!(
                spec.build().unwrap_err(),
                ConstructionError::InvalidOxygen {
                    room: "lab".into(),
                    value
                }
            );
        }
    }

    #[test]
    fn test_blank_tool_name_fails() {
        let mut spec = ScenarioSpec::from_json(TWO_ROOMS).unwrap();
        spec.rooms[0].tools[0].name = " ".into();
        assert_eq!(
            spec.build().unwrap_err(),
            ConstructionError::EmptyName { what: "tool" }
        );
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            ScenarioSpec::from_json("{ not json"),
            Err(ScenarioError::Parse(_))
        ));
    }

    #[test]
    fn test_bundled_station_builds() {
        let spec = ScenarioSpec::station().unwrap();
        let (world, start) = spec.build().unwrap();
        assert_eq!(world.room_count(), 9);
        assert_eq!(world.reachable_from(start).len(), 9);
        assert_eq!(world.room(start).unwrap().oxygen(), 1.5);
    }
}
