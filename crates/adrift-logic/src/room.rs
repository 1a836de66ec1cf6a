//! Rooms, doors and the world arena.
//!
//! Rooms form a cyclic directed graph. Instead of rooms pointing at each
//! other, every room lives in [`World`]'s table and doors store the
//! destination's [`RoomId`]. A door is one-way: the scenario decides whether
//! a matching door leads back.
//!
//! Leaving a room costs air. The departing room loses half a unit, and if it
//! held exactly the surplus (1.5) half a unit follows the player into the
//! next room, subject to that room's capacity rule. Any other reserve,
//! including one above 1.5, carries nothing.

use std::collections::{HashSet, VecDeque};

use crate::error::{ConstructionError, MoveError, UnlockError};
use crate::object::InteractiveObject;
use crate::oxygen;
use crate::tool::{Tool, ToolKind};

/// Index of a room in the world table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub u32);

impl RoomId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A one-way door out of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Door {
    pub direction: String,
    pub destination: RoomId,
    pub locked: bool,
    /// Name of the key that unlocks this door, if any key does.
    pub key: Option<String>,
}

/// A node of the world graph.
#[derive(Debug)]
pub struct Room {
    name: String,
    description: String,
    doors: Vec<Door>,
    tools: Vec<Tool>,
    objects: Vec<InteractiveObject>,
    oxygen: f32,
}

impl Room {
    /// Create an empty, airless room.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ConstructionError> {
        let name = name.into();
        let description = description.into();
        if name.trim().is_empty() {
            return Err(ConstructionError::EmptyName { what: "room" });
        }
        if description.trim().is_empty() {
            return Err(ConstructionError::EmptyDescription { what: "room", name });
        }
        Ok(Self {
            name,
            description,
            doors: Vec::new(),
            tools: Vec::new(),
            objects: Vec::new(),
            oxygen: 0.0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn oxygen(&self) -> f32 {
        self.oxygen
    }

    /// Register a door, replacing any existing door in the same direction.
    pub fn create_door(&mut self, direction: impl Into<String>, destination: RoomId, locked: bool) {
        self.insert_door(Door {
            direction: direction.into(),
            destination,
            locked,
            key: None,
        });
    }

    /// Register a locked door that opens with the named key.
    pub fn create_locked_door(
        &mut self,
        direction: impl Into<String>,
        destination: RoomId,
        key: impl Into<String>,
    ) {
        self.insert_door(Door {
            direction: direction.into(),
            destination,
            locked: true,
            key: Some(key.into()),
        });
    }

    fn insert_door(&mut self, door: Door) {
        match self.doors.iter_mut().find(|d| d.direction == door.direction) {
            Some(existing) => *existing = door,
            None => self.doors.push(door),
        }
    }

    pub fn door(&self, direction: &str) -> Option<&Door> {
        self.doors.iter().find(|d| d.direction == direction)
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// Add oxygen to the room.
    ///
    /// Negative amounts are rejected, and so is any amount once the room is
    /// full (reserve at or above 1.0). This is the only place the capacity
    /// rule is enforced.
    pub fn add_oxygen(&mut self, amount: f32) -> bool {
        if amount < 0.0 {
            log::debug!("{}: refused negative oxygen {}", self.name, amount);
            return false;
        }
        if self.oxygen >= oxygen::FULL {
            log::debug!("{}: already full of oxygen ({})", self.name, self.oxygen);
            return false;
        }
        self.oxygen += amount;
        true
    }

    pub fn add_tool(&mut self, tool: Tool) -> Result<(), ConstructionError> {
        if self.tools.iter().any(|t| t.name() == tool.name()) {
            return Err(ConstructionError::DuplicateEntry {
                owner: self.name.clone(),
                what: "tool",
                name: tool.name().to_string(),
            });
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn add_object(&mut self, object: InteractiveObject) -> Result<(), ConstructionError> {
        if self.objects.iter().any(|o| o.name() == object.name()) {
            return Err(ConstructionError::DuplicateEntry {
                owner: self.name.clone(),
                what: "object",
                name: object.name().to_string(),
            });
        }
        self.objects.push(object);
        Ok(())
    }

    /// Take a visible tool off the floor.
    pub fn pick_up_tool(&mut self, name: &str) -> Option<Tool> {
        let index = self.tools.iter().position(|t| t.name() == name)?;
        Some(self.tools.remove(index))
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }

    pub fn object(&self, name: &str) -> Option<&InteractiveObject> {
        self.objects.iter().find(|o| o.name() == name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut InteractiveObject> {
        self.objects.iter_mut().find(|o| o.name() == name)
    }

    pub fn objects(&self) -> &[InteractiveObject] {
        &self.objects
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    pub fn object_names(&self) -> Vec<String> {
        self.objects.iter().map(|o| o.name().to_string()).collect()
    }

    pub fn open_doors(&self) -> impl Iterator<Item = &Door> {
        self.doors.iter().filter(|d| !d.locked)
    }

    pub fn locked_doors(&self) -> impl Iterator<Item = &Door> {
        self.doors.iter().filter(|d| d.locked)
    }
}

/// Derived, display-only snapshot of a room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomView {
    pub name: String,
    pub description: String,
    /// `(direction, destination room name)` for every unlocked door.
    pub open_doors: Vec<(String, String)>,
    pub locked_doors: Vec<String>,
    pub tools: Vec<String>,
    pub objects: Vec<String>,
    pub oxygen: f32,
}

/// Arena holding every room of a scenario.
#[derive(Debug, Default)]
pub struct World {
    rooms: Vec<Room>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room and return its id.
    pub fn add_room(&mut self, room: Room) -> RoomId {
        let id = RoomId(self.rooms.len() as u32);
        self.rooms.push(room);
        id
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.index())
    }

    pub fn find_room(&self, name: &str) -> Option<RoomId> {
        self.rooms
            .iter()
            .position(|r| r.name() == name)
            .map(|i| RoomId(i as u32))
    }

    pub fn contains(&self, id: RoomId) -> bool {
        id.index() < self.rooms.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room_ids(&self) -> impl Iterator<Item = RoomId> {
        (0..self.rooms.len() as u32).map(RoomId)
    }

    /// Connect two rooms, checking both ends exist.
    pub fn connect(
        &mut self,
        from: RoomId,
        direction: &str,
        to: RoomId,
        locked: bool,
    ) -> Result<(), ConstructionError> {
        if !self.contains(to) {
            return Err(ConstructionError::InvalidRoomId(to.0));
        }
        let room = self
            .room_mut(from)
            .ok_or(ConstructionError::InvalidRoomId(from.0))?;
        room.create_door(direction, to, locked);
        Ok(())
    }

    /// Walk out of `from` through the door in `direction`.
    ///
    /// A missing or locked door leaves every room untouched. On success the
    /// departing room pays the move cost and any carried-over air is offered
    /// to the destination.
    pub fn exit(&mut self, from: RoomId, direction: &str) -> Result<RoomId, MoveError> {
        let room = self.room_mut(from).ok_or(MoveError::NoDoor)?;
        let door = room.door(direction).ok_or(MoveError::NoDoor)?;
        if door.locked {
            return Err(MoveError::Locked);
        }
        let destination = door.destination;

        let (remaining, carried) = oxygen::split_on_exit(room.oxygen);
        room.oxygen = remaining;

        let target = self.room_mut(destination).ok_or(MoveError::NoDoor)?;
        target.add_oxygen(carried);
        log::debug!(
            "moved {:?} -> {:?} via {} (left {}, carried {})",
            from,
            destination,
            direction,
            remaining,
            carried
        );
        Ok(destination)
    }

    /// Try `tool` as the key of the door in `direction`.
    ///
    /// Only a key whose name matches the door's key opens it. Once open the
    /// door stays open.
    pub fn unlock_door(
        &mut self,
        room: RoomId,
        direction: &str,
        tool: &Tool,
    ) -> Result<(), UnlockError> {
        let room = self.room_mut(room).ok_or(UnlockError::NoDoor)?;
        let door = room
            .doors
            .iter_mut()
            .find(|d| d.direction == direction)
            .ok_or(UnlockError::NoDoor)?;
        if !door.locked {
            return Err(UnlockError::NotLocked);
        }
        let fits = tool.kind() == ToolKind::Key && door.key.as_deref() == Some(tool.name());
        if !fits {
            return Err(UnlockError::WrongKey);
        }
        door.locked = false;
        Ok(())
    }

    /// Display snapshot of a room.
    pub fn room_view(&self, id: RoomId) -> Option<RoomView> {
        let room = self.room(id)?;
        let open_doors = room
            .open_doors()
            .map(|d| {
                let destination = self
                    .room(d.destination)
                    .map(|r| r.name().to_string())
                    .unwrap_or_default();
                (d.direction.clone(), destination)
            })
            .collect();
        Some(RoomView {
            name: room.name().to_string(),
            description: room.description().to_string(),
            open_doors,
            locked_doors: room.locked_doors().map(|d| d.direction.clone()).collect(),
            tools: room.tool_names(),
            objects: room.object_names(),
            oxygen: room.oxygen(),
        })
    }

    /// Every room reachable from `start` by following doors, locked or not,
    /// in breadth-first order.
    pub fn reachable_from(&self, start: RoomId) -> Vec<RoomId> {
        if !self.contains(start) {
            return Vec::new();
        }
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            order.push(current);
            let Some(room) = self.room(current) else {
                continue;
            };
            for door in room.doors() {
                if self.contains(door.destination) && visited.insert(door.destination) {
                    queue.push_back(door.destination);
                }
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str) -> Room {
        Room::new(name, "A test room.").unwrap()
    }

    /// hub --north--> north, hub --south (locked)--> south, north --south--> hub
    fn small_world() -> (World, RoomId, RoomId, RoomId) {
        let mut world = World::new();
        let hub = world.add_room(room("hub"));
        let north = world.add_room(room("north"));
        let south = world.add_room(room("south"));
        world.connect(hub, "north", north, false).unwrap();
        world.connect(hub, "south", south, true).unwrap();
        world.connect(north, "south", hub, false).unwrap();
        (world, hub, north, south)
    }

    #[test]
    fn test_add_oxygen_rejects_negative() {
        let mut r = room("lab");
        assert!(!r.add_oxygen(-0.5));
        assert_eq!(r.oxygen(), 0.0);
    }

    #[test]
    fn test_add_oxygen_capped_when_full() {
        let mut r = room("lab");
        assert!(r.add_oxygen(1.0));
        assert!(!r.add_oxygen(0.5));
        assert!(!r.add_oxygen(0.0));
        assert_eq!(r.oxygen(), 1.0);
    }

    #[test]
    fn test_add_oxygen_below_full() {
        let mut r = room("lab");
        assert!(r.add_oxygen(0.5));
        assert!(r.add_oxygen(1.5));
        assert_eq!(r.oxygen(), 2.0);
    }

    #[test]
    fn test_pick_up_tool_removes_it() {
        let mut r = room("lab");
        r.add_tool(Tool::new("flashlight", "Light.", ToolKind::Flashlight).unwrap())
            .unwrap();
        assert!(r.pick_up_tool("flashlight").is_some());
        assert!(!r.has_tool("flashlight"));
        assert!(r.pick_up_tool("flashlight").is_none());
    }

    #[test]
    fn test_duplicate_tool_rejected() {
        let mut r = room("lab");
        r.add_tool(Tool::new("key", "A key.", ToolKind::Key).unwrap())
            .unwrap();
        assert!(r
            .add_tool(Tool::new("key", "Another key.", ToolKind::Key).unwrap())
            .is_err());
    }

    #[test]
    fn test_create_door_replaces_same_direction() {
        let (mut world, hub, north, south) = small_world();
        world.connect(hub, "north", south, false).unwrap();
        let r = world.room(hub).unwrap();
        assert_eq!(r.doors().len(), 2);
        assert_eq!(r.door("north").map(|d| d.destination), Some(south));
        assert_ne!(r.door("north").map(|d| d.destination), Some(north));
    }

    #[test]
    fn test_exit_locked_door_changes_nothing() {
        let (mut world, hub, _, south) = small_world();
        world.room_mut(hub).unwrap().add_oxygen(1.5);
        assert_eq!(world.exit(hub, "south"), Err(MoveError::Locked));
        assert_eq!(world.room(hub).unwrap().oxygen(), 1.5);
        assert_eq!(world.room(south).unwrap().oxygen(), 0.0);
    }

    #[test]
    fn test_exit_missing_door() {
        let (mut world, hub, _, _) = small_world();
        assert_eq!(world.exit(hub, "east"), Err(MoveError::NoDoor));
    }

    #[test]
    fn test_exit_carries_air_from_surplus_room() {
        let (mut world, hub, north, _) = small_world();
        world.room_mut(hub).unwrap().add_oxygen(1.5);
        assert_eq!(world.exit(hub, "north"), Ok(north));
        assert_eq!(world.room(hub).unwrap().oxygen(), 1.0);
        assert_eq!(world.room(north).unwrap().oxygen(), 0.5);
    }

    #[test]
    fn test_exit_from_full_room_carries_nothing() {
        let (mut world, hub, north, _) = small_world();
        world.room_mut(hub).unwrap().add_oxygen(1.0);
        assert_eq!(world.exit(hub, "north"), Ok(north));
        assert_eq!(world.room(hub).unwrap().oxygen(), 0.5);
        assert_eq!(world.room(north).unwrap().oxygen(), 0.0);
    }

    #[test]
    fn test_carryover_refused_by_full_destination() {
        let (mut world, hub, north, _) = small_world();
        world.room_mut(hub).unwrap().add_oxygen(1.5);
        world.room_mut(north).unwrap().add_oxygen(1.0);
        world.exit(hub, "north").unwrap();
        assert_eq!(world.room(north).unwrap().oxygen(), 1.0);
    }

    #[test]
    fn test_exit_never_goes_negative() {
        let (mut world, hub, _, _) = small_world();
        world.exit(hub, "north").unwrap();
        assert_eq!(world.room(hub).unwrap().oxygen(), 0.0);
    }

    #[test]
    fn test_unlock_with_matching_key() {
        let mut world = World::new();
        let lab = world.add_room(room("lab"));
        let dorms = world.add_room(room("dorms"));
        world
            .room_mut(lab)
            .unwrap()
            .create_locked_door("east", dorms, "key-1");

        let wrong = Tool::new("key-2", "Other key.", ToolKind::Key).unwrap();
        let right = Tool::new("key-1", "Lab key.", ToolKind::Key).unwrap();

        assert_eq!(world.exit(lab, "east"), Err(MoveError::Locked));
        assert_eq!(world.unlock_door(lab, "east", &wrong), Err(UnlockError::WrongKey));
        assert_eq!(world.unlock_door(lab, "west", &right), Err(UnlockError::NoDoor));
        assert_eq!(world.unlock_door(lab, "east", &right), Ok(()));
        assert_eq!(world.unlock_door(lab, "east", &right), Err(UnlockError::NotLocked));
        assert_eq!(world.exit(lab, "east"), Ok(dorms));
    }

    #[test]
    fn test_keyless_locked_door_stays_shut() {
        let (mut world, hub, _, _) = small_world();
        let key = Tool::new("key-1", "A key.", ToolKind::Key).unwrap();
        assert_eq!(world.unlock_door(hub, "south", &key), Err(UnlockError::WrongKey));
    }

    #[test]
    fn test_room_view_partitions_doors() {
        let (world, hub, _, _) = small_world();
        let view = world.room_view(hub).unwrap();
        assert_eq!(view.open_doors, vec![("north".to_string(), "north".to_string())]);
        assert_eq!(view.locked_doors, vec!["south".to_string()]);
    }

    #[test]
    fn test_reachable_follows_one_way_doors() {
        let (world, hub, north, south) = small_world();
        assert_eq!(world.reachable_from(hub), vec![hub, north, south]);
        // south has no doors out
        assert_eq!(world.reachable_from(south), vec![south]);
        assert!(world.reachable_from(RoomId(99)).is_empty());
    }

    #[test]
    fn test_connect_rejects_unknown_room() {
        let (mut world, hub, _, _) = small_world();
        assert_eq!(
            world.connect(hub, "up", RoomId(7), false),
            Err(ConstructionError::InvalidRoomId(7))
        );
    }
}
