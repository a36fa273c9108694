//! The world grid: rooms, locked doors, ground items, fog of war.
//!
//! A fixed 5x5 grid keyed by [`Position`]. Rooms hold per-instance state
//! (a spawned enemy, items on the ground, lock state) cloned from the
//! read-only content templates at generation time. Enemies are not
//! persisted; reloading a save regenerates the world and respawns them.

use std::collections::{HashMap, HashSet};

use game_core::{Enemy, InventorySlot, ItemHandle, Position};
use game_content::catalog::{CAVE_DOOR, handles};
use game_content::enemies::templates;

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    #[strum(serialize = "north", serialize = "n")]
    North,
    #[strum(serialize = "south", serialize = "s")]
    South,
    #[strum(serialize = "east", serialize = "e")]
    East,
    #[strum(serialize = "west", serialize = "w")]
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Position one step in this direction. North decreases `y`, matching
    /// the minimap's top row being `y = 0`.
    pub fn step(&self, from: Position) -> Position {
        match self {
            Direction::North => Position::new(from.x, from.y - 1),
            Direction::South => Position::new(from.x, from.y + 1),
            Direction::East => Position::new(from.x + 1, from.y),
            Direction::West => Position::new(from.x - 1, from.y),
        }
    }
}

/// Non-combat interaction available in a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomFeature {
    /// A traveling merchant buys and sells here.
    Merchant,

    /// An inscription that unlocks the room's door when answered.
    Riddle,
}

/// One location in the world.
#[derive(Clone, Debug)]
pub struct Room {
    pub name: String,
    pub description: String,
    pub items: Vec<InventorySlot>,
    pub enemy: Option<Enemy>,
    pub locked: bool,
    /// Which key opens this room, when locked.
    pub door_id: Option<u16>,
    pub feature: Option<RoomFeature>,
}

impl Room {
    fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            items: Vec::new(),
            enemy: None,
            locked: false,
            door_id: None,
            feature: None,
        }
    }

    fn with_enemy(mut self, enemy: Enemy) -> Self {
        self.enemy = Some(enemy);
        self
    }

    fn with_item(mut self, handle: ItemHandle, quantity: u16) -> Self {
        self.items.push(InventorySlot::new(handle, quantity));
        self
    }

    fn with_feature(mut self, feature: RoomFeature) -> Self {
        self.feature = Some(feature);
        self
    }

    fn locked_by(mut self, door_id: u16) -> Self {
        self.locked = true;
        self.door_id = Some(door_id);
        self
    }

    /// True if a living enemy blocks this room.
    pub fn has_live_enemy(&self) -> bool {
        self.enemy
            .as_ref()
            .is_some_and(|enemy| !enemy.entity.is_defeated())
    }

    /// Remove a ground item pile by handle, returning it if present.
    pub fn take_item(&mut self, handle: ItemHandle) -> Option<InventorySlot> {
        let index = self.items.iter().position(|slot| slot.handle == handle)?;
        Some(self.items.remove(index))
    }
}

/// The game world: a bounded grid of rooms.
#[derive(Clone, Debug)]
pub struct World {
    pub width: i32,
    pub height: i32,
    rooms: HashMap<Position, Room>,
}

impl World {
    pub const WIDTH: i32 = 5;
    pub const HEIGHT: i32 = 5;

    /// Generate the fixed Asteria overworld.
    pub fn generate() -> Self {
        let mut rooms = HashMap::new();
        let mut add = |x: i32, y: i32, room: Room| {
            rooms.insert(Position::new(x, y), room);
        };

        add(
            1,
            1,
            Room::new(
                "Crossroads",
                "A dusty crossroads with a weathered sign pointing in four directions.",
            ),
        );
        add(
            1,
            2,
            Room::new(
                "Merchant's Way",
                "A well-worn path where traders often rest.",
            )
            .with_feature(RoomFeature::Merchant),
        );
        add(
            2,
            1,
            Room::new(
                "Whispering Trees",
                "Ancient trees that seem to whisper secrets when the wind blows.",
            )
            .with_enemy(templates::WOLF.spawn()),
        );
        add(
            2,
            2,
            Room::new(
                "Old Ruins",
                "Crumbled stones from a long-forgotten civilization.",
            )
            .with_item(handles::ANCIENT_COIN, 1)
            .with_item(handles::RUSTY_KEY, 1),
        );
        add(
            0,
            1,
            Room::new(
                "Foggy Marsh",
                "Thick mist obscures your vision. The ground is soft and treacherous.",
            )
            .with_enemy(templates::MARSH_SLIME.spawn()),
        );
        add(
            1,
            0,
            Room::new(
                "Sunlit Meadow",
                "Wildflowers sway in a gentle breeze. A peaceful place.",
            )
            .with_item(handles::HEALING_HERB, 1),
        );
        add(
            3,
            1,
            Room::new(
                "Bandit Camp",
                "Remnants of a camp. Someone unfriendly lingers here.",
            )
            .with_enemy(templates::BANDIT.spawn()),
        );
        add(
            3,
            2,
            Room::new(
                "Mysterious Cave",
                "A dark cave entrance. Strange symbols are carved around the doorway.",
            )
            .locked_by(CAVE_DOOR)
            .with_feature(RoomFeature::Riddle),
        );
        add(
            4,
            1,
            Room::new(
                "Cliff Edge",
                "A stunning view of the sea far below. Something glints nearby.",
            )
            .with_item(handles::STRANGE_GEM, 1),
        );
        add(
            2,
            3,
            Room::new(
                "Quiet Pond",
                "Crystal clear water reflects the sky. Fish swim lazily.",
            )
            .with_item(handles::LUCKY_FISH, 1),
        );
        add(
            4,
            4,
            Room::new(
                "Obsidian Keep",
                "A fortress of black glass looms before you. Dark energy radiates from within.",
            )
            .with_enemy(templates::OBSIDIAN_WARDEN.spawn()),
        );

        // Fill the rest with wilderness.
        for x in 0..Self::WIDTH {
            for y in 0..Self::HEIGHT {
                rooms.entry(Position::new(x, y)).or_insert_with(|| {
                    Room::new("Wilderness", "Tall grass stretches in all directions.")
                });
            }
        }

        Self {
            width: Self::WIDTH,
            height: Self::HEIGHT,
            rooms,
        }
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }

    pub fn room(&self, position: Position) -> Option<&Room> {
        self.rooms.get(&position)
    }

    pub fn room_mut(&mut self, position: Position) -> Option<&mut Room> {
        self.rooms.get_mut(&position)
    }

    /// Unlock every riddle-sealed door. Applied when restoring a save in
    /// which the seal was already broken.
    pub fn unseal_riddle_doors(&mut self) {
        for room in self.rooms.values_mut() {
            if room.feature == Some(RoomFeature::Riddle) {
                room.locked = false;
            }
        }
    }

    /// Valid moves from a position, in a stable order.
    pub fn neighbors(&self, position: Position) -> Vec<(Direction, Position)> {
        Direction::ALL
            .iter()
            .map(|dir| (*dir, dir.step(position)))
            .filter(|(_, pos)| self.in_bounds(*pos))
            .collect()
    }

    /// Iterate all rooms with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (&Position, &Room)> {
        self.rooms.iter()
    }

    /// ASCII minimap of the discovered world. `@` marks the player, `!` a
    /// living enemy, `#` a locked door, `*` ground items, `.` explored
    /// ground; unexplored rooms are blank.
    pub fn minimap(&self, player: Position, discovered: &HashSet<Position>) -> String {
        let mut lines = Vec::with_capacity(self.height as usize);
        for y in 0..self.height {
            let mut row = String::with_capacity(self.width as usize);
            for x in 0..self.width {
                let pos = Position::new(x, y);
                let glyph = if pos == player {
                    '@'
                } else if discovered.contains(&pos) {
                    match self.rooms.get(&pos) {
                        Some(room) if room.has_live_enemy() => '!',
                        Some(room) if room.locked => '#',
                        Some(room) if !room.items.is_empty() => '*',
                        _ => '.',
                    }
                } else {
                    ' '
                };
                row.push(glyph);
            }
            lines.push(row);
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_grid_cell_has_a_room() {
        let world = World::generate();
        for x in 0..World::WIDTH {
            for y in 0..World::HEIGHT {
                assert!(world.room(Position::new(x, y)).is_some());
            }
        }
    }

    #[test]
    fn corner_rooms_have_two_neighbors() {
        let world = World::generate();
        assert_eq!(world.neighbors(Position::new(0, 0)).len(), 2);
        assert_eq!(world.neighbors(Position::new(1, 1)).len(), 4);
    }

    #[test]
    fn cave_is_locked_by_the_rusty_key_door() {
        let world = World::generate();
        let cave = world.room(Position::new(3, 2)).unwrap();
        assert!(cave.locked);
        assert_eq!(cave.door_id, Some(CAVE_DOOR));
        assert_eq!(cave.feature, Some(RoomFeature::Riddle));
    }

    #[test]
    fn direction_parsing_accepts_aliases() {
        assert_eq!("n".parse::<Direction>().unwrap(), Direction::North);
        assert_eq!("WEST".parse::<Direction>().unwrap(), Direction::West);
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn minimap_hides_unexplored_rooms() {
        let world = World::generate();
        let mut discovered = HashSet::new();
        discovered.insert(Position::new(1, 1));
        discovered.insert(Position::new(2, 1));
        let map = world.minimap(Position::new(1, 1), &discovered);
        let rows: Vec<&str> = map.split('\n').collect();
        assert_eq!(rows.len(), 5);
        // Row y=1 shows the player and the wolf east of them.
        assert_eq!(&rows[1][1..3], "@!");
        // Undiscovered keep stays blank.
        assert_eq!(rows[4].chars().nth(4), Some(' '));
    }
}
