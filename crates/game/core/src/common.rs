//! Shared primitive types.

/// Grid position in the world.
///
/// The core treats positions as opaque coordinates owned by the world
/// collaborator; they only appear here so the player record can round-trip
/// through the save file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position. Used by key items, which
    /// unlock doors only in adjacent rooms.
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Position::new(1, 1);
        let b = Position::new(3, 2);
        assert_eq!(a.manhattan_distance(&b), 3);
        assert_eq!(b.manhattan_distance(&a), 3);
    }
}
