use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::types::{EdgeRef, NodeRef};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
    NorthEast,
}

impl Direction {
    /// Offset to the neighbouring hex in this direction.
    pub const fn unit(self) -> CubeCoord {
        let (x, y, z) = match self {
            Direction::East => (1, -1, 0),
            Direction::SouthEast => (0, -1, 1),
            Direction::SouthWest => (-1, 0, 1),
            Direction::West => (-1, 1, 0),
            Direction::NorthWest => (0, 1, -1),
            Direction::NorthEast => (1, 0, -1),
        };
        CubeCoord { x, y, z }
    }

    pub fn edge_ref(self) -> EdgeRef {
        match self {
            Direction::East => EdgeRef::East,
            Direction::SouthEast => EdgeRef::SouthEast,
            Direction::SouthWest => EdgeRef::SouthWest,
            Direction::West => EdgeRef::West,
            Direction::NorthWest => EdgeRef::NorthWest,
            Direction::NorthEast => EdgeRef::NorthEast,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CubeCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        debug_assert!(x + y + z == 0, "cube coordinates must sum to zero");
        Self { x, y, z }
    }

    pub fn add(self, other: CubeCoord) -> Self {
        CubeCoord::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn step(self, direction: Direction) -> Self {
        self.add(direction.unit())
    }
}

/// A hex corner, named by the three hexes meeting there (sorted).
pub type CornerKey = [CubeCoord; 3];

/// A hex side, named by the two hexes it separates (sorted).
pub type SideKey = [CubeCoord; 2];

pub fn corner_key(coord: CubeCoord, node: NodeRef) -> CornerKey {
    let (first, second) = match node {
        NodeRef::North => (Direction::NorthWest, Direction::NorthEast),
        NodeRef::NorthEast => (Direction::NorthEast, Direction::East),
        NodeRef::SouthEast => (Direction::East, Direction::SouthEast),
        NodeRef::South => (Direction::SouthEast, Direction::SouthWest),
        NodeRef::SouthWest => (Direction::SouthWest, Direction::West),
        NodeRef::NorthWest => (Direction::West, Direction::NorthWest),
    };
    let mut key = [coord, coord.step(first), coord.step(second)];
    key.sort();
    key
}

pub fn side_key(coord: CubeCoord, direction: Direction) -> SideKey {
    let mut key = [coord, coord.step(direction)];
    key.sort();
    key
}

pub fn edge_direction(edge: EdgeRef) -> Direction {
    match edge {
        EdgeRef::East => Direction::East,
        EdgeRef::SouthEast => Direction::SouthEast,
        EdgeRef::SouthWest => Direction::SouthWest,
        EdgeRef::West => Direction::West,
        EdgeRef::NorthWest => Direction::NorthWest,
        EdgeRef::NorthEast => Direction::NorthEast,
    }
}

pub fn edge_corners(edge: EdgeRef) -> (NodeRef, NodeRef) {
    match edge {
        EdgeRef::East => (NodeRef::NorthEast, NodeRef::SouthEast),
        EdgeRef::SouthEast => (NodeRef::SouthEast, NodeRef::South),
        EdgeRef::SouthWest => (NodeRef::South, NodeRef::SouthWest),
        EdgeRef::West => (NodeRef::SouthWest, NodeRef::NorthWest),
        EdgeRef::NorthWest => (NodeRef::NorthWest, NodeRef::North),
        EdgeRef::NorthEast => (NodeRef::North, NodeRef::NorthEast),
    }
}
