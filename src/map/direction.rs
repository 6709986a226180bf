use glam::{IVec2, Vec2};
use strum_macros::{AsRefStr, EnumIter};

/// The four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    #[default]
    East,
    West,
    North,
    South,
}

impl Direction {
    /// Neighbor order used by path search. This order is the tie-break between
    /// equally short paths and must not change.
    pub const SEARCH_ORDER: [Direction; 4] = [Direction::East, Direction::West, Direction::South, Direction::North];

    /// Returns the opposite direction. Constant time.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }

    /// Returns the direction as a unit tile delta.
    pub const fn as_ivec2(self) -> IVec2 {
        match self {
            Direction::East => IVec2::X,
            Direction::West => IVec2::NEG_X,
            Direction::North => IVec2::NEG_Y,
            Direction::South => IVec2::Y,
        }
    }

    /// Returns the direction as a unit pixel vector.
    pub fn as_vec2(self) -> Vec2 {
        self.as_ivec2().as_vec2()
    }

    /// Maps a unit tile delta back to its direction, if it is one.
    pub const fn from_delta(delta: IVec2) -> Option<Direction> {
        match (delta.x, delta.y) {
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            _ => None,
        }
    }

    /// Returns the direction as a usize (0-3), for indexing into arrays.
    pub const fn as_usize(self) -> usize {
        match self {
            Direction::East => 0,
            Direction::West => 1,
            Direction::North => 2,
            Direction::South => 3,
        }
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        dir.as_ivec2()
    }
}
