use std::fmt;

use spatial_storage_serde::{BitReader, BitWrite, Serde, SerdeErr};

/// Authoritative world time, one step per server tick
pub type GameTick = u64;
/// Wrapping sequence stamped on every synchronization push
pub type SyncIndex = u16;

// PlayerId
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u64);

// DimensionId
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DimensionId(pub u32);

impl DimensionId {
    pub const OVERWORLD: Self = Self(0);
    pub const NETHER: Self = Self(1);
    pub const END: Self = Self(2);
}

// Direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    fn to_index(self) -> u8 {
        match self {
            Direction::Down => 0,
            Direction::Up => 1,
            Direction::North => 2,
            Direction::South => 3,
            Direction::West => 4,
            Direction::East => 5,
        }
    }
}

impl Serde for Direction {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.to_index().ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let index = u8::de(reader)?;
        Direction::ALL
            .get(index as usize)
            .copied()
            .ok_or(SerdeErr::InvalidVariant {
                kind: "Direction",
                value: index as u64,
            })
    }
}

// BlockPos
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn offset(&self, direction: Direction) -> Self {
        let (dx, dy, dz) = match direction {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
        };
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Centre of the block volume
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            self.x as f64 + 0.5,
            self.y as f64 + 0.5,
            self.z as f64 + 0.5,
        )
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

impl Serde for BlockPos {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.x.ser(writer);
        self.y.ser(writer);
        self.z.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            x: i32::de(reader)?,
            y: i32::de(reader)?,
            z: i32::de(reader)?,
        })
    }
}

// GlobalPos
/// A block position qualified by the dimension it lives in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlobalPos {
    pub dimension: DimensionId,
    pub pos: BlockPos,
}

impl GlobalPos {
    pub const fn new(dimension: DimensionId, pos: BlockPos) -> Self {
        Self { dimension, pos }
    }

    pub const fn overworld(x: i32, y: i32, z: i32) -> Self {
        Self::new(DimensionId::OVERWORLD, BlockPos::new(x, y, z))
    }
}

impl fmt::Display for GlobalPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@dim{}", self.pos, self.dimension.0)
    }
}

impl Serde for GlobalPos {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.dimension.0.ser(writer);
        self.pos.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            dimension: DimensionId(u32::de(reader)?),
            pos: BlockPos::de(reader)?,
        })
    }
}

// Vec3
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_sq(&self, other: &Vec3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}
