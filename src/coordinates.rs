use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// Width of a chunk column along x and z.
pub const CHUNK_SIZE: i32 = 16;

// ─── Chunk coordinates ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate2D {
    pub x: i32,
    pub z: i32,
}

impl Coordinate2D {
    pub const fn new(x: i32, z: i32) -> Self {
        Coordinate2D { x, z }
    }

    /// World-absolute x/z of the chunk's (0, 0) corner.
    pub const fn block_origin(&self) -> (i32, i32) {
        (self.x * CHUNK_SIZE, self.z * CHUNK_SIZE)
    }
}

impl fmt::Display for Coordinate2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

// ─── Block coordinates ──────────────────────────────────────────────────────

/// A block position. Whether it is world-absolute or chunk-local depends on
/// where it came from; `within_chunk`, `relative_to` and `offset_global` convert
/// between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate3D {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinate3D {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Coordinate3D { x, y, z }
    }

    /// Local view of this position: x and z wrapped into `0..16`, y untouched.
    pub fn within_chunk(&self) -> Self {
        Coordinate3D {
            x: floor_mod(self.x, CHUNK_SIZE),
            y: self.y,
            z: floor_mod(self.z, CHUNK_SIZE),
        }
    }

    /// Local view of a world-absolute position, measured from `chunk`'s origin.
    /// `None` when the position lies in some other chunk.
    pub fn relative_to(&self, chunk: Coordinate2D) -> Option<Self> {
        (self.chunk() == chunk).then(|| self.within_chunk())
    }

    /// True when x and z are inside `0..16`.
    pub fn is_local(&self) -> bool {
        (0..CHUNK_SIZE).contains(&self.x) && (0..CHUNK_SIZE).contains(&self.z)
    }

    /// World-absolute view of a local position inside `chunk`.
    pub fn offset_global(&self, chunk: Coordinate2D) -> Self {
        let (origin_x, origin_z) = chunk.block_origin();
        Coordinate3D {
            x: self.x + origin_x,
            y: self.y,
            z: self.z + origin_z,
        }
    }

    /// The chunk a world-absolute position falls in.
    pub fn chunk(&self) -> Coordinate2D {
        Coordinate2D::new(floor_div(self.x, CHUNK_SIZE), floor_div(self.z, CHUNK_SIZE))
    }

    pub fn add_dimension(&self, dimension: &Dimension) -> CoordinateDim3D {
        CoordinateDim3D {
            coordinate: *self,
            dimension: dimension.clone(),
        }
    }
}

impl fmt::Display for Coordinate3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for Coordinate3D {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Coordinate3D { x, y, z }
    }
}

// ─── Dimensions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension(SmolStr);

impl Dimension {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Dimension(name.into())
    }

    pub fn overworld() -> Self {
        Dimension::new("minecraft:overworld")
    }

    pub fn nether() -> Self {
        Dimension::new("minecraft:the_nether")
    }

    pub fn name(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::overworld()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordinateDim3D {
    pub coordinate: Coordinate3D,
    pub dimension: Dimension,
}

impl fmt::Display for CoordinateDim3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.coordinate, self.dimension)
    }
}

// ─── Utility ────────────────────────────────────────────────────────────────

/// Floor division that handles negative numbers correctly.
/// Rust's integer division truncates toward zero, but we need toward negative infinity.
pub fn floor_div(a: i32, b: i32) -> i32 {
    let d = a / b;
    let r = a % b;
    if (r != 0) && ((r ^ b) < 0) {
        d - 1
    } else {
        d
    }
}

/// Floor modulo that handles negative numbers correctly.
pub fn floor_mod(a: i32, b: i32) -> i32 {
    ((a % b) + b) % b
}
