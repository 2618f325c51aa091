//! Axial hex coordinates.

use std::fmt;

/// Axial coordinate of a hex cell.
///
/// Equal `(q, r)` pairs address the same cell, so the type is used directly as
/// the key of a [`HexMap`](crate::hex_map::HexMap).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct HexCoordinate {
    q: i32,
    r: i32,
}

impl HexCoordinate {
    pub const ORIGIN: HexCoordinate = HexCoordinate { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub const fn q(&self) -> i32 {
        self.q
    }

    pub const fn r(&self) -> i32 {
        self.r
    }

    /// The implicit third cube coordinate, `-(q + r)`.
    pub const fn s(&self) -> i32 {
        -(self.q + self.r)
    }

    /// Cube form `(x, y, z)` with `x = q`, `z = r` and `x + y + z == 0`.
    pub const fn to_cube(&self) -> (i32, i32, i32) {
        (self.q, self.s(), self.r)
    }

    /// Coordinate shifted by `(dq, dr)`.
    pub const fn offset(&self, dq: i32, dr: i32) -> Self {
        Self::new(self.q + dq, self.r + dr)
    }
}

impl From<(i32, i32)> for HexCoordinate {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

impl fmt::Display for HexCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
