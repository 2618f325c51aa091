//! Pure geometry over axial coordinates: distance, adjacency and pixel
//! projection for a pointy-top, odd-row offset layout.

use super::coords::HexCoordinate;

/// The six neighbor directions, in canonical index order 0..=5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HexDirection {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::NorthEast,
        HexDirection::NorthWest,
        HexDirection::West,
        HexDirection::SouthWest,
        HexDirection::SouthEast,
    ];

    /// Direction for an index in `0..6`, wrapping larger values.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    pub fn index(&self) -> usize {
        match self {
            HexDirection::East => 0,
            HexDirection::NorthEast => 1,
            HexDirection::NorthWest => 2,
            HexDirection::West => 3,
            HexDirection::SouthWest => 4,
            HexDirection::SouthEast => 5,
        }
    }

    /// Axial `(dq, dr)` step for this direction.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            HexDirection::East => (1, 0),
            HexDirection::NorthEast => (1, -1),
            HexDirection::NorthWest => (0, -1),
            HexDirection::West => (-1, 0),
            HexDirection::SouthWest => (-1, 1),
            HexDirection::SouthEast => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

/// Hex distance: half the Manhattan distance in cube space.
pub fn distance(a: HexCoordinate, b: HexCoordinate) -> i32 {
    let (ax, ay, az) = a.to_cube();
    let (bx, by, bz) = b.to_cube();
    ((ax - bx).abs() + (ay - by).abs() + (az - bz).abs()) / 2
}

pub fn neighbor(coord: HexCoordinate, direction: HexDirection) -> HexCoordinate {
    let (dq, dr) = direction.offset();
    coord.offset(dq, dr)
}

/// All six neighbors, ordered by direction index.
pub fn neighbors(coord: HexCoordinate) -> [HexCoordinate; 6] {
    HexDirection::ALL.map(|dir| neighbor(coord, dir))
}

pub fn are_neighbors(a: HexCoordinate, b: HexCoordinate) -> bool {
    distance(a, b) == 1
}

/// Every coordinate within `radius` steps of `center`, center included.
/// Empty for negative radii.
pub fn coordinates_in_range(center: HexCoordinate, radius: i32) -> Vec<HexCoordinate> {
    if radius < 0 {
        return Vec::new();
    }
    let count = (3 * radius * (radius + 1) + 1) as usize;
    let mut result = Vec::with_capacity(count);
    for dq in -radius..=radius {
        let low = (-radius).max(-dq - radius);
        let high = radius.min(-dq + radius);
        for dr in low..=high {
            result.push(center.offset(dq, dr));
        }
    }
    result
}

/// Pixel center of a hex for a pointy-top layout where odd rows shift right by
/// half a hex.
///
/// `x = size * sqrt(3) * (q + 0.5 * (r & 1))`, `y = size * 1.5 * r`.
pub fn axial_to_pixel(coord: HexCoordinate, hex_size: f32) -> (f32, f32) {
    let row_shift = 0.5 * (coord.r() & 1) as f32;
    let x = hex_size * 3f32.sqrt() * (coord.q() as f32 + row_shift);
    let y = hex_size * 1.5 * coord.r() as f32;
    (x, y)
}
