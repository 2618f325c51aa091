//! Sparse container of hex cells keyed by coordinate.

use std::collections::HashMap;

use crate::hex::{Hex, HexCoordinate, TerrainType};

/// The world grid: at most one [`Hex`] per coordinate.
///
/// Cells that were never added are simply absent. `width` and `height` record
/// the nominal bounds the map was generated for; they are metadata for
/// consumers and do not restrict which coordinates may be stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HexMap {
    width: usize,
    height: usize,
    hexes: HashMap<HexCoordinate, Hex>,
}

impl HexMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            hexes: HashMap::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Insert a hex at its own coordinate, returning the hex it replaced.
    ///
    /// Last write wins. Replacing an existing cell usually means a generator
    /// emitted the same coordinate twice, so debug builds log a warning.
    pub fn add(&mut self, hex: Hex) -> Option<Hex> {
        let previous = self.hexes.insert(hex.coordinates, hex);
        #[cfg(debug_assertions)]
        if let Some(prev) = &previous {
            tracing::warn!(
                coordinate = %prev.coordinates,
                replaced = %prev.terrain,
                "hex overwritten at occupied coordinate"
            );
        }
        previous
    }

    pub fn get(&self, coordinate: HexCoordinate) -> Option<&Hex> {
        self.hexes.get(&coordinate)
    }

    pub fn get_at(&self, q: i32, r: i32) -> Option<&Hex> {
        self.get(HexCoordinate::new(q, r))
    }

    pub fn get_mut(&mut self, coordinate: HexCoordinate) -> Option<&mut Hex> {
        self.hexes.get_mut(&coordinate)
    }

    pub fn contains(&self, coordinate: HexCoordinate) -> bool {
        self.hexes.contains_key(&coordinate)
    }

    pub fn remove(&mut self, coordinate: HexCoordinate) -> Option<Hex> {
        self.hexes.remove(&coordinate)
    }

    pub fn clear(&mut self) {
        self.hexes.clear();
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    /// Iterate over all cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Hex> {
        self.hexes.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Hex> {
        self.hexes.values_mut()
    }

    /// True if the coordinate lies inside the nominal `width x height` bounds.
    pub fn in_bounds(&self, coordinate: HexCoordinate) -> bool {
        coordinate.q() >= 0
            && coordinate.r() >= 0
            && (coordinate.q() as usize) < self.width
            && (coordinate.r() as usize) < self.height
    }

    /// Present neighbors of a coordinate, in direction order.
    pub fn neighbors_of(&self, coordinate: HexCoordinate) -> impl Iterator<Item = &Hex> + '_ {
        crate::hex::geometry::neighbors(coordinate)
            .into_iter()
            .filter_map(move |c| self.get(c))
    }

    /// Fill a `width x height` block starting at `(start_q, start_r)` with one
    /// terrain type.
    pub fn fill_rectangle(
        &mut self,
        start_q: i32,
        start_r: i32,
        width: usize,
        height: usize,
        terrain: TerrainType,
    ) {
        for q in start_q..start_q + width as i32 {
            for r in start_r..start_r + height as i32 {
                self.add(Hex::at(q, r, terrain));
            }
        }
    }

    /// Number of cells per terrain type, in [`TerrainType::all`] order.
    pub fn terrain_histogram(&self) -> Vec<(TerrainType, usize)> {
        let mut counts: HashMap<TerrainType, usize> = HashMap::new();
        for hex in self.hexes.values() {
            *counts.entry(hex.terrain).or_insert(0) += 1;
        }
        TerrainType::all()
            .iter()
            .map(|&t| (t, counts.get(&t).copied().unwrap_or(0)))
            .collect()
    }

    /// Coordinates sorted row by row, for deterministic traversal.
    pub fn sorted_coordinates(&self) -> Vec<HexCoordinate> {
        let mut coords: Vec<_> = self.hexes.keys().copied().collect();
        coords.sort_by_key(|c| (c.r(), c.q()));
        coords
    }
}
