//! Dense rectangular scalar maps used as scratch space during terrain
//! generation.
//!
//! Storage is column-major (`q * height + r`) so each column is one contiguous
//! slice and columns can be written by separate rayon tasks without locking.

use rayon::prelude::*;

/// A `width x height` grid of values indexed by `(q, r)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self::new_with(width, height, T::default())
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    fn index(&self, q: usize, r: usize) -> usize {
        debug_assert!(q < self.width && r < self.height, "({q}, {r}) out of bounds");
        q * self.height + r
    }

    pub fn get(&self, q: usize, r: usize) -> &T {
        &self.data[self.index(q, r)]
    }

    pub fn set(&mut self, q: usize, r: usize, value: T) {
        let idx = self.index(q, r);
        self.data[idx] = value;
    }

    /// Iterate over all cells with their coordinates, column by column.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let height = self.height.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, val)| (idx / height, idx % height, val))
    }

    pub fn values(&self) -> &[T] {
        &self.data
    }
}

impl<T: Send> Tilemap<T> {
    /// Parallel iterator over mutable columns, yielding `(q, column)`.
    pub fn par_columns_mut(&mut self) -> impl IndexedParallelIterator<Item = (usize, &mut [T])> {
        let height = self.height.max(1);
        self.data.par_chunks_mut(height).enumerate()
    }
}

impl Tilemap<f32> {
    /// Smallest and largest value, or `None` for an empty map.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        if self.data.is_empty() {
            return None;
        }
        let bounds = self
            .data
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(bounds)
    }

    /// Rescale values in place so they span exactly `[0, 1]`.
    ///
    /// A map with zero range is left untouched and `false` is returned.
    pub fn normalize(&mut self) -> bool {
        let Some((min_v, max_v)) = self.min_max() else {
            return false;
        };
        let range = max_v - min_v;
        if range <= 0.0 {
            return false;
        }
        for v in &mut self.data {
            *v = (*v - min_v) / range;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_column_major() {
        let mut map = Tilemap::new_with(3, 2, 0i32);
        map.set(2, 1, 7);
        map.set(0, 1, 3);
        assert_eq!(*map.get(2, 1), 7);
        assert_eq!(map.values(), &[0, 3, 0, 0, 0, 7]);
    }

    #[test]
    fn test_par_columns_write_disjoint_cells() {
        let mut map: Tilemap<u32> = Tilemap::new(5, 4);
        map.par_columns_mut().for_each(|(q, column)| {
            for (r, cell) in column.iter_mut().enumerate() {
                *cell = (q * 10 + r) as u32;
            }
        });
        for (q, r, &v) in map.iter() {
            assert_eq!(v, (q * 10 + r) as u32);
        }
    }

    #[test]
    fn test_normalize_spans_unit_interval() {
        let mut map = Tilemap::new_with(2, 2, 0.0f32);
        map.set(0, 0, -3.0);
        map.set(0, 1, 1.0);
        map.set(1, 0, 5.0);
        map.set(1, 1, 2.0);
        assert!(map.normalize());
        assert_eq!(map.min_max(), Some((0.0, 1.0)));
        assert_eq!(*map.get(0, 1), 0.5);
    }

    #[test]
    fn test_min_max_finds_extremes() {
        let mut map = Tilemap::new_with(3, 2, 0.5f32);
        map.set(2, 1, -4.0);
        map.set(0, 1, 9.0);
        assert_eq!(map.min_max(), Some((-4.0, 9.0)));
    }

    #[test]
    fn test_normalize_flat_map_is_unchanged() {
        let mut map = Tilemap::new_with(3, 3, 0.42f32);
        assert!(!map.normalize());
        assert!(map.values().iter().all(|&v| v == 0.42));
    }
}
