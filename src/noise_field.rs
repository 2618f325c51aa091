//! Seeded 2D gradient noise.
//!
//! Classic Perlin construction: a shuffled permutation table of 0..=255,
//! doubled to 512 entries so corner lookups never need a modulo, a quintic
//! fade curve, and gradients chosen from the low four bits of each corner hash.
//! The table is built once per field and never mutated afterwards, so a field
//! can be sampled from any number of threads.

use noise::NoiseFn;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const TABLE_SIZE: usize = 256;

/// A deterministic, continuous scalar field over the plane.
///
/// Output is roughly in `[-1, 1]`. Two fields built from the same seed return
/// identical values for identical inputs.
#[derive(Clone)]
pub struct CoherentNoise {
    permutation: [u8; TABLE_SIZE * 2],
}

impl CoherentNoise {
    pub fn new(seed: u64) -> Self {
        let mut table: Vec<u8> = (0..TABLE_SIZE).map(|i| i as u8).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        table.shuffle(&mut rng);

        let mut permutation = [0u8; TABLE_SIZE * 2];
        for (i, &p) in table.iter().enumerate() {
            permutation[i] = p;
            permutation[i + TABLE_SIZE] = p;
        }

        Self { permutation }
    }

    fn perm(&self, index: usize) -> usize {
        self.permutation[index] as usize
    }

    /// Sample the field at `(x, y)`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x_floor = x.floor();
        let y_floor = y.floor();
        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;
        let xf = x - x_floor;
        let yf = y - y_floor;

        let u = fade(xf);
        let v = fade(yf);

        let a = self.perm(xi) + yi;
        let aa = self.perm(a);
        let ab = self.perm(a + 1);
        let b = self.perm(xi + 1) + yi;
        let ba = self.perm(b);
        let bb = self.perm(b + 1);

        lerp(
            v,
            lerp(u, grad(self.perm(aa), xf, yf), grad(self.perm(ba), xf - 1.0, yf)),
            lerp(
                u,
                grad(self.perm(ab), xf, yf - 1.0),
                grad(self.perm(bb), xf - 1.0, yf - 1.0),
            ),
        )
    }

    /// Weighted sum of samples at several frequencies.
    ///
    /// Each octave is `(frequency, weight)`; weights are not renormalized, so
    /// callers pick weights that sum to one to keep the `[-1, 1]` range.
    pub fn fractal(&self, x: f64, y: f64, octaves: &[(f64, f64)]) -> f64 {
        octaves
            .iter()
            .map(|&(frequency, weight)| self.sample(x * frequency, y * frequency) * weight)
            .sum()
    }
}

impl NoiseFn<f64, 2> for CoherentNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

/// `6t^5 - 15t^4 + 10t^3`: zero first and second derivatives at 0 and 1.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

fn grad(hash: usize, x: f64, y: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
