//! Coherent noise fields sampled on the surface of a sphere.
//!
//! World generation only needs a deterministic function from a 3D point to a
//! value in `[-1, 1]`. [`PerlinField`] provides one backed by the `noise`
//! crate; tests inject hand-written fields through [`FnField`].

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use std::fmt;

/// A deterministic 3D noise source.
pub trait NoiseField {
    /// Single-octave sample at `point`, in `[-1, 1]`.
    fn sample(&self, point: [f64; 3]) -> f64;

    /// Fractal (fBm) sample at `point` using `octaves` octaves, in `[-1, 1]`.
    fn sample_fbm(&self, point: [f64; 3], octaves: u32) -> f64;
}

/// Most octaves a [`PerlinField`] will use; larger requests are clamped.
pub const MAX_OCTAVES: u32 = 32;

/// Seeded Perlin noise with a cached fBm stack.
#[derive(Debug, Clone)]
pub struct PerlinField {
    seed: u32,
    perlin: Perlin,
    fbm: Fbm<Perlin>,
    octaves: u32,
}

impl PerlinField {
    /// Create a field for `seed` with an fBm stack of `octaves` octaves.
    #[must_use]
    pub fn new(seed: u32, octaves: u32) -> Self {
        let octaves = octaves.clamp(1, MAX_OCTAVES);
        Self {
            seed,
            perlin: Perlin::new(seed),
            fbm: build_fbm(seed, octaves),
            octaves,
        }
    }

}

fn build_fbm(seed: u32, octaves: u32) -> Fbm<Perlin> {
    Fbm::<Perlin>::new(seed).set_octaves(octaves as usize)
}

impl NoiseField for PerlinField {
    fn sample(&self, point: [f64; 3]) -> f64 {
        self.perlin.get(point).clamp(-1.0, 1.0)
    }

    fn sample_fbm(&self, point: [f64; 3], octaves: u32) -> f64 {
        let octaves = octaves.clamp(1, MAX_OCTAVES);
        let value = if octaves == self.octaves {
            self.fbm.get(point)
        } else {
            build_fbm(self.seed, octaves).get(point)
        };
        value.clamp(-1.0, 1.0)
    }
}

/// A noise field defined by a closure, ignoring octaves.
pub struct FnField<F> {
    f: F,
}

impl<F> FnField<F>
where
    F: Fn([f64; 3]) -> f64,
{
    /// Wrap a closure as a noise field.
    pub const fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnField<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnField").finish_non_exhaustive()
    }
}

impl<F> NoiseField for FnField<F>
where
    F: Fn([f64; 3]) -> f64,
{
    fn sample(&self, point: [f64; 3]) -> f64 {
        (self.f)(point).clamp(-1.0, 1.0)
    }

    fn sample_fbm(&self, point: [f64; 3], _octaves: u32) -> f64 {
        self.sample(point)
    }
}
