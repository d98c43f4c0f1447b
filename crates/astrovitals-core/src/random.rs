//! Injectable uniform randomness.
//!
//! Every generator in the crate draws from a [`UniformSource`] instead of
//! reaching for a global RNG, so a dashboard can run live
//! ([`ThreadUniform`]), reproducibly ([`SeededUniform`]), or from a fixed
//! script of draws ([`ScriptedUniform`]).

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// A source of uniform samples in `[0, 1)`.
pub trait UniformSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Uniform index in `0..len`, computed as `floor(u * len)`.
    ///
    /// `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let idx = (self.next_uniform() * len as f64).floor() as usize;
        idx.min(len - 1)
    }
}

impl<T: UniformSource + ?Sized> UniformSource for &mut T {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

impl<T: UniformSource + ?Sized> UniformSource for Box<T> {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Thread-local OS-seeded RNG.
pub struct ThreadUniform(ThreadRng);

impl ThreadUniform {
    pub fn new() -> Self {
        Self(rand::rng())
    }
}

impl Default for ThreadUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSource for ThreadUniform {
    fn next_uniform(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Deterministic RNG seeded from a `u64`.
pub struct SeededUniform(StdRng);

impl SeededUniform {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl UniformSource for SeededUniform {
    fn next_uniform(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// An empty script yields `0.5` forever, which is the zero-delta draw for
/// every random walk in the crate.
#[derive(Debug, Clone, Default)]
pub struct ScriptedUniform {
    draws: Vec<f64>,
    pos: usize,
}

impl ScriptedUniform {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            pos: 0,
        }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl UniformSource for ScriptedUniform {
    fn next_uniform(&mut self) -> f64 {
        if self.draws.is_empty() {
            self.pos += 1;
            return 0.5;
        }
        let v = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        v
    }
}

/// Build a boxed source: seeded when `seed` is given, thread RNG otherwise.
pub fn make_source(seed: Option<u64>) -> Box<dyn UniformSource> {
    match seed {
        Some(s) => Box::new(SeededUniform::new(s)),
        None => Box::new(ThreadUniform::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_uniform_in_unit_interval() {
        let mut src = ThreadUniform::new();
        for _ in 0..1000 {
            let u = src.next_uniform();
            assert!((0.0..1.0).contains(&u), "out of range: {u}");
        }
    }

    #[test]
    fn seeded_uniform_is_reproducible() {
        let mut a = SeededUniform::new(42);
        let mut b = SeededUniform::new(42);
        for _ in 0..32 {
            assert_eq!(a.next_uniform(), b.next_uniform());
        }
    }

    #[test]
    fn seeded_uniform_differs_by_seed() {
        let mut a = SeededUniform::new(1);
        let mut b = SeededUniform::new(2);
        let xs: Vec<f64> = (0..8).map(|_| a.next_uniform()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.next_uniform()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn scripted_uniform_cycles() {
        let mut s = ScriptedUniform::new(vec![0.1, 0.9]);
        assert_eq!(s.next_uniform(), 0.1);
        assert_eq!(s.next_uniform(), 0.9);
        assert_eq!(s.next_uniform(), 0.1);
        assert_eq!(s.consumed(), 3);
    }

    #[test]
    fn scripted_uniform_empty_is_midpoint() {
        let mut s = ScriptedUniform::default();
        assert_eq!(s.next_uniform(), 0.5);
        assert_eq!(s.next_uniform(), 0.5);
    }

    #[test]
    fn pick_index_floors_and_caps() {
        let mut s = ScriptedUniform::new(vec![0.0, 0.1666, 0.1667, 0.99999, 1.0]);
        assert_eq!(s.pick_index(6), 0);
        assert_eq!(s.pick_index(6), 0);
        assert_eq!(s.pick_index(6), 1);
        assert_eq!(s.pick_index(6), 5);
        // Out-of-contract draw still lands inside the slice.
        assert_eq!(s.pick_index(6), 5);
    }

    #[test]
    fn make_source_seeded_matches_seeded_uniform() {
        let mut boxed = make_source(Some(7));
        let mut plain = SeededUniform::new(7);
        assert_eq!(boxed.next_uniform(), plain.next_uniform());
    }
}
