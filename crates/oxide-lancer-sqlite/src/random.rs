//! Sources of randomness for statement generation.
//!
//! Generators draw every decision through [`Randomness`], so tests can
//! script the exact sequence of coins and picks. [`Randomly`] is the
//! production source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Maximum number of integers a [`Randomly`] remembers.
const CACHE_CAPACITY: usize = 100;

/// Boundary values that tend to expose overflow and sign bugs.
const INTERESTING_INTEGERS: [i64; 10] = [
    0,
    1,
    -1,
    i64::MAX,
    i64::MIN,
    2_147_483_647,
    -2_147_483_648,
    4_294_967_295,
    255,
    256,
];

/// The random decisions a generator can make.
pub trait Randomness {
    /// A fair coin.
    fn coin(&mut self) -> bool;

    /// A uniform index in `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    fn index(&mut self, len: usize) -> usize;

    /// An integer that may repeat one drawn earlier or be a boundary value.
    fn integer(&mut self) -> i64;

    /// A fresh integer over the full `i64` range, never taken from a cache.
    fn non_cached_integer(&mut self) -> i64;

    /// An integer strictly greater than zero.
    fn positive_integer(&mut self) -> i64;

    /// A uniformly chosen element of `options`.
    ///
    /// # Panics
    ///
    /// Panics if `options` is empty.
    fn pick<'a, T>(&mut self, options: &'a [T]) -> &'a T
    where
        Self: Sized,
    {
        &options[self.index(options.len())]
    }
}

/// [`Randomness`] backed by a `rand` generator, with a bounded cache of
/// previously drawn integers.
///
/// Not meant to be shared: each worker owns its own instance.
#[derive(Debug, Clone)]
pub struct Randomly<R> {
    rng: R,
    cache: Vec<i64>,
}

impl<R: Rng> Randomly<R> {
    /// Wraps an existing generator.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            cache: Vec::new(),
        }
    }

    /// Number of integers currently remembered.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn remember(&mut self, value: i64) {
        if self.cache.len() < CACHE_CAPACITY {
            self.cache.push(value);
        } else {
            let slot = self.rng.random_range(0..self.cache.len());
            self.cache[slot] = value;
        }
    }
}

impl Randomly<ChaCha8Rng> {
    /// A reproducible source: equal seeds yield equal decisions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Randomness for Randomly<R> {
    fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty set of options");
        self.rng.random_range(0..len)
    }

    fn integer(&mut self) -> i64 {
        if !self.cache.is_empty() && self.rng.random_bool(0.5) {
            let slot = self.rng.random_range(0..self.cache.len());
            return self.cache[slot];
        }
        let value = if self.rng.random_bool(0.25) {
            INTERESTING_INTEGERS[self.rng.random_range(0..INTERESTING_INTEGERS.len())]
        } else {
            self.rng.random::<i64>()
        };
        self.remember(value);
        value
    }

    fn non_cached_integer(&mut self) -> i64 {
        self.rng.random::<i64>()
    }

    fn positive_integer(&mut self) -> i64 {
        match self.integer().checked_abs() {
            Some(v) if v > 0 => v,
            _ => self.rng.random_range(1..=i64::MAX),
        }
    }
}
