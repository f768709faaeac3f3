//! HyperLogLog cardinality sketch.
//!
//! `2^p` one-byte registers, each holding the largest rank seen among the
//! values routed to it. Values are hashed from their canonical string form
//! with a seeded 64-bit xxHash, so for a fixed precision and seed the
//! register array depends only on the *set* of values added: insertion order,
//! duplicates and slice boundaries are irrelevant.
//!
//! Standard error: `1.04 / sqrt(m)` where `m = 2^p`
//! - p=4: m=16, error ≈ 26%
//! - p=10: m=1024, error ≈ 3.25%
//! - p=12: m=4096, error ≈ 1.63%
//! - p=14: m=16384, error ≈ 0.81%

use crate::OlaError;
use std::hash::Hasher;
use twox_hash::XxHash64;

pub const MIN_PRECISION: u8 = 2;
pub const MAX_PRECISION: u8 = 18;

/// Precision used when none is configured.
pub const DEFAULT_PRECISION: u8 = 2;

/// Hash seed used when none is configured.
pub const DEFAULT_SEED: u64 = 123_456_789;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperLogLog {
    precision: u8,
    seed: u64,
    registers: Vec<u8>,
}

impl HyperLogLog {
    /// Creates an empty sketch with `2^precision` registers.
    ///
    /// # Errors
    /// [`OlaError::InvalidConfiguration`] when `precision` is outside
    /// `[MIN_PRECISION, MAX_PRECISION]`.
    pub fn new(precision: u8, seed: u64) -> Result<Self, OlaError> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(OlaError::InvalidConfiguration(format!(
                "sketch precision must be in [{MIN_PRECISION}, {MAX_PRECISION}], got {precision}"
            )));
        }
        Ok(Self {
            precision,
            seed,
            registers: vec![0; 1 << precision],
        })
    }

    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn number_of_registers(&self) -> usize {
        self.registers.len()
    }

    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn is_empty(&self) -> bool {
        self.registers.iter().all(|&r| r == 0)
    }

    /// Expected relative standard error of [`cardinality`](Self::cardinality).
    pub fn relative_standard_error(&self) -> f64 {
        1.04 / (self.number_of_registers() as f64).sqrt()
    }

    #[inline]
    fn hash(&self, item: &str) -> u64 {
        let mut hasher = XxHash64::with_seed(self.seed);
        hasher.write(item.as_bytes());
        hasher.finish()
    }

    /// Adds a value given in canonical string form.
    #[inline]
    pub fn add(&mut self, item: &str) {
        let hash = self.hash(item);
        self.add_hash(hash);
    }

    /// Adds a pre-hashed value.
    ///
    /// The low `p` bits select the register; the rank is the number of
    /// leading zeros within the remaining `64 - p` bits, plus one.
    #[inline]
    pub fn add_hash(&mut self, hash: u64) {
        let p = u32::from(self.precision);
        let index = (hash & ((1u64 << p) - 1)) as usize;
        let rank_bits = hash >> p;
        let rank = (rank_bits.leading_zeros() - p + 1) as u8;
        let register = &mut self.registers[index];
        *register = (*register).max(rank);
    }

    /// Bias constant for `m` registers.
    fn alpha(m: f64) -> f64 {
        match m as usize {
            16 => 0.673,
            32 => 0.697,
            64 => 0.709,
            _ => 0.7213 / (1.0 + 1.079 / m),
        }
    }

    /// Estimated number of distinct values added so far.
    ///
    /// Raw harmonic-mean estimate, switched to linear counting while the raw
    /// estimate is at most `2.5 m` and some register is still zero.
    pub fn cardinality(&self) -> f64 {
        let m = self.number_of_registers() as f64;

        let mut sum = 0.0_f64;
        let mut zeros = 0_usize;
        for &r in &self.registers {
            sum += 2.0_f64.powi(-i32::from(r));
            if r == 0 {
                zeros += 1;
            }
        }

        let raw = Self::alpha(m) * m * m / sum;
        if raw <= 2.5 * m && zeros > 0 {
            m * (m / zeros as f64).ln()
        } else {
            raw
        }
    }

    /// Register-wise maximum with `other`.
    ///
    /// Merging is associative, commutative and idempotent, so sketches built
    /// over disjoint partitions combine into the sketch of their union.
    pub fn merge(&mut self, other: &HyperLogLog) -> Result<(), OlaError> {
        if self.precision != other.precision || self.seed != other.seed {
            return Err(OlaError::IncompatibleMerge(format!(
                "sketch (p={}, seed={}) cannot absorb sketch (p={}, seed={})",
                self.precision, self.seed, other.precision, other.seed
            )));
        }
        for (mine, &theirs) in self.registers.iter_mut().zip(&other.registers) {
            *mine = (*mine).max(theirs);
        }
        Ok(())
    }
}
