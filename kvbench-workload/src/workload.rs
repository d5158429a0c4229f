//! A module for defining a [`Workload`] of read and write operations against a key-value store.

use std::fmt;
use std::iter::FusedIterator;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::distribution::{DEFAULT_SKEW, DistributionKind, KeyDistribution, generate_value};
use crate::error::{Result, WorkloadError};

/// A builder for creating a [`Workload`].
#[derive(Debug)]
pub struct WorkloadBuilder {
    key_count: usize,
    read_proportion: f64,
    value_length: usize,
    distribution: DistributionKind,
    skew: f64,
    seed: u64,
}

impl WorkloadBuilder {
    /// The number of distinct keys, named `key0` through `key{N-1}`.
    pub fn key_count(mut self, key_count: usize) -> Self {
        self.key_count = key_count;
        self
    }

    /// The probability that an operation is a read, between `0` and `1`.
    pub fn read_proportion(mut self, read_proportion: f64) -> Self {
        self.read_proportion = read_proportion;
        self
    }

    /// The length of the generated values for write operations.
    pub fn value_length(mut self, value_length: usize) -> Self {
        self.value_length = value_length;
        self
    }

    /// The popularity distribution of keys.
    pub fn distribution(mut self, distribution: DistributionKind) -> Self {
        self.distribution = distribution;
        self
    }

    /// The skew of the Zipfian distribution. Ignored for uniform workloads.
    pub fn skew(mut self, skew: f64) -> Self {
        self.skew = skew;
        self
    }

    /// Seeds the RNG, making the generated operations reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the parameters and creates the workload instance.
    pub fn build(self) -> Result<Workload> {
        if !(0.0..=1.0).contains(&self.read_proportion) {
            return Err(WorkloadError::InvalidReadProportion(self.read_proportion));
        }
        if self.value_length == 0 {
            return Err(WorkloadError::InvalidValueLength);
        }
        let distribution = KeyDistribution::new(self.distribution, self.key_count, self.skew)?;

        Ok(Workload {
            read_proportion: self.read_proportion,
            value_length: self.value_length,
            distribution,
            seed: self.seed,
            rng: SmallRng::seed_from_u64(self.seed),
        })
    }
}

/// A generator of read and write operations over a fixed key space.
#[derive(Debug)]
pub struct Workload {
    read_proportion: f64,
    value_length: usize,
    distribution: KeyDistribution,
    seed: u64,

    /// The RNG driving all draws. Never reset, so consecutive batches continue the sequence.
    rng: SmallRng,
}

impl Workload {
    /// Constructs a new workload builder with default parameters and a random seed.
    pub fn builder() -> WorkloadBuilder {
        WorkloadBuilder {
            key_count: 10,
            read_proportion: 0.5,
            value_length: 4,
            distribution: DistributionKind::Uniform,
            skew: DEFAULT_SKEW,
            seed: rand::random(),
        }
    }

    /// The seed the RNG was initialized with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The key distribution of this workload.
    pub fn distribution(&self) -> &KeyDistribution {
        &self.distribution
    }

    /// Draws the next operation.
    ///
    /// The read/write decision is drawn first, then the key, then the value for writes.
    pub fn next_operation(&mut self) -> Operation {
        let is_read = self.rng.random::<f64>() < self.read_proportion;
        let key = Key(self.distribution.sample(&mut self.rng));

        if is_read {
            Operation::Read { key }
        } else {
            let value = generate_value(self.value_length, &mut self.rng);
            Operation::Write { key, value }
        }
    }

    /// Returns an iterator over the next `count` operations.
    pub fn operations(&mut self, count: usize) -> Operations<'_> {
        Operations {
            workload: self,
            remaining: count,
        }
    }
}

/// Iterator returned by [`Workload::operations`].
#[derive(Debug)]
pub struct Operations<'a> {
    workload: &'a mut Workload,
    remaining: usize,
}

impl Iterator for Operations<'_> {
    type Item = Operation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.workload.next_operation())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Operations<'_> {}
impl FusedIterator for Operations<'_> {}

/// Index of a key in the key space.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Key(usize);

impl Key {
    /// The position of this key in the key space.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key{}", self.0)
    }
}

/// A single operation of a [`Workload`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operation {
    /// Read the given key.
    Read {
        /// The key to read.
        key: Key,
    },
    /// Write a value to the given key.
    Write {
        /// The key to write.
        key: Key,
        /// Random alphanumeric contents.
        value: String,
    },
}

impl Operation {
    /// Returns `true` for [`Operation::Read`].
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. })
    }

    /// The key this operation targets.
    pub fn key(&self) -> Key {
        match self {
            Self::Read { key } | Self::Write { key, .. } => *key,
        }
    }

    /// The value written by this operation, empty for reads.
    pub fn value(&self) -> &str {
        match self {
            Self::Read { .. } => "",
            Self::Write { value, .. } => value,
        }
    }
}
