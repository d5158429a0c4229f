//! Key-popularity distributions.
//!
//! A [`KeyDistribution`] maps a single uniform draw in `[0, 1)` onto a key index in
//! `[0, key_count)`. The Zipfian variant precomputes its cumulative distribution once and then
//! answers every sample with a binary search, so sampling never allocates.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkloadError};

/// Skew used for Zipfian workloads unless configured otherwise.
pub const DEFAULT_SKEW: f64 = 1.2;

/// Alphabet for generated values: digits, then uppercase, then lowercase letters.
const CHARSET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// The shape of a key distribution, as named on the command line and in configuration files.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    /// Every key is equally likely.
    #[default]
    Uniform,
    /// Low key indices are exponentially more popular, see [`ZipfianTable`].
    Zipf,
}

impl FromStr for DistributionKind {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "uniform" => Ok(Self::Uniform),
            "zipf" => Ok(Self::Zipf),
            other => Err(WorkloadError::UnknownDistribution(other.to_owned())),
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => f.write_str("uniform"),
            Self::Zipf => f.write_str("zipf"),
        }
    }
}

/// Precomputed cumulative distribution of a discrete Zipf law over `key_count` ranks.
///
/// Entry `i` holds the normalized partial sum of `1 / rank^skew` for ranks `1..=i + 1`, so the
/// table is strictly increasing and its last entry is `1.0` up to rounding.
#[derive(Clone, Debug)]
pub struct ZipfianTable {
    skew: f64,
    cdf: Vec<f64>,
}

impl ZipfianTable {
    /// Builds the table for the given key space and skew.
    pub fn new(key_count: usize, skew: f64) -> Result<Self> {
        if key_count == 0 {
            return Err(WorkloadError::InvalidKeyCount);
        }
        if !(skew.is_finite() && skew > 0.0) {
            return Err(WorkloadError::InvalidSkew(skew));
        }

        let weight = |rank: usize| 1.0 / (rank as f64).powf(skew);
        let norm: f64 = (1..=key_count).map(weight).sum();

        let mut sum = 0.0;
        let cdf = (1..=key_count)
            .map(|rank| {
                sum += weight(rank);
                sum / norm
            })
            .collect();

        Ok(Self { skew, cdf })
    }

    /// The skew this table was built with.
    pub fn skew(&self) -> f64 {
        self.skew
    }

    /// The cumulative probabilities, one per key.
    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    /// Returns the first index whose cumulative probability reaches `draw`.
    ///
    /// Falls back to the last index if rounding left every entry below `draw`.
    pub fn index_for(&self, draw: f64) -> usize {
        let index = self.cdf.partition_point(|&p| p < draw);
        index.min(self.cdf.len() - 1)
    }
}

/// Maps uniform draws onto key indices.
#[derive(Clone, Debug)]
pub enum KeyDistribution {
    /// Every index in `[0, key_count)` is equally likely.
    Uniform {
        /// Size of the key space.
        key_count: usize,
    },
    /// Indices follow a discretized Zipf law.
    Zipfian(ZipfianTable),
}

impl KeyDistribution {
    /// Creates a uniform distribution over `key_count` keys.
    pub fn uniform(key_count: usize) -> Result<Self> {
        if key_count == 0 {
            return Err(WorkloadError::InvalidKeyCount);
        }
        Ok(Self::Uniform { key_count })
    }

    /// Creates a Zipfian distribution over `key_count` keys.
    pub fn zipfian(key_count: usize, skew: f64) -> Result<Self> {
        ZipfianTable::new(key_count, skew).map(Self::Zipfian)
    }

    /// Creates a distribution of the given kind. `skew` is only used for [`DistributionKind::Zipf`].
    pub fn new(kind: DistributionKind, key_count: usize, skew: f64) -> Result<Self> {
        match kind {
            DistributionKind::Uniform => Self::uniform(key_count),
            DistributionKind::Zipf => Self::zipfian(key_count, skew),
        }
    }

    /// The kind of this distribution.
    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Uniform { .. } => DistributionKind::Uniform,
            Self::Zipfian(_) => DistributionKind::Zipf,
        }
    }

    /// Size of the key space.
    pub fn key_count(&self) -> usize {
        match self {
            Self::Uniform { key_count } => *key_count,
            Self::Zipfian(table) => table.cdf().len(),
        }
    }

    /// Maps a draw in `[0, 1)` to an index in `[0, key_count)`.
    pub fn index_for(&self, draw: f64) -> usize {
        match self {
            // The cast saturates, and the clamp guards draws that round up to `key_count`.
            Self::Uniform { key_count } => ((draw * *key_count as f64) as usize).min(key_count - 1),
            Self::Zipfian(table) => table.index_for(draw),
        }
    }

    /// Draws the next key index from `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.index_for(rng.random::<f64>())
    }
}

/// Generates a random alphanumeric string of `len` characters.
pub fn generate_value<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len)
        .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    /// The largest `f64` strictly below `1.0`.
    const LAST_DRAW: f64 = 1.0 - f64::EPSILON / 2.0;

    #[test]
    fn zipfian_table_is_normalized() {
        for key_count in [1, 2, 7, 100, 10_000] {
            for skew in [0.1, 0.99, 1.0, 1.2, 3.5] {
                let table = ZipfianTable::new(key_count, skew).unwrap();
                let cdf = table.cdf();

                assert_eq!(cdf.len(), key_count);
                assert!(cdf.windows(2).all(|w| w[0] < w[1]), "{key_count} {skew}");
                assert!((cdf[key_count - 1] - 1.0).abs() < 1e-9, "{key_count} {skew}");
            }
        }
    }

    #[test]
    fn zipfian_known_values() {
        // weights 1 and 1/2, normalized by 3/2
        let table = ZipfianTable::new(2, 1.0).unwrap();
        assert!((table.cdf()[0] - 2.0 / 3.0).abs() < 1e-12);

        assert_eq!(table.index_for(0.0), 0);
        assert_eq!(table.index_for(0.5), 0);
        assert_eq!(table.index_for(0.7), 1);
        assert_eq!(table.index_for(LAST_DRAW), 1);
    }

    #[test]
    fn zipfian_falls_back_to_last_index() {
        let table = ZipfianTable::new(5, 1.2).unwrap();
        assert_eq!(table.index_for(1.0), 4);
        assert_eq!(table.index_for(2.0), 4);
    }

    #[test]
    fn uniform_stays_in_bounds() {
        for key_count in [1, 3, 10, 1 << 40] {
            let dist = KeyDistribution::uniform(key_count).unwrap();
            assert_eq!(dist.index_for(0.0), 0);
            assert_eq!(dist.index_for(LAST_DRAW), key_count - 1);
        }

        let dist = KeyDistribution::uniform(10).unwrap();
        assert_eq!(dist.index_for(0.55), 5);

        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..10_000 {
            assert!(dist.sample(&mut rng) < 10);
        }
    }

    #[test]
    fn zipfian_favors_low_indices() {
        let uniform = KeyDistribution::uniform(100).unwrap();
        let zipf = KeyDistribution::zipfian(100, DEFAULT_SKEW).unwrap();

        let mut rng = SmallRng::seed_from_u64(42);
        let draws: Vec<f64> = (0..10_000).map(|_| rng.random()).collect();

        let hits = |dist: &KeyDistribution| {
            draws
                .iter()
                .filter(|&&draw| dist.index_for(draw) == 0)
                .count()
        };

        assert!(hits(&zipf) > hits(&uniform) * 5);
    }

    #[test]
    fn invalid_parameters() {
        assert!(matches!(
            KeyDistribution::uniform(0),
            Err(WorkloadError::InvalidKeyCount)
        ));
        assert!(matches!(
            KeyDistribution::zipfian(0, 1.2),
            Err(WorkloadError::InvalidKeyCount)
        ));
        for skew in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                KeyDistribution::zipfian(10, skew),
                Err(WorkloadError::InvalidSkew(_))
            ));
        }
        // skew is irrelevant for uniform distributions
        assert!(KeyDistribution::new(DistributionKind::Uniform, 10, -1.0).is_ok());
    }

    #[test]
    fn reports_parameters() {
        let uniform = KeyDistribution::new(DistributionKind::Uniform, 7, 1.2).unwrap();
        assert_eq!(uniform.kind(), DistributionKind::Uniform);
        assert_eq!(uniform.key_count(), 7);

        let zipfian = KeyDistribution::new(DistributionKind::Zipf, 9, 1.5).unwrap();
        assert_eq!(zipfian.kind(), DistributionKind::Zipf);
        assert_eq!(zipfian.key_count(), 9);
        let KeyDistribution::Zipfian(table) = zipfian else {
            panic!("expected a zipfian distribution");
        };
        assert_eq!(table.skew(), 1.5);
    }

    #[test]
    fn parse_kind() {
        assert_eq!(
            "uniform".parse::<DistributionKind>().unwrap(),
            DistributionKind::Uniform
        );
        assert_eq!(
            "zipf".parse::<DistributionKind>().unwrap(),
            DistributionKind::Zipf
        );
        assert!(matches!(
            "zipfian".parse::<DistributionKind>(),
            Err(WorkloadError::UnknownDistribution(name)) if name == "zipfian"
        ));
        assert_eq!(DistributionKind::Zipf.to_string(), "zipf");
    }

    #[test]
    fn values_use_alphanumerics() {
        let mut rng = SmallRng::seed_from_u64(1);
        for len in [1, 4, 64] {
            let value = generate_value(len, &mut rng);
            assert_eq!(value.len(), len);
            assert!(value.bytes().all(|b| b.is_ascii_alphanumeric()));
        }
        assert_eq!(CHARSET.len(), 62);
    }
}
