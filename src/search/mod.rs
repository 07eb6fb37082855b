//! Exhaustive key search.
//!
//! For every key size in the requested range, each permutation is applied
//! to a clipped probe window of the ciphertext and scored by a
//! [`ScoringOracle`]. The first key reaching the highest score wins and is
//! then applied to the full text.

pub mod observer;
pub mod runner;

pub use self::observer::{NullObserver, SearchObserver, TracingObserver};
pub use self::runner::{Bruteforce, SearchOptions};

use crate::error::CrackResult;
use crate::key;
use crate::scorer::ScoringOracle;
use crate::transform::Transform;
use serde::{Deserialize, Serialize};

/// Best candidate found by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// `None` only if nothing was scored.
    pub score: Option<i64>,
    pub key_size: usize,
    /// Key as fed to `transform`; for `ColumnToRow` this is the decode key.
    pub key: Vec<usize>,
    pub transform: Transform,
    /// Number of permutations scored across all sizes.
    pub candidates: u64,
}

impl SearchResult {
    pub fn key_dump(&self) -> String {
        key::format_key(&self.key)
    }

    /// The key with the opposite orientation (the encode key after a decode search).
    pub fn inverse_key(&self) -> Vec<usize> {
        key::invert(&self.key)
    }
}

/// Runs a search over `key_min..=key_max` with default options.
///
/// `output` receives the full-length decryption under the winning key and
/// doubles as scratch space while probing.
pub fn bruteforce<O: ScoringOracle>(
    input: &[u8],
    output: &mut [u8],
    key_min: usize,
    key_max: usize,
    transform: Transform,
    oracle: &mut O,
) -> CrackResult<SearchResult> {
    let options = SearchOptions {
        key_min,
        key_max,
        transform,
        ..SearchOptions::default()
    };
    Bruteforce::new(options).run(input, output, oracle, &TracingObserver)
}
