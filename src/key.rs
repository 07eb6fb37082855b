//! Key algebra for columnar transposition.
//!
//! A key of size `n` is a permutation of `0..n`. `key[i]` is the destination
//! column of source column `i` when encoding; decoding needs the inverse.
//! The free functions work on raw slices so the search loop can use them on
//! its scratch buffers; [`Key`] is the validated owned form used everywhere
//! else.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("key size {0} is too short (minimum 2)")]
    TooShort(usize),

    #[error("entry {value} at position {index} is outside 0..{size}")]
    OutOfRange {
        index: usize,
        value: usize,
        size: usize,
    },

    #[error("value {0} appears more than once")]
    Duplicate(usize),

    #[error("unsupported character {byte:#04x} at position {position} (letters only)")]
    UnsupportedCharacter { byte: u8, position: usize },

    #[error("cannot parse key '{0}'")]
    Parse(String),
}

/// Checks a raw key and reports the first reason it is not a valid key.
pub fn check(key: &[usize]) -> Result<(), KeyError> {
    let size = key.len();
    if size < 2 {
        return Err(KeyError::TooShort(size));
    }

    let mut seen = vec![false; size];
    for (index, &value) in key.iter().enumerate() {
        if value >= size {
            return Err(KeyError::OutOfRange { index, value, size });
        }
        if seen[value] {
            return Err(KeyError::Duplicate(value));
        }
        seen[value] = true;
    }
    Ok(())
}

/// True when `key` is a bijection on `0..key.len()` with at least 2 entries.
pub fn validate(key: &[usize]) -> bool {
    check(key).is_ok()
}

/// Inverse permutation: `inverted[key[i]] == i`.
///
/// `key` must be a permutation of `0..key.len()`.
pub fn invert(key: &[usize]) -> Vec<usize> {
    let mut inverted = vec![0; key.len()];
    for (i, &k) in key.iter().enumerate() {
        inverted[k] = i;
    }
    inverted
}

/// Derives a key from a keyword.
///
/// Each distinct letter takes the slot of its first occurrence and receives
/// its alphabetical rank among the distinct letters, so `LION` gives
/// `[1, 0, 3, 2]`. Letters are case-insensitive; anything else fails and no
/// partial key is returned.
pub fn from_keyword(text: &[u8]) -> Result<Vec<usize>, KeyError> {
    let mut first_seen: [Option<usize>; 26] = [None; 26];
    let mut distinct = 0;

    for (position, &byte) in text.iter().enumerate() {
        if !byte.is_ascii_alphabetic() {
            return Err(KeyError::UnsupportedCharacter { byte, position });
        }
        let letter = (byte.to_ascii_lowercase() - b'a') as usize;
        if first_seen[letter].is_none() {
            first_seen[letter] = Some(distinct);
            distinct += 1;
        }
    }

    // Walking the alphabet in order hands out ranks alphabetically.
    let mut key = vec![0; distinct];
    for (rank, slot) in first_seen.iter().flatten().enumerate() {
        key[*slot] = rank;
    }
    Ok(key)
}

/// Pipe-separated dump, e.g. `6[5|2|1|3|0|4]`.
pub fn format_key(key: &[usize]) -> String {
    let body = key
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join("|");
    format!("{}[{}]", key.len(), body)
}

/// A validated transposition key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(Vec<usize>);

impl Key {
    pub fn new(columns: Vec<usize>) -> Result<Self, KeyError> {
        check(&columns)?;
        Ok(Self(columns))
    }

    pub fn identity(size: usize) -> Result<Self, KeyError> {
        Self::new((0..size).collect())
    }

    pub fn random(size: usize, rng: &mut fastrand::Rng) -> Result<Self, KeyError> {
        let mut columns: Vec<usize> = (0..size).collect();
        rng.shuffle(&mut columns);
        Self::new(columns)
    }

    pub fn from_keyword(keyword: &str) -> Result<Self, KeyError> {
        Self::new(from_keyword(keyword.trim().as_bytes())?)
    }

    /// Accepts `2,0,1`, `2 0 1`, `2|0|1` and the dump form `3[2|0|1]`.
    pub fn parse(text: &str) -> Result<Self, KeyError> {
        let trimmed = text.trim();
        let (declared, body) = match (trimmed.find('['), trimmed.strip_suffix(']')) {
            (Some(open), Some(without_close)) => {
                let size = trimmed[..open]
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| KeyError::Parse(text.to_string()))?;
                (Some(size), &without_close[open + 1..])
            }
            _ => (None, trimmed),
        };

        let columns = body
            .split(|c: char| c == ',' || c == '|' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| KeyError::Parse(text.to_string()))?;

        if declared.is_some_and(|size| size != columns.len()) {
            return Err(KeyError::Parse(text.to_string()));
        }
        Self::new(columns)
    }

    pub fn inverted(&self) -> Self {
        Self(invert(&self.0))
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl AsRef<[usize]> for Key {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_key(&self.0))
    }
}
