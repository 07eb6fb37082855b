use crate::error::{CrackError, CrackResult};
use crate::key::{check, KeyError};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The column/row reorderings a key can drive.
///
/// `RowToColumn` and `ColumnToRow` are the real cipher pair: text encoded
/// with `key` is restored by decoding with the *inverted* key.
/// `FastProbe` only shuffles within fixed-size blocks and exists to re-probe
/// text cheaply during a search.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    #[strum(to_string = "fast_probe", serialize = "col2col")]
    FastProbe,
    #[strum(to_string = "row_to_column", serialize = "row2col")]
    RowToColumn,
    #[strum(to_string = "column_to_row", serialize = "col2row")]
    ColumnToRow,
}

impl Transform {
    /// Reorders `input` into the first `input.len()` bytes of `output`.
    ///
    /// `key` must be a permutation of `0..key.len()`; size 1 copies the text
    /// unchanged. Malformed keys are reported as [`CrackError::Key`].
    pub fn apply(self, input: &[u8], output: &mut [u8], key: &[usize]) -> CrackResult<()> {
        match key {
            [] => return Err(CrackError::ZeroKeySize),
            [only] if *only != 0 => {
                return Err(KeyError::OutOfRange {
                    index: 0,
                    value: *only,
                    size: 1,
                }
                .into())
            }
            [_] => {}
            _ => check(key)?,
        }
        if output.len() < input.len() {
            return Err(CrackError::BufferTooSmall {
                needed: input.len(),
                capacity: output.len(),
            });
        }
        self.apply_unchecked(input, output, key);
        Ok(())
    }

    /// Search-loop form of [`Transform::apply`] for keys that are
    /// permutations by construction.
    ///
    /// `key` must be non-empty and `output` at least as long as `input`.
    #[inline]
    pub(crate) fn apply_unchecked(self, input: &[u8], output: &mut [u8], key: &[usize]) {
        let output = &mut output[..input.len()];
        match self {
            Transform::FastProbe => fast_probe(input, output, key),
            Transform::RowToColumn => row_to_column(input, output, key),
            Transform::ColumnToRow => column_to_row(input, output, key),
        }
    }

    /// Allocating form of [`Transform::apply`].
    pub fn apply_owned(self, input: &[u8], key: &[usize]) -> CrackResult<Vec<u8>> {
        let mut output = vec![0; input.len()];
        self.apply(input, &mut output, key)?;
        Ok(output)
    }
}

fn fast_probe(input: &[u8], output: &mut [u8], key: &[usize]) {
    let size = key.len();
    let full = input.len() - input.len() % size;

    for (src, dst) in input[..full]
        .chunks_exact(size)
        .zip(output[..full].chunks_exact_mut(size))
    {
        for (column, &byte) in src.iter().enumerate() {
            dst[key[column]] = byte;
        }
    }

    // Trailing partial block stays where it is.
    output[full..].copy_from_slice(&input[full..]);
}

fn row_to_column(input: &[u8], output: &mut [u8], key: &[usize]) {
    let size = key.len();
    let incomplete = input.len() % size;
    let std_len = (input.len() - incomplete) / size;

    for column in 0..size {
        // Long columns ranked ahead of this one each push it one byte further.
        let start = std_len * key[column]
            + (0..incomplete)
                .filter(|&other| key[other] < key[column])
                .count();

        for (offset, &byte) in input.iter().skip(column).step_by(size).enumerate() {
            output[start + offset] = byte;
        }
    }
}

fn column_to_row(input: &[u8], output: &mut [u8], key: &[usize]) {
    let size = key.len();
    let incomplete = input.len() % size;
    let std_len = (input.len() - incomplete) / size;

    let mut next_rank = 0;
    let mut column = 0;
    let mut column_start = 0;
    let mut column_end = 0;

    for (i, &byte) in input.iter().enumerate() {
        // Zero-length columns (key wider than the text) are skipped over.
        while i == column_end {
            column = key[next_rank];
            column_start = i;
            column_end = i + std_len + usize::from(column < incomplete);
            next_rank += 1;
        }
        output[column + (i - column_start) * size] = byte;
    }
}
