use super::SearchResult;
use crate::key::format_key;
use tracing::{debug, info};

/// Receives progress from a running search.
///
/// Purely informational: nothing an observer does can change the outcome.
pub trait SearchObserver {
    fn on_start(&self, _key_min: usize, _key_max: usize, _window: usize) {}

    fn on_size_start(&self, _key_size: usize, _permutations: u64, _tick_every: u64) {}

    /// Called roughly `progress_ticks` times per key size.
    fn on_tick(&self, _key_size: usize, _index: u64, _permutations: u64) {}

    fn on_size_done(&self, _key_size: usize, _best_score: Option<i64>, _best_key: &[usize]) {}

    fn on_finish(&self, _result: &SearchResult, _text: &[u8]) {}
}

pub struct NullObserver;

impl SearchObserver for NullObserver {}

/// Logs search progress through `tracing`.
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_start(&self, key_min: usize, key_max: usize, window: usize) {
        info!(
            "🔍 Columnar Transposition Bruteforce: {} => {}, using {} chars",
            key_min, key_max, window
        );
    }

    fn on_size_start(&self, key_size: usize, permutations: u64, tick_every: u64) {
        info!(
            " -> {:3} - {:10} permutations | {} per tick",
            key_size, permutations, tick_every
        );
    }

    fn on_tick(&self, key_size: usize, index: u64, permutations: u64) {
        debug!("    size {}: {}/{}", key_size, index, permutations);
    }

    fn on_size_done(&self, key_size: usize, best_score: Option<i64>, best_key: &[usize]) {
        match best_score {
            Some(score) => info!(
                " -> {:3} done: best score {}, from length {}; key: {}",
                key_size,
                score,
                best_key.len(),
                format_key(best_key)
            ),
            None => info!(" -> {:3} done: nothing scored", key_size),
        }
    }

    fn on_finish(&self, result: &SearchResult, _text: &[u8]) {
        info!(
            "🏆 Columnar Transposition Bruteforce: best score {}; key size {}; key {}",
            result
                .score
                .map_or_else(|| "n/a".to_string(), |s| s.to_string()),
            result.key_size,
            result.key_dump()
        );
    }
}
