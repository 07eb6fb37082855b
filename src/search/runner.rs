use super::{SearchObserver, SearchResult};
use crate::config::Config;
use crate::error::{CrackError, CrackResult};
use crate::permutation::{factorial, nth_permutation, MAX_KEY_SIZE};
use crate::scorer::ScoringOracle;
use crate::transform::Transform;

const ORACLE_LABEL: &str = "columnar-transposition";

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub key_min: usize,
    pub key_max: usize,
    pub probe_window: usize,
    pub progress_ticks: u64,
    pub transform: Transform,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SearchOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            key_min: cfg.search.key_min,
            key_max: cfg.search.key_max,
            probe_window: cfg.search.probe_window,
            progress_ticks: cfg.search.progress_ticks,
            transform: cfg.search.transform,
        }
    }
}

impl SearchOptions {
    fn check(&self) -> CrackResult<()> {
        if self.key_min == 0 || self.key_min > self.key_max || self.key_max > MAX_KEY_SIZE {
            return Err(CrackError::KeyRange {
                min: self.key_min,
                max: self.key_max,
                limit: MAX_KEY_SIZE,
            });
        }
        if self.probe_window == 0 {
            return Err(CrackError::Config(
                "probe window must be at least 1 byte".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct Bruteforce {
    options: SearchOptions,
}

impl Bruteforce {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn run<O: ScoringOracle, CB: SearchObserver>(
        &self,
        input: &[u8],
        output: &mut [u8],
        oracle: &mut O,
        observer: &CB,
    ) -> CrackResult<SearchResult> {
        let opts = &self.options;
        opts.check()?;
        if input.is_empty() {
            return Err(CrackError::EmptyInput);
        }
        if output.len() < input.len() {
            return Err(CrackError::BufferTooSmall {
                needed: input.len(),
                capacity: output.len(),
            });
        }

        // 1. Key buffers, sized once for the largest key.
        let mut key = alloc_key_buffer(opts.key_max)?;
        let mut best_key = alloc_key_buffer(opts.key_max)?;

        let window = opts.probe_window.min(input.len());
        let probe = &input[..window];
        oracle.start(window);
        observer.on_start(opts.key_min, opts.key_max, window);

        let mut best_score: Option<i64> = None;
        let mut best_size = 0;
        let mut candidates = 0u64;

        // 2. Every permutation of every size.
        for key_size in opts.key_min..=opts.key_max {
            let permutations = factorial(key_size)?;
            let tick_every = (permutations / opts.progress_ticks.max(1)).max(1);
            let mut next_tick = tick_every;
            observer.on_size_start(key_size, permutations, tick_every);

            let current = &mut key[..key_size];
            for index in 1..=permutations {
                nth_permutation(index, current);
                opts.transform.apply_unchecked(probe, output, current);

                let score = oracle.score(&output[..window]);
                candidates += 1;

                // Strict: the first key to reach a score keeps it.
                if best_score.map_or(true, |best| score > best) {
                    best_score = Some(score);
                    best_size = key_size;
                    best_key[..key_size].copy_from_slice(current);
                }

                if index == next_tick {
                    next_tick += tick_every;
                    observer.on_tick(key_size, index, permutations);
                }
            }

            observer.on_size_done(key_size, best_score, &best_key[..best_size]);
        }

        oracle.report(ORACLE_LABEL);

        // 3. Winning key over the whole text.
        best_key.truncate(best_size);
        opts.transform.apply(input, output, &best_key)?;

        let result = SearchResult {
            score: best_score,
            key_size: best_size,
            key: best_key,
            transform: opts.transform,
            candidates,
        };
        observer.on_finish(&result, &output[..input.len()]);
        oracle.finish();

        Ok(result)
    }
}

fn alloc_key_buffer(size: usize) -> CrackResult<Vec<usize>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(size)?;
    buffer.resize(size, 0);
    Ok(buffer)
}
