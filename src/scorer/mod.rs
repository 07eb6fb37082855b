pub mod english;

pub use self::english::EnglishScorer;

/// Fitness function used to rank candidate decryptions.
///
/// Higher scores mean more language-like text. Implementations must not
/// modify the candidate and should run in time linear in its length, since
/// the search calls `score` once per permutation.
pub trait ScoringOracle {
    /// Resets internal state before a run probing windows of `window_size` bytes.
    fn start(&mut self, window_size: usize);

    fn score(&mut self, candidate: &[u8]) -> i64;

    /// Emits whatever statistics the oracle gathered during the run.
    fn report(&self, _label: &str) {}

    /// Releases run state. Called once after the final decryption.
    fn finish(&mut self) {}
}

impl<T: ScoringOracle + ?Sized> ScoringOracle for &mut T {
    fn start(&mut self, window_size: usize) {
        (**self).start(window_size)
    }

    fn score(&mut self, candidate: &[u8]) -> i64 {
        (**self).score(candidate)
    }

    fn report(&self, label: &str) {
        (**self).report(label)
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}

impl<T: ScoringOracle + ?Sized> ScoringOracle for Box<T> {
    fn start(&mut self, window_size: usize) {
        (**self).start(window_size)
    }

    fn score(&mut self, candidate: &[u8]) -> i64 {
        (**self).score(candidate)
    }

    fn report(&self, label: &str) {
        (**self).report(label)
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}
