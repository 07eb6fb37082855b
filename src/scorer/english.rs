use super::ScoringOracle;
use tracing::info;

const ALPHABET: usize = 26;

// Most frequent English digrams and trigrams, weighted by rank.
const DIGRAMS: [(&[u8; 2], u16); 30] = [
    (b"th", 30), (b"he", 29), (b"in", 28), (b"er", 27), (b"an", 26),
    (b"re", 25), (b"nd", 24), (b"at", 23), (b"on", 22), (b"nt", 21),
    (b"ha", 20), (b"es", 19), (b"st", 18), (b"en", 17), (b"ed", 16),
    (b"to", 15), (b"it", 14), (b"ou", 13), (b"ea", 12), (b"hi", 11),
    (b"is", 10), (b"or", 9), (b"ti", 8), (b"as", 7), (b"te", 6),
    (b"et", 5), (b"ng", 4), (b"of", 3), (b"al", 2), (b"de", 1),
];

const TRIGRAMS: [(&[u8; 3], u16); 20] = [
    (b"the", 60), (b"and", 57), (b"ing", 54), (b"ent", 51), (b"ion", 48),
    (b"her", 45), (b"for", 42), (b"tha", 39), (b"nth", 36), (b"int", 33),
    (b"ere", 30), (b"tio", 27), (b"ter", 24), (b"est", 21), (b"ers", 18),
    (b"ati", 15), (b"hat", 12), (b"ate", 9), (b"all", 6), (b"eth", 3),
];

/// English-likeness score from common digram and trigram occurrences.
///
/// Transposition never changes letter counts, so only the ordering-sensitive
/// n-gram terms are scored. Non-letters break n-gram runs; case is ignored.
pub struct EnglishScorer {
    digram_weights: Vec<u16>,
    trigram_weights: Vec<u16>,

    window_size: usize,
    evaluations: u64,
    best: Option<i64>,
}

impl Default for EnglishScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishScorer {
    pub fn new() -> Self {
        let mut digram_weights = vec![0; ALPHABET * ALPHABET];
        for (gram, weight) in DIGRAMS {
            digram_weights[index2(letter(gram[0]), letter(gram[1]))] = weight;
        }

        let mut trigram_weights = vec![0; ALPHABET * ALPHABET * ALPHABET];
        for (gram, weight) in TRIGRAMS {
            trigram_weights[index3(letter(gram[0]), letter(gram[1]), letter(gram[2]))] = weight;
        }

        Self {
            digram_weights,
            trigram_weights,
            window_size: 0,
            evaluations: 0,
            best: None,
        }
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn best(&self) -> Option<i64> {
        self.best
    }

    /// Stateless scoring of a text, independent of any run.
    pub fn fitness(&self, text: &[u8]) -> i64 {
        let mut total: i64 = 0;
        let mut prev2 = usize::MAX;
        let mut prev1 = usize::MAX;

        for &byte in text {
            if !byte.is_ascii_alphabetic() {
                prev2 = usize::MAX;
                prev1 = usize::MAX;
                continue;
            }
            let current = letter(byte);

            if prev1 != usize::MAX {
                total += i64::from(self.digram_weights[index2(prev1, current)]);
                if prev2 != usize::MAX {
                    total += i64::from(self.trigram_weights[index3(prev2, prev1, current)]);
                }
            }
            prev2 = prev1;
            prev1 = current;
        }
        total
    }
}

impl ScoringOracle for EnglishScorer {
    fn start(&mut self, window_size: usize) {
        self.window_size = window_size;
        self.evaluations = 0;
        self.best = None;
    }

    fn score(&mut self, candidate: &[u8]) -> i64 {
        let score = self.fitness(candidate);
        self.evaluations += 1;
        if self.best.map_or(true, |best| score > best) {
            self.best = Some(score);
        }
        score
    }

    fn report(&self, label: &str) {
        info!(
            "📊 {}: {} candidates scored over a {}-byte window, best fitness {}",
            label,
            self.evaluations,
            self.window_size,
            self.best.map_or_else(|| "n/a".to_string(), |b| b.to_string())
        );
    }
}

#[inline(always)]
fn letter(byte: u8) -> usize {
    (byte.to_ascii_lowercase() - b'a') as usize
}

#[inline(always)]
fn index2(a: usize, b: usize) -> usize {
    a * ALPHABET + b
}

#[inline(always)]
fn index3(a: usize, b: usize, c: usize) -> usize {
    (a * ALPHABET + b) * ALPHABET + c
}
