use super::{load_source, save_result, KeySource, TextArgs, RESULT, SOURCE};
use crate::reports;
use clap::Args;
use colcrack::error::{CrackError, CrackResult};
use colcrack::key::Key;
use colcrack::transform::Transform;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub text: TextArgs,

    #[command(flatten)]
    pub keys: KeySource,

    /// Encrypt with a random key of this size.
    #[arg(short, long, conflicts_with_all = ["key", "keyword"])]
    pub random: Option<usize>,

    /// Seed for `--random`.
    #[arg(short = 'S', long, requires = "random")]
    pub seed: Option<u64>,
}

impl EncodeArgs {
    fn resolve_key(&self) -> CrackResult<Key> {
        let Some(size) = self.random else {
            return self.keys.resolve();
        };
        if size == 0 {
            return Err(CrackError::ZeroKeySize);
        }
        let mut rng = match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Ok(Key::random(size, &mut rng)?)
    }
}

pub fn run(args: &EncodeArgs) -> CrackResult<()> {
    let key = args.resolve_key()?;
    let mut registry = load_source(&args.text)?;

    {
        let (input, output) = registry.pair_mut(SOURCE, RESULT)?;
        Transform::RowToColumn.apply(input, output.as_mut_slice(), key.as_slice())?;
    }
    info!("🔒 Encrypted {} bytes with key {}", registry.get(RESULT)?.len(), key);

    reports::print_key_report(&key);
    reports::print_text("Ciphertext", registry.get(RESULT)?.as_bytes());
    save_result(&registry, args.text.output.as_deref())
}
