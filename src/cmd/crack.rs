use super::{load_source, save_result, TextArgs, RESULT, SOURCE};
use crate::reports;
use clap::Args;
use colcrack::config::Config;
use colcrack::error::CrackResult;
use colcrack::scorer::EnglishScorer;
use colcrack::search::{Bruteforce, SearchOptions, TracingObserver};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CrackArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub text: TextArgs,

    /// Print the result as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &CrackArgs, config: Config) -> CrackResult<()> {
    let mut registry = load_source(&args.text)?;
    let loaded = registry.get(SOURCE)?.len();
    info!(
        "📂 Loaded {} bytes from {} (filter: {})",
        loaded,
        args.text.input.display(),
        args.text.filter
    );

    let search = Bruteforce::new(SearchOptions::from(&config));
    let mut scorer = EnglishScorer::new();

    let result = {
        let (input, output) = registry.pair_mut(SOURCE, RESULT)?;
        search.run(input, output.as_mut_slice(), &mut scorer, &TracingObserver)?
    };

    let plaintext = registry.get(RESULT)?.as_bytes();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        reports::print_crack_report(&result, scorer.evaluations());
        reports::print_text("Decryption", plaintext);
    }

    save_result(&registry, args.text.output.as_deref())?;
    if let Some(path) = &args.text.output {
        info!("💾 Saved decryption to {}", path.display());
    }
    Ok(())
}
