use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use colcrack::config::Config;
use colcrack::error::CrackResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with search parameters; explicit flags override it.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bruteforce a columnar transposition ciphertext.
    Crack(cmd::crack::CrackArgs),
    /// Encrypt text with a known key.
    Encode(cmd::encode::EncodeArgs),
    /// Decrypt text with a known key.
    Decode(cmd::decode::DecodeArgs),
    /// Show a key, its inverse and whether it is valid.
    Key(cmd::key::KeyArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match &cli.command {
        Commands::Crack(args) => resolve_config(&cli, &args.config, &matches)
            .and_then(|config| cmd::crack::run(args, config)),
        Commands::Encode(args) => cmd::encode::run(args),
        Commands::Decode(args) => cmd::decode::run(args),
        Commands::Key(args) => cmd::key::run(args),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn resolve_config(
    cli: &Cli,
    cli_config: &Config,
    matches: &clap::ArgMatches,
) -> CrackResult<Config> {
    let Some(path) = &cli.config else {
        return Ok(cli_config.clone());
    };

    info!("⚙️  Loading search parameters from: {}", path);
    let mut config = Config::load_from_file(path)?;
    if let Some((_, sub_matches)) = matches.subcommand() {
        config
            .search
            .merge_from_cli(&cli_config.search, sub_matches);
    }
    Ok(config)
}
