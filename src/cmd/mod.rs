pub mod crack;
pub mod decode;
pub mod encode;
pub mod key;

use clap::Args;
use colcrack::buffers::{BufferFilter, BufferRegistry, WriteMode};
use colcrack::error::{CrackError, CrackResult};
use colcrack::key::Key;
use std::path::{Path, PathBuf};

/// Registry slot holding the text read from disk.
pub const SOURCE: usize = 0;
/// Registry slot receiving the transformed text.
pub const RESULT: usize = 1;

#[derive(Args, Debug, Clone)]
pub struct TextArgs {
    /// ASCII text file to read.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the result here (overwriting) instead of only printing it.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Filter applied to the input before processing.
    #[arg(short, long, default_value_t = BufferFilter::Enl)]
    pub filter: BufferFilter,
}

#[derive(Args, Debug, Clone)]
#[group(multiple = false)]
pub struct KeySource {
    /// Explicit key, e.g. `2,0,1`, `2|0|1` or `3[2|0|1]`.
    #[arg(short, long)]
    pub key: Option<Key>,

    /// Derive the key from a keyword.
    #[arg(short = 'w', long)]
    pub keyword: Option<String>,
}

impl KeySource {
    pub fn resolve(&self) -> CrackResult<Key> {
        match (&self.key, &self.keyword) {
            (Some(key), _) => Ok(key.clone()),
            (None, Some(word)) => Ok(Key::from_keyword(word)?),
            (None, None) => Err(CrackError::Config(
                "a key is required (--key or --keyword)".to_string(),
            )),
        }
    }
}

/// Registry with the input file loaded into [`SOURCE`] and filtered.
pub fn load_source(text: &TextArgs) -> CrackResult<BufferRegistry> {
    let mut registry = BufferRegistry::with_buffers(2)?;
    registry.load_file(SOURCE, &text.input)?;
    if text.filter != BufferFilter::None {
        registry.filter(SOURCE, text.filter)?;
    }
    Ok(registry)
}

pub fn save_result(registry: &BufferRegistry, path: Option<&Path>) -> CrackResult<()> {
    match path {
        Some(path) => registry.save_file(RESULT, path, WriteMode::Overwrite),
        None => Ok(()),
    }
}
