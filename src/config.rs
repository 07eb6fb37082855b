use crate::error::CrackResult;
use crate::transform::Transform;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Smallest key size to try.
    #[arg(long, default_value_t = 2)]
    pub key_min: usize,
    /// Largest key size to try. Cost grows factorially.
    #[arg(long, default_value_t = 7)]
    pub key_max: usize,

    /// Bytes of ciphertext scored per candidate key.
    #[arg(long, default_value_t = 600)]
    pub probe_window: usize,
    /// Progress updates emitted per key size.
    #[arg(long, default_value_t = 30)]
    pub progress_ticks: u64,

    #[arg(long, default_value_t = Transform::ColumnToRow)]
    pub transform: Transform,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            key_min: 2,
            key_max: 7,
            probe_window: 600,
            progress_ticks: 30,
            transform: Transform::ColumnToRow,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CrackResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl SearchParams {
    /// Copies values the user typed on the command line over file-loaded ones.
    pub fn merge_from_cli(&mut self, cli: &SearchParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(key_min, "key_min");
        update_if_present!(key_max, "key_max");
        update_if_present!(probe_window, "probe_window");
        update_if_present!(progress_ticks, "progress_ticks");
        update_if_present!(transform, "transform");
    }
}
