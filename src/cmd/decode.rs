use super::{load_source, save_result, KeySource, TextArgs, RESULT, SOURCE};
use crate::reports;
use clap::Args;
use colcrack::error::CrackResult;
use colcrack::transform::Transform;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub text: TextArgs,

    #[command(flatten)]
    pub keys: KeySource,
}

pub fn run(args: &DecodeArgs) -> CrackResult<()> {
    let key = args.keys.resolve()?;
    // Reading by rows takes the inverse of the encoding key.
    let decode_key = key.inverted();
    let mut registry = load_source(&args.text)?;

    {
        let (input, output) = registry.pair_mut(SOURCE, RESULT)?;
        Transform::ColumnToRow.apply(input, output.as_mut_slice(), decode_key.as_slice())?;
    }
    info!("🔓 Decrypted {} bytes with key {}", registry.get(RESULT)?.len(), key);

    reports::print_text("Plaintext", registry.get(RESULT)?.as_bytes());
    save_result(&registry, args.text.output.as_deref())
}
