use crate::reports;
use clap::Args;
use colcrack::error::CrackResult;
use colcrack::key::Key;

#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// A numeric key (`2,0,1`, `3[2|0|1]`) or a keyword (`LION`).
    pub value: String,
}

pub fn run(args: &KeyArgs) -> CrackResult<()> {
    let key = if args.value.bytes().any(|b| b.is_ascii_digit()) {
        Key::parse(&args.value)?
    } else {
        Key::from_keyword(&args.value)?
    };

    reports::print_key_report(&key);
    Ok(())
}
