use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const ANNOTATE_CMD: &str = "annotate";

pub fn create_annotate_cli() -> Command {
    Command::new(ANNOTATE_CMD)
        .about("Classify one variant, look up its diseases and explain the result")
        .arg(
            arg!(--variant <VARIANT>)
                .required(true)
                .help("Variant in positional, CSV or rsID form"),
        )
        .arg(
            arg!(--candidate <N>)
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Allele pairing to use when the rsID maps to several (1-based)"),
        )
        .arg(
            Arg::new("no-explain")
                .long("no-explain")
                .action(ArgAction::SetTrue)
                .help("Skip the assistant explanation"),
        )
}
