use clap::{Command, arg};

pub const PARSE_CMD: &str = "parse";

pub fn create_parse_cli() -> Command {
    Command::new(PARSE_CMD)
        .about("Normalize a variant to CHROM,POS,REF,ALT,BUILD without calling any service")
        .arg(
            arg!(--input <INPUT>)
                .short('i')
                .required(true)
                .help("Variant in positional (chr6:160585140-T>G), CSV (6,160585140,T,G,hg38) or rsID form"),
        )
}
