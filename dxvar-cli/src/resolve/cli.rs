use clap::{Command, arg};

pub const RESOLVE_CMD: &str = "resolve";

pub fn create_resolve_cli() -> Command {
    Command::new(RESOLVE_CMD)
        .about("List the allele pairings Ensembl reports for an rsID")
        .arg(
            arg!(--rsid <RSID>)
                .short('r')
                .required(true)
                .help("rsID, e.g. rs41272114"),
        )
}
