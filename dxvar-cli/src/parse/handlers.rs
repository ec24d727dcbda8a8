use anyhow::{Context, Result};
use clap::ArgMatches;

use dxvar_core::parser::{ParsedVariant, parse};

/// Print the normalized CSV, or the rsID when one still has to be resolved.
pub fn run_parse(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("Input is required");

    match parse(input).with_context(|| format!("Could not parse '{}'", input))? {
        ParsedVariant::Record(record) => println!("{}", record.to_csv()),
        ParsedVariant::Rsid(rsid) => {
            println!("{}", rsid);
            eprintln!("{} is an rsID, run `dxvar resolve --rsid {}` to list its alleles", rsid, rsid);
        }
    }

    Ok(())
}
