use anyhow::{Context, Result};
use clap::ArgMatches;

use dxvar_core::disambiguate::resolve;
use dxvar_core::gene_disease::GeneDiseaseTable;

use crate::render::candidate_table;
use crate::setup::{build_clients, load_config, spinner};

pub fn run_resolve(matches: &ArgMatches) -> Result<()> {
    let rsid = matches
        .get_one::<String>("rsid")
        .expect("rsID is required");

    let config = load_config(matches)?;
    let clients = build_clients(config, false)?;
    let table = GeneDiseaseTable::empty();
    let services = clients.services(&table);

    let pb = spinner(&format!("Resolving {}", rsid));
    let candidates = resolve(rsid, services.rsids);
    pb.finish_and_clear();

    let candidates = candidates.with_context(|| format!("Could not resolve {}", rsid))?;
    println!("{}", candidate_table(&candidates));

    Ok(())
}
