use anyhow::{Result, bail};
use clap::ArgMatches;

use dxvar_core::session::{Outcome, Session};

use crate::render::{print_candidate_set, print_outcome};
use crate::setup::{build_clients, load_config, load_gene_disease_table, spinner};

/// Run one variant through a fresh session and print the report.
pub fn run_annotate(matches: &ArgMatches) -> Result<()> {
    let variant = matches
        .get_one::<String>("variant")
        .expect("Variant is required");
    let candidate = matches.get_one::<usize>("candidate").copied();
    let explain = !matches.get_flag("no-explain");

    let config = load_config(matches)?;
    let table = load_gene_disease_table(matches, &config)?;
    let clients = build_clients(config, explain)?;
    let services = clients.services(&table);

    let mut session = Session::new();
    let pb = spinner(&format!("Annotating {}", variant));
    let mut outcome = session.submit(variant, &services);
    if let Some(choice) = candidate {
        if matches!(outcome, Outcome::NeedsSelection(_)) {
            pb.set_message(format!("Annotating candidate {}", choice));
            outcome = session.select(choice, &services);
        }
    }
    pb.finish_and_clear();

    match outcome {
        Outcome::NeedsSelection(set) => {
            print_candidate_set(&set);
            bail!("{} is ambiguous, pick a pairing with --candidate <N>", set.rsid());
        }
        Outcome::Rejected(reason) => bail!(reason),
        Outcome::Empty => bail!("No variant given"),
        outcome => print_outcome(&outcome),
    }

    Ok(())
}
