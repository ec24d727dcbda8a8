mod annotate;
mod chat;
mod parse;
mod render;
mod resolve;
mod setup;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "dxvar";

    pub const CONFIG_ARG: &str = "config";
    pub const GENE_DISEASE_TABLE_ARG: &str = "gene-disease-table";
    pub const VERBOSE_ARG: &str = "verbose";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Interpret human genetic variants: normalize the notation, classify it against ACMG services, look up associated diseases and explain the result.")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::CONFIG_ARG)
                .long(consts::CONFIG_ARG)
                .global(true)
                .help("Path to a TOML configuration file (default: $DXVAR_CONFIG or ~/.dxvar/config.toml)"),
        )
        .arg(
            Arg::new(consts::GENE_DISEASE_TABLE_ARG)
                .long(consts::GENE_DISEASE_TABLE_ARG)
                .global(true)
                .help("Path to the ClinGen gene-disease summary CSV"),
        )
        .arg(
            Arg::new(consts::VERBOSE_ARG)
                .long(consts::VERBOSE_ARG)
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (-v info, -vv debug)"),
        )
        .subcommand(parse::cli::create_parse_cli())
        .subcommand(resolve::cli::create_resolve_cli())
        .subcommand(annotate::cli::create_annotate_cli())
        .subcommand(chat::cli::create_chat_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    setup::init_logging(matches.get_count(consts::VERBOSE_ARG));

    match matches.subcommand() {
        //
        // PARSE
        //
        Some((parse::cli::PARSE_CMD, matches)) => {
            parse::handlers::run_parse(matches)?;
        }

        //
        // RESOLVE
        //
        Some((resolve::cli::RESOLVE_CMD, matches)) => {
            resolve::handlers::run_resolve(matches)?;
        }

        //
        // ANNOTATE
        //
        Some((annotate::cli::ANNOTATE_CMD, matches)) => {
            annotate::handlers::run_annotate(matches)?;
        }

        //
        // CHAT
        //
        Some((chat::cli::CHAT_CMD, matches)) => {
            chat::handlers::run_chat(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
