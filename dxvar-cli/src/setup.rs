//! Shared start-up for every subcommand: logging, configuration, the gene-disease
//! table, the service clients and the progress spinner.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, info, warn};

use dxvar_clients::client::{ServiceClients, ServicesBuilder};
use dxvar_clients::config::DxvarConfig;
use dxvar_clients::utils::expand_path;
use dxvar_core::gene_disease::GeneDiseaseTable;

use crate::consts::{CONFIG_ARG, GENE_DISEASE_TABLE_ARG};

/// Warnings by default, `-v` for info, `-vv` and more for debug. `RUST_LOG` wins.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

pub fn load_config(matches: &ArgMatches) -> Result<DxvarConfig> {
    let explicit = matches.get_one::<String>(CONFIG_ARG).map(PathBuf::from);
    DxvarConfig::load(explicit.as_deref())
}

///
/// Load the gene-disease table named on the command line, falling back to the
/// configured one. Without either, disease lookups come back empty.
///
pub fn load_gene_disease_table(matches: &ArgMatches, config: &DxvarConfig) -> Result<GeneDiseaseTable> {
    let path = matches
        .get_one::<String>(GENE_DISEASE_TABLE_ARG)
        .map(|p| expand_path(Path::new(p)))
        .or_else(|| config.gene_disease_table.clone());

    match path {
        Some(path) => {
            let table = GeneDiseaseTable::from_path(&path)
                .with_context(|| format!("Failed to load gene-disease table {}", path.display()))?;
            info!("{} gene-disease associations available", table.len());
            Ok(table)
        }
        None => {
            warn!("No gene-disease table configured, disease associations will be empty");
            Ok(GeneDiseaseTable::empty())
        }
    }
}

pub fn build_clients(config: DxvarConfig, explain: bool) -> Result<ServiceClients> {
    let builder = ServicesBuilder::new().with_config(config);
    let builder = if explain {
        builder
    } else {
        builder.without_assistant()
    };
    builder.finish()
}

/// Spinner shown on stderr while upstream calls block.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
