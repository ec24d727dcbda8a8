//! # dxvar-clients
//!
//! Blocking HTTP implementations of the `dxvar-core` service traits:
//! GeneBe and InterVar classification, Ensembl rsID lookup and the Groq chat
//! assistant, plus the layered configuration that points them at their
//! endpoints.
//!
//! ```rust,no_run
//! use dxvar_clients::client::ServicesBuilder;
//! use dxvar_clients::config::DxvarConfig;
//! use dxvar_core::gene_disease::GeneDiseaseTable;
//! use dxvar_core::session::{Outcome, Session};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = DxvarConfig::load(None)?;
//! let clients = ServicesBuilder::new().with_config(config).finish()?;
//! let table = GeneDiseaseTable::empty();
//!
//! let mut session = Session::new();
//! if let Outcome::Report(report) = session.submit("rs41272114", &clients.services(&table)) {
//!     println!("{}", report.primary.classification.label());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod consts;
pub mod ensembl;
pub mod genebe;
pub mod groq;
pub mod http;
pub mod intervar;
pub mod utils;
