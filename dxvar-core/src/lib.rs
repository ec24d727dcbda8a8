//! # dxvar-core
//!
//! Variant interpretation without the network: parsing free-text variant
//! notation into normalized records, turning rsIDs into allele candidates,
//! mapping classification labels to display categories, the static
//! gene-disease table, and the per-user [`session::Session`] that ties the
//! external services together.
//!
//! ```rust
//! use dxvar_core::models::VariantRecord;
//!
//! let record: VariantRecord = "chr6:160585140-T>G".parse().unwrap();
//! assert_eq!(record.to_csv(), "6,160585140,T,G,hg38");
//! ```

pub mod disambiguate;
pub mod errors;
pub mod gene_disease;
pub mod models;
pub mod parser;
pub mod services;
pub mod session;
pub mod severity;

pub use disambiguate::{CandidateSet, Resolution, resolve};
pub use parser::{ParsedVariant, parse};
pub use severity::{Category, classify_severity};
