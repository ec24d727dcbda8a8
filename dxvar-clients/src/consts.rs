//! Constants for dxvar configuration and the external service endpoints.
//!
//! This module defines environment variable names, default endpoints and the
//! default request settings used by every client.

// Environment variable names

/// Environment variable name for the path of the configuration file.
///
/// When set, this overrides the default location (`~/.dxvar/config.toml`).
///
/// # Example
///
/// ```bash
/// export DXVAR_CONFIG=/etc/dxvar/config.toml
/// ```
pub const DXVAR_CONFIG_ENV: &str = "DXVAR_CONFIG";

/// Environment variable name for the gene-disease table (ClinGen CSV).
pub const GENE_DISEASE_TABLE_ENV: &str = "DXVAR_GENE_DISEASE_TABLE";

/// Environment variable name for the GeneBe API endpoint.
pub const GENEBE_API_ENV: &str = "GENEBE_API";

/// Environment variable name for the InterVar API endpoint.
pub const INTERVAR_API_ENV: &str = "INTERVAR_API";

/// Environment variable name for the Ensembl REST endpoint.
pub const ENSEMBL_API_ENV: &str = "ENSEMBL_API";

/// Environment variable name for the Groq API endpoint.
pub const GROQ_API_ENV: &str = "GROQ_API";

/// Environment variable holding the Groq API key.
///
/// Without a key the assistant is disabled and reports go out without an
/// explanation.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

// Default endpoints

pub const DEFAULT_GENEBE_API: &str = "https://api.genebe.net";
pub const DEFAULT_INTERVAR_API: &str = "http://wintervar.wglab.org";
pub const DEFAULT_ENSEMBL_API: &str = "https://rest.ensembl.org";
pub const DEFAULT_GROQ_API: &str = "https://api.groq.com";

// Service names, as shown next to their results

pub const GENEBE_SERVICE: &str = "GeneBe";
pub const INTERVAR_SERVICE: &str = "InterVar";
pub const ENSEMBL_SERVICE: &str = "Ensembl";
pub const GROQ_SERVICE: &str = "Groq";

// Assistant defaults

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TOP_P: f32 = 1.0;
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 1024;

// Request defaults

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Retries after the first attempt, only for transport errors and 5xx responses.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Delay before the first retry; later retries wait proportionally longer.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

// File locations

/// Default folder under the home directory holding `config.toml`.
pub const DEFAULT_CONFIG_FOLDER: &str = ".dxvar";

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
