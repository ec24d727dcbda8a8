use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Position is not a positive integer: {0}")]
    MalformedPosition(String),

    #[error("Input is not a recognized variant notation: {0}")]
    UnrecognizedFormat(String),

    #[error("Invalid rsID syntax: {0}")]
    InvalidSyntax(String),

    #[error("Allele contains bases outside A, C, G, T: {0}")]
    InvalidAllele(String),

    #[error("Reference and alternate alleles are both empty")]
    EmptyAlleles,

    #[error("Unknown genome build: {0}")]
    UnknownGenomeBuild(String),

    #[error("{0} is an rsID and has to be resolved before it becomes a variant")]
    UnresolvedRsid(String),
}

/// Failure talking to one of the external services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("{service} is unavailable: {reason}")]
    Unavailable { service: String, reason: String },

    #[error("{service} returned an unexpected response: {reason}")]
    Malformed { service: String, reason: String },
}

impl UpstreamError {
    pub fn unavailable(service: &str, reason: impl Into<String>) -> Self {
        UpstreamError::Unavailable {
            service: service.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed(service: &str, reason: impl Into<String>) -> Self {
        UpstreamError::Malformed {
            service: service.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Invalid rsID syntax: {0}")]
    InvalidSyntax(String),

    #[error("No alleles found for {0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Choice {choice} is out of range, pick a number between 1 and {available}")]
    OutOfRange { choice: usize, available: usize },

    #[error("There is no pending allele choice")]
    NothingPending,
}

#[derive(Error, Debug)]
pub enum GeneDiseaseError {
    #[error("Can't read gene-disease table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Can't parse gene-disease table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Gene-disease table has no header row starting with {0:?}")]
    MissingHeader(&'static str),
}
