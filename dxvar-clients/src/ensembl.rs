use log::debug;
use serde::Deserialize;

use dxvar_core::errors::UpstreamError;
use dxvar_core::models::{AlleleCandidate, RsId};
use dxvar_core::services::RsidLookup;

use super::consts::ENSEMBL_SERVICE;
use super::http::HttpClient;
use super::utils::join_url;

const PRIMARY_ASSEMBLY: &str = "GRCh38";
const PRIMARY_COORD_SYSTEM: &str = "chromosome";

#[derive(Debug, Deserialize)]
struct EnsemblVariation {
    #[serde(default)]
    mappings: Vec<EnsemblMapping>,
}

#[derive(Debug, Deserialize)]
struct EnsemblMapping {
    seq_region_name: String,
    start: u64,
    allele_string: String,
    #[serde(default)]
    assembly_name: Option<String>,
    #[serde(default)]
    coord_system: Option<String>,
}

impl EnsemblMapping {
    fn is_primary(&self) -> bool {
        self.assembly_name.as_deref().is_none_or(|a| a == PRIMARY_ASSEMBLY)
            && self
                .coord_system
                .as_deref()
                .is_none_or(|c| c == PRIMARY_COORD_SYSTEM)
    }

    /// One candidate per alternate allele; `-` stands for an empty allele.
    fn candidates(&self) -> Vec<AlleleCandidate> {
        let mut alleles = self.allele_string.split('/').map(|a| {
            let a = a.trim();
            if a == "-" { String::new() } else { a.to_ascii_uppercase() }
        });
        let Some(ref_allele) = alleles.next() else {
            return Vec::new();
        };
        if !is_plain(&ref_allele) {
            return Vec::new();
        }

        alleles
            .filter(|alt| is_plain(alt) && *alt != ref_allele)
            .map(|alt_allele| AlleleCandidate {
                chromosome: self.seq_region_name.clone(),
                position: self.start,
                ref_allele: ref_allele.clone(),
                alt_allele,
            })
            .collect()
    }
}

fn is_plain(allele: &str) -> bool {
    allele.chars().all(|c| matches!(c, 'A' | 'C' | 'G' | 'T'))
}

///
/// Decode an Ensembl variation record into allele candidates.
///
/// Only mappings on the primary assembly's chromosomes count; allele strings
/// that are not plain nucleotides (e.g. `HGMD_MUTATION`) are skipped.
///
pub fn decode_candidates(body: &str) -> Result<Vec<AlleleCandidate>, UpstreamError> {
    let variation: EnsemblVariation = serde_json::from_str(body)
        .map_err(|e| UpstreamError::malformed(ENSEMBL_SERVICE, e.to_string()))?;

    Ok(variation
        .mappings
        .iter()
        .filter(|m| m.is_primary())
        .flat_map(EnsemblMapping::candidates)
        .collect())
}

/// rsID resolution through the Ensembl REST API.
#[derive(Debug, Clone)]
pub struct EnsemblClient {
    http: HttpClient,
    api: String,
}

impl EnsemblClient {
    pub fn new(http: HttpClient, api: impl Into<String>) -> Self {
        EnsemblClient {
            http,
            api: api.into(),
        }
    }
}

impl RsidLookup for EnsemblClient {
    fn lookup(&self, rsid: &RsId) -> Result<Vec<AlleleCandidate>, UpstreamError> {
        let url = join_url(&self.api, &format!("variation/human/{}", rsid));
        debug!("Ensembl lookup for {}", rsid);

        let response = self.http.get(
            ENSEMBL_SERVICE,
            &url,
            &[("content-type", "application/json".to_string())],
        )?;

        // Ensembl answers unknown ids with 400
        if matches!(response.status, 400 | 404) {
            debug!("Ensembl does not know {}", rsid);
            return Ok(Vec::new());
        }

        let response = response.error_for_status(ENSEMBL_SERVICE)?;
        decode_candidates(&response.body)
    }
}
