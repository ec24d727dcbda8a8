use log::debug;
use serde::Deserialize;

use dxvar_core::errors::UpstreamError;
use dxvar_core::models::{Classification, ClassificationScore, VariantRecord};
use dxvar_core::services::VariantClassifier;

use super::consts::GENEBE_SERVICE;
use super::http::HttpClient;
use super::utils::join_url;

const VARIANT_PATH: &str = "cloud/api-public/v1/variant";

/// Ids arrive as numbers from some releases and strings from others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

impl NumberOrText {
    fn into_text(self) -> String {
        match self {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeneBeResponse {
    #[serde(default)]
    variants: Vec<GeneBeVariant>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeneBeVariant {
    acmg_classification: Option<String>,
    effect: Option<String>,
    gene_symbol: Option<String>,
    gene_hgnc_id: Option<NumberOrText>,
    dbsnp: Option<NumberOrText>,
    frequency_reference_population: Option<f64>,
    acmg_score: Option<ClassificationScore>,
    acmg_criteria: Option<String>,
}

impl From<GeneBeVariant> for Classification {
    fn from(v: GeneBeVariant) -> Self {
        let hgnc_id = v.gene_hgnc_id.map(|id| {
            let id = id.into_text();
            if id.to_ascii_uppercase().starts_with("HGNC:") {
                id
            } else {
                format!("HGNC:{}", id)
            }
        });
        let dbsnp = v.dbsnp.map(|id| {
            let id = id.into_text();
            if id.to_ascii_lowercase().starts_with("rs") {
                id
            } else {
                format!("rs{}", id)
            }
        });

        Classification {
            acmg_classification: non_empty(v.acmg_classification),
            effect: non_empty(v.effect),
            gene_symbol: non_empty(v.gene_symbol),
            hgnc_id,
            dbsnp,
            population_frequency: v.frequency_reference_population,
            acmg_score: v.acmg_score,
            acmg_criteria: non_empty(v.acmg_criteria),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

///
/// Decode a GeneBe variant response into a classification.
///
/// The first annotated variant is used; a response without any is malformed.
///
pub fn decode_classification(body: &str) -> Result<Classification, UpstreamError> {
    let response: GeneBeResponse = serde_json::from_str(body)
        .map_err(|e| UpstreamError::malformed(GENEBE_SERVICE, e.to_string()))?;

    response
        .variants
        .into_iter()
        .next()
        .map(Classification::from)
        .ok_or_else(|| UpstreamError::malformed(GENEBE_SERVICE, "no variants in response"))
}

/// ACMG classification from the public GeneBe API.
#[derive(Debug, Clone)]
pub struct GeneBeClient {
    http: HttpClient,
    api: String,
}

impl GeneBeClient {
    pub fn new(http: HttpClient, api: impl Into<String>) -> Self {
        GeneBeClient {
            http,
            api: api.into(),
        }
    }
}

impl VariantClassifier for GeneBeClient {
    fn name(&self) -> &str {
        GENEBE_SERVICE
    }

    fn classify(&self, variant: &VariantRecord) -> Result<Classification, UpstreamError> {
        let url = join_url(&self.api, VARIANT_PATH);
        debug!("GeneBe lookup for {}", variant.to_csv());

        let query = [
            ("chr", variant.chromosome.clone()),
            ("pos", variant.position.to_string()),
            ("ref", variant.ref_allele.clone()),
            ("alt", variant.alt_allele.clone()),
            ("genome", variant.genome_build.as_str().to_string()),
        ];
        let response = self
            .http
            .get(GENEBE_SERVICE, &url, &query)?
            .error_for_status(GENEBE_SERVICE)?;

        decode_classification(&response.body)
    }
}
