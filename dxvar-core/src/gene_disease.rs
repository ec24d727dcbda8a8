//! Static gene-disease association table (ClinGen gene-disease summary CSV).
//!
//! The table is read once at start-up and never written to afterwards.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::errors::GeneDiseaseError;
use crate::models::DiseaseAssociation;

const HEADER_START: &str = "GENE SYMBOL";

#[derive(Debug, Deserialize)]
struct GeneDiseaseRow {
    #[serde(rename = "GENE SYMBOL")]
    gene_symbol: String,
    #[serde(rename = "GENE ID (HGNC)")]
    hgnc_id: String,
    #[serde(rename = "DISEASE LABEL")]
    disease_label: String,
    #[serde(rename = "MOI")]
    inheritance: String,
    #[serde(rename = "CLASSIFICATION")]
    classification: String,
}

impl From<GeneDiseaseRow> for DiseaseAssociation {
    fn from(row: GeneDiseaseRow) -> Self {
        DiseaseAssociation {
            gene_symbol: row.gene_symbol,
            hgnc_id: row.hgnc_id,
            disease_label: row.disease_label,
            inheritance: row.inheritance,
            classification: row.classification,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneDiseaseTable {
    rows: Vec<DiseaseAssociation>,
}

impl GeneDiseaseTable {
    /// A table with no rows; every lookup comes back empty.
    pub fn empty() -> Self {
        Self::default()
    }

    ///
    /// Read a table from CSV text. Banner lines ahead of the header row and
    /// `+++` separator rows are skipped.
    ///
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, GeneDiseaseError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;

        let header_offset = raw
            .split_inclusive('\n')
            .scan(0usize, |offset, line| {
                let start = *offset;
                *offset += line.len();
                Some((start, line))
            })
            .find(|(_, line)| line.trim_start_matches('"').starts_with(HEADER_START))
            .map(|(start, _)| start)
            .ok_or(GeneDiseaseError::MissingHeader(HEADER_START))?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(raw[header_offset..].as_bytes());

        let mut rows = Vec::new();
        for result in csv_reader.deserialize::<GeneDiseaseRow>() {
            let row = result?;
            if row.gene_symbol.starts_with('+') || row.gene_symbol.is_empty() {
                continue;
            }
            rows.push(row.into());
        }

        Ok(GeneDiseaseTable { rows })
    }

    pub fn from_path(path: &Path) -> Result<Self, GeneDiseaseError> {
        let file = File::open(path)?;
        let table = Self::from_reader(file)?;
        info!(
            "Loaded {} gene-disease associations from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    ///
    /// Rows whose HGNC id equals `hgnc_id` or whose symbol equals
    /// `gene_symbol` (case-insensitive). `HGNC:1100` and `1100` are the same id.
    ///
    pub fn lookup(
        &self,
        gene_symbol: Option<&str>,
        hgnc_id: Option<&str>,
    ) -> Vec<&DiseaseAssociation> {
        let symbol = gene_symbol.map(str::trim).filter(|s| !s.is_empty());
        let id = hgnc_id.map(normalize_hgnc_id).filter(|s| !s.is_empty());
        if symbol.is_none() && id.is_none() {
            return Vec::new();
        }

        self.rows
            .iter()
            .filter(|row| {
                let id_matches = id
                    .as_deref()
                    .is_some_and(|id| normalize_hgnc_id(&row.hgnc_id) == id);
                let symbol_matches =
                    symbol.is_some_and(|s| row.gene_symbol.eq_ignore_ascii_case(s));
                id_matches || symbol_matches
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TryFrom<&Path> for GeneDiseaseTable {
    type Error = GeneDiseaseError;

    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        GeneDiseaseTable::from_path(value)
    }
}

fn normalize_hgnc_id(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("hgnc:") => trimmed[5..].to_string(),
        _ => trimmed.to_string(),
    }
}
