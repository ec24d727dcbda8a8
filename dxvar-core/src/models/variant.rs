use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

///
/// Reference coordinate system a position is interpreted against.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenomeBuild {
    #[default]
    Hg38,
    Hg19,
}

impl GenomeBuild {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenomeBuild::Hg38 => "hg38",
            GenomeBuild::Hg19 => "hg19",
        }
    }
}

impl FromStr for GenomeBuild {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hg38" | "grch38" | "38" => Ok(GenomeBuild::Hg38),
            "hg19" | "grch37" | "37" => Ok(GenomeBuild::Hg19),
            _ => Err(ParseError::UnknownGenomeBuild(s.to_string())),
        }
    }
}

impl Display for GenomeBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// A reference SNP cluster identifier, `rs` followed by a number greater than zero.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RsId(u64);

impl RsId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for RsId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .get(..2)
            .filter(|prefix| prefix.eq_ignore_ascii_case("rs"))
            .map(|_| &trimmed[2..])
            .ok_or_else(|| ParseError::InvalidSyntax(s.to_string()))?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidSyntax(s.to_string()));
        }

        match digits.parse::<u64>() {
            Ok(value) if value > 0 => Ok(RsId(value)),
            _ => Err(ParseError::InvalidSyntax(s.to_string())),
        }
    }
}

impl Display for RsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rs{}", self.0)
    }
}

///
/// A normalized genomic variant: chromosome, 1-based position, alleles and build.
///
/// Construct it through [`VariantRecord::new`] or by parsing; both guarantee a
/// positive position, alleles over `ACGT` and at least one non-empty allele.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantRecord {
    pub chromosome: String,
    pub position: u64,
    pub ref_allele: String,
    pub alt_allele: String,
    pub genome_build: GenomeBuild,
}

impl VariantRecord {
    pub fn new(
        chromosome: &str,
        position: u64,
        ref_allele: &str,
        alt_allele: &str,
        genome_build: GenomeBuild,
    ) -> Result<Self, ParseError> {
        let chromosome = normalize_chromosome(chromosome)
            .ok_or_else(|| ParseError::UnrecognizedFormat(chromosome.to_string()))?;

        if position == 0 {
            return Err(ParseError::MalformedPosition(position.to_string()));
        }

        let ref_allele = normalize_allele(ref_allele)?;
        let alt_allele = normalize_allele(alt_allele)?;
        if ref_allele.is_empty() && alt_allele.is_empty() {
            return Err(ParseError::EmptyAlleles);
        }

        Ok(VariantRecord {
            chromosome,
            position,
            ref_allele,
            alt_allele,
            genome_build,
        })
    }

    pub fn is_deletion(&self) -> bool {
        self.alt_allele.is_empty()
    }

    ///
    /// Render in the pre-normalized CSV shape, `6,160585140,T,G,hg38`.
    ///
    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.chromosome, self.position, self.ref_allele, self.alt_allele, self.genome_build
        )
    }

    ///
    /// Render in positional notation, `chr6:160585140-T>G`.
    ///
    pub fn to_positional(&self) -> String {
        format!(
            "chr{}:{}-{}>{}",
            self.chromosome, self.position, self.ref_allele, self.alt_allele
        )
    }
}

impl Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_positional(), self.genome_build)
    }
}

///
/// One reference/alternate pairing reported for an rsID.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlleleCandidate {
    pub chromosome: String,
    pub position: u64,
    pub ref_allele: String,
    pub alt_allele: String,
}

impl AlleleCandidate {
    pub fn into_record(self, genome_build: GenomeBuild) -> Result<VariantRecord, ParseError> {
        VariantRecord::new(
            &self.chromosome,
            self.position,
            &self.ref_allele,
            &self.alt_allele,
            genome_build,
        )
    }
}

impl Display for AlleleCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chr{}:{}-{}>{}",
            self.chromosome, self.position, self.ref_allele, self.alt_allele
        )
    }
}

/// Strip an optional `chr` prefix and upper-case; `None` if nothing is left
/// or the name holds anything besides letters and digits.
pub(crate) fn normalize_chromosome(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let name = match trimmed.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("chr") => &trimmed[3..],
        _ => trimmed,
    };
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(name.to_ascii_uppercase())
}

/// `-` and `.` stand for an empty allele.
pub(crate) fn normalize_allele(raw: &str) -> Result<String, ParseError> {
    let trimmed = raw.trim();
    if trimmed == "-" || trimmed == "." {
        return Ok(String::new());
    }
    let upper = trimmed.to_ascii_uppercase();
    if upper.chars().all(|c| matches!(c, 'A' | 'C' | 'G' | 'T')) {
        Ok(upper)
    } else {
        Err(ParseError::InvalidAllele(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("hg38", GenomeBuild::Hg38)]
    #[case("GRCh38", GenomeBuild::Hg38)]
    #[case("HG19", GenomeBuild::Hg19)]
    #[case("grch37", GenomeBuild::Hg19)]
    fn test_genome_build_from_str(#[case] raw: &str, #[case] expected: GenomeBuild) {
        assert_eq!(raw.parse::<GenomeBuild>().unwrap(), expected);
    }

    #[rstest]
    fn test_unknown_genome_build() {
        assert_eq!(
            "hg18".parse::<GenomeBuild>(),
            Err(ParseError::UnknownGenomeBuild("hg18".to_string()))
        );
    }

    #[rstest]
    #[case("rs1234", 1234)]
    #[case("RS7", 7)]
    #[case(" rs121913529 ", 121913529)]
    fn test_rsid_valid(#[case] raw: &str, #[case] value: u64) {
        assert_eq!(raw.parse::<RsId>().unwrap().value(), value);
    }

    #[rstest]
    #[case("rs0")]
    #[case("rs")]
    #[case("rs12a")]
    #[case("1234")]
    #[case("rs-5")]
    #[case("rs99999999999999999999999")]
    fn test_rsid_invalid(#[case] raw: &str) {
        assert!(matches!(raw.parse::<RsId>(), Err(ParseError::InvalidSyntax(_))));
    }

    #[rstest]
    fn test_record_normalizes_fields() {
        let record = VariantRecord::new("chrx", 100, "t", "g", GenomeBuild::Hg19).unwrap();
        assert_eq!(record.chromosome, "X");
        assert_eq!(record.ref_allele, "T");
        assert_eq!(record.alt_allele, "G");
        assert_eq!(record.to_positional(), "chrX:100-T>G");
        assert_eq!(record.to_csv(), "X,100,T,G,hg19");
    }

    #[rstest]
    fn test_record_rejects_empty_alleles() {
        assert_eq!(
            VariantRecord::new("6", 1, "", "-", GenomeBuild::Hg38),
            Err(ParseError::EmptyAlleles)
        );
    }

    #[rstest]
    fn test_record_rejects_zero_position() {
        assert!(matches!(
            VariantRecord::new("6", 0, "A", "G", GenomeBuild::Hg38),
            Err(ParseError::MalformedPosition(_))
        ));
    }

    #[rstest]
    fn test_record_rejects_non_acgt() {
        assert!(matches!(
            VariantRecord::new("6", 10, "N", "G", GenomeBuild::Hg38),
            Err(ParseError::InvalidAllele(_))
        ));
    }

    #[rstest]
    fn test_candidate_into_record() {
        let candidate = AlleleCandidate {
            chromosome: "6".to_string(),
            position: 160585140,
            ref_allele: "T".to_string(),
            alt_allele: "G".to_string(),
        };
        let record = candidate.into_record(GenomeBuild::default()).unwrap();
        assert_eq!(record.genome_build, GenomeBuild::Hg38);
        assert_eq!(record.to_csv(), "6,160585140,T,G,hg38");
    }
}
