//! rsID resolution and allele disambiguation.
//!
//! An rsID may map to several reference/alternate pairings. A single pairing is
//! accepted as is; several are handed back as a [`CandidateSet`] and only turn
//! into a [`VariantRecord`] once the caller picks one explicitly.

use std::fmt::{self, Display};

use log::debug;

use crate::errors::{ResolveError, SelectionError, UpstreamError};
use crate::models::{AlleleCandidate, GenomeBuild, RsId, VariantRecord};

/// Source of allele pairings for an rsID.
pub trait RsidLookup {
    fn lookup(&self, rsid: &RsId) -> Result<Vec<AlleleCandidate>, UpstreamError>;
}

///
/// Resolve an rsID to its allele candidates.
///
/// # Arguments
/// - rsid: the rsID text, e.g. `rs1234`
/// - lookup: the resolution service
///
/// # Returns
/// - a non-empty list of distinct candidates, in the order the service reported them
///
pub fn resolve(rsid: &str, lookup: &dyn RsidLookup) -> Result<Vec<AlleleCandidate>, ResolveError> {
    let parsed: RsId = rsid
        .parse()
        .map_err(|_| ResolveError::InvalidSyntax(rsid.to_string()))?;
    resolve_rsid(&parsed, lookup)
}

pub fn resolve_rsid(
    rsid: &RsId,
    lookup: &dyn RsidLookup,
) -> Result<Vec<AlleleCandidate>, ResolveError> {
    let reported = lookup.lookup(rsid)?;
    let total = reported.len();

    let mut candidates: Vec<AlleleCandidate> = Vec::with_capacity(total);
    for candidate in reported {
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    debug!(
        "{} resolved to {} candidate(s) ({} reported)",
        rsid,
        candidates.len(),
        total
    );

    if candidates.is_empty() {
        return Err(ResolveError::NotFound(rsid.to_string()));
    }
    Ok(candidates)
}

/// Result of turning candidates into a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(VariantRecord),
    Ambiguous(CandidateSet),
}

impl Resolution {
    ///
    /// Accept a lone candidate with the default genome build, or hold several
    /// back for an explicit choice.
    ///
    pub fn from_candidates(
        rsid: RsId,
        mut candidates: Vec<AlleleCandidate>,
    ) -> Result<Resolution, ResolveError> {
        match candidates.len() {
            0 => Err(ResolveError::NotFound(rsid.to_string())),
            1 => {
                let candidate = candidates.remove(0);
                candidate
                    .into_record(GenomeBuild::default())
                    .map(Resolution::Resolved)
                    .map_err(|_| ResolveError::NotFound(rsid.to_string()))
            }
            _ => Ok(Resolution::Ambiguous(CandidateSet { rsid, candidates })),
        }
    }
}

/// Several allele pairings for one rsID awaiting a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    rsid: RsId,
    candidates: Vec<AlleleCandidate>,
}

impl CandidateSet {
    pub fn rsid(&self) -> &RsId {
        &self.rsid
    }

    pub fn candidates(&self) -> &[AlleleCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    ///
    /// Pick one candidate by its 1-based number, as shown to the user.
    ///
    pub fn select(&self, choice: usize) -> Result<VariantRecord, SelectionError> {
        let out_of_range = SelectionError::OutOfRange {
            choice,
            available: self.candidates.len(),
        };
        if choice == 0 {
            return Err(out_of_range);
        }
        let candidate = self.candidates.get(choice - 1).ok_or(out_of_range.clone())?;
        candidate
            .clone()
            .into_record(GenomeBuild::default())
            .map_err(|_| out_of_range)
    }
}

impl Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has {} possible allele pairings",
            self.rsid,
            self.candidates.len()
        )
    }
}

///
/// Resolve an rsID all the way to a [`Resolution`].
///
pub fn resolve_to_record(
    rsid: &RsId,
    lookup: &dyn RsidLookup,
) -> Result<Resolution, ResolveError> {
    let candidates = resolve_rsid(rsid, lookup)?;
    Resolution::from_candidates(*rsid, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    struct FixedLookup(Result<Vec<AlleleCandidate>, UpstreamError>);

    impl RsidLookup for FixedLookup {
        fn lookup(&self, _rsid: &RsId) -> Result<Vec<AlleleCandidate>, UpstreamError> {
            self.0.clone()
        }
    }

    fn candidate(r: &str, a: &str) -> AlleleCandidate {
        AlleleCandidate {
            chromosome: "6".to_string(),
            position: 160585140,
            ref_allele: r.to_string(),
            alt_allele: a.to_string(),
        }
    }

    #[fixture]
    fn rsid() -> RsId {
        "rs1234".parse().unwrap()
    }

    #[rstest]
    fn test_single_candidate_resolves(rsid: RsId) {
        let lookup = FixedLookup(Ok(vec![candidate("T", "G")]));
        let resolution = resolve_to_record(&rsid, &lookup).unwrap();
        assert_eq!(
            resolution,
            Resolution::Resolved(
                VariantRecord::new("6", 160585140, "T", "G", GenomeBuild::Hg38).unwrap()
            )
        );
    }

    #[rstest]
    fn test_two_candidates_need_a_choice(rsid: RsId) {
        let lookup = FixedLookup(Ok(vec![candidate("T", "G"), candidate("T", "C")]));

        let candidates = resolve("rs1234", &lookup).unwrap();
        assert_eq!(candidates.len(), 2);

        let Resolution::Ambiguous(set) = resolve_to_record(&rsid, &lookup).unwrap() else {
            panic!("two candidates must not resolve on their own");
        };
        assert_eq!(set.len(), 2);
        assert_eq!(set.select(2).unwrap().alt_allele, "C");
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    fn test_selection_out_of_range(#[case] choice: usize) {
        let set = CandidateSet {
            rsid: "rs1".parse().unwrap(),
            candidates: vec![candidate("T", "G"), candidate("T", "C")],
        };
        assert_eq!(
            set.select(choice),
            Err(SelectionError::OutOfRange { choice, available: 2 })
        );
    }

    #[rstest]
    fn test_duplicates_collapse(rsid: RsId) {
        let lookup = FixedLookup(Ok(vec![
            candidate("T", "G"),
            candidate("T", "G"),
        ]));
        assert!(matches!(
            resolve_to_record(&rsid, &lookup).unwrap(),
            Resolution::Resolved(_)
        ));
    }

    #[rstest]
    fn test_not_found() {
        let lookup = FixedLookup(Ok(vec![]));
        assert_eq!(
            resolve("rs1234", &lookup),
            Err(ResolveError::NotFound("rs1234".to_string()))
        );
    }

    #[rstest]
    #[case("rs0")]
    #[case("rs")]
    #[case("chr6:1-A>G")]
    fn test_invalid_syntax(#[case] input: &str) {
        let lookup = FixedLookup(Ok(vec![candidate("T", "G")]));
        assert_eq!(
            resolve(input, &lookup),
            Err(ResolveError::InvalidSyntax(input.to_string()))
        );
    }

    #[rstest]
    fn test_upstream_failure_propagates() {
        let error = UpstreamError::unavailable("Ensembl", "HTTP 503");
        let lookup = FixedLookup(Err(error.clone()));
        assert_eq!(resolve("rs1234", &lookup), Err(ResolveError::Upstream(error)));
    }
}
