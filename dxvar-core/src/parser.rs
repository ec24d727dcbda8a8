//! Variant string normalization.
//!
//! Three input shapes are recognized, tried in this order:
//!
//! 1. positional notation, `chr6:160585140-T>G` (the `chr` prefix is optional,
//!    an empty alternate allele is a deletion);
//! 2. pre-normalized CSV, `6,160585140,T,G,hg38` (the build may be left out);
//! 3. an rsID, `rs1234`.
//!
//! When the text carries both an rsID and a positional or CSV fragment, a
//! complete fragment wins and the rsID is dropped. A fragment that is
//! incomplete or invalid gives way to the rsID, which is then returned for
//! resolution instead of failing the parse.

use std::str::FromStr;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ParseError;
use crate::models::{GenomeBuild, RsId, VariantRecord};

static RSID_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\brs\d+\b").unwrap());

/// Input that is nothing but an rsID, valid or not.
static RSID_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^rs\d*$").unwrap());

static POSITIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^|[^A-Za-z0-9])(?:chr)?(?P<chrom>[0-9]{1,2}|X|Y|MT|M)\s*:\s*(?P<pos>[^\s:>-]*)\s*-\s*(?P<ref>-|[A-Za-z]*)\s*>(?:(?P<alt>-|[A-Za-z]+)|\s+(?P<spaced_alt>-|[ACGTacgt]+)|)(?:$|[^A-Za-z0-9])",
    )
    .unwrap()
});

static CHROMOSOME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:chr)?(?:[0-9]{1,2}|X|Y|MT|M)$").unwrap());

static BUILD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:hg19|hg38|grch37|grch38)\b").unwrap());

/// Outcome of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedVariant {
    /// A complete variant, ready for classification.
    Record(VariantRecord),
    /// An rsID that still has to be resolved to alleles.
    Rsid(RsId),
}

///
/// Parse free text into a [`VariantRecord`] or an [`RsId`].
///
/// # Arguments
/// - input: positional notation, CSV or rsID, optionally surrounded by other text
///
/// # Returns
/// - the parsed variant, or the typed reason the input was rejected
///
pub fn parse(input: &str) -> Result<ParsedVariant, ParseError> {
    let text = input.trim();
    if RSID_ONLY.is_match(text) {
        return RsId::from_str(text).map(ParsedVariant::Rsid);
    }
    let rsid_token = RSID_TOKEN.find(text).map(|m| m.as_str());

    let stripped = RSID_TOKEN.replace_all(text, " ");
    let remainder = stripped.trim_matches(|c: char| c.is_whitespace() || c == ',' || c == ';');

    let fragment = parse_positional(remainder).or_else(|| parse_csv(remainder));

    match (fragment, rsid_token) {
        (Some(Ok(record)), dropped) => {
            if let Some(token) = dropped {
                debug!("Complete variant found next to {}, ignoring the rsID", token);
            }
            Ok(ParsedVariant::Record(record))
        }
        (Some(Err(e)), Some(token)) => {
            debug!("Variant fragment rejected ({}), falling back to {}", e, token);
            RsId::from_str(token).map(ParsedVariant::Rsid)
        }
        (None, Some(token)) => RsId::from_str(token).map(ParsedVariant::Rsid),
        (Some(Err(e)), None) => Err(e),
        (None, None) => Err(ParseError::UnrecognizedFormat(text.to_string())),
    }
}

/// Shape 1. `None` when there is no positional fragment at all.
fn parse_positional(text: &str) -> Option<Result<VariantRecord, ParseError>> {
    let caps = POSITIONAL.captures(text)?;

    let build = match BUILD_TOKEN.find(text) {
        Some(m) => match m.as_str().parse::<GenomeBuild>() {
            Ok(build) => build,
            Err(e) => return Some(Err(e)),
        },
        None => GenomeBuild::default(),
    };

    Some(parse_position(&caps["pos"]).and_then(|position| {
        // an allele after a space has to be plain bases, otherwise the next
        // word would be read as the alternate of a deletion
        let alt = caps
            .name("alt")
            .or_else(|| caps.name("spaced_alt"))
            .map_or("", |m| m.as_str());
        VariantRecord::new(&caps["chrom"], position, &caps["ref"], alt, build)
    }))
}

/// Shape 2. Only considered when the first field names a chromosome.
fn parse_csv(text: &str) -> Option<Result<VariantRecord, ParseError>> {
    if !text.contains(',') {
        return None;
    }

    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if !(4..=5).contains(&fields.len()) || !CHROMOSOME.is_match(fields[0]) {
        return None;
    }

    let build = match fields.get(4) {
        Some(raw) if !raw.is_empty() => match raw.parse::<GenomeBuild>() {
            Ok(build) => build,
            Err(e) => return Some(Err(e)),
        },
        _ => GenomeBuild::default(),
    };

    Some(parse_position(fields[1]).and_then(|position| {
        VariantRecord::new(fields[0], position, fields[2], fields[3], build)
    }))
}

fn parse_position(raw: &str) -> Result<u64, ParseError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::MalformedPosition(raw.to_string()));
    }
    match raw.parse::<u64>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(ParseError::MalformedPosition(raw.to_string())),
    }
}

impl FromStr for VariantRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse(s)? {
            ParsedVariant::Record(record) => Ok(record),
            ParsedVariant::Rsid(rsid) => Err(ParseError::UnresolvedRsid(rsid.to_string())),
        }
    }
}
