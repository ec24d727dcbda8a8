use tabled::builder::Builder;
use tabled::settings::object::Cell;
use tabled::settings::{Color, Style};
use tabled::{Table, Tabled};

use dxvar_core::disambiguate::CandidateSet;
use dxvar_core::models::{AlleleCandidate, DiseaseAssociation};
use dxvar_core::session::{Outcome, ServiceResult, VariantReport};
use dxvar_core::severity::Category;

#[derive(Tabled)]
struct CandidatePrint {
    #[tabled(rename = "#")]
    number: usize,
    chromosome: String,
    position: u64,
    #[tabled(rename = "ref")]
    ref_allele: String,
    #[tabled(rename = "alt")]
    alt_allele: String,
}

#[derive(Tabled)]
struct DiseasePrint {
    gene: String,
    #[tabled(rename = "HGNC ID")]
    hgnc_id: String,
    disease: String,
    #[tabled(rename = "MOI")]
    inheritance: String,
    validity: String,
}

fn severity_color(category: Category) -> Option<Color> {
    match category {
        Category::Severe => Some(Color::FG_RED),
        Category::Uncertain => Some(Color::FG_YELLOW),
        Category::Mild => Some(Color::FG_BLUE),
        Category::Benign => Some(Color::FG_GREEN),
        Category::Unknown => None,
    }
}

fn show_allele(allele: &str) -> String {
    if allele.is_empty() {
        "-".to_string()
    } else {
        allele.to_string()
    }
}

pub fn candidate_table(candidates: &[AlleleCandidate]) -> Table {
    let rows = candidates.iter().enumerate().map(|(i, c)| CandidatePrint {
        number: i + 1,
        chromosome: c.chromosome.clone(),
        position: c.position,
        ref_allele: show_allele(&c.ref_allele),
        alt_allele: show_allele(&c.alt_allele),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table
}

pub fn print_candidate_set(set: &CandidateSet) {
    println!(
        "{} maps to {} allele pairings, choose one by number:",
        set.rsid(),
        set.len()
    );
    println!("{}", candidate_table(set.candidates()));
}

/// One column per service, the label row colored by severity.
pub fn classification_table(results: &[&ServiceResult]) -> Table {
    let mut builder = Builder::default();

    let mut header = vec!["Field".to_string()];
    header.extend(results.iter().map(|r| match &r.error {
        Some(_) => format!("{} (unavailable)", r.service),
        None => r.service.clone(),
    }));
    builder.push_record(header);

    let columns: Vec<Vec<(&'static str, String)>> =
        results.iter().map(|r| r.classification.fields()).collect();
    if let Some(first) = columns.first() {
        for (i, (field, _)) in first.iter().enumerate() {
            let mut row = vec![field.to_string()];
            row.extend(columns.iter().map(|c| c[i].1.clone()));
            builder.push_record(row);
        }
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    for (column, result) in results.iter().enumerate() {
        if let Some(color) = severity_color(result.classification.category()) {
            table.modify(Cell::new(1, column + 1), color);
        }
    }
    table
}

pub fn disease_table(diseases: &[DiseaseAssociation]) -> Table {
    let rows = diseases.iter().map(|d| DiseasePrint {
        gene: d.gene_symbol.clone(),
        hgnc_id: d.hgnc_id.clone(),
        disease: d.disease_label.clone(),
        inheritance: d.inheritance.clone(),
        validity: d.classification.clone(),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table
}

pub fn print_report(report: &VariantReport) {
    println!(
        "Variant {} ({})",
        report.record.to_positional(),
        report.record.to_csv()
    );
    println!();

    let mut results = vec![&report.primary];
    results.extend(report.alternative.as_ref());
    println!("{}", classification_table(&results));

    for result in &results {
        if let Some(error) = &result.error {
            println!("{}: {}", result.service, error);
        }
    }
    if report.discrepancy() {
        println!("Note: the classification services disagree on this variant.");
    }
    println!();

    if report.diseases.is_empty() {
        println!("No gene-disease associations found.");
    } else {
        println!("Gene-disease associations:");
        println!("{}", disease_table(&report.diseases));
    }
    println!();
    println!("{}", report.explanation);
}

pub fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Empty => {}
        Outcome::Report(report) => print_report(report),
        Outcome::NeedsSelection(set) => print_candidate_set(set),
        Outcome::Answer(answer) => println!("{}", answer),
        Outcome::Rejected(reason) => println!("{}", reason),
    }
}
