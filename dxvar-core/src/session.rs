//! Interactive interpretation session.
//!
//! A [`Session`] owns everything that lives across turns for one user: the
//! conversation history, the last analyzed input, a pending allele choice and
//! the current report. It is created per user and cleared with
//! [`Session::reset`]. Each call to [`Session::submit`] runs one sequential
//! chain of external calls and always comes back with an [`Outcome`]; upstream
//! failures degrade to placeholders instead of ending the session.

use log::{debug, warn};

use crate::disambiguate::{CandidateSet, Resolution, resolve_to_record};
use crate::errors::{ParseError, SelectionError};
use crate::gene_disease::GeneDiseaseTable;
use crate::models::{Classification, DiseaseAssociation, RsId, VariantRecord};
use crate::parser::{ParsedVariant, parse};
use crate::services::{Assistant, ChatMessage, RsidLookup, VariantClassifier};

pub const SYSTEM_PROMPT: &str = "You are a genetics assistant that helps clinicians \
and researchers interpret human genetic variants. Explain ACMG classifications, \
variant effects and gene-disease associations in plain language, say when evidence \
is limited or when classification sources disagree, and do not give medical advice.";

pub const EXTRACTION_PROMPT: &str = "Extract the single human genetic variant described \
in the user's message. Reply with one line and nothing else: either \
CHROMOSOME,POSITION,REF,ALT,BUILD (for example 6,160585140,T,G,hg38; leave ALT empty \
for a deletion; use hg38 when no build is mentioned) or the rsID (for example rs1234). \
If the message describes no variant, reply with NONE.";

const NO_VARIANT: &str = "NONE";

const EXPLANATION_UNAVAILABLE: &str = "Explanation not available";

/// Turns kept in the history sent to the assistant; older exchanges are
/// dropped in user/assistant pairs. Must be even.
const MAX_HISTORY_MESSAGES: usize = 20;

/// The collaborators one session turn may call.
pub struct Services<'a> {
    pub primary: &'a dyn VariantClassifier,
    pub alternative: Option<&'a dyn VariantClassifier>,
    pub rsids: &'a dyn RsidLookup,
    pub assistant: Option<&'a dyn Assistant>,
    pub diseases: &'a GeneDiseaseTable,
}

/// What one classification service said about a variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResult {
    pub service: String,
    pub classification: Classification,
    /// Set when the service failed and `classification` is a placeholder.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantReport {
    pub record: VariantRecord,
    pub primary: ServiceResult,
    pub alternative: Option<ServiceResult>,
    pub diseases: Vec<DiseaseAssociation>,
    pub explanation: String,
}

impl VariantReport {
    ///
    /// True when both services returned a label and the labels differ.
    /// The disagreement is only reported, never reconciled.
    ///
    pub fn discrepancy(&self) -> bool {
        let Some(alternative) = &self.alternative else {
            return false;
        };
        match (
            &self.primary.classification.acmg_classification,
            &alternative.classification.acmg_classification,
        ) {
            (Some(a), Some(b)) => normalize_label(a) != normalize_label(b),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing was entered.
    Empty,
    Report(VariantReport),
    /// The rsID maps to several allele pairings; reply with a number to pick one.
    NeedsSelection(CandidateSet),
    /// Free-text answer from the assistant.
    Answer(String),
    /// The input could not be used; the message says why.
    Rejected(String),
}

#[derive(Debug, Default)]
pub struct Session {
    history: Vec<ChatMessage>,
    last_input: Option<String>,
    pending: Option<CandidateSet>,
    current: Option<VariantReport>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.last_input = None;
        self.pending = None;
        self.current = None;
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn pending(&self) -> Option<&CandidateSet> {
        self.pending.as_ref()
    }

    pub fn current(&self) -> Option<&VariantReport> {
        self.current.as_ref()
    }

    ///
    /// Handle one line of user input.
    ///
    /// # Arguments
    /// - input: variant notation, rsID, a candidate number, or a question
    /// - services: the collaborators to call
    ///
    /// # Returns
    /// - the outcome to render; errors are folded into [`Outcome::Rejected`]
    ///
    pub fn submit(&mut self, input: &str, services: &Services) -> Outcome {
        let text = input.trim();
        if text.is_empty() {
            return Outcome::Empty;
        }

        if self.pending.is_some() {
            if let Ok(choice) = text.parse::<usize>() {
                return self.select(choice, services);
            }
            debug!("New input replaces the pending allele choice");
            self.pending = None;
        }

        if self.last_input.as_deref() == Some(text) {
            if let Some(report) = &self.current {
                debug!("Input unchanged, reusing the current report");
                return Outcome::Report(report.clone());
            }
        }

        match parse(text) {
            Ok(ParsedVariant::Record(record)) => self.analyze_input(text, record, services),
            Ok(ParsedVariant::Rsid(rsid)) => self.resolve_input(text, rsid, services),
            Err(ParseError::UnrecognizedFormat(_)) => {
                if self.current.is_some() {
                    self.ask(text, services)
                } else {
                    self.extract(text, services)
                }
            }
            Err(e) => Outcome::Rejected(e.to_string()),
        }
    }

    ///
    /// Pick one of the pending allele candidates by its 1-based number.
    ///
    pub fn select(&mut self, choice: usize, services: &Services) -> Outcome {
        let Some(pending) = &self.pending else {
            return Outcome::Rejected(SelectionError::NothingPending.to_string());
        };
        match pending.select(choice) {
            Ok(record) => {
                self.pending = None;
                self.last_input = None;
                self.analyze(record, services)
            }
            Err(e) => Outcome::Rejected(e.to_string()),
        }
    }

    ///
    /// Classify a variant, look up its diseases and have the assistant explain it.
    ///
    pub fn analyze(&mut self, record: VariantRecord, services: &Services) -> Outcome {
        let primary = run_classifier(services.primary, &record);
        let alternative = services
            .alternative
            .map(|classifier| run_classifier(classifier, &record));

        let diseases = lookup_diseases(services.diseases, &primary, alternative.as_ref());

        let prompt = explanation_prompt(&record, &primary, alternative.as_ref(), &diseases);
        let explanation = match self.converse(prompt, services) {
            Ok(text) => text,
            Err(reason) => format!("{} ({})", EXPLANATION_UNAVAILABLE, reason),
        };

        let report = VariantReport {
            record,
            primary,
            alternative,
            diseases,
            explanation,
        };
        self.current = Some(report.clone());
        Outcome::Report(report)
    }

    fn analyze_input(&mut self, text: &str, record: VariantRecord, services: &Services) -> Outcome {
        let outcome = self.analyze(record, services);
        self.last_input = Some(text.to_string());
        outcome
    }

    fn resolve_input(&mut self, text: &str, rsid: RsId, services: &Services) -> Outcome {
        match resolve_to_record(&rsid, services.rsids) {
            Ok(Resolution::Resolved(record)) => {
                debug!("{} resolved to {}", rsid, record);
                self.analyze_input(text, record, services)
            }
            Ok(Resolution::Ambiguous(set)) => {
                self.pending = Some(set.clone());
                Outcome::NeedsSelection(set)
            }
            Err(e) => Outcome::Rejected(format!("Could not resolve {}: {}", rsid, e)),
        }
    }

    /// Free-text follow-up question answered with the running history.
    fn ask(&mut self, question: &str, services: &Services) -> Outcome {
        match self.converse(question.to_string(), services) {
            Ok(answer) => Outcome::Answer(answer),
            Err(reason) => Outcome::Rejected(reason),
        }
    }

    /// Have the assistant pull a variant out of free text; its reply still has
    /// to pass the parser.
    fn extract(&mut self, text: &str, services: &Services) -> Outcome {
        let Some(assistant) = services.assistant else {
            return Outcome::Rejected(
                ParseError::UnrecognizedFormat(text.to_string()).to_string(),
            );
        };

        let messages = [
            ChatMessage::system(EXTRACTION_PROMPT),
            ChatMessage::user(text),
        ];
        let reply = match assistant.complete(&messages) {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Variant extraction failed: {}", e);
                return Outcome::Rejected(format!(
                    "{} and the assistant is unavailable: {}",
                    ParseError::UnrecognizedFormat(text.to_string()),
                    e
                ));
            }
        };

        let suggestion = reply.trim().trim_matches('`').trim();
        debug!("Assistant extracted {:?} from {:?}", suggestion, text);
        if suggestion.eq_ignore_ascii_case(NO_VARIANT) {
            return self.ask(text, services);
        }

        match parse(suggestion) {
            Ok(ParsedVariant::Record(record)) => self.analyze_input(text, record, services),
            Ok(ParsedVariant::Rsid(rsid)) => self.resolve_input(text, rsid, services),
            Err(e) => Outcome::Rejected(format!(
                "The assistant read this as `{}`, which is not a usable variant: {}",
                suggestion, e
            )),
        }
    }

    /// Append `content` as a user turn, complete with the system instruction
    /// and the most recent history, and record the reply. A failed turn
    /// leaves the history as it was.
    fn converse(&mut self, content: String, services: &Services) -> Result<String, String> {
        let Some(assistant) = services.assistant else {
            return Err("no assistant configured".to_string());
        };

        while self.history.len() >= MAX_HISTORY_MESSAGES {
            self.history.drain(..2);
        }
        self.history.push(ChatMessage::user(content));
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend(self.history.iter().cloned());

        match assistant.complete(&messages) {
            Ok(reply) => {
                self.history.push(ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                warn!("Assistant call failed: {}", e);
                self.history.pop();
                Err(e.to_string())
            }
        }
    }
}

fn run_classifier(classifier: &dyn VariantClassifier, record: &VariantRecord) -> ServiceResult {
    match classifier.classify(record) {
        Ok(classification) => ServiceResult {
            service: classifier.name().to_string(),
            classification,
            error: None,
        },
        Err(e) => {
            warn!("{} failed for {}: {}", classifier.name(), record, e);
            ServiceResult {
                service: classifier.name().to_string(),
                classification: Classification::default(),
                error: Some(e.to_string()),
            }
        }
    }
}

/// Gene keys come from the primary result, falling back to the alternative one.
fn lookup_diseases(
    table: &GeneDiseaseTable,
    primary: &ServiceResult,
    alternative: Option<&ServiceResult>,
) -> Vec<DiseaseAssociation> {
    let fallback = alternative.map(|r| &r.classification);
    let symbol = primary
        .classification
        .gene_symbol
        .as_deref()
        .or_else(|| fallback.and_then(|c| c.gene_symbol.as_deref()));
    let hgnc_id = primary
        .classification
        .hgnc_id
        .as_deref()
        .or_else(|| fallback.and_then(|c| c.hgnc_id.as_deref()));

    table.lookup(symbol, hgnc_id).into_iter().cloned().collect()
}

fn explanation_prompt(
    record: &VariantRecord,
    primary: &ServiceResult,
    alternative: Option<&ServiceResult>,
    diseases: &[DiseaseAssociation],
) -> String {
    let mut prompt = format!(
        "Explain the genetic variant {} ({}).\n",
        record.to_positional(),
        record.to_csv()
    );

    for result in std::iter::once(primary).chain(alternative) {
        prompt.push_str(&format!("\nClassification from {}:\n", result.service));
        for (field, value) in result.classification.fields() {
            prompt.push_str(&format!("- {}: {}\n", field, value));
        }
    }

    if diseases.is_empty() {
        prompt.push_str("\nNo gene-disease associations were found for this gene.\n");
    } else {
        prompt.push_str("\nKnown gene-disease associations:\n");
        for disease in diseases {
            prompt.push_str(&format!(
                "- {} (inheritance: {}, clinical validity: {})\n",
                disease.disease_label, disease.inheritance, disease.classification
            ));
        }
    }

    prompt.push_str(
        "\nSummarize what the classification means, describe the associated diseases, \
         and point out any disagreement between the classification sources.",
    );
    prompt
}

fn normalize_label(label: &str) -> String {
    label.trim().replace(' ', "_").to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::errors::UpstreamError;
    use crate::models::AlleleCandidate;
    use crate::services::Role;

    struct MockClassifier {
        name: &'static str,
        response: Result<Classification, UpstreamError>,
        calls: Cell<usize>,
    }

    impl MockClassifier {
        fn labelled(name: &'static str, label: &str) -> Self {
            MockClassifier {
                name,
                response: Ok(Classification {
                    acmg_classification: Some(label.to_string()),
                    gene_symbol: Some("LPA".to_string()),
                    hgnc_id: Some("HGNC:6667".to_string()),
                    ..Default::default()
                }),
                calls: Cell::new(0),
            }
        }

        fn failing(name: &'static str) -> Self {
            MockClassifier {
                name,
                response: Err(UpstreamError::unavailable(name, "HTTP 503")),
                calls: Cell::new(0),
            }
        }
    }

    impl VariantClassifier for MockClassifier {
        fn name(&self) -> &str {
            self.name
        }

        fn classify(&self, _variant: &VariantRecord) -> Result<Classification, UpstreamError> {
            self.calls.set(self.calls.get() + 1);
            self.response.clone()
        }
    }

    struct MockLookup(Vec<AlleleCandidate>);

    impl RsidLookup for MockLookup {
        fn lookup(&self, _rsid: &RsId) -> Result<Vec<AlleleCandidate>, UpstreamError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct MockAssistant {
        replies: RefCell<VecDeque<Result<String, UpstreamError>>>,
        seen: RefCell<Vec<Vec<ChatMessage>>>,
    }

    impl MockAssistant {
        fn replying(replies: &[&str]) -> Self {
            MockAssistant {
                replies: RefCell::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Assistant for MockAssistant {
        fn complete(&self, messages: &[ChatMessage]) -> Result<String, UpstreamError> {
            self.seen.borrow_mut().push(messages.to_vec());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(UpstreamError::unavailable("Groq", "no reply queued")))
        }
    }

    fn candidate(alt: &str) -> AlleleCandidate {
        AlleleCandidate {
            chromosome: "6".to_string(),
            position: 160585140,
            ref_allele: "T".to_string(),
            alt_allele: alt.to_string(),
        }
    }

    #[fixture]
    fn diseases() -> GeneDiseaseTable {
        let table = "\"GENE SYMBOL\",\"GENE ID (HGNC)\",\"DISEASE LABEL\",\"MOI\",\"CLASSIFICATION\"\n\
                     \"LPA\",\"HGNC:6667\",\"coronary artery disease\",\"AD\",\"Limited\"\n";
        GeneDiseaseTable::from_reader(table.as_bytes()).unwrap()
    }

    fn services<'a>(
        primary: &'a MockClassifier,
        alternative: Option<&'a MockClassifier>,
        rsids: &'a MockLookup,
        assistant: Option<&'a MockAssistant>,
        diseases: &'a GeneDiseaseTable,
    ) -> Services<'a> {
        Services {
            primary,
            alternative: alternative.map(|c| c as &dyn VariantClassifier),
            rsids,
            assistant: assistant.map(|a| a as &dyn Assistant),
            diseases,
        }
    }

    #[rstest]
    fn test_positional_input_produces_report(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Likely_benign");
        let alternative = MockClassifier::labelled("InterVar", "Likely benign");
        let lookup = MockLookup(vec![]);
        let assistant = MockAssistant::replying(&["A benign change in LPA."]);
        let services = services(&primary, Some(&alternative), &lookup, Some(&assistant), &diseases);

        let mut session = Session::new();
        let Outcome::Report(report) = session.submit("chr6:160585140-T>G", &services) else {
            panic!("expected a report");
        };

        assert_eq!(report.record.to_csv(), "6,160585140,T,G,hg38");
        assert_eq!(report.primary.service, "GeneBe");
        assert_eq!(report.primary.error, None);
        assert_eq!(report.diseases.len(), 1);
        assert_eq!(report.explanation, "A benign change in LPA.");
        assert!(!report.discrepancy());

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1], ChatMessage::assistant("A benign change in LPA."));
        assert!(history[0].content.contains("coronary artery disease"));

        let seen = assistant.seen.borrow();
        assert_eq!(seen[0][0].role, Role::System);
    }

    #[rstest]
    fn test_rsid_with_two_alleles_waits_for_choice(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Benign");
        let lookup = MockLookup(vec![candidate("G"), candidate("C")]);
        let assistant = MockAssistant::replying(&["Explained."]);
        let services = services(&primary, None, &lookup, Some(&assistant), &diseases);

        let mut session = Session::new();
        let Outcome::NeedsSelection(set) = session.submit("rs1234", &services) else {
            panic!("expected a choice");
        };
        assert_eq!(set.len(), 2);
        assert_eq!(primary.calls.get(), 0);
        assert!(session.pending().is_some());

        assert!(matches!(
            session.submit("5", &services),
            Outcome::Rejected(_)
        ));
        assert!(session.pending().is_some());

        let Outcome::Report(report) = session.submit("2", &services) else {
            panic!("expected a report after choosing");
        };
        assert_eq!(report.record.alt_allele, "C");
        assert!(session.pending().is_none());
    }

    #[rstest]
    fn test_single_allele_rsid_is_analyzed(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Benign");
        let lookup = MockLookup(vec![candidate("G")]);
        let services = services(&primary, None, &lookup, None, &diseases);

        let mut session = Session::new();
        let outcome = session.submit("rs1234", &services);
        assert!(matches!(outcome, Outcome::Report(_)));
        assert_eq!(primary.calls.get(), 1);
    }

    #[rstest]
    fn test_unknown_rsid_is_rejected(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Benign");
        let lookup = MockLookup(vec![]);
        let services = services(&primary, None, &lookup, None, &diseases);

        let mut session = Session::new();
        let Outcome::Rejected(message) = session.submit("rs99", &services) else {
            panic!("expected a rejection");
        };
        assert!(message.contains("rs99"));
    }

    #[rstest]
    fn test_invalid_rsid_is_rejected(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Benign");
        let lookup = MockLookup(vec![candidate("G")]);
        let services = services(&primary, None, &lookup, None, &diseases);

        let mut session = Session::new();
        assert_eq!(
            session.submit("rs0", &services),
            Outcome::Rejected(ParseError::InvalidSyntax("rs0".to_string()).to_string())
        );
    }

    #[rstest]
    fn test_upstream_failures_degrade_to_placeholders(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::failing("GeneBe");
        let lookup = MockLookup(vec![]);
        let assistant = MockAssistant::default();
        let services = services(&primary, None, &lookup, Some(&assistant), &diseases);

        let mut session = Session::new();
        let Outcome::Report(report) = session.submit("6,160585140,T,G,hg38", &services) else {
            panic!("failures must still produce a report");
        };

        assert_eq!(report.primary.classification, Classification::default());
        assert!(report.primary.error.is_some());
        assert!(report.diseases.is_empty());
        assert!(report.explanation.starts_with(EXPLANATION_UNAVAILABLE));
        assert!(session.history().is_empty());
    }

    #[rstest]
    fn test_follow_up_uses_history(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Pathogenic");
        let lookup = MockLookup(vec![]);
        let assistant = MockAssistant::replying(&["Explained.", "It is autosomal dominant."]);
        let services = services(&primary, None, &lookup, Some(&assistant), &diseases);

        let mut session = Session::new();
        session.submit("chr6:160585140-T>G", &services);
        let outcome = session.submit("How is it inherited?", &services);

        assert_eq!(outcome, Outcome::Answer("It is autosomal dominant.".to_string()));
        let seen = assistant.seen.borrow();
        assert_eq!(seen[1].len(), 4);
        assert_eq!(seen[1][3], ChatMessage::user("How is it inherited?"));
        assert_eq!(session.history().len(), 4);
    }

    #[rstest]
    fn test_rs_word_in_follow_up_is_a_question(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Pathogenic");
        let lookup = MockLookup(vec![]);
        let assistant = MockAssistant::replying(&["Explained.", "Yes, rs41272114 too."]);
        let services = services(&primary, None, &lookup, Some(&assistant), &diseases);

        let mut session = Session::new();
        session.submit("chr6:160585140-T>G", &services);
        let outcome = session.submit("Are there other rs IDs at this position?", &services);

        assert_eq!(outcome, Outcome::Answer("Yes, rs41272114 too.".to_string()));
        assert_eq!(primary.calls.get(), 1);
    }

    #[rstest]
    fn test_history_is_capped(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Pathogenic");
        let lookup = MockLookup(vec![]);
        let replies: Vec<String> = (0..16).map(|i| format!("Reply {}", i)).collect();
        let replies: Vec<&str> = replies.iter().map(String::as_str).collect();
        let assistant = MockAssistant::replying(&replies);
        let services = services(&primary, None, &lookup, Some(&assistant), &diseases);

        let mut session = Session::new();
        session.submit("chr6:160585140-T>G", &services);
        for i in 0..15 {
            let outcome = session.submit(&format!("Question number {}?", i), &services);
            assert_eq!(outcome, Outcome::Answer(format!("Reply {}", i + 1)));
        }

        let history = session.history();
        assert_eq!(history.len(), MAX_HISTORY_MESSAGES);
        assert_eq!(history[0].role, Role::User);
        assert!(!history[0].content.starts_with("Explain the genetic variant"));
        assert_eq!(history[MAX_HISTORY_MESSAGES - 1], ChatMessage::assistant("Reply 15"));

        let seen = assistant.seen.borrow();
        let last = seen.last().unwrap();
        assert_eq!(last.len(), MAX_HISTORY_MESSAGES);
        assert_eq!(last[0], ChatMessage::system(SYSTEM_PROMPT));
    }

    #[rstest]
    fn test_free_text_goes_through_extraction(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Benign");
        let lookup = MockLookup(vec![]);
        let assistant = MockAssistant::replying(&["`6,160585140,T,G,hg38`", "Explained."]);
        let services = services(&primary, None, &lookup, Some(&assistant), &diseases);

        let mut session = Session::new();
        let outcome = session.submit(
            "the T to G change at position 160585140 on chromosome 6",
            &services,
        );

        let Outcome::Report(report) = outcome else {
            panic!("expected a report");
        };
        assert_eq!(report.record.position, 160585140);
        assert_eq!(assistant.seen.borrow()[0][0].content, EXTRACTION_PROMPT);
    }

    #[rstest]
    fn test_extraction_without_variant_becomes_question(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Benign");
        let lookup = MockLookup(vec![]);
        let assistant = MockAssistant::replying(&["NONE", "ACMG is a guideline."]);
        let services = services(&primary, None, &lookup, Some(&assistant), &diseases);

        let mut session = Session::new();
        assert_eq!(
            session.submit("what is ACMG?", &services),
            Outcome::Answer("ACMG is a guideline.".to_string())
        );
        assert_eq!(primary.calls.get(), 0);
    }

    #[rstest]
    fn test_bad_extraction_is_rejected(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Benign");
        let lookup = MockLookup(vec![]);
        let assistant = MockAssistant::replying(&["6,160585140,T,Q,hg38"]);
        let services = services(&primary, None, &lookup, Some(&assistant), &diseases);

        let mut session = Session::new();
        assert!(matches!(
            session.submit("some variant in LPA", &services),
            Outcome::Rejected(_)
        ));
    }

    #[rstest]
    fn test_free_text_without_assistant_is_rejected(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Benign");
        let lookup = MockLookup(vec![]);
        let services = services(&primary, None, &lookup, None, &diseases);

        let mut session = Session::new();
        assert!(matches!(
            session.submit("some variant in LPA", &services),
            Outcome::Rejected(_)
        ));
    }

    #[rstest]
    fn test_repeated_input_reuses_report(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Benign");
        let lookup = MockLookup(vec![]);
        let services = services(&primary, None, &lookup, None, &diseases);

        let mut session = Session::new();
        let first = session.submit("chr6:160585140-T>G", &services);
        let second = session.submit("chr6:160585140-T>G", &services);

        assert_eq!(first, second);
        assert_eq!(primary.calls.get(), 1);
    }

    #[rstest]
    fn test_discrepancy_is_flagged(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Pathogenic");
        let alternative = MockClassifier::labelled("InterVar", "Uncertain significance");
        let lookup = MockLookup(vec![]);
        let services = services(&primary, Some(&alternative), &lookup, None, &diseases);

        let mut session = Session::new();
        let Outcome::Report(report) = session.submit("chr6:160585140-T>G", &services) else {
            panic!("expected a report");
        };
        assert!(report.discrepancy());
    }

    #[rstest]
    fn test_reset_clears_state(diseases: GeneDiseaseTable) {
        let primary = MockClassifier::labelled("GeneBe", "Benign");
        let lookup = MockLookup(vec![candidate("G"), candidate("C")]);
        let assistant = MockAssistant::replying(&["Explained."]);
        let services = services(&primary, None, &lookup, Some(&assistant), &diseases);

        let mut session = Session::new();
        session.submit("chr6:160585140-T>G", &services);
        session.submit("rs1234", &services);
        assert!(session.current().is_some());
        assert!(session.pending().is_some());

        session.reset();
        assert!(session.current().is_none());
        assert!(session.pending().is_none());
        assert!(session.history().is_empty());
        assert_eq!(session.submit("   ", &services), Outcome::Empty);
    }
}
