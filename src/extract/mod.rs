pub mod development;
pub mod documents;
pub mod phase;
pub mod status;

use crate::page::FlattenedPage;
use crate::snapshot::DocumentLink;

/// Every field derived from one page. Extraction cannot fail: each field
/// falls back to its sentinel when no rule matches.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseFields {
    pub case_status: String,
    pub latest_development: String,
    pub proceedings_phase: String,
    pub documents: Vec<DocumentLink>,
    pub has_award_mention: bool,
    pub has_decision_mention: bool,
}

/// Run the field extractors over one flattened page.
pub fn extract(page: &FlattenedPage) -> CaseFields {
    let lower = page.text.to_lowercase();
    CaseFields {
        case_status: status::extract(&page.text),
        latest_development: development::extract(&page.text),
        proceedings_phase: phase::classify(&lower),
        documents: documents::extract(&page.links),
        has_award_mention: lower.contains("award"),
        has_decision_mention: lower.contains("decision"),
    }
}

/// Character-boundary truncation. Byte slicing would panic mid-codepoint on
/// accented party names.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

// ── Tests ──
