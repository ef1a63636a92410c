use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::extract;
use crate::page;

/// One immutable observation of the case page. Built once per pass and
/// never modified afterwards; comparisons always run between two complete
/// snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub content_fingerprint: String,
    pub case_status: String,
    pub latest_development: String,
    pub proceedings_phase: String,
    pub documents: Vec<DocumentLink>,
    pub has_award_mention: bool,
    pub has_decision_mention: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub title: String,
    pub url: String,
}

/// Build a snapshot from the raw fetched bytes. Infallible by construction:
/// the fingerprint is defined for any input and every extracted field
/// degrades to a sentinel.
pub fn build(raw: &[u8], fetched_at: DateTime<Utc>) -> Snapshot {
    let flattened = page::flatten(&String::from_utf8_lossy(raw));
    let fields = extract::extract(&flattened);
    Snapshot {
        timestamp: fetched_at,
        content_fingerprint: fingerprint(raw),
        case_status: fields.case_status,
        latest_development: fields.latest_development,
        proceedings_phase: fields.proceedings_phase,
        documents: fields.documents,
        has_award_mention: fields.has_award_mention,
        has_decision_mention: fields.has_decision_mention,
    }
}

/// Hash of the raw page bytes, before any flattening. Formatting-only edits
/// on the page change the fingerprint even when every extracted field
/// stays the same.
pub fn fingerprint(raw: &[u8]) -> String {
    hex::encode(Sha256::digest(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_bytes_give_identical_fields() {
        let raw = std::fs::read("tests/fixtures/case_page.html").unwrap();
        let t = Utc::now();
        let a = build(&raw, t);
        let b = build(&raw, t);
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_tracks_raw_bytes_not_extracted_fields() {
        // An extra space inside markup leaves the fields alone but must
        // still move the fingerprint.
        let a = build(b"<p>Status: Pending</p>", Utc::now());
        let b = build(b"<p >Status: Pending</p>", Utc::now());
        assert_ne!(a.content_fingerprint, b.content_fingerprint);
        assert_eq!(a.case_status, b.case_status);
    }

    #[test]
    fn fingerprint_is_hex_sha256() {
        let fp = fingerprint(b"abc");
        assert_eq!(fp.len(), 64);
        assert_eq!(
            fp,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let raw = std::fs::read("tests/fixtures/case_page.html").unwrap();
        let snapshot = build(&raw, Utc::now());
        let encoded = serde_json::to_string_pretty(&snapshot).unwrap();
        let decoded: Snapshot = serde_json::from_str(&encoded).unwrap();
        assert_eq!(snapshot, decoded);
    }
}
