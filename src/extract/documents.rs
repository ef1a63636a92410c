use crate::page::PageLink;
use crate::snapshot::DocumentLink;

/// Link targets treated as filed documents.
const DOC_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx"];

/// Collect the document links from a page, in page order. Duplicates are
/// kept; the count feeds change detection.
pub fn extract(links: &[PageLink]) -> Vec<DocumentLink> {
    links
        .iter()
        .filter(|link| is_document(link))
        .map(|link| DocumentLink {
            title: link.label.clone(),
            url: link.href.clone(),
        })
        .collect()
}

fn is_document(link: &PageLink) -> bool {
    let href = link.href.to_lowercase();
    if DOC_EXTENSIONS.iter().any(|ext| href.ends_with(ext)) {
        return true;
    }
    link.label.to_lowercase().contains("document")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(label: &str, href: &str) -> PageLink {
        PageLink {
            label: label.to_string(),
            href: href.to_string(),
        }
    }

    #[test]
    fn recognizes_document_extensions_case_insensitively() {
        let links = vec![
            link("Procedural Order", "/orders/po1.PDF"),
            link("Memorial", "/filings/memorial.docx"),
            link("Home", "/index.html"),
        ];
        let docs = extract(&links);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].url, "/orders/po1.PDF");
    }

    #[test]
    fn recognizes_document_labels_without_extension() {
        let links = vec![
            link("All case documents", "/cases/123/docs"),
            link("Contact", "/contact"),
        ];
        let docs = extract(&links);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "All case documents");
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let links = vec![
            link("Award", "/a.pdf"),
            link("Decision", "/b.pdf"),
            link("Award", "/a.pdf"),
        ];
        let docs = extract(&links);
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0], docs[2]);
        assert_eq!(docs[1].title, "Decision");
    }

    #[test]
    fn extension_must_terminate_the_href() {
        let links = vec![link("Viewer", "/view.pdf.php")];
        assert!(extract(&links).is_empty());
    }
}
