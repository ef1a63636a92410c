use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;

/// A fetched page reduced to what extraction needs: the visible text in
/// document order, and every hyperlink with its label.
#[derive(Debug, Clone)]
pub struct FlattenedPage {
    pub text: String,
    pub links: Vec<PageLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub label: String,
    pub href: String,
}

/// Parse HTML and flatten it. Markup that carries no case information is
/// dropped before the text is read, so the field heuristics never see
/// inline Javascript or CSS.
pub fn flatten(html: &str) -> FlattenedPage {
    let document = kuchiki::parse_html().one(html);
    strip_nontext(&document);
    let links = collect_links(&document);
    FlattenedPage {
        text: document.text_contents(),
        links,
    }
}

fn strip_nontext(document: &NodeRef) {
    if let Ok(nodes) = document.select("script, style, noscript") {
        // Collect first: detaching while the selector iterator walks the
        // tree would cut the traversal short.
        let nodes: Vec<_> = nodes.collect();
        for node in nodes {
            node.as_node().detach();
        }
    }
}

fn collect_links(document: &NodeRef) -> Vec<PageLink> {
    let mut links = Vec::new();
    if let Ok(anchors) = document.select("a") {
        for anchor in anchors {
            let href = match anchor.attributes.borrow().get("href") {
                Some(href) => href.to_string(),
                None => continue,
            };
            links.push(PageLink {
                label: anchor.as_node().text_contents().trim().to_string(),
                href,
            });
        }
    }
    links
}
