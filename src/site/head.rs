//! Document head management.
//!
//! Two layers:
//! - `HeadElementSet`: pure `PageMetadata -> elements` mapping, the declarative
//!   description of what the head should contain.
//! - `DocumentHead`: an in-memory head with find-or-create operations. Applying
//!   the same set any number of times leaves one element per key.
//!
//! Each render owns its own `DocumentHead`; it is never shared across threads.

use serde::Serialize;

use crate::site::types::PageMetadata;

pub const JSON_LD_MIME: &str = "application/ld+json";
const CANONICAL_REL: &str = "canonical";

/// Selector attribute of a `<meta>` tag: `name=` for standard and Twitter
/// tags, `property=` for Open Graph tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaAttr {
    Name,
    Property,
}

impl MetaAttr {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

/// Whether a sync call created a new element or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Updated,
}

// ============================================================================
// Declarative element set
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadElement {
    Title(String),
    Meta {
        attr: MetaAttr,
        key: String,
        content: String,
    },
    CanonicalLink(String),
    JsonLd(String),
}

impl HeadElement {
    fn meta(attr: MetaAttr, key: &str, content: &str) -> Self {
        HeadElement::Meta {
            attr,
            key: key.to_string(),
            content: content.to_string(),
        }
    }
}

/// Ordered set of head elements for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadElementSet {
    elements: Vec<HeadElement>,
}

impl HeadElementSet {
    /// Map page metadata to head elements.
    ///
    /// Order: title, description, keywords, Open Graph, Twitter, canonical.
    pub fn from_metadata(meta: &PageMetadata) -> Self {
        let mut elements = vec![
            HeadElement::Title(meta.title.clone()),
            HeadElement::meta(MetaAttr::Name, "description", &meta.description),
        ];

        if let Some(keywords) = &meta.keywords {
            elements.push(HeadElement::meta(MetaAttr::Name, "keywords", keywords));
        }

        elements.push(HeadElement::meta(MetaAttr::Property, "og:title", &meta.og_title));
        elements.push(HeadElement::meta(MetaAttr::Property, "og:description", &meta.og_description));
        elements.push(HeadElement::meta(MetaAttr::Property, "og:url", &meta.og_url));
        elements.push(HeadElement::meta(MetaAttr::Property, "og:type", &meta.og_type));
        elements.push(HeadElement::meta(MetaAttr::Property, "og:site_name", &meta.og_site_name));
        if let Some(image) = &meta.og_image {
            elements.push(HeadElement::meta(MetaAttr::Property, "og:image", image));
        }

        elements.push(HeadElement::meta(MetaAttr::Name, "twitter:card", &meta.twitter_card));
        elements.push(HeadElement::meta(MetaAttr::Name, "twitter:title", &meta.twitter_title));
        elements.push(HeadElement::meta(
            MetaAttr::Name,
            "twitter:description",
            &meta.twitter_description,
        ));

        elements.push(HeadElement::CanonicalLink(meta.canonical_url.clone()));

        Self { elements }
    }

    pub fn with_json_ld(mut self, json: String) -> Self {
        self.elements.push(HeadElement::JsonLd(json));
        self
    }

    pub fn elements(&self) -> &[HeadElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

// ============================================================================
// In-memory document head
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadNode {
    Meta {
        attr: MetaAttr,
        key: String,
        content: String,
    },
    Link {
        rel: String,
        href: String,
    },
    Script {
        mime: String,
        text: String,
    },
}

impl HeadNode {
    fn is_meta(&self, want_attr: MetaAttr, want_key: &str) -> bool {
        matches!(self, HeadNode::Meta { attr, key, .. } if *attr == want_attr && key == want_key)
    }

    fn is_canonical(&self) -> bool {
        matches!(self, HeadNode::Link { rel, .. } if rel == CANONICAL_REL)
    }

    fn is_json_ld(&self) -> bool {
        matches!(self, HeadNode::Script { mime, .. } if mime == JSON_LD_MIME)
    }
}

/// Live head of a rendered document: title plus managed nodes in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DocumentHead {
    title: String,
    nodes: Vec<HeadNode>,
}

impl DocumentHead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_document_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Create or overwrite the `<meta attr="key">` element.
    ///
    /// After the call exactly one element matches `(attr, key)`; stray
    /// duplicates already in the head are dropped.
    pub fn sync_meta_tag(&mut self, attr: MetaAttr, key: &str, value: &str) -> SyncOutcome {
        let outcome = self.find_or_create(
            |node| node.is_meta(attr, key),
            |node| {
                if let HeadNode::Meta { content, .. } = node {
                    *content = value.to_string();
                }
            },
            || HeadNode::Meta {
                attr,
                key: key.to_string(),
                content: value.to_string(),
            },
        );
        tracing::trace!(attr = attr.as_str(), key, ?outcome, "synced meta tag");
        outcome
    }

    /// Create or overwrite the single `<link rel="canonical">`.
    pub fn sync_canonical_link(&mut self, url: &str) -> SyncOutcome {
        let outcome = self.find_or_create(
            HeadNode::is_canonical,
            |node| {
                if let HeadNode::Link { href, .. } = node {
                    *href = url.to_string();
                }
            },
            || HeadNode::Link {
                rel: CANONICAL_REL.to_string(),
                href: url.to_string(),
            },
        );
        tracing::trace!(url, ?outcome, "synced canonical link");
        outcome
    }

    /// Create or overwrite the single JSON-LD data island.
    pub fn inject_json_ld(&mut self, json: &str) -> SyncOutcome {
        self.find_or_create(
            HeadNode::is_json_ld,
            |node| {
                if let HeadNode::Script { text, .. } = node {
                    *text = json.to_string();
                }
            },
            || HeadNode::Script {
                mime: JSON_LD_MIME.to_string(),
                text: json.to_string(),
            },
        )
    }

    /// Make the head reflect `set`.
    pub fn set_head(&mut self, set: &HeadElementSet) {
        let (mut created, mut updated) = (0usize, 0usize);
        for element in set.elements() {
            let outcome = match element {
                HeadElement::Title(title) => {
                    self.set_document_title(title);
                    continue;
                }
                HeadElement::Meta { attr, key, content } => self.sync_meta_tag(*attr, key, content),
                HeadElement::CanonicalLink(url) => self.sync_canonical_link(url),
                HeadElement::JsonLd(json) => self.inject_json_ld(json),
            };
            match outcome {
                SyncOutcome::Created => created += 1,
                SyncOutcome::Updated => updated += 1,
            }
        }
        tracing::debug!(
            title = %self.title,
            created,
            updated,
            "applied head element set"
        );
    }

    pub fn apply_metadata(&mut self, meta: &PageMetadata) {
        self.set_head(&HeadElementSet::from_metadata(meta));
    }

    /// Append a node without any lookup (models markup already in the page).
    pub fn append(&mut self, node: HeadNode) {
        self.nodes.push(node);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn nodes(&self) -> &[HeadNode] {
        &self.nodes
    }

    pub fn meta_content(&self, attr: MetaAttr, key: &str) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            HeadNode::Meta { content, .. } if node.is_meta(attr, key) => Some(content.as_str()),
            _ => None,
        })
    }

    pub fn meta_count(&self, attr: MetaAttr, key: &str) -> usize {
        self.nodes.iter().filter(|n| n.is_meta(attr, key)).count()
    }

    pub fn canonical_href(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            HeadNode::Link { href, .. } if node.is_canonical() => Some(href.as_str()),
            _ => None,
        })
    }

    pub fn canonical_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_canonical()).count()
    }

    pub fn json_ld(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            HeadNode::Script { text, .. } if node.is_json_ld() => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn json_ld_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_json_ld()).count()
    }

    fn find_or_create<M, U, C>(&mut self, matches: M, update: U, create: C) -> SyncOutcome
    where
        M: Fn(&HeadNode) -> bool,
        U: FnOnce(&mut HeadNode),
        C: FnOnce() -> HeadNode,
    {
        match self.nodes.iter().position(|n| matches(n)) {
            Some(first) => {
                update(&mut self.nodes[first]);
                let mut index = 0usize;
                self.nodes.retain(|n| {
                    let keep = index <= first || !matches(n);
                    index += 1;
                    keep
                });
                SyncOutcome::Updated
            }
            None => {
                self.nodes.push(create());
                SyncOutcome::Created
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata() -> PageMetadata {
        PageMetadata {
            title: "Page".to_string(),
            description: "Desc".to_string(),
            keywords: None,
            og_title: "Page".to_string(),
            og_description: "Desc".to_string(),
            og_url: "https://example.com/page".to_string(),
            og_type: "website".to_string(),
            og_site_name: "Example".to_string(),
            og_image: None,
            twitter_card: "summary_large_image".to_string(),
            twitter_title: "Page".to_string(),
            twitter_description: "Desc".to_string(),
            canonical_url: "https://example.com/page".to_string(),
        }
    }

    #[test]
    fn test_sync_meta_tag_overwrites() {
        let mut head = DocumentHead::new();
        assert_eq!(
            head.sync_meta_tag(MetaAttr::Name, "description", "first"),
            SyncOutcome::Created
        );
        assert_eq!(
            head.sync_meta_tag(MetaAttr::Name, "description", "second"),
            SyncOutcome::Updated
        );

        assert_eq!(head.meta_count(MetaAttr::Name, "description"), 1);
        assert_eq!(head.meta_content(MetaAttr::Name, "description"), Some("second"));
    }

    #[test]
    fn test_name_and_property_are_distinct_keys() {
        let mut head = DocumentHead::new();
        head.sync_meta_tag(MetaAttr::Name, "og:title", "as name");
        head.sync_meta_tag(MetaAttr::Property, "og:title", "as property");

        assert_eq!(head.nodes().len(), 2);
        assert_eq!(head.meta_content(MetaAttr::Name, "og:title"), Some("as name"));
        assert_eq!(head.meta_content(MetaAttr::Property, "og:title"), Some("as property"));
    }

    #[test]
    fn test_sync_collapses_preexisting_duplicates() {
        let mut head = DocumentHead::new();
        for href in ["https://a.example/", "https://b.example/"] {
            head.append(HeadNode::Link {
                rel: "canonical".to_string(),
                href: href.to_string(),
            });
        }
        head.append(HeadNode::Link {
            rel: "icon".to_string(),
            href: "/favicon.ico".to_string(),
        });

        head.sync_canonical_link("https://c.example/");

        assert_eq!(head.canonical_count(), 1);
        assert_eq!(head.canonical_href(), Some("https://c.example/"));
        assert_eq!(head.nodes().len(), 2);
    }

    #[test]
    fn test_set_head_is_idempotent() {
        let set = HeadElementSet::from_metadata(&sample_metadata()).with_json_ld("{}".to_string());
        let mut head = DocumentHead::new();
        head.set_head(&set);
        let once = head.nodes().to_vec();
        head.set_head(&set);

        assert_eq!(head.nodes(), once.as_slice());
        assert_eq!(head.canonical_count(), 1);
        assert_eq!(head.json_ld_count(), 1);
        assert_eq!(head.title(), "Page");
    }

    #[test]
    fn test_element_order() {
        let mut meta = sample_metadata();
        meta.keywords = Some("seo".to_string());
        let set = HeadElementSet::from_metadata(&meta);

        assert_eq!(set.elements()[0], HeadElement::Title("Page".to_string()));
        assert_eq!(set.elements()[2], HeadElement::meta(MetaAttr::Name, "keywords", "seo"));
        assert!(matches!(set.elements().last(), Some(HeadElement::CanonicalLink(_))));
    }
}
