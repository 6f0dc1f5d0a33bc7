//! JSON-LD structured data (schema.org `@graph`).
//!
//! Entities serialize in field declaration order with `@type` first, so the
//! emitted JSON is deterministic. Cross-entity links (`isPartOf`, `provider`,
//! `publisher`, `about`, `hasPart`) are `@id` references.
//!
//! Serialization performs no schema.org validation and no escaping; the page
//! catalogue is static. `validate_graph` is the authoring lint run by the
//! static exporter and tests; references may point outside the page graph
//! only at `site_anchors`.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::site::catalog::PageCatalog;
use crate::site::head::JSON_LD_MIME;
use crate::site::types::{FaqEntry, PageConfig, PageKind, SiteIdentity};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

// ============================================================================
// Entities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    #[serde(rename = "@id")]
    pub id: String,
}

impl IdRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPage {
    #[serde(rename = "@id")]
    pub id: String,
    pub url: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_part_of: Option<IdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<IdRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    pub provider: IdRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_served: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqPage {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_part_of: Option<IdRef>,
    pub main_entity: Vec<Question>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    Question,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerType {
    Answer,
}

/// A `Question` always carries exactly one `acceptedAnswer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "@type")]
    pub kind: QuestionType,
    pub name: String,
    pub accepted_answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "@type")]
    pub kind: AnswerType,
    pub text: String,
}

impl From<&FaqEntry> for Question {
    fn from(entry: &FaqEntry) -> Self {
        Question {
            kind: QuestionType::Question,
            name: entry.question.clone(),
            accepted_answer: Answer {
                kind: AnswerType::Answer,
                text: entry.answer.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSite {
    #[serde(rename = "@id")]
    pub id: String,
    pub url: String,
    pub name: String,
    pub publisher: IdRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPage {
    #[serde(rename = "@id")]
    pub id: String,
    pub url: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_part_of: Option<IdRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub has_part: Vec<IdRef>,
}

/// One node of the `@graph` array, tagged by `@type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum Entity {
    WebPage(WebPage),
    Service(Service),
    #[serde(rename = "FAQPage")]
    FaqPage(FaqPage),
    Person(Person),
    WebSite(WebSite),
    CollectionPage(CollectionPage),
}

impl Entity {
    pub fn type_name(&self) -> &'static str {
        match self {
            Entity::WebPage(_) => "WebPage",
            Entity::Service(_) => "Service",
            Entity::FaqPage(_) => "FAQPage",
            Entity::Person(_) => "Person",
            Entity::WebSite(_) => "WebSite",
            Entity::CollectionPage(_) => "CollectionPage",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::WebPage(e) => &e.id,
            Entity::Service(e) => &e.id,
            Entity::FaqPage(e) => &e.id,
            Entity::Person(e) => &e.id,
            Entity::WebSite(e) => &e.id,
            Entity::CollectionPage(e) => &e.id,
        }
    }

    /// `@id` values this entity points at.
    pub fn references(&self) -> Vec<&str> {
        let refs: Vec<&IdRef> = match self {
            Entity::WebPage(e) => e.is_part_of.iter().chain(e.about.iter()).collect(),
            Entity::Service(e) => vec![&e.provider],
            Entity::FaqPage(e) => e.is_part_of.iter().collect(),
            Entity::Person(_) => Vec::new(),
            Entity::WebSite(e) => vec![&e.publisher],
            Entity::CollectionPage(e) => e.is_part_of.iter().chain(e.has_part.iter()).collect(),
        };
        refs.into_iter().map(|r| r.id.as_str()).collect()
    }
}

/// Root JSON-LD document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDataGraph {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@graph")]
    pub graph: Vec<Entity>,
}

impl StructuredDataGraph {
    pub fn new(graph: Vec<Entity>) -> Self {
        Self {
            context: SCHEMA_CONTEXT.to_string(),
            graph,
        }
    }

    pub fn faq_page(&self) -> Option<&FaqPage> {
        self.graph.iter().find_map(|e| match e {
            Entity::FaqPage(faq) => Some(faq),
            _ => None,
        })
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Page facts needed to build a landing-page graph.
#[derive(Debug, Clone)]
pub struct PageInfo {
    pub url: String,
    pub name: String,
    pub description: String,
    pub language: String,
    pub website_id: String,
    pub provider_id: String,
    pub service_name: Option<String>,
    pub service_type: Option<String>,
    pub area_served: Option<String>,
}

impl PageInfo {
    pub fn new(site: &SiteIdentity, page: &PageConfig) -> Result<Self> {
        Ok(Self {
            url: site.page_url(&page.path)?,
            name: page.title.clone(),
            description: page.description.clone(),
            language: site.language.clone(),
            website_id: site.website_id(),
            provider_id: site.person_id(),
            service_name: page.service_name.clone(),
            service_type: page.service_type.clone(),
            area_served: page.area_served.clone(),
        })
    }

    pub fn webpage_id(&self) -> String {
        format!("{}#webpage", self.url)
    }

    fn webpage(&self) -> WebPage {
        WebPage {
            id: self.webpage_id(),
            url: self.url.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            in_language: Some(self.language.clone()),
            is_part_of: Some(IdRef::new(&self.website_id)),
            about: None,
        }
    }

    fn faq_page(&self, faqs: &[FaqEntry]) -> Option<FaqPage> {
        if faqs.is_empty() {
            return None;
        }
        Some(FaqPage {
            id: format!("{}#faq", self.url),
            is_part_of: Some(IdRef::new(self.webpage_id())),
            main_entity: faqs.iter().map(Question::from).collect(),
        })
    }
}

/// Landing-page graph: WebPage, Service (when the page offers one) and
/// FAQPage (when there are FAQs).
pub fn build_faq_graph(info: &PageInfo, faqs: &[FaqEntry]) -> StructuredDataGraph {
    let mut graph = vec![Entity::WebPage(info.webpage())];

    if let Some(service_name) = &info.service_name {
        graph.push(Entity::Service(Service {
            id: format!("{}#service", info.url),
            name: service_name.clone(),
            description: info.description.clone(),
            service_type: info.service_type.clone(),
            provider: IdRef::new(&info.provider_id),
            area_served: info.area_served.clone(),
            url: info.url.clone(),
        }));
    }

    if let Some(faq) = info.faq_page(faqs) {
        graph.push(Entity::FaqPage(faq));
    }

    StructuredDataGraph::new(graph)
}

/// Graph for any catalogue page, chosen by page kind.
pub fn build_page_graph(
    site: &SiteIdentity,
    page: &PageConfig,
    catalog: &PageCatalog,
) -> Result<StructuredDataGraph> {
    let info = PageInfo::new(site, page)?;

    let graph = match page.kind {
        PageKind::Industry | PageKind::Platform => return Ok(build_faq_graph(&info, &page.faqs)),
        PageKind::Home => {
            let mut webpage = info.webpage();
            webpage.about = Some(IdRef::new(site.person_id()));

            let mut graph = vec![
                Entity::WebSite(WebSite {
                    id: site.website_id(),
                    url: site.page_url("/")?,
                    name: site.site_name.clone(),
                    publisher: IdRef::new(site.person_id()),
                    in_language: Some(site.language.clone()),
                }),
                Entity::Person(Person {
                    id: site.person_id(),
                    name: site.author.clone(),
                    url: site.page_url("/")?,
                    job_title: Some(site.author_job_title.clone()),
                    same_as: site.author_same_as.clone(),
                }),
                Entity::WebPage(webpage),
            ];
            graph.extend(info.faq_page(&page.faqs).map(Entity::FaqPage));
            graph
        }
        PageKind::IndustryHub => {
            let has_part = catalog
                .pages_of_kind(PageKind::Industry)
                .map(|child| site.page_url(&child.path).map(|url| IdRef::new(format!("{}#webpage", url))))
                .collect::<Result<Vec<_>>>()?;

            let mut graph = vec![Entity::CollectionPage(CollectionPage {
                id: format!("{}#collection", info.url),
                url: info.url.clone(),
                name: info.name.clone(),
                description: info.description.clone(),
                is_part_of: Some(IdRef::new(&info.website_id)),
                has_part,
            })];
            if let Some(mut faq) = info.faq_page(&page.faqs) {
                faq.is_part_of = Some(IdRef::new(format!("{}#collection", info.url)));
                graph.push(Entity::FaqPage(faq));
            }
            graph
        }
    };

    Ok(StructuredDataGraph::new(graph))
}

// ============================================================================
// Emission
// ============================================================================

pub fn to_json_ld(graph: &StructuredDataGraph) -> Result<String> {
    Ok(serde_json::to_string(graph)?)
}

/// The `<script type="application/ld+json">` data island for a graph.
pub fn json_ld_script(graph: &StructuredDataGraph) -> Result<String> {
    Ok(format!(
        "<script type=\"{}\">{}</script>",
        JSON_LD_MIME,
        to_json_ld(graph)?
    ))
}

pub fn parse_json_ld(json: &str) -> Result<StructuredDataGraph> {
    Ok(serde_json::from_str(json)?)
}

/// FAQ entries carried by the graph's `FAQPage`, in order.
pub fn faq_entries_from_graph(graph: &StructuredDataGraph) -> Vec<FaqEntry> {
    graph
        .faq_page()
        .map(|faq| {
            faq.main_entity
                .iter()
                .map(|q| FaqEntry::new(&q.name, &q.accepted_answer.text))
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Authoring lint
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    EmptyGraph,
    DuplicateId(String),
    NonAbsoluteId(String),
    NonAbsoluteReference { from: String, reference: String },
    DanglingReference { from: String, reference: String },
    EmptyQuestion { index: usize },
    EmptyAnswer { index: usize },
    ScriptTerminator,
}

impl std::fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphIssue::EmptyGraph => write!(f, "@graph is empty"),
            GraphIssue::DuplicateId(id) => write!(f, "duplicate @id {}", id),
            GraphIssue::NonAbsoluteId(id) => write!(f, "@id {} is not an absolute URL", id),
            GraphIssue::NonAbsoluteReference { from, reference } => {
                write!(f, "{} references non-absolute @id {}", from, reference)
            }
            GraphIssue::DanglingReference { from, reference } => {
                write!(f, "{} references undefined @id {}", from, reference)
            }
            GraphIssue::EmptyQuestion { index } => write!(f, "FAQ question {} is empty", index),
            GraphIssue::EmptyAnswer { index } => write!(f, "FAQ answer {} is empty", index),
            GraphIssue::ScriptTerminator => write!(f, "content contains a literal </script"),
        }
    }
}

fn is_absolute_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// `@id`s a page graph may reference without defining: the site's
/// `#website` and `#person` nodes and every catalogue page's `#webpage`.
pub fn site_anchors(site: &SiteIdentity, catalog: &PageCatalog) -> Result<FxHashSet<String>> {
    let mut anchors = FxHashSet::default();
    anchors.insert(site.website_id());
    anchors.insert(site.person_id());
    for page in catalog.pages() {
        anchors.insert(format!("{}#webpage", site.page_url(&page.path)?));
    }
    Ok(anchors)
}

/// Content-authoring checks. An empty result means the graph is clean.
///
/// A reference resolves when it names an entity in `graph` or one of
/// `anchors` (see `site_anchors`).
pub fn validate_graph(
    graph: &StructuredDataGraph,
    anchors: &FxHashSet<String>,
) -> Vec<GraphIssue> {
    let mut issues = Vec::new();

    if graph.graph.is_empty() {
        issues.push(GraphIssue::EmptyGraph);
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for entity in &graph.graph {
        let id = entity.id();
        if !seen.insert(id) {
            issues.push(GraphIssue::DuplicateId(id.to_string()));
        }
        if !is_absolute_url(id) {
            issues.push(GraphIssue::NonAbsoluteId(id.to_string()));
        }
    }

    for entity in &graph.graph {
        for reference in entity.references() {
            let issue = if !is_absolute_url(reference) {
                GraphIssue::NonAbsoluteReference {
                    from: entity.id().to_string(),
                    reference: reference.to_string(),
                }
            } else if !seen.contains(reference) && !anchors.contains(reference) {
                GraphIssue::DanglingReference {
                    from: entity.id().to_string(),
                    reference: reference.to_string(),
                }
            } else {
                continue;
            };
            issues.push(issue);
        }
    }

    if let Some(faq) = graph.faq_page() {
        for (index, question) in faq.main_entity.iter().enumerate() {
            if question.name.trim().is_empty() {
                issues.push(GraphIssue::EmptyQuestion { index });
            }
            if question.accepted_answer.text.trim().is_empty() {
                issues.push(GraphIssue::EmptyAnswer { index });
            }
        }
    }

    if let Ok(json) = to_json_ld(graph) {
        if json.to_ascii_lowercase().contains("</script") {
            issues.push(GraphIssue::ScriptTerminator);
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> PageInfo {
        PageInfo {
            url: "https://moazhaider.com/industries/test".to_string(),
            name: "Test".to_string(),
            description: "Test page".to_string(),
            language: "en-US".to_string(),
            website_id: "https://moazhaider.com/#website".to_string(),
            provider_id: "https://moazhaider.com/#person".to_string(),
            service_name: Some("Test SEO".to_string()),
            service_type: Some("Search Engine Optimization".to_string()),
            area_served: None,
        }
    }

    fn anchors() -> FxHashSet<String> {
        let site = SiteIdentity::default();
        [site.website_id(), site.person_id()].into_iter().collect()
    }

    fn faqs() -> Vec<FaqEntry> {
        vec![
            FaqEntry::new("Q1?", "A1."),
            FaqEntry::new("Q2?", "A2."),
        ]
    }

    #[test]
    fn test_faq_graph_shape() {
        let graph = build_faq_graph(&info(), &faqs());
        let types: Vec<&str> = graph.graph.iter().map(Entity::type_name).collect();
        assert_eq!(types, vec!["WebPage", "Service", "FAQPage"]);
        assert!(validate_graph(&graph, &anchors()).is_empty());
    }

    #[test]
    fn test_no_faq_page_without_entries() {
        let graph = build_faq_graph(&info(), &[]);
        assert!(graph.faq_page().is_none());
    }

    #[test]
    fn test_json_key_order() {
        let graph = build_faq_graph(&info(), &faqs());
        let json = to_json_ld(&graph).unwrap();

        assert!(json.starts_with(r#"{"@context":"https://schema.org","@graph":[{"@type":"WebPage","@id":"#));
        let q = json.find(r#"{"@type":"Question","name":"Q1?","acceptedAnswer":{"@type":"Answer","text":"A1."}}"#);
        assert!(q.is_some(), "unexpected question layout: {}", json);
    }

    #[test]
    fn test_round_trip_preserves_answers() {
        let graph = build_faq_graph(&info(), &faqs());
        let parsed = parse_json_ld(&to_json_ld(&graph).unwrap()).unwrap();
        assert_eq!(parsed, graph);
        assert_eq!(faq_entries_from_graph(&parsed), faqs());
    }

    #[test]
    fn test_question_without_answer_is_rejected() {
        let json = r#"{"@context":"https://schema.org","@graph":[
            {"@type":"FAQPage","@id":"https://x.example/#faq",
             "mainEntity":[{"@type":"Question","name":"Q?"}]}]}"#;
        assert!(parse_json_ld(json).is_err());
    }

    #[test]
    fn test_validate_flags_authoring_errors() {
        let mut graph = build_faq_graph(&info(), &[FaqEntry::new("Q?", " ")]);
        graph.graph.push(graph.graph[0].clone());
        if let Entity::Service(service) = &mut graph.graph[1] {
            service.provider = IdRef::new("#person");
        }

        let issues = validate_graph(&graph, &anchors());
        assert!(issues.contains(&GraphIssue::DuplicateId(
            "https://moazhaider.com/industries/test#webpage".to_string()
        )));
        assert!(issues.contains(&GraphIssue::EmptyAnswer { index: 0 }));
        assert!(issues
            .iter()
            .any(|i| matches!(i, GraphIssue::NonAbsoluteReference { reference, .. } if reference == "#person")));
    }

    #[test]
    fn test_validate_flags_dangling_references() {
        let mut page = info();
        page.website_id = "https://x.example/#nowhere".to_string();
        page.provider_id = "https://x.example/#nobody".to_string();
        let graph = build_faq_graph(&page, &faqs());

        let issues = validate_graph(&graph, &anchors());
        let dangling: Vec<&str> = issues
            .iter()
            .filter_map(|i| match i {
                GraphIssue::DanglingReference { reference, .. } => Some(reference.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            dangling,
            vec!["https://x.example/#nowhere", "https://x.example/#nobody"]
        );
    }

    #[test]
    fn test_in_graph_reference_resolves() {
        // FAQPage points at the WebPage defined in the same graph
        let graph = build_faq_graph(&info(), &faqs());
        let only_site: FxHashSet<String> = FxHashSet::default();
        let issues = validate_graph(&graph, &only_site);
        assert!(!issues.iter().any(|i| matches!(
            i,
            GraphIssue::DanglingReference { reference, .. } if reference.ends_with("#webpage")
        )));
        assert_eq!(issues.len(), 2, "website and person anchors missing: {:?}", issues);
    }

    #[test]
    fn test_validate_flags_script_terminator() {
        let graph = build_faq_graph(&info(), &[FaqEntry::new("Q?", "Ends </script> here")]);
        assert!(validate_graph(&graph, &anchors()).contains(&GraphIssue::ScriptTerminator));
    }

    #[test]
    fn test_script_wrapper() {
        let graph = build_faq_graph(&info(), &faqs());
        let script = json_ld_script(&graph).unwrap();
        assert!(script.starts_with("<script type=\"application/ld+json\">{"));
        assert!(script.ends_with("}</script>"));
    }
}
