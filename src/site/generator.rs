//! Site Generator
//!
//! Renders catalogue pages to complete HTML documents.
//!
//! Per page:
//! 1. `build_page_metadata` -> `HeadElementSet` (+ JSON-LD data island)
//! 2. mount onto a fresh `DocumentHead` (find-or-create sync)
//! 3. render the head nodes, body copy and FAQ accordion with askama
//!
//! Public API (consumed by api_server.rs and generate_site.rs):
//! - SiteGenerator::new(site, catalog) -> Self
//! - SiteGenerator::render_path(path, open_faq) -> Result<RenderedPage>

use askama::Template;

use crate::error::{Result, SiteError};
use crate::site::catalog::PageCatalog;
use crate::site::faq::FaqAccordion;
use crate::site::head::{DocumentHead, HeadElementSet, HeadNode};
use crate::site::metadata::build_page_metadata;
use crate::site::structured_data::{build_page_graph, to_json_ld, StructuredDataGraph};
use crate::site::types::{PageConfig, PageKind, PageMetadata, SiteIdentity};

// ============================================================================
// Page view
// ============================================================================

/// A catalogue page bound to its site, ready to build head data.
#[derive(Debug, Clone, Copy)]
pub struct SitePage<'a> {
    pub site: &'a SiteIdentity,
    pub page: &'a PageConfig,
    pub catalog: &'a PageCatalog,
}

impl<'a> SitePage<'a> {
    pub fn metadata(&self) -> Result<PageMetadata> {
        build_page_metadata(self.site, self.page)
    }

    pub fn structured_data(&self) -> Result<StructuredDataGraph> {
        build_page_graph(self.site, self.page, self.catalog)
    }

    pub fn head_elements(&self) -> Result<HeadElementSet> {
        let json = to_json_ld(&self.structured_data()?)?;
        Ok(HeadElementSet::from_metadata(&self.metadata()?).with_json_ld(json))
    }

    /// Mount effect: make `head` reflect this page. Safe to repeat.
    pub fn mount(&self, head: &mut DocumentHead) -> Result<()> {
        head.set_head(&self.head_elements()?);
        Ok(())
    }
}

// ============================================================================
// Template
// ============================================================================

struct MetaView<'a> {
    attr: &'static str,
    key: &'a str,
    content: &'a str,
}

struct NavLink {
    href: String,
    label: String,
}

struct FaqItemView<'a> {
    anchor: String,
    href: String,
    question: &'a str,
    answer: &'a str,
    open: bool,
}

#[derive(Template)]
#[template(path = "pages/page.html")]
struct PageTemplate<'a> {
    lang: &'a str,
    title: &'a str,
    metas: Vec<MetaView<'a>>,
    canonical: &'a str,
    json_ld: &'a str,
    site_name: &'a str,
    nav: Vec<NavLink>,
    headline: &'a str,
    intro: &'a str,
    related: Vec<NavLink>,
    faq_items: Vec<FaqItemView<'a>>,
}

// ============================================================================
// Generator
// ============================================================================

/// Output of one render.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub path: String,
    pub html: String,
    pub head: DocumentHead,
}

pub struct SiteGenerator {
    site: SiteIdentity,
    catalog: PageCatalog,
}

impl SiteGenerator {
    pub fn new(site: SiteIdentity, catalog: PageCatalog) -> Self {
        Self { site, catalog }
    }

    pub fn site(&self) -> &SiteIdentity {
        &self.site
    }

    pub fn catalog(&self) -> &PageCatalog {
        &self.catalog
    }

    pub fn page(&self, path: &str) -> Result<SitePage<'_>> {
        let page = self
            .catalog
            .by_path(path)
            .ok_or_else(|| SiteError::UnknownPage(path.to_string()))?;
        Ok(self.bind(page))
    }

    pub fn page_by_slug(&self, slug: &str) -> Result<SitePage<'_>> {
        let page = self
            .catalog
            .by_slug(slug)
            .ok_or_else(|| SiteError::UnknownPage(slug.to_string()))?;
        Ok(self.bind(page))
    }

    pub fn bind<'a>(&'a self, page: &'a PageConfig) -> SitePage<'a> {
        SitePage {
            site: &self.site,
            page,
            catalog: &self.catalog,
        }
    }

    pub fn render_path(&self, path: &str, open_faq: Option<usize>) -> Result<RenderedPage> {
        let page = self.page(path)?;
        self.render(page.page, open_faq)
    }

    /// Render a page with the FAQ entry `open_faq` expanded.
    pub fn render(&self, page: &PageConfig, open_faq: Option<usize>) -> Result<RenderedPage> {
        let mut head = DocumentHead::new();
        self.bind(page).mount(&mut head)?;

        let accordion = FaqAccordion::from_request(&page.faqs, open_faq);
        let html = self.render_template(page, &head, &accordion)?;

        tracing::debug!(
            path = %page.path,
            open_faq = ?accordion.state().open_index(),
            bytes = html.len(),
            "rendered page"
        );

        Ok(RenderedPage {
            path: page.path.clone(),
            html,
            head,
        })
    }

    fn render_template(
        &self,
        page: &PageConfig,
        head: &DocumentHead,
        accordion: &FaqAccordion<'_>,
    ) -> Result<String> {
        let metas = head
            .nodes()
            .iter()
            .filter_map(|node| match node {
                HeadNode::Meta { attr, key, content } => Some(MetaView {
                    attr: attr.as_str(),
                    key,
                    content,
                }),
                _ => None,
            })
            .collect();

        let faq_items = accordion
            .entries()
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let anchor = format!("faq-{}", idx);
                FaqItemView {
                    href: accordion.toggle_href(idx, &anchor),
                    anchor,
                    question: &entry.question,
                    answer: &entry.answer,
                    open: accordion.is_open(idx),
                }
            })
            .collect();

        let template = PageTemplate {
            lang: &self.site.language,
            title: head.title(),
            metas,
            canonical: head.canonical_href().unwrap_or_default(),
            json_ld: head.json_ld().unwrap_or_default(),
            site_name: &self.site.site_name,
            nav: self.nav_links(),
            headline: &page.headline,
            intro: &page.intro,
            related: self.related_links(page),
            faq_items,
        };

        Ok(template.render()?)
    }

    fn nav_links(&self) -> Vec<NavLink> {
        self.catalog
            .pages()
            .iter()
            .filter(|p| matches!(p.kind, PageKind::IndustryHub | PageKind::Platform))
            .map(|p| NavLink {
                href: p.path.clone(),
                label: p.headline.clone(),
            })
            .collect()
    }

    /// Industry pages link to each other; the hub lists them all.
    fn related_links(&self, page: &PageConfig) -> Vec<NavLink> {
        match page.kind {
            PageKind::IndustryHub | PageKind::Industry => self
                .catalog
                .pages_of_kind(PageKind::Industry)
                .filter(|p| p.path != page.path)
                .map(|p| NavLink {
                    href: p.path.clone(),
                    label: p.headline.clone(),
                })
                .collect(),
            PageKind::Home | PageKind::Platform => Vec::new(),
        }
    }
}

impl Default for SiteGenerator {
    fn default() -> Self {
        Self::new(SiteIdentity::default(), PageCatalog::builtin())
    }
}
