//! Page catalogue.
//!
//! The built-in catalogue holds the homepage, the industries hub, six
//! industry landing pages and the Shopify platform page. A JSON file with
//! the same `PageConfig` shape can replace it (`PAGES_FILE`).

use std::collections::HashMap;
use std::path::Path;

use rustc_hash::FxHashSet;

use crate::error::{Result, SiteError};
use crate::site::types::{FaqEntry, PageConfig, PageKind};

pub const SERVICE_TYPE: &str = "Search Engine Optimization";

#[derive(Debug, Clone)]
pub struct PageCatalog {
    pages: Vec<PageConfig>,
    by_path: HashMap<String, usize>,
}

impl PageCatalog {
    /// Build a catalogue. Paths are normalized to `/a/b` form first; paths
    /// and slugs must then be unique.
    pub fn from_pages(mut pages: Vec<PageConfig>) -> Result<Self> {
        let mut by_path = HashMap::with_capacity(pages.len());
        let mut slugs = FxHashSet::default();
        for (idx, page) in pages.iter_mut().enumerate() {
            page.path = normalize_path(&page.path);
            if by_path.insert(page.path.clone(), idx).is_some() {
                return Err(SiteError::DuplicatePath(page.path.clone()));
            }
            if !slugs.insert(page.slug.clone()) {
                return Err(SiteError::DuplicateSlug(page.slug.clone()));
            }
        }
        Ok(Self { pages, by_path })
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| SiteError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let pages: Vec<PageConfig> =
            serde_json::from_str(&contents).map_err(|source| SiteError::CatalogParse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!("Loaded {} pages from {}", pages.len(), path.display());
        Self::from_pages(pages)
    }

    pub fn builtin() -> Self {
        let pages = vec![
            home(),
            industries_hub(),
            fashion(),
            electronics(),
            beauty(),
            home_decor(),
            supplements(),
            jewelry(),
            shopify(),
        ];
        // Paths above are distinct literals.
        let by_path = pages
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.path.clone(), idx))
            .collect();
        Self { pages, by_path }
    }

    pub fn pages(&self) -> &[PageConfig] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Lookup by request path; a trailing slash is ignored.
    pub fn by_path(&self, path: &str) -> Option<&PageConfig> {
        self.by_path
            .get(&normalize_path(path))
            .map(|&idx| &self.pages[idx])
    }

    pub fn by_slug(&self, slug: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    pub fn pages_of_kind(&self, kind: PageKind) -> impl Iterator<Item = &PageConfig> {
        self.pages.iter().filter(move |p| p.kind == kind)
    }
}

impl Default for PageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `/a/b` form: one leading slash, no trailing slash, `/` for the root.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    format!("/{}", trimmed)
}

// ============================================================================
// Built-in pages
// ============================================================================

fn faqs(items: &[(&str, &str)]) -> Vec<FaqEntry> {
    items.iter().map(|(q, a)| FaqEntry::new(*q, *a)).collect()
}

#[allow(clippy::too_many_arguments)]
fn landing(
    kind: PageKind,
    slug: &str,
    title: &str,
    description: &str,
    headline: &str,
    intro: &str,
    service_name: &str,
    items: &[(&str, &str)],
) -> PageConfig {
    let path = match kind {
        PageKind::Platform => format!("/platforms/{}", slug),
        _ => format!("/industries/{}", slug),
    };
    PageConfig {
        slug: slug.to_string(),
        path,
        kind,
        title: title.to_string(),
        description: description.to_string(),
        keywords: None,
        headline: headline.to_string(),
        intro: intro.to_string(),
        service_name: Some(service_name.to_string()),
        service_type: Some(SERVICE_TYPE.to_string()),
        area_served: Some("Worldwide".to_string()),
        og_title: None,
        og_description: None,
        og_image: None,
        faqs: faqs(items),
    }
}

fn home() -> PageConfig {
    PageConfig {
        slug: "home".to_string(),
        path: "/".to_string(),
        kind: PageKind::Home,
        title: "Moaz Haider | Ecommerce SEO Consultant".to_string(),
        description: "Ecommerce SEO consulting for online brands: technical audits, \
                      category and product page optimization, and content that ranks."
            .to_string(),
        keywords: Some("ecommerce seo consultant, shopify seo, technical seo audit".to_string()),
        headline: "Ecommerce SEO that turns search traffic into revenue".to_string(),
        intro: "I help online stores grow organic revenue with technical fixes, \
                category strategy and content built around buyer intent."
            .to_string(),
        service_name: None,
        service_type: None,
        area_served: None,
        og_title: None,
        og_description: None,
        og_image: None,
        faqs: faqs(&[
            (
                "What does an ecommerce SEO consultant do?",
                "An ecommerce SEO consultant audits your store, fixes crawl and indexing problems, \
                 optimizes category and product pages, and plans content that targets buyer searches.",
            ),
            (
                "How long does SEO take to show results?",
                "Most stores see measurable movement within three to six months, depending on \
                 competition, site health and how quickly recommendations are implemented.",
            ),
            (
                "Do you work with small stores?",
                "Yes. Engagements range from one-off audits for new stores to ongoing retainers \
                 for established brands.",
            ),
        ]),
    }
}

fn industries_hub() -> PageConfig {
    PageConfig {
        slug: "industries".to_string(),
        path: "/industries".to_string(),
        kind: PageKind::IndustryHub,
        title: "Industries | Ecommerce SEO by Vertical – Moaz Haider".to_string(),
        description: "Industry-specific ecommerce SEO for fashion, electronics, beauty, \
                      home decor, supplements and jewelry brands."
            .to_string(),
        keywords: None,
        headline: "SEO strategies built for your industry".to_string(),
        intro: "Every vertical has its own search behavior. Pick yours to see how the strategy changes."
            .to_string(),
        service_name: None,
        service_type: None,
        area_served: None,
        og_title: None,
        og_description: None,
        og_image: None,
        faqs: Vec::new(),
    }
}

fn fashion() -> PageConfig {
    let mut page = landing(
        PageKind::Industry,
        "fashion-ecommerce-seo",
        "Fashion Ecommerce SEO | SEO for Clothing & Apparel Brands – Moaz Haider",
        "Fashion ecommerce SEO for clothing and apparel brands: seasonal category planning, \
         size and color variant handling, and collection pages that rank.",
        "Fashion Ecommerce SEO for Clothing & Apparel Brands",
        "Fashion catalogs change every season. I build category structures and variant \
         handling that keep rankings stable while collections rotate.",
        "Fashion Ecommerce SEO",
        &[
            (
                "How do you handle seasonal collections for SEO?",
                "Evergreen category URLs carry the rankings, while seasonal collections live \
                 underneath them, so authority is not lost when a season ends.",
            ),
            (
                "Should size and color variants have their own URLs?",
                "Usually not. Variants are consolidated onto one product URL with canonical tags, \
                 unless a variant has its own meaningful search demand.",
            ),
            (
                "What happens to out-of-stock product pages?",
                "Temporarily unavailable products stay live with alternatives; discontinued \
                 products redirect to the closest category or successor product.",
            ),
            (
                "Can SEO help fashion brands compete with marketplaces?",
                "Yes. Brand-plus-category searches, long-tail style queries and editorial \
                 content are where independent fashion brands consistently win.",
            ),
        ],
    );
    page.keywords = Some("fashion ecommerce seo, clothing seo, apparel seo".to_string());
    page
}

fn electronics() -> PageConfig {
    landing(
        PageKind::Industry,
        "electronics-ecommerce-seo",
        "Electronics Ecommerce SEO | SEO for Consumer Electronics Stores – Moaz Haider",
        "Electronics ecommerce SEO: spec-driven product pages, faceted navigation control \
         and comparison content for consumer electronics retailers.",
        "Electronics Ecommerce SEO",
        "Electronics shoppers search by model number, spec and comparison. Your pages need \
         to answer all three.",
        "Electronics Ecommerce SEO",
        &[
            (
                "How do you stop faceted navigation from wasting crawl budget?",
                "Only filter combinations with real search demand get indexable URLs; the rest \
                 are kept out of the index with canonicals and robots rules.",
            ),
            (
                "Should I use manufacturer product descriptions?",
                "Manufacturer copy is duplicated across every retailer. Adding your own specs \
                 summary, use cases and comparisons gives Google a reason to rank you.",
            ),
            (
                "Do comparison pages help electronics stores rank?",
                "Yes. Comparison and best-of pages capture research-stage searches and link \
                 shoppers directly to the products being compared.",
            ),
        ],
    )
}

fn beauty() -> PageConfig {
    landing(
        PageKind::Industry,
        "beauty-cosmetics-seo",
        "Beauty & Cosmetics SEO | SEO for Skincare and Makeup Brands – Moaz Haider",
        "SEO for beauty and cosmetics brands: ingredient-led content, routine guides and \
         product pages that convert.",
        "Beauty & Cosmetics SEO",
        "Beauty buyers research ingredients and routines before they buy. Content that \
         answers those questions brings them to your products.",
        "Beauty & Cosmetics SEO",
        &[
            (
                "What content works best for beauty brands?",
                "Ingredient explainers, skin-type routines and how-to guides that link to the \
                 products used in each step.",
            ),
            (
                "How do you optimize product pages for shade ranges?",
                "Shades stay on one product URL with structured variant data, while shade \
                 finder content targets searches for specific tones.",
            ),
            (
                "Does SEO for beauty brands need E-E-A-T signals?",
                "Yes. Skincare touches health topics, so expert review, clear authorship and \
                 cited sources matter for rankings.",
            ),
        ],
    )
}

fn home_decor() -> PageConfig {
    landing(
        PageKind::Industry,
        "home-decor-furniture-seo",
        "Home Decor & Furniture SEO | SEO for Furniture Stores – Moaz Haider",
        "SEO for home decor and furniture retailers: room-based categories, material and \
         style filters, and inspiration content.",
        "Home Decor & Furniture SEO",
        "Furniture is a considered purchase. I structure your store around rooms, styles \
         and materials the way shoppers search.",
        "Home Decor & Furniture SEO",
        &[
            (
                "Should furniture categories be organized by room or by product type?",
                "Both. Product-type categories hold the main rankings, and room pages curate \
                 them for shoppers who search by space.",
            ),
            (
                "How do you rank for style searches like mid-century modern?",
                "Style landing pages with curated products, buying guidance and internal links \
                 from related categories.",
            ),
            (
                "Is image SEO important for furniture stores?",
                "Very. Descriptive file names, alt text and fast-loading images bring in image \
                 search traffic and improve product page quality.",
            ),
        ],
    )
}

fn supplements() -> PageConfig {
    landing(
        PageKind::Industry,
        "health-supplements-seo",
        "Health & Supplements SEO | SEO for Supplement Brands – Moaz Haider",
        "SEO for health and supplement brands: compliant, evidence-based content and \
         product pages that earn trust in a YMYL category.",
        "Health & Supplements SEO",
        "Supplements sit in a category where Google demands trust. Evidence-based content \
         and clear authorship are the foundation.",
        "Health & Supplements SEO",
        &[
            (
                "Why is SEO harder for supplement brands?",
                "Supplements are a Your Money or Your Life category, so Google weighs expertise, \
                 sources and site reputation heavily.",
            ),
            (
                "Can supplement brands make health claims in content?",
                "Content should stay within what regulations allow and cite research; compliant \
                 wording protects both rankings and the business.",
            ),
            (
                "What pages should a supplement store prioritize?",
                "Ingredient pages, benefit-led category pages and comparison content that \
                 answers what to take and why.",
            ),
        ],
    )
}

fn jewelry() -> PageConfig {
    landing(
        PageKind::Industry,
        "jewelry-accessories-seo",
        "Jewelry & Accessories SEO | SEO for Jewelry Brands – Moaz Haider",
        "SEO for jewelry and accessories brands: gift-intent content, material and stone \
         categories, and high-value product pages.",
        "Jewelry & Accessories SEO",
        "Jewelry searches spike around gifting seasons. I prepare your categories and \
         guides before demand arrives.",
        "Jewelry & Accessories SEO",
        &[
            (
                "How do jewelry brands rank for gift searches?",
                "Gift guides by recipient, occasion and budget, published well ahead of the \
                 season and linked from the main categories.",
            ),
            (
                "Should I create pages for each metal and gemstone?",
                "Yes, where there is search demand. Material and stone pages match how buyers \
                 narrow their choices.",
            ),
            (
                "Do product reviews help jewelry SEO?",
                "Reviews add fresh, unique content to product pages and can earn review stars \
                 in search results.",
            ),
        ],
    )
}

fn shopify() -> PageConfig {
    landing(
        PageKind::Platform,
        "shopify-seo",
        "Shopify SEO Consultant | Technical SEO for Shopify Stores – Moaz Haider",
        "Shopify SEO services: fix duplicate collection URLs, theme speed issues and \
         structured data on your Shopify store.",
        "Shopify SEO",
        "Shopify is a solid platform with a few well-known SEO traps. I fix them and build \
         on its strengths.",
        "Shopify SEO",
        &[
            (
                "Is Shopify good for SEO?",
                "Yes. Shopify handles the basics well; the gains come from fixing duplicate \
                 product paths, improving theme speed and strengthening collection pages.",
            ),
            (
                "How do you fix duplicate product URLs on Shopify?",
                "Theme links are updated to point at canonical product URLs so collection-scoped \
                 paths stop being crawled and linked.",
            ),
            (
                "Do Shopify apps slow down my store?",
                "Many do. An app audit removes unused scripts and replaces heavy apps with \
                 lighter theme code where possible.",
            ),
        ],
    )
}
