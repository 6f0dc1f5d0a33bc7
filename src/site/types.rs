//! Shared data types for page rendering.
//!
//! - `SiteIdentity`: who the site belongs to (base URL, name, author)
//! - `PageConfig`: per-page literal configuration (the catalogue entries)
//! - `PageMetadata`: the head metadata derived from a page config
//! - `FaqEntry`: one question/answer pair, shared by the accordion and JSON-LD

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_BASE_URL, DEFAULT_SITE_NAME};
use crate::error::{Result, SiteError};

/// Owner of the site; used for `@id` anchors and Open Graph site name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteIdentity {
    pub base_url: String,
    pub site_name: String,
    pub author: String,
    pub author_job_title: String,
    pub author_same_as: Vec<String>,
    pub language: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            author: DEFAULT_SITE_NAME.to_string(),
            author_job_title: "Ecommerce SEO Consultant".to_string(),
            author_same_as: vec![
                "https://www.linkedin.com/in/moazhaider".to_string(),
                "https://x.com/moazhaider".to_string(),
            ],
            language: "en-US".to_string(),
        }
    }
}

impl SiteIdentity {
    /// Absolute URL for a site path. The result must parse as an absolute URL.
    pub fn page_url(&self, path: &str) -> Result<String> {
        let base = self.base_url.trim_end_matches('/');
        let url = if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        };

        url::Url::parse(&url).map_err(|source| SiteError::InvalidUrl {
            url: url.clone(),
            source,
        })?;
        Ok(url)
    }

    pub fn website_id(&self) -> String {
        format!("{}/#website", self.base_url.trim_end_matches('/'))
    }

    pub fn person_id(&self) -> String {
        format!("{}/#person", self.base_url.trim_end_matches('/'))
    }
}

/// Page category; decides which structured-data entities a page carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Home,
    IndustryHub,
    Industry,
    Platform,
}

/// One FAQ item. The same ordered list backs the visible accordion and the
/// `FAQPage` entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Literal configuration for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub slug: String,
    pub path: String,
    pub kind: PageKind,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Option<String>,
    pub headline: String,
    #[serde(default)]
    pub intro: String,
    /// Name of the offered service (landing pages only)
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub area_served: Option<String>,
    /// Social title/description; the page title/description when unset
    #[serde(default)]
    pub og_title: Option<String>,
    #[serde(default)]
    pub og_description: Option<String>,
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub faqs: Vec<FaqEntry>,
}

/// Head metadata for one page. Built fresh per render and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Option<String>,
    pub og_title: String,
    pub og_description: String,
    pub og_url: String,
    pub og_type: String,
    pub og_site_name: String,
    pub og_image: Option<String>,
    pub twitter_card: String,
    pub twitter_title: String,
    pub twitter_description: String,
    pub canonical_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_joins_without_double_slash() {
        let site = SiteIdentity {
            base_url: "https://moazhaider.com/".to_string(),
            ..SiteIdentity::default()
        };
        assert_eq!(
            site.page_url("/industries/fashion-ecommerce-seo").unwrap(),
            "https://moazhaider.com/industries/fashion-ecommerce-seo"
        );
        assert_eq!(site.page_url("/").unwrap(), "https://moazhaider.com/");
        assert_eq!(site.page_url("about").unwrap(), "https://moazhaider.com/about");
    }

    #[test]
    fn test_page_url_rejects_relative_base() {
        let site = SiteIdentity {
            base_url: "not a url".to_string(),
            ..SiteIdentity::default()
        };
        assert!(matches!(site.page_url("/"), Err(SiteError::InvalidUrl { .. })));
    }

    #[test]
    fn test_page_kind_serde_names() {
        let kind: PageKind = serde_json::from_str("\"industry_hub\"").unwrap();
        assert_eq!(kind, PageKind::IndustryHub);
    }
}
