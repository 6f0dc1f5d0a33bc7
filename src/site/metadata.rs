//! PageConfig -> PageMetadata builder.

use crate::error::Result;
use crate::site::types::{PageConfig, PageMetadata, SiteIdentity};

pub const OG_TYPE_WEBSITE: &str = "website";
pub const TWITTER_CARD: &str = "summary_large_image";

/// Build the head metadata for a page.
///
/// Canonical URL and `og:url` are the same absolute URL. Open Graph and
/// Twitter title/description default to the page title/description unless
/// the page sets `og_title`/`og_description`.
pub fn build_page_metadata(site: &SiteIdentity, page: &PageConfig) -> Result<PageMetadata> {
    let canonical_url = site.page_url(&page.path)?;
    let social_title = page.og_title.as_ref().unwrap_or(&page.title);
    let social_description = page.og_description.as_ref().unwrap_or(&page.description);

    Ok(PageMetadata {
        title: page.title.clone(),
        description: page.description.clone(),
        keywords: page.keywords.clone(),
        og_title: social_title.clone(),
        og_description: social_description.clone(),
        og_url: canonical_url.clone(),
        og_type: OG_TYPE_WEBSITE.to_string(),
        og_site_name: site.site_name.clone(),
        og_image: page.og_image.clone(),
        twitter_card: TWITTER_CARD.to_string(),
        twitter_title: social_title.clone(),
        twitter_description: social_description.clone(),
        canonical_url,
    })
}
