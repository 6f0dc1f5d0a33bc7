//! SEO landing-page renderer.
//!
//! Server-side rendering for a consultant's brochure site:
//! - `site/`: page catalogue, head metadata, JSON-LD structured data, FAQ accordion
//! - `config`: environment configuration
//! - `api_server`: axum HTTP surface (feature `api`)
//!
//! Head metadata is a pure function of page configuration; the rendered
//! document carries exactly one element per meta key, one canonical link and
//! one JSON-LD data island.

pub mod config;
pub mod error;
pub mod site;

// Axum API server (feature-gated)
#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use config::SiteConfig;
pub use error::{Result, SiteError};
pub use site::{
    build_faq_graph, build_page_metadata, check_faq_parity, AccordionState, DocumentHead,
    FaqAccordion, FaqEntry, HeadElementSet, MetaAttr, PageCatalog, PageConfig, PageKind,
    PageMetadata, SiteGenerator, SiteIdentity, StructuredDataGraph,
};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
