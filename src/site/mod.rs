//! Site rendering module.
//!
//! ## Pieces
//! 1. Metadata - page config to title / meta / canonical (`metadata`, `head`)
//! 2. Structured data - schema.org JSON-LD `@graph` per page (`structured_data`)
//! 3. FAQ accordion - single-open disclosure state (`faq`)
//! 4. Catalogue - the site's pages as data (`catalog`)
//! 5. Generator - full HTML documents via askama (`generator`)

pub mod types;
pub mod metadata;
pub mod head;
pub mod structured_data;
pub mod faq;
pub mod catalog;
pub mod generator;

pub use catalog::PageCatalog;
pub use faq::{check_faq_parity, AccordionState, FaqAccordion, FaqParity};
pub use generator::{RenderedPage, SiteGenerator, SitePage};
pub use head::{DocumentHead, HeadElement, HeadElementSet, MetaAttr};
pub use metadata::build_page_metadata;
pub use structured_data::{
    build_faq_graph, build_page_graph, site_anchors, to_json_ld, validate_graph,
    StructuredDataGraph,
};
pub use types::{FaqEntry, PageConfig, PageKind, PageMetadata, SiteIdentity};
