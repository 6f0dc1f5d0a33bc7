//! Library error type.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("failed to read page catalogue {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid page catalogue {path}: {source}")]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate page path {0} in catalogue")]
    DuplicatePath(String),

    #[error("duplicate page slug {0} in catalogue")]
    DuplicateSlug(String),

    #[error("page {0} not found")]
    UnknownPage(String),

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, SiteError>;
