//! Runtime configuration read from environment variables.
//!
//! | Variable        | Default                  |
//! |-----------------|--------------------------|
//! | `SITE_BASE_URL` | `https://moazhaider.com` |
//! | `SITE_NAME`     | `Moaz Haider`            |
//! | `SITE_AUTHOR`   | `Moaz Haider`            |
//! | `PAGES_FILE`    | unset (built-in pages)   |
//! | `PORT`          | `3000`                   |
//! | `OUTPUT_DIR`    | `dist`                   |

use std::path::PathBuf;

use crate::error::Result;
use crate::site::catalog::PageCatalog;
use crate::site::types::SiteIdentity;

pub const DEFAULT_BASE_URL: &str = "https://moazhaider.com";
pub const DEFAULT_SITE_NAME: &str = "Moaz Haider";

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    pub site_name: String,
    pub author: String,
    pub pages_file: Option<PathBuf>,
    pub port: u16,
    pub output_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            author: DEFAULT_SITE_NAME.to_string(),
            pages_file: None,
            port: 3000,
            output_dir: PathBuf::from("dist"),
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            base_url: get("SITE_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            site_name: get("SITE_NAME").unwrap_or(defaults.site_name),
            author: get("SITE_AUTHOR").unwrap_or(defaults.author),
            pages_file: get("PAGES_FILE").map(PathBuf::from),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            output_dir: get("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        }
    }

    pub fn identity(&self) -> SiteIdentity {
        SiteIdentity {
            base_url: self.base_url.clone(),
            site_name: self.site_name.clone(),
            author: self.author.clone(),
            ..SiteIdentity::default()
        }
    }

    /// Built-in catalogue unless `PAGES_FILE` points at a JSON catalogue.
    pub fn load_catalog(&self) -> Result<PageCatalog> {
        match &self.pages_file {
            Some(path) => PageCatalog::from_json_file(path),
            None => Ok(PageCatalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = SiteConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.port, 3000);
        assert!(config.pages_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("SITE_BASE_URL", "https://example.com/"),
            ("PORT", "8080"),
            ("SITE_NAME", ""),
            ("OUTPUT_DIR", "/tmp/out"),
        ]
        .into_iter()
        .collect();

        let config = SiteConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.port, 8080);
        assert_eq!(config.site_name, DEFAULT_SITE_NAME);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = SiteConfig::from_lookup(|k| (k == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_load_catalog_from_pages_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");
        std::fs::write(
            &path,
            r#"[{"slug": "home", "path": "/", "kind": "home",
                 "title": "Home", "description": "Home page", "headline": "Home"}]"#,
        )
        .unwrap();

        let config = SiteConfig {
            pages_file: Some(path),
            ..SiteConfig::default()
        };
        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.by_path("/").is_some());
    }

    #[test]
    fn test_load_catalog_builtin_when_unset() {
        let catalog = SiteConfig::default().load_catalog().unwrap();
        assert_eq!(catalog.len(), 9);
    }
}
