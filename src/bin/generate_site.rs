//! Static Site Export
//!
//! Renders every catalogue page to `<OUTPUT_DIR>/<path>/index.html`.
//! Each page's JSON-LD graph is linted and its FAQ list compared with the
//! `FAQPage` entity before anything is written; any issue aborts the export.
//! Run with: cargo run --bin generate_site

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use rayon::prelude::*;
use seo_site::site::structured_data::{site_anchors, validate_graph};
use seo_site::{check_faq_parity, SiteConfig, SiteGenerator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn output_path(root: &Path, page_path: &str) -> PathBuf {
    let relative = page_path.trim_matches('/');
    if relative.is_empty() {
        root.join("index.html")
    } else {
        root.join(relative).join("index.html")
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seo_site=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SiteConfig::from_env();
    let catalog = config.load_catalog()?;
    let generator = SiteGenerator::new(config.identity(), catalog);

    tracing::info!(
        "Exporting {} pages to {}",
        generator.catalog().len(),
        config.output_dir.display()
    );

    // Lint all pages first
    let anchors = site_anchors(generator.site(), generator.catalog())?;
    let mut problems = Vec::new();
    for page in generator.catalog().pages() {
        let graph = generator.bind(page).structured_data()?;
        for issue in validate_graph(&graph, &anchors) {
            problems.push(format!("{}: {}", page.path, issue));
        }
        let parity = check_faq_parity(&page.faqs, &graph);
        if !parity.is_match() {
            problems.push(format!("{}: FAQ mismatch {:?}", page.path, parity));
        }
    }
    if !problems.is_empty() {
        for problem in &problems {
            tracing::error!("{}", problem);
        }
        bail!("{} structured-data issue(s); nothing written", problems.len());
    }

    let rendered = generator
        .catalog()
        .pages()
        .par_iter()
        .map(|page| generator.render(page, None))
        .collect::<Result<Vec<_>, _>>()?;

    for page in &rendered {
        let path = output_path(&config.output_dir, &page.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, &page.html).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("  ✓ {} -> {}", page.path, path.display());
    }

    tracing::info!("Done: {} pages written", rendered.len());
    Ok(())
}
