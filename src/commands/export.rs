//! Front-mattered markdown export.

use crate::config::Config;
use crate::error::Result;
use crate::export::to_markdown;
use crate::store::ArticleStore;
use colored::Colorize;
use std::path::PathBuf;

/// Export a stored article as markdown with a YAML header
pub async fn run_export(config: Config, slug: &str, output: Option<PathBuf>) -> Result<()> {
    let store = super::build_store(&config)?;
    let record = store.get(slug).await?;

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.md", record.slug)));
    let markdown = to_markdown(&record)?;
    std::fs::write(&path, markdown).map_err(crate::error::SeoForgeError::Io)?;

    println!(
        "{}",
        format!("Exported '{}' to {}", record.slug, path.display()).green()
    );
    Ok(())
}
