//! Listing, showing, and deleting stored articles.

use crate::config::Config;
use crate::error::Result;
use crate::store::ArticleStore;
use colored::Colorize;
use prettytable::{format, Table};

/// List stored articles, newest first
pub async fn run_list(config: Config) -> Result<()> {
    let store = super::build_store(&config)?;
    let summaries = store.list().await?;

    if summaries.is_empty() {
        println!("{}", "No articles stored yet.".yellow());
        println!("Use {} to create one.", "seoforge new".cyan());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "Slug".bold(),
        "Title".bold(),
        "Words".bold(),
        "Created".bold()
    ]);

    for summary in summaries {
        let title = truncate_title(&summary.title, 50);
        let words = summary
            .word_count
            .map(|w| w.to_string())
            .unwrap_or_else(|| "-".to_string());
        let created = summary.created_at.format("%Y-%m-%d %H:%M").to_string();

        table.add_row(prettytable::row![summary.slug.cyan(), title, words, created]);
    }

    println!("\nStored Articles:");
    table.printstd();
    println!();
    println!("Use {} to open one.", "seoforge edit <slug>".cyan());
    println!();

    Ok(())
}

/// Cut a title down to `max_chars` characters for the listing table
///
/// Counts and cuts on characters, not bytes, so multi-byte titles
/// never split mid-character.
fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    let kept: String = title.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Print one stored article
pub async fn run_show(config: Config, slug: &str) -> Result<()> {
    let store = super::build_store(&config)?;
    let record = store.get(slug).await?;

    println!("\n{}", record.title.bold());
    println!("{}", record.meta_description.dimmed());
    println!(
        "{}",
        format!(
            "slug: {} | tone: {} | keywords: {}",
            record.slug,
            record.tone,
            if record.keywords.is_empty() {
                "-".to_string()
            } else {
                record.keywords.join(", ")
            }
        )
        .dimmed()
    );
    if let Some(words) = record.word_count {
        println!("{}", format!("{} words", words).dimmed());
    }
    println!("\n{}\n", record.content);

    Ok(())
}

/// Delete a stored article
pub async fn run_delete(config: Config, slug: &str) -> Result<()> {
    let store = super::build_store(&config)?;
    store.delete(slug).await?;
    println!("{}", format!("Deleted article '{}'", slug).green());
    Ok(())
}
