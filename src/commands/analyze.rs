//! Remote SEO analysis of a stored article.

use crate::config::Config;
use crate::error::Result;
use crate::generate::{GenerationClient, SeoAnalysisRequest};
use crate::store::ArticleStore;
use colored::Colorize;
use prettytable::{format, Table};

/// Analyze a stored article and print the metrics
pub async fn run_analyze(config: Config, slug: &str, keywords: Vec<String>) -> Result<()> {
    let client = super::build_client(&config)?;
    let store = super::build_store(&config)?;

    let record = store.get(slug).await?;
    // CLI keywords override the ones the article was generated with.
    let target_keywords = if keywords.is_empty() {
        record.keywords.clone()
    } else {
        keywords
    };

    println!("{}", format!("Analyzing '{}'...", record.title).cyan());
    let analysis = client
        .analyze_seo(SeoAnalysisRequest {
            article_text: record.content.clone(),
            target_keywords,
        })
        .await?;

    println!("\n{}", record.title.bold());
    println!("  Words:       {}", analysis.word_count);
    println!("  Readability: {:.1}", analysis.readability_score);
    println!("  SEO score:   {:.1}", analysis.seo_score);

    if !analysis.keyword_density.is_empty() {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
        table.add_row(prettytable::row!["Keyword".bold(), "Density".bold()]);

        let mut densities: Vec<_> = analysis.keyword_density.iter().collect();
        densities.sort_by(|a, b| {
            b.1.partial_cmp(a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        for (keyword, density) in densities {
            table.add_row(prettytable::row![
                keyword.cyan(),
                format!("{:.2}%", density * 100.0)
            ]);
        }
        println!();
        table.printstd();
    }

    if !analysis.meta_description_suggestions.is_empty() {
        println!("\n{}", "Meta description suggestions:".bold());
        for suggestion in &analysis.meta_description_suggestions {
            println!("  - {}", suggestion);
        }
    }

    if !analysis.suggestions.is_empty() {
        println!("\n{}", "Suggestions:".bold());
        for suggestion in &analysis.suggestions {
            println!("  - {}", suggestion);
        }
    }
    println!();

    Ok(())
}
