//! Single-request article generation.
//!
//! Skips the wizard entirely: one backend call produces the whole
//! article, which is persisted immediately and summarized on stdout.

use crate::config::Config;
use crate::error::{Result, SeoForgeError};
use crate::generate::{ArticleRequest, GenerationClient, ParaphraseConfig};
use crate::store::{ArticleStore, NewArticle, Tone};
use colored::Colorize;

/// Options accepted by the quick command
#[derive(Debug, Clone)]
pub struct QuickOptions {
    pub topic: String,
    pub length: Option<u32>,
    pub keywords: Vec<String>,
    pub tone: Option<String>,
    pub paraphrase: bool,
}

/// Generate and persist a complete article in one request
pub async fn run_quick(config: Config, options: QuickOptions) -> Result<()> {
    let topic = options.topic.trim().to_string();
    if topic.is_empty() {
        return Err(SeoForgeError::Validation("topic is required".into()).into());
    }

    let target_length = options.length.unwrap_or(config.defaults.target_length);
    if !(100..=2000).contains(&target_length) {
        return Err(SeoForgeError::Validation(format!(
            "length must be between 100 and 2000, got {target_length}"
        ))
        .into());
    }

    let tone = match &options.tone {
        Some(name) => Tone::parse(name)?,
        None => Tone::parse(&config.defaults.tone)?,
    };

    let paraphrase_config = options.paraphrase.then(|| ParaphraseConfig {
        adequacy: config.defaults.paraphrase.adequacy,
        fluency: config.defaults.paraphrase.fluency,
        diversity: config.defaults.paraphrase.diversity,
        max_variations: config.defaults.paraphrase.max_variations,
    });

    let client = super::build_client(&config)?;
    let store = super::build_store(&config)?;

    println!("{}", format!("Generating article on '{}'...", topic).cyan());
    let response = client
        .generate_article(ArticleRequest {
            topic: topic.clone(),
            target_length,
            keywords: options.keywords.clone(),
            tone,
            include_paraphrasing: options.paraphrase,
            paraphrase_config,
        })
        .await?;

    // The backend may or may not return a heading set; fall back to
    // the topic as the title when it does not.
    let title = response
        .seo_content
        .as_ref()
        .map(|c| c.h1_heading.clone())
        .unwrap_or_else(|| topic.clone());

    let slug = store
        .create(NewArticle {
            title,
            content: response.generated_article.clone(),
            meta_description: response.meta_description.clone(),
            topic,
            keywords: options.keywords,
            tone,
            word_count: Some(response.word_count),
        })
        .await?;

    println!("{}", format!("Saved as '{}'.", slug).green());
    println!(
        "  {} words, readability {:.1}, generated in {:.1}s",
        response.word_count, response.readability_score, response.processing_time
    );
    if !response.keyword_density.is_empty() {
        let mut densities: Vec<_> = response.keyword_density.iter().collect();
        densities.sort_by(|a, b| a.0.cmp(b.0));
        for (keyword, density) in densities {
            println!("  {}: {:.2}%", keyword, density * 100.0);
        }
    }
    println!("Use {} to review it.", format!("seoforge show {}", slug).cyan());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(topic: &str) -> QuickOptions {
        QuickOptions {
            topic: topic.to_string(),
            length: None,
            keywords: vec![],
            tone: None,
            paraphrase: false,
        }
    }

    #[tokio::test]
    async fn test_quick_rejects_empty_topic() {
        let result = run_quick(Config::default(), options("   ")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_quick_rejects_out_of_range_length() {
        let mut opts = options("coffee");
        opts.length = Some(50);
        let result = run_quick(Config::default(), opts).await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("length must be between"));
    }

    #[tokio::test]
    async fn test_quick_rejects_unknown_tone() {
        let mut opts = options("coffee");
        opts.tone = Some("sarcastic".to_string());
        let result = run_quick(Config::default(), opts).await;
        assert!(result.unwrap_err().to_string().contains("unknown tone"));
    }
}
