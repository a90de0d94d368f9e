//! Interactive step-by-step generation wizard.
//!
//! Collects the topic, keywords, and tone, fetches a heading set for
//! review, then generates section content one heading at a time (or all
//! at once) before saving the assembled article.

use crate::config::Config;
use crate::error::Result;
use crate::session::{Orchestrator, Phase, SectionStatus, SessionForm};
use crate::store::Tone;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::time::Duration;

/// Run the generation wizard
pub async fn run_new(config: Config) -> Result<()> {
    tracing::info!("Starting generation wizard");

    let client = super::build_client(&config)?;
    let store = super::build_store(&config)?;
    let pacing = Duration::from_millis(config.generation.section_pacing_ms);
    let mut orchestrator = Orchestrator::new(client, pacing);

    let mut rl = DefaultEditor::new().map_err(|e| {
        crate::error::SeoForgeError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
    })?;

    println!("\n{}\n", "SEOForge — new article".bold());

    // Setup phase: collect the form, fetch headings.
    loop {
        let topic = match prompt(&mut rl, "Topic: ")? {
            Some(line) => line,
            None => return Ok(()),
        };
        let keywords = match prompt(&mut rl, "Keywords (comma-separated, optional): ")? {
            Some(line) => split_keywords(&line),
            None => return Ok(()),
        };
        let tone = match prompt(&mut rl, "Tone [professional/casual/formal]: ")? {
            Some(line) if line.is_empty() => Tone::parse(&config.defaults.tone)?,
            Some(line) => match Tone::parse(&line) {
                Ok(tone) => tone,
                Err(e) => {
                    println!("{}", e.to_string().red());
                    continue;
                }
            },
            None => return Ok(()),
        };

        println!("{}", "Generating headings...".cyan());
        match orchestrator
            .generate_headings(SessionForm {
                topic,
                keywords,
                tone,
            })
            .await
        {
            Ok(()) => break,
            Err(e) => {
                println!("{}", format!("Heading generation failed: {}", e).red());
                // The session is still in setup; let the user retry or bail.
                match prompt(&mut rl, "Try again? [y/N]: ")? {
                    Some(answer) if answer.eq_ignore_ascii_case("y") => continue,
                    _ => return Ok(()),
                }
            }
        }
    }

    // Headings and content phases: one menu loop.
    loop {
        print_session(&orchestrator);

        let line = match prompt(
            &mut rl,
            "[number] generate section, [a]ll, [p]review, [s]ave, [b]ack, [q]uit: ",
        )? {
            Some(line) => line,
            None => return Ok(()),
        };

        match line.to_lowercase().as_str() {
            "a" => {
                println!("{}", "Generating all remaining sections...".cyan());
                if let Err(e) = orchestrator.generate_all().await {
                    println!("{}", format!("Bulk generation stopped: {}", e).red());
                }
            }
            "p" => {
                println!("\n{}\n", orchestrator.session().assemble_article());
            }
            "s" => {
                if orchestrator.session().generated_count() == 0 {
                    println!("{}", "Nothing generated yet.".yellow());
                    continue;
                }
                match orchestrator.save(&store).await {
                    Ok(slug) => {
                        println!("{}", format!("Saved as '{}'.", slug).green());
                        println!("Use {} to keep editing.", format!("seoforge edit {}", slug).cyan());
                        return Ok(());
                    }
                    Err(e) => println!("{}", format!("Save failed: {}", e).red()),
                }
            }
            "b" => {
                let result = match orchestrator.session().phase {
                    Phase::Content => orchestrator.back_to_headings(),
                    _ => orchestrator.back_to_setup(),
                };
                if result.is_ok() && orchestrator.session().phase == Phase::Setup {
                    println!("{}", "Back to setup; start over with 'seoforge new'.".yellow());
                    return Ok(());
                }
            }
            "q" => return Ok(()),
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    if let Err(e) = orchestrator.generate_section(n - 1).await {
                        println!("{}", format!("Section generation failed: {}", e).red());
                    }
                }
                _ => println!("{}", "Unrecognized choice.".yellow()),
            },
        }
    }
}

/// Read one trimmed line; None means the user hit Ctrl-C/Ctrl-D
fn prompt(rl: &mut DefaultEditor, text: &str) -> Result<Option<String>> {
    match rl.readline(text) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(
            crate::error::SeoForgeError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
                .into(),
        ),
    }
}

fn split_keywords(line: &str) -> Vec<String> {
    line.split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

fn print_session<C: crate::generate::GenerationClient>(orchestrator: &Orchestrator<C>) {
    let session = orchestrator.session();
    let Some(headings) = &session.headings else {
        return;
    };

    println!("\n{}", headings.h1_heading.bold());
    println!("{}\n", headings.meta_description.dimmed());

    for (i, section) in session.sections.iter().enumerate() {
        let marker = match section.status {
            SectionStatus::Pending => "·".normal(),
            SectionStatus::Generating => "…".cyan(),
            SectionStatus::Generated => "✓".green(),
            SectionStatus::Failed => "✗".red(),
        };
        print!("  {} {}. {}", marker, i + 1, section.heading);
        if section.status == SectionStatus::Generated {
            print!(" {}", format!("({} words)", section.word_count).dimmed());
        }
        if let Some(message) = &section.error_message {
            print!(" {}", format!("— {}", message).red());
        }
        println!();
    }
    println!(
        "\n  {} of {} sections generated, {} words total\n",
        session.generated_count(),
        session.sections.len(),
        session.total_word_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keywords_trims_and_drops_empties() {
        assert_eq!(
            split_keywords(" pour over, espresso ,, beans "),
            vec!["pour over", "espresso", "beans"]
        );
        assert!(split_keywords("   ").is_empty());
    }
}
