//! Interactive article editor.
//!
//! A readline loop over one stored article: edit the title, meta
//! description, and body, paraphrase selected passages through the
//! generation API, and save the changed fields back to the store.

use crate::config::Config;
use crate::editor::EditorState;
use crate::error::Result;
use crate::paraphrase::{ParaphraseAssistant, ParaphraseParams, Selection};
use crate::store::ArticleStore;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Run the editor loop for one article
pub async fn run_edit(config: Config, slug: &str) -> Result<()> {
    let client = super::build_client(&config)?;
    let store = super::build_store(&config)?;

    let record = store.get(slug).await?;
    let mut editor = EditorState::new(record);
    let mut assistant = ParaphraseAssistant::new(ParaphraseParams::from(&config.defaults.paraphrase));

    let mut rl = DefaultEditor::new().map_err(|e| {
        crate::error::SeoForgeError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
    })?;

    println!("\nEditing {} — type 'help' for commands\n", editor.slug().cyan());

    loop {
        let dirty = if editor.has_changes() { "*" } else { "" };
        let line = match rl.readline(&format!("{}{}> ", editor.slug(), dirty)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("Readline error: {:?}", e);
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        rl.add_history_entry(trimmed).ok();

        let (command, rest) = match trimmed.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (trimmed, ""),
        };

        match command {
            "help" => print_help(),
            "show" => {
                println!("\n{}", editor.title().bold());
                println!("{}\n", editor.meta_description().dimmed());
                println!("{}\n", editor.content());
            }
            "title" if !rest.is_empty() => editor.set_title(rest),
            "meta" if !rest.is_empty() => editor.set_meta_description(rest),
            "append" if !rest.is_empty() => {
                let mut content = editor.content().to_string();
                if !content.is_empty() {
                    content.push_str("\n\n");
                }
                content.push_str(rest);
                editor.set_content(content);
            }
            "status" => {
                if editor.has_changes() {
                    let diff = editor.diff();
                    let changed: Vec<&str> = [
                        diff.title.as_ref().map(|_| "title"),
                        diff.content.as_ref().map(|_| "content"),
                        diff.meta_description.as_ref().map(|_| "meta"),
                    ]
                    .into_iter()
                    .flatten()
                    .collect();
                    println!("{}", format!("Unsaved changes: {}", changed.join(", ")).yellow());
                } else {
                    println!("{}", "No unsaved changes.".green());
                }
            }
            "params" => match parse_params(rest, assistant.params()) {
                Ok(params) => {
                    if let Err(e) = assistant.set_params(params) {
                        println!("{}", e.to_string().red());
                    }
                }
                Err(message) => println!("{}", message.red()),
            },
            "para" if !rest.is_empty() => {
                let content = editor.content().to_string();
                match content.find(rest) {
                    Some(start) => {
                        let selection = Selection::new(start, start + rest.len());
                        if let Err(e) = assistant.select(&content, selection) {
                            println!("{}", e.to_string().red());
                            continue;
                        }
                        println!("{}", "Fetching variations...".cyan());
                        match assistant.request(&client, &content).await {
                            Ok(()) => print_variations(&assistant),
                            Err(e) => println!("{}", e.to_string().red()),
                        }
                    }
                    None => println!("{}", "Text not found in the article body.".yellow()),
                }
            }
            "use" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    let content = editor.content().to_string();
                    match assistant.apply_variation(&content, n - 1) {
                        Ok((buffer, _cursor)) => {
                            editor.set_content(buffer);
                            println!("{}", "Variation applied.".green());
                        }
                        Err(e) => println!("{}", e.to_string().red()),
                    }
                }
                _ => println!("{}", "Usage: use <number>".yellow()),
            },
            "save" => match editor.save(&store).await {
                Ok(()) => println!("{}", "Saved.".green()),
                Err(e) => println!("{}", format!("Save failed: {}", e).red()),
            },
            "revert" => {
                editor.revert();
                println!("{}", "Reverted to the last saved state.".yellow());
            }
            "quit" | "exit" => {
                if editor.has_changes() {
                    match rl.readline("Discard unsaved changes? [y/N]: ") {
                        Ok(answer) if answer.trim().eq_ignore_ascii_case("y") => break,
                        Ok(_) => continue,
                        Err(_) => break,
                    }
                }
                break;
            }
            _ => println!("{}", "Unrecognized command; type 'help'.".yellow()),
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_help() {
    println!("\nCommands:");
    println!("  show                     Print the working copy");
    println!("  title <text>             Replace the title");
    println!("  meta <text>              Replace the meta description");
    println!("  append <text>            Append a paragraph to the body");
    println!("  para <text>              Paraphrase the first occurrence of <text>");
    println!("  use <n>                  Apply variation n from the last paraphrase");
    println!("  params <a> <f> <d> <n>   Set adequacy/fluency/diversity (0-2) and variations (1-10)");
    println!("  status                   Show unsaved changes");
    println!("  save                     Persist the changed fields");
    println!("  revert                   Discard unsaved changes");
    println!("  quit                     Leave the editor\n");
}

fn print_variations(assistant: &ParaphraseAssistant) {
    let variations = assistant.variations();
    if variations.is_empty() {
        println!("{}", "No variations returned.".yellow());
        return;
    }
    println!();
    for (i, variation) in variations.iter().enumerate() {
        let confidence = variation
            .confidence
            .map(|c| format!(" ({:.0}%)", c * 100.0))
            .unwrap_or_default();
        println!("  {}{} {}", format!("{}.", i + 1).cyan(), confidence.dimmed(), variation.text);
    }
    println!("\nApply one with {}.\n", "use <number>".cyan());
}

/// Parse "adequacy fluency diversity max_variations", keeping the
/// current value for any omitted trailing field
fn parse_params(
    rest: &str,
    current: &ParaphraseParams,
) -> std::result::Result<ParaphraseParams, String> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.is_empty() || parts.len() > 4 {
        return Err("Usage: params <adequacy> [fluency] [diversity] [max_variations]".to_string());
    }

    let mut params = *current;
    let parse_knob = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| format!("'{s}' is not a number"))
    };
    params.adequacy = parse_knob(parts[0])?;
    if let Some(s) = parts.get(1) {
        params.fluency = parse_knob(s)?;
    }
    if let Some(s) = parts.get(2) {
        params.diversity = parse_knob(s)?;
    }
    if let Some(s) = parts.get(3) {
        params.max_variations = s
            .parse::<u32>()
            .map_err(|_| format!("'{s}' is not a whole number"))?;
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> ParaphraseParams {
        ParaphraseParams {
            adequacy: 1.0,
            fluency: 1.0,
            diversity: 1.0,
            max_variations: 3,
        }
    }

    #[test]
    fn test_parse_params_partial_keeps_current() {
        let params = parse_params("0.5 1.5", &current()).unwrap();
        assert_eq!(params.adequacy, 0.5);
        assert_eq!(params.fluency, 1.5);
        assert_eq!(params.diversity, 1.0);
        assert_eq!(params.max_variations, 3);
    }

    #[test]
    fn test_parse_params_full() {
        let params = parse_params("0.5 1.5 2.0 5", &current()).unwrap();
        assert_eq!(params.diversity, 2.0);
        assert_eq!(params.max_variations, 5);
    }

    #[test]
    fn test_parse_params_rejects_garbage() {
        assert!(parse_params("", &current()).is_err());
        assert!(parse_params("high", &current()).is_err());
        assert!(parse_params("1 1 1 1 1", &current()).is_err());
    }
}
