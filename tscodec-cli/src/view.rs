use tscodec::{Catalog, Message, Translation, TranslationStatus};
use unicode_width::UnicodeWidthChar;

const MAX_WIDTH: usize = 50;

/// Which messages `view` prints.
#[derive(Debug, Default)]
pub struct ViewFilter {
    pub context: Option<String>,
    pub status: Option<TranslationStatus>,
}

impl ViewFilter {
    fn accepts(&self, context: &str, message: &Message) -> bool {
        self.context.as_deref().is_none_or(|c| c == context)
            && self.status.as_ref().is_none_or(|s| *s == message.status)
    }
}

/// Shortens `value` to at most `MAX_WIDTH` terminal columns.
///
/// Line breaks are shown as `\n` so every message stays on one line.
pub fn truncate(value: &str) -> String {
    let flat = value.replace('\n', "\\n");
    let mut width = 0;
    let mut out = String::new();
    for c in flat.chars() {
        width += c.width().unwrap_or(0);
        if width > MAX_WIDTH {
            out.push_str("...");
            return out;
        }
        out.push(c);
    }
    out
}

fn shown(value: &str, full: bool) -> String {
    if full {
        value.to_string()
    } else {
        truncate(value)
    }
}

/// Print a view of the messages in a catalogue.
pub fn print_view(catalog: &Catalog, filter: &ViewFilter, full: bool) -> Result<(), String> {
    if let Some(context) = &filter.context {
        if catalog.find_context(context).is_none() {
            return Err(format!("No context named '{}'", context));
        }
    }

    println!("=== Catalog ===");
    println!("Language: {}", catalog.language);
    if let Some(version) = &catalog.version {
        println!("Version: {}", version);
    }
    if let Some(source_language) = &catalog.source_language {
        println!("Source language: {}", source_language);
    }
    println!("Contexts: {}", catalog.contexts.len());
    println!("Messages: {}", catalog.message_count());

    let mut shown_count = 0;
    for context in &catalog.contexts {
        let messages: Vec<&Message> = context
            .messages
            .iter()
            .filter(|m| filter.accepts(&context.name, m))
            .collect();
        if messages.is_empty() {
            continue;
        }

        println!("\n=== Context: {} ===", context.name);
        for message in messages {
            shown_count += 1;
            println!("\n  Source: {}", shown(&message.source, full));
            println!("    Status: {}", message.status);
            if let Some(comment) = &message.comment {
                println!("    Comment: {}", shown(comment, full));
            }
            if let Some(extra) = &message.extra_comment {
                println!("    Developer comment: {}", shown(extra, full));
            }
            match &message.translation {
                Translation::Singular(value) => {
                    println!("    Translation: {}", shown(value, full));
                }
                Translation::Plural(forms) => {
                    println!("    Plural forms: {}", forms.len());
                    for (i, form) in forms.iter().enumerate() {
                        println!("      [{}]: {}", i, shown(form, full));
                    }
                }
            }
            if full {
                for location in &message.locations {
                    println!(
                        "    Location: {}:{}",
                        location.filename.as_deref().unwrap_or("-"),
                        location.line.as_deref().unwrap_or("-")
                    );
                }
            }
        }
    }

    if shown_count == 0 {
        println!("\nNo messages match the filter.");
    }
    Ok(())
}
