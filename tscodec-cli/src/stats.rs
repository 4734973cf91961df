use serde_json::json;
use tscodec::{Catalog, TranslationStatus, plural_rules::collect_catalog_plural_issues};

#[derive(Default)]
struct CatalogStats {
    total: usize,
    finished: usize,
    unfinished: usize,
    obsolete: usize,
    vanished: usize,
    numerus: usize,
    empty_finished: usize,
}

impl CatalogStats {
    fn collect(catalog: &Catalog) -> Self {
        let mut stats = CatalogStats::default();
        for (_, message) in catalog.messages() {
            stats.total += 1;
            match message.status {
                TranslationStatus::Finished => {
                    stats.finished += 1;
                    if message.translation.is_empty() {
                        stats.empty_finished += 1;
                    }
                }
                TranslationStatus::Unfinished => stats.unfinished += 1,
                TranslationStatus::Obsolete => stats.obsolete += 1,
                TranslationStatus::Vanished => stats.vanished += 1,
            }
            if message.numerus {
                stats.numerus += 1;
            }
        }
        stats
    }

    /// Finished share of the messages a runtime would ship.
    fn completion_percent(&self) -> f64 {
        let active = self.finished + self.unfinished;
        if active == 0 {
            100.0
        } else {
            (self.finished as f64) * 100.0 / (active as f64)
        }
    }
}

pub fn print_stats(catalog: &Catalog, json_output: bool) -> Result<(), String> {
    let stats = CatalogStats::collect(catalog);
    let plural_issues = collect_catalog_plural_issues(catalog).len();
    let percent = stats.completion_percent();

    if json_output {
        let per_context: Vec<_> = catalog
            .contexts
            .iter()
            .map(|c| {
                let unfinished = c
                    .messages
                    .iter()
                    .filter(|m| m.status == TranslationStatus::Unfinished)
                    .count();
                json!({
                    "name": c.name,
                    "messages": c.messages.len(),
                    "unfinished": unfinished,
                })
            })
            .collect();
        let body = json!({
            "language": catalog.language,
            "version": catalog.version,
            "contexts": catalog.contexts.len(),
            "messages": stats.total,
            "by_status": {
                "finished": stats.finished,
                "unfinished": stats.unfinished,
                "obsolete": stats.obsolete,
                "vanished": stats.vanished,
            },
            "numerus": stats.numerus,
            "empty_finished": stats.empty_finished,
            "completion_percent": (percent * 100.0).round() / 100.0,
            "plural_issues": plural_issues,
            "per_context": per_context,
        });
        let text = serde_json::to_string_pretty(&body).map_err(|e| e.to_string())?;
        println!("{}", text);
        return Ok(());
    }

    println!("=== Stats ===");
    println!("Language: {}", catalog.language);
    println!("Contexts: {}", catalog.contexts.len());
    println!("Messages: {}", stats.total);
    println!("  By status:");
    for (k, v) in [
        ("finished", stats.finished),
        ("unfinished", stats.unfinished),
        ("obsolete", stats.obsolete),
        ("vanished", stats.vanished),
    ] {
        println!("    {}: {}", k, v);
    }
    println!("  Numerus messages: {}", stats.numerus);
    println!("  Intentionally empty: {}", stats.empty_finished);
    println!("  Completion: {:.2}%", percent);
    println!("  Plural form issues: {}", plural_issues);
    Ok(())
}
