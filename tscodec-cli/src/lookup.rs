use tscodec::{Catalog, Lookup, Translator};

pub struct LookupQuery {
    pub context: String,
    pub source: String,
    pub comment: Option<String>,
    pub count: Option<u64>,
    /// Print the source text instead of failing when there is no translation.
    pub fallback: bool,
}

/// Resolves one message and prints the result to stdout.
pub fn run_lookup_command(catalog: &Catalog, query: &LookupQuery) -> Result<(), String> {
    let translator = Translator::new(catalog).map_err(|e| e.to_string())?;
    let comment = query.comment.as_deref();

    if query.fallback {
        println!(
            "{}",
            translator.translate(&query.context, &query.source, comment, query.count)
        );
        return Ok(());
    }

    let found = match query.count {
        Some(n) => translator.lookup_plural(&query.context, &query.source, comment, n),
        None => translator.lookup(&query.context, &query.source, comment),
    };

    match found {
        Lookup::Translated(text) => {
            println!("{}", text);
            Ok(())
        }
        Lookup::Plural(forms) => {
            for (i, form) in forms.iter().enumerate() {
                println!("[{}] {}", i, form);
            }
            Ok(())
        }
        Lookup::Unfinished => Err(format!(
            "Translation of '{}' in context '{}' is unfinished",
            query.source, query.context
        )),
        Lookup::NotFound => Err(format!(
            "No message '{}' in context '{}'",
            query.source, query.context
        )),
    }
}
