use tscodec::{Catalog, validate_catalog};

/// Runs the catalogue checks and reports every issue.
///
/// Returns an error when at least one issue was found.
pub fn run_validate_command(catalog: &Catalog, input: &str, json_output: bool) -> Result<(), String> {
    let issues = validate_catalog(catalog);

    if json_output {
        let text = serde_json::to_string_pretty(&issues).map_err(|e| e.to_string())?;
        println!("{}", text);
    } else {
        for issue in &issues {
            eprintln!("  {}", issue);
        }
    }

    if issues.is_empty() {
        if !json_output {
            println!("✅ {}: no issues found", input);
        }
        Ok(())
    } else {
        Err(format!(
            "Validation failed: {} issue(s) in {}",
            issues.len(),
            input
        ))
    }
}
