use std::str::FromStr;

use tscodec::{
    ReadOptions,
    codec::read_catalog,
    formats::{FormatType, JsonFormat, TsFormat},
    infer_format_from_extension,
    traits::Parser,
    validate_catalog,
};
use tscodec_cli::validation::{self, ValidationContext};

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub language: Option<String>,
    pub strict: bool,
}

fn resolve_format(path: &str, explicit: Option<&String>, role: &str) -> Result<FormatType, String> {
    match explicit {
        Some(name) => FormatType::from_str(name).map_err(|e| format!("Invalid {} format: {}", role, e)),
        None => infer_format_from_extension(path).ok_or_else(|| {
            format!(
                "Cannot infer {} format from {}. Use --{}-format ts|json",
                role, path, role
            )
        }),
    }
}

/// Converts one catalogue between `.ts` and JSON.
pub fn run_convert_command(input: &str, output: &str, options: &ConvertOptions) -> Result<(), String> {
    let input_format = resolve_format(input, options.input_format.as_ref(), "input")?;
    let output_format = resolve_format(output, options.output_format.as_ref(), "output")?;

    let context = ValidationContext::new()
        .with_input_file(input.to_string())
        .with_output_file(output.to_string())
        .with_language_code(options.language.clone())
        .with_input_format(options.input_format.clone())
        .with_output_format(options.output_format.clone());
    validation::validate_context(&context)?;

    let read_options = ReadOptions::new()
        .with_language_hint(options.language.clone())
        .with_strict(options.strict);
    let catalog = read_catalog(input, input_format, &read_options)
        .map_err(|e| format!("Error reading {}: {}", input, e))?;

    for issue in validate_catalog(&catalog) {
        tracing::warn!(%input, "{}", issue);
    }

    tracing::info!(%input, %output, from = %input_format, to = %output_format, "converting");

    let written = match output_format {
        FormatType::Ts => TsFormat::from(catalog).write_to(output),
        FormatType::Json => JsonFormat::from(catalog).write_to(output),
    };
    written.map_err(|e| format!("Error writing {}: {}", output, e))?;

    println!("✅ Converted {} -> {}", input, output);
    Ok(())
}
