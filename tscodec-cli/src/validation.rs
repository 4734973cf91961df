use std::{path::Path, str::FromStr};
use tscodec::{formats::FormatType, infer_format_from_extension};
use unic_langid::LanguageIdentifier;

/// Validation context for different command types
pub struct ValidationContext {
    pub input_files: Vec<String>,
    pub output_file: Option<String>,
    pub language_code: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationContext {
    pub fn new() -> Self {
        Self {
            input_files: Vec::new(),
            output_file: None,
            language_code: None,
            input_format: None,
            output_format: None,
        }
    }

    pub fn with_input_file(mut self, file: String) -> Self {
        self.input_files.push(file);
        self
    }

    pub fn with_output_file(mut self, file: String) -> Self {
        self.output_file = Some(file);
        self
    }

    pub fn with_language_code(mut self, lang: Option<String>) -> Self {
        self.language_code = lang;
        self
    }

    pub fn with_input_format(mut self, format: Option<String>) -> Self {
        self.input_format = format;
        self
    }

    pub fn with_output_format(mut self, format: Option<String>) -> Self {
        self.output_format = format;
        self
    }
}

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    Ok(())
}

/// Validate a Qt (`hu_HU`) or BCP 47 (`hu-HU`) language code.
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    match lang.replace('_', "-").parse::<LanguageIdentifier>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!(
            "Invalid language code format: {}. Expected e.g. hu, hu_HU or pt-BR",
            lang
        )),
    }
}

/// Validate that a path names a catalogue format tscodec can handle.
pub fn validate_catalog_extension(path: &str) -> Result<(), String> {
    match infer_format_from_extension(path) {
        Some(_) => Ok(()),
        None => Err(format!(
            "Unsupported file extension: {}. Supported extensions: .ts, .json",
            path
        )),
    }
}

/// Validate a format name given on the command line
pub fn validate_format_name(format: &str) -> Result<(), String> {
    FormatType::from_str(format)
        .map(|_| ())
        .map_err(|_| format!("Unsupported format: {}. Supported formats: ts, json", format))
}

/// Validate a complete validation context
///
/// File extensions are only checked for sides without an explicit format.
pub fn validate_context(context: &ValidationContext) -> Result<(), String> {
    for (i, input) in context.input_files.iter().enumerate() {
        validate_file_path(input)
            .and_then(|_| match context.input_format {
                Some(_) => Ok(()),
                None => validate_catalog_extension(input),
            })
            .map_err(|e| format!("Input file {} validation failed: {}", i + 1, e))?;
    }

    if let Some(ref output) = context.output_file {
        match context.output_format {
            Some(_) => Ok(()),
            None => validate_catalog_extension(output),
        }
        .and_then(|_| validate_output_path(output))
            .map_err(|e| format!("Output validation failed: {}", e))?;
    }

    if let Some(ref format) = context.input_format {
        validate_format_name(format)
            .map_err(|e| format!("Input format validation failed: {}", e))?;
    }

    if let Some(ref format) = context.output_format {
        validate_format_name(format)
            .map_err(|e| format!("Output format validation failed: {}", e))?;
    }

    if let Some(ref lang) = context.language_code {
        validate_language_code(lang)
            .map_err(|e| format!("Language code validation failed: {}", e))?;
    }

    Ok(())
}
