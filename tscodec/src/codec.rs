/// This module provides the `Codec` struct and associated functionality for reading,
/// writing, caching, and loading translation catalogues.
/// The `Codec` struct manages a collection of `Catalog` instances and supports
/// format inference, language detection from file names, and serialization.
///
/// Qt Linguist `.ts` files and the JSON rendering of a catalogue are handled;
/// the format is picked from the file extension unless given explicitly.
///
use std::path::Path;

use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    formats::{FormatType, JsonFormat, TsFormat},
    lookup::Translator,
    read_options::ReadOptions,
    traits::Parser,
    types::Catalog,
};

/// Represents a collection of translation catalogues and provides methods to
/// read, write, cache, and load them.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    /// The catalogues managed by this codec, in load order.
    pub catalogs: Vec<Catalog>,
}

impl Codec {
    /// Creates a new, empty `Codec`.
    pub fn new() -> Self {
        Codec {
            catalogs: Vec::new(),
        }
    }

    /// Returns an iterator over all catalogues.
    pub fn iter(&self) -> std::slice::Iter<'_, Catalog> {
        self.catalogs.iter()
    }

    /// Finds a catalogue by language. Both `hu` and `hu_HU` match a
    /// catalogue whose language is `hu_HU`.
    pub fn get_by_language(&self, lang: &str) -> Option<&Catalog> {
        self.catalogs
            .iter()
            .find(|c| c.language == lang)
            .or_else(|| self.catalogs.iter().find(|c| c.has_language(lang)))
    }

    /// Adds a new catalogue to the collection.
    pub fn add_catalog(&mut self, catalog: Catalog) {
        self.catalogs.push(catalog);
    }

    /// Reads a catalogue file given its path and explicit format type.
    pub fn read_file_by_type<P: AsRef<Path>>(
        &mut self,
        path: P,
        format_type: FormatType,
    ) -> Result<(), Error> {
        let catalog = read_catalog(path, format_type, &ReadOptions::default())?;
        self.catalogs.push(catalog);
        Ok(())
    }

    /// Reads a catalogue file by inferring its format from the file extension.
    ///
    /// `lang` is used when the file does not name its language.
    pub fn read_file_by_extension<P: AsRef<Path>>(
        &mut self,
        path: P,
        lang: Option<String>,
    ) -> Result<(), Error> {
        let options = ReadOptions::new().with_language_hint(lang);
        self.read_file_with_options(path, &options)
    }

    /// Reads a catalogue file, inferring its format from the extension and
    /// applying `options`.
    pub fn read_file_with_options<P: AsRef<Path>>(
        &mut self,
        path: P,
        options: &ReadOptions,
    ) -> Result<(), Error> {
        let format_type = infer_format_from_extension(&path).ok_or_else(|| {
            Error::UnsupportedFormat(format!(
                "Unsupported file extension: {:?}.",
                path.as_ref().extension()
            ))
        })?;
        let catalog = read_catalog(path, format_type, options)?;
        self.catalogs.push(catalog);
        Ok(())
    }

    /// Writes the single managed catalogue to `path`, in the format named by
    /// its extension.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let catalog = match self.catalogs.as_slice() {
            [catalog] => catalog,
            [] => {
                return Err(Error::InvalidResource(
                    "No catalogue loaded to write.".to_string(),
                ));
            }
            many => {
                return Err(Error::InvalidResource(format!(
                    "Cannot write {} catalogues to a single file.",
                    many.len()
                )));
            }
        };
        let format_type = infer_format_from_extension(&path).ok_or_else(|| {
            Error::UnsupportedFormat(format!(
                "Unsupported file extension: {:?}.",
                path.as_ref().extension()
            ))
        })?;
        write_catalog(catalog, path, format_type)
    }

    /// Builds a lookup index for the catalogue of `lang`.
    pub fn translator(&self, lang: &str) -> Result<Translator, Error> {
        let catalog = self.get_by_language(lang).ok_or_else(|| {
            Error::InvalidResource(format!("No catalogue for language '{}'.", lang))
        })?;
        Translator::new(catalog)
    }

    /// Caches the current catalogues to a JSON file.
    pub fn cache_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }
        self.catalogs.write_to(path)?;
        tracing::debug!(path = %path.display(), catalogs = self.catalogs.len(), "cached catalogues");
        Ok(())
    }

    /// Loads catalogues from a JSON cache file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let catalogs = Vec::<Catalog>::read_from(path)?;
        Ok(Codec { catalogs })
    }
}

/// Reads one catalogue and applies `options` to it.
///
/// A missing `language` attribute is filled from the language hint, then from
/// the file name. Duplicate keys are logged, or rejected in strict mode.
pub fn read_catalog<P: AsRef<Path>>(
    path: P,
    format_type: FormatType,
    options: &ReadOptions,
) -> Result<Catalog, Error> {
    let path = path.as_ref();
    let mut catalog: Catalog = match format_type {
        FormatType::Ts => TsFormat::read_from(path)?.into(),
        FormatType::Json => JsonFormat::read_from(path)?.into(),
    };

    if catalog.language.is_empty() {
        if let Some(lang) = options
            .language_hint
            .clone()
            .or_else(|| infer_language_from_path(path))
        {
            catalog.language = lang;
        } else if options.strict {
            return Err(Error::InvalidResource(format!(
                "{} does not declare a language.",
                path.display()
            )));
        }
    } else if let Some(hint) = &options.language_hint {
        if !catalog.has_language(hint) {
            tracing::warn!(
                path = %path.display(),
                declared = %catalog.language,
                hint = %hint,
                "language hint differs from the declared language, keeping the declared one"
            );
        }
    }

    let duplicates = catalog.duplicate_keys();
    if let Some(first) = duplicates.first() {
        if options.strict {
            return Err(Error::DuplicateKey(first.clone()));
        }
        for key in &duplicates {
            tracing::warn!(path = %path.display(), "duplicate message {}", key);
        }
    }

    tracing::debug!(
        path = %path.display(),
        format = %format_type,
        language = %catalog.language,
        contexts = catalog.contexts.len(),
        messages = catalog.message_count(),
        "loaded catalogue"
    );
    Ok(catalog)
}

fn write_catalog<P: AsRef<Path>>(
    catalog: &Catalog,
    path: P,
    format_type: FormatType,
) -> Result<(), Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    match format_type {
        FormatType::Ts => TsFormat::from(catalog.clone()).write_to(path)?,
        FormatType::Json => JsonFormat::from(catalog.clone()).write_to(path)?,
    }
    tracing::debug!(path = %path.display(), format = %format_type, "wrote catalogue");
    Ok(())
}

/// Infers the language of a catalogue from its file name.
///
/// Qt names catalogues `<domain>_<locale>.ts`; the locale is the first
/// underscore-separated segment after the domain that reads as a language
/// subtag, together with everything after it.
///
/// # Example
/// ```rust
/// use tscodec::codec::infer_language_from_path;
/// assert_eq!(infer_language_from_path("nls/qt_hu.ts"), Some("hu".to_string()));
/// assert_eq!(infer_language_from_path("VirtualBox_pt_BR.ts"), Some("pt_BR".to_string()));
/// assert_eq!(infer_language_from_path("de.ts"), Some("de".to_string()));
/// assert_eq!(infer_language_from_path("translations.ts"), None);
/// ```
pub fn infer_language_from_path<P: AsRef<Path>>(path: P) -> Option<String> {
    let stem = path.as_ref().file_stem()?.to_str()?;
    let segments: Vec<&str> = stem.split('_').collect();

    let is_language_subtag =
        |s: &str| (2..=3).contains(&s.len()) && s.chars().all(|c| c.is_ascii_lowercase());
    let parses = |parts: &[&str]| parts.join("-").parse::<LanguageIdentifier>().is_ok();

    if segments.len() == 1 {
        return (is_language_subtag(stem) && parses(&segments)).then(|| stem.to_string());
    }

    (1..segments.len())
        .find(|&i| is_language_subtag(segments[i]) && parses(&segments[i..]))
        .map(|i| segments[i..].join("_"))
}

/// Convert a catalogue file from one format to another.
///
/// # Example
///
/// ```rust,no_run
/// use tscodec::{convert, formats::FormatType};
/// convert("qt_hu.ts", FormatType::Ts, "qt_hu.json", FormatType::Json)?;
/// # Ok::<(), tscodec::Error>(())
/// ```
pub fn convert<P: AsRef<Path>>(
    input: P,
    input_format: FormatType,
    output: P,
    output_format: FormatType,
) -> Result<(), Error> {
    let catalog = read_catalog(input, input_format, &ReadOptions::default())?;
    write_catalog(&catalog, output, output_format)
}

/// Infers a [`FormatType`] from a file path's extension.
///
/// # Example
/// ```rust
/// use tscodec::formats::FormatType;
/// use tscodec::codec::infer_format_from_extension;
/// assert_eq!(infer_format_from_extension("qt_hu.ts"), Some(FormatType::Ts));
/// assert_eq!(infer_format_from_extension("qt_hu.json"), Some(FormatType::Json));
/// assert_eq!(infer_format_from_extension("qt_hu.qm"), None);
/// ```
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FormatType> {
    match path.as_ref().extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("ts") => Some(FormatType::Ts),
        Some(ext) if ext.eq_ignore_ascii_case("json") => Some(FormatType::Json),
        _ => None,
    }
}

/// Convert a catalogue file, inferring both formats from file extensions.
///
/// # Example
///
/// ```rust,no_run
/// use tscodec::convert_auto;
/// convert_auto("qt_hu.ts", "qt_hu.json")?;
/// # Ok::<(), tscodec::Error>(())
/// ```
pub fn convert_auto<P: AsRef<Path>>(input: P, output: P) -> Result<(), Error> {
    let input_format = infer_format_from_extension(&input).ok_or_else(|| {
        Error::UnknownFormat(format!(
            "Cannot infer input format from extension: {:?}",
            input.as_ref().extension()
        ))
    })?;
    let output_format = infer_format_from_extension(&output).ok_or_else(|| {
        Error::UnknownFormat(format!(
            "Cannot infer output format from extension: {:?}",
            output.as_ref().extension()
        ))
    })?;
    convert(input, input_format, output, output_format)
}
