//! Core types for tscodec.
//! The `.ts` reader decodes into these; writers serialize these.

use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{error::Error, traits::Parser};

impl Parser for Vec<Catalog> {
    /// Parse from any reader.
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Json)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer(&mut writer, self).map_err(Error::Json)
    }
}

/// A complete translation catalogue (corresponds to one `.ts` file).
///
/// Holds the target locale and every context in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Catalog {
    /// Target locale as written in the file (e.g. `hu_HU`). Empty when absent.
    #[serde(default)]
    pub language: String,

    /// Locale of the source strings (`sourcelanguage` attribute).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub source_language: Option<String>,

    /// Format version of the `TS` root (e.g. `2.0`, `2.1`).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub version: Option<String>,

    /// Ordered list of all contexts in this catalogue.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl Catalog {
    pub fn new(language: impl Into<String>) -> Self {
        Catalog {
            language: language.into(),
            version: Some("2.1".to_string()),
            ..Default::default()
        }
    }

    pub fn add_context(&mut self, context: Context) {
        self.contexts.push(context);
    }

    pub fn find_context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Finds a message by its full lookup key.
    ///
    /// A missing comment and an empty comment address the same message.
    pub fn find_message(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Message> {
        let comment = comment.unwrap_or_default();
        self.contexts
            .iter()
            .filter(|c| c.name == context)
            .flat_map(|c| c.messages.iter())
            .find(|m| m.source == source && m.comment_or_empty() == comment)
    }

    /// Iterates every message together with the name of its context.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.contexts
            .iter()
            .flat_map(|c| c.messages.iter().map(move |m| (c.name.as_str(), m)))
    }

    /// Number of messages across all contexts.
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    /// Returns every key that occurs more than once, in document order of
    /// the repeated occurrence.
    ///
    /// Contexts sharing a name are treated as one context.
    pub fn duplicate_keys(&self) -> Vec<MessageKey> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for (context, message) in self.messages() {
            let key = message.key(context);
            if !seen.insert(key.clone()) {
                duplicates.push(key);
            }
        }
        duplicates
    }

    /// Parses the `language` attribute into a BCP 47 identifier.
    ///
    /// Qt writes locales with an underscore (`hu_HU`); it is normalized first.
    pub fn parse_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.language.replace('_', "-").parse().ok()
    }

    /// Check if this catalogue targets a specific language.
    pub fn has_language(&self, lang: &str) -> bool {
        match (
            self.parse_language_identifier(),
            lang.replace('_', "-").parse::<LanguageIdentifier>(),
        ) {
            (Some(lang_id), Ok(target_lang)) => lang_id.language == target_lang.language,
            _ => false,
        }
    }

    /// Counts messages per translation state.
    pub fn status_counts(&self) -> HashMap<TranslationStatus, usize> {
        let mut counts = HashMap::new();
        for (_, message) in self.messages() {
            *counts.entry(message.status.clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Catalog {{ language: {}, contexts: {}, messages: {} }}",
            self.language,
            self.contexts.len(),
            self.message_count()
        )
    }
}

/// A named group of messages, typically one per UI class.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Context {
    pub name: String,

    /// Context-level comment, rarely used by Linguist.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub comment: Option<String>,

    /// Legacy `encoding` attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub encoding: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Context {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn find_message(&self, source: &str, comment: Option<&str>) -> Option<&Message> {
        let comment = comment.unwrap_or_default();
        self.messages
            .iter()
            .find(|m| m.source == source && m.comment_or_empty() == comment)
    }
}

/// One translatable unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Message {
    /// Optional message id (`id` attribute, used by id-based translation).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub id: Option<String>,

    /// Source text, kept verbatim including `%1` style placeholders.
    pub source: String,

    /// Disambiguating comment. Part of the lookup key.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub comment: Option<String>,

    pub translation: Translation,

    pub status: TranslationStatus,

    /// Whether the message needs plural form selection (`numerus="yes"`).
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    #[serde(default)]
    pub numerus: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub locations: Vec<Location>,

    /// Previous source text, left behind by a merge.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub old_source: Option<String>,

    /// Previous disambiguating comment, left behind by a merge.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub old_comment: Option<String>,

    /// Developer comment (`extracomment`).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub extra_comment: Option<String>,

    /// Translator comment (`translatorcomment`).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub translator_comment: Option<String>,
}

impl Message {
    /// Creates a finished singular message.
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Message {
            source: source.into(),
            translation: Translation::Singular(translation.into()),
            status: TranslationStatus::Finished,
            ..Default::default()
        }
    }

    /// Creates an unfinished message with an empty translation.
    pub fn unfinished(source: impl Into<String>) -> Self {
        Message {
            source: source.into(),
            translation: Translation::Singular(String::new()),
            status: TranslationStatus::Unfinished,
            ..Default::default()
        }
    }

    /// Creates a finished numerus message with the given plural forms.
    pub fn plural(source: impl Into<String>, forms: Vec<String>) -> Self {
        Message {
            source: source.into(),
            translation: Translation::Plural(forms),
            status: TranslationStatus::Finished,
            numerus: true,
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    pub(crate) fn comment_or_empty(&self) -> &str {
        self.comment.as_deref().unwrap_or_default()
    }

    pub fn key(&self, context: &str) -> MessageKey {
        MessageKey::new(context, &self.source, self.comment.as_deref())
    }

    /// Whether the translation carries any text.
    pub fn is_translated(&self) -> bool {
        !self.translation.is_empty()
    }

    /// Whether a runtime loader would ship this message.
    pub fn is_active(&self) -> bool {
        !matches!(
            self.status,
            TranslationStatus::Obsolete | TranslationStatus::Vanished
        )
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Message {{ source: {}, translation: {}, status: {} }}",
            self.source, self.translation, self.status
        )
    }
}

/// The lookup key of a message: context, source and disambiguating comment.
///
/// A missing comment is stored as the empty string, so `None` and `Some("")`
/// produce equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MessageKey {
    pub context: String,
    pub source: String,
    pub comment: String,
}

impl MessageKey {
    pub fn new(context: &str, source: &str, comment: Option<&str>) -> Self {
        MessageKey {
            context: context.to_string(),
            source: source.to_string(),
            comment: comment.unwrap_or_default().to_string(),
        }
    }
}

impl Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.comment.is_empty() {
            write!(f, "{}::\"{}\"", self.context, self.source)
        } else {
            write!(f, "{}::\"{}\" ({})", self.context, self.source, self.comment)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Translation {
    /// A single translation without plural forms.
    Singular(String),

    /// Plural forms in the order the target language's rule indexes them.
    Plural(Vec<String>),
}

impl Default for Translation {
    fn default() -> Self {
        Translation::Singular(String::new())
    }
}

impl Translation {
    /// True when there is no text at all (empty singular, or no non-empty form).
    pub fn is_empty(&self) -> bool {
        match self {
            Translation::Singular(value) => value.is_empty(),
            Translation::Plural(forms) => forms.iter().all(String::is_empty),
        }
    }

    /// All text fragments of this translation.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Translation::Singular(value) => vec![value.as_str()],
            Translation::Plural(forms) => forms.iter().map(String::as_str).collect(),
        }
    }

    pub fn form_count(&self) -> usize {
        match self {
            Translation::Singular(_) => 1,
            Translation::Plural(forms) => forms.len(),
        }
    }
}

impl Display for Translation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Translation::Singular(value) => write!(f, "{}", value),
            Translation::Plural(forms) => write!(f, "[{}]", forms.join(" | ")),
        }
    }
}

/// Translation state, from the `type` attribute of `<translation>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    /// No `type` attribute: the translation is done.
    #[default]
    Finished,

    /// The message still needs work.
    Unfinished,

    /// The source string was removed from the application.
    Obsolete,

    /// Like `Obsolete`, written by newer Linguist versions.
    Vanished,
}

impl TranslationStatus {
    /// The value of the `type` attribute, or `None` for finished messages.
    pub fn type_attribute(&self) -> Option<&'static str> {
        match self {
            TranslationStatus::Finished => None,
            TranslationStatus::Unfinished => Some("unfinished"),
            TranslationStatus::Obsolete => Some("obsolete"),
            TranslationStatus::Vanished => Some("vanished"),
        }
    }
}

impl Display for TranslationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TranslationStatus::Finished => "finished",
            TranslationStatus::Unfinished => "unfinished",
            TranslationStatus::Obsolete => "obsolete",
            TranslationStatus::Vanished => "vanished",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TranslationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "finished" => Ok(TranslationStatus::Finished),
            "unfinished" => Ok(TranslationStatus::Unfinished),
            "obsolete" => Ok(TranslationStatus::Obsolete),
            "vanished" => Ok(TranslationStatus::Vanished),
            _ => Err(format!("Unknown translation type: {}", s)),
        }
    }
}

/// Source-file provenance of a message. Advisory only.
///
/// `line` is kept exactly as written: Linguist emits either absolute line
/// numbers or offsets relative to the previous location (`+12`, `-3`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub filename: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub line: Option<String>,
}

impl Location {
    pub fn new(filename: Option<&str>, line: Option<&str>) -> Self {
        Location {
            filename: filename.map(str::to_string),
            line: line.map(str::to_string),
        }
    }

    /// Whether the line is an offset from the previous location.
    pub fn is_relative(&self) -> bool {
        self.line
            .as_deref()
            .is_some_and(|l| l.starts_with('+') || l.starts_with('-'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let mut dialog = Context::new("QFileDialog");
        dialog.add_message(Message::new("Open", "Megnyitás"));
        dialog.add_message(Message::unfinished("Detail View"));

        let mut model = Context::new("QDirModel");
        model.add_message(Message::new("Kind", "Típus").with_comment("Match OS X Finder"));
        model.add_message(Message::new("Type", "Típus").with_comment("All other platforms"));

        let mut catalog = Catalog::new("hu_HU");
        catalog.add_context(dialog);
        catalog.add_context(model);
        catalog
    }

    #[test]
    fn test_catalog_find_message() {
        let catalog = sample_catalog();
        let message = catalog.find_message("QFileDialog", "Open", None).unwrap();
        assert_eq!(
            message.translation,
            Translation::Singular("Megnyitás".to_string())
        );
        assert!(catalog.find_message("QFileDialog", "Close", None).is_none());
        assert!(catalog.find_message("QDirModel", "Kind", None).is_none());
        assert!(
            catalog
                .find_message("QDirModel", "Kind", Some("Match OS X Finder"))
                .is_some()
        );
    }

    #[test]
    fn test_empty_comment_matches_missing_comment() {
        let catalog = sample_catalog();
        assert!(catalog.find_message("QFileDialog", "Open", Some("")).is_some());
        assert_eq!(
            MessageKey::new("C", "S", None),
            MessageKey::new("C", "S", Some(""))
        );
    }

    #[test]
    fn test_catalog_message_count_and_iteration() {
        let catalog = sample_catalog();
        assert_eq!(catalog.message_count(), 4);
        let contexts: Vec<&str> = catalog.messages().map(|(c, _)| c).collect();
        assert_eq!(
            contexts,
            vec!["QFileDialog", "QFileDialog", "QDirModel", "QDirModel"]
        );
    }

    #[test]
    fn test_duplicate_keys() {
        let mut catalog = sample_catalog();
        assert!(catalog.duplicate_keys().is_empty());

        catalog.contexts[0].add_message(Message::new("Open", "Nyitás"));
        let duplicates = catalog.duplicate_keys();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0], MessageKey::new("QFileDialog", "Open", None));
    }

    #[test]
    fn test_duplicate_keys_across_split_contexts() {
        let mut catalog = sample_catalog();
        let mut again = Context::new("QFileDialog");
        again.add_message(Message::new("Open", "Nyitás"));
        catalog.add_context(again);
        assert_eq!(catalog.duplicate_keys().len(), 1);
    }

    #[test]
    fn test_parse_language_identifier_with_underscore() {
        let catalog = Catalog::new("hu_HU");
        let lang_id = catalog.parse_language_identifier().unwrap();
        assert_eq!(lang_id.language.as_str(), "hu");
        assert_eq!(lang_id.region.unwrap().as_str(), "HU");
        assert!(catalog.has_language("hu"));
        assert!(!catalog.has_language("de"));
    }

    #[test]
    fn test_status_counts() {
        let counts = sample_catalog().status_counts();
        assert_eq!(counts.get(&TranslationStatus::Finished), Some(&3));
        assert_eq!(counts.get(&TranslationStatus::Unfinished), Some(&1));
    }

    #[test]
    fn test_translation_is_empty() {
        assert!(Translation::Singular(String::new()).is_empty());
        assert!(Translation::Plural(vec![]).is_empty());
        assert!(Translation::Plural(vec![String::new()]).is_empty());
        assert!(!Translation::Plural(vec!["x".to_string()]).is_empty());
    }

    #[test]
    fn test_translation_status_from_str() {
        assert_eq!(
            TranslationStatus::from_str("unfinished").unwrap(),
            TranslationStatus::Unfinished
        );
        assert_eq!(
            TranslationStatus::from_str("OBSOLETE").unwrap(),
            TranslationStatus::Obsolete
        );
        assert_eq!(
            TranslationStatus::from_str("").unwrap(),
            TranslationStatus::Finished
        );
        assert!(TranslationStatus::from_str("done").is_err());
    }

    #[test]
    fn test_location_is_relative() {
        assert!(Location::new(None, Some("+1")).is_relative());
        assert!(Location::new(Some("a.cpp"), Some("-4")).is_relative());
        assert!(!Location::new(Some("a.cpp"), Some("120")).is_relative());
        assert!(!Location::new(Some("a.cpp"), None).is_relative());
    }

    #[test]
    fn test_message_key_display() {
        let key = MessageKey::new("QDirModel", "Kind", Some("Match OS X Finder"));
        assert_eq!(key.to_string(), "QDirModel::\"Kind\" (Match OS X Finder)");
    }

    #[test]
    fn test_catalog_json_parser_trait() {
        let catalogs = vec![sample_catalog()];
        let mut writer = Vec::new();
        catalogs.to_writer(&mut writer).unwrap();

        let parsed = Vec::<Catalog>::from_reader(std::io::Cursor::new(writer)).unwrap();
        assert_eq!(parsed, catalogs);
    }
}
