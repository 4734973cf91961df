//! Read-only lookup over a loaded catalogue.
//!
//! [`Translator`] indexes a [`Catalog`] once and answers
//! `(context, source, comment)` queries without allocating. It holds no
//! interior mutability, so it can be shared across threads behind an `Arc`.

use std::{borrow::Cow, collections::HashMap};

use crate::{
    error::Error,
    plural_rules::PluralRule,
    types::{Catalog, Message, Translation, TranslationStatus},
};

/// Result of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// A finished singular translation. May be the empty string when the
    /// translator deliberately left the text blank.
    Translated(&'a str),
    /// All stored plural forms of a finished numerus message.
    Plural(&'a [String]),
    /// The message exists but is marked `type="unfinished"`.
    Unfinished,
    /// No active message matches the key.
    NotFound,
}

impl<'a> Lookup<'a> {
    pub fn is_found(&self) -> bool {
        !matches!(self, Lookup::NotFound)
    }

    /// The translated text, if the lookup produced exactly one string.
    pub fn text(&self) -> Option<&'a str> {
        match self {
            Lookup::Translated(text) => Some(text),
            _ => None,
        }
    }
}

/// comment -> index into `Translator::messages`
type CommentIndex = Vec<(String, usize)>;

/// Immutable lookup index built from a catalogue.
#[derive(Debug, Clone)]
pub struct Translator {
    language: String,
    rule: PluralRule,
    messages: Vec<Message>,
    index: HashMap<String, HashMap<String, CommentIndex>>,
}

impl Translator {
    /// Builds the index.
    ///
    /// Obsolete and vanished messages are not indexed. Fails with
    /// [`Error::DuplicateKey`] when two active messages share a key.
    pub fn new(catalog: &Catalog) -> Result<Self, Error> {
        let rule = PluralRule::for_language_str(&catalog.language);
        Self::with_plural_rule(catalog, rule)
    }

    /// Like [`Translator::new`] but with a caller-supplied plural rule.
    pub fn with_plural_rule(catalog: &Catalog, rule: PluralRule) -> Result<Self, Error> {
        let mut messages = Vec::new();
        let mut index: HashMap<String, HashMap<String, CommentIndex>> = HashMap::new();

        for (context, message) in catalog.messages() {
            if !message.is_active() {
                continue;
            }
            let comment = message.comment_or_empty();
            let entries = index
                .entry(context.to_string())
                .or_default()
                .entry(message.source.clone())
                .or_default();
            if entries.iter().any(|(c, _)| c == comment) {
                return Err(Error::DuplicateKey(message.key(context)));
            }
            entries.push((comment.to_string(), messages.len()));
            messages.push(message.clone());
        }

        tracing::debug!(
            language = %catalog.language,
            messages = messages.len(),
            rule = ?rule,
            "built translator index"
        );

        Ok(Translator {
            language: catalog.language.clone(),
            rule,
            messages,
            index,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.rule
    }

    /// Number of indexed (active) messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Finds the record for a key.
    ///
    /// A non-empty comment that matches nothing falls back to the record with
    /// no comment, the same way Qt's runtime resolves disambiguation.
    fn find(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Message> {
        let entries = self.index.get(context)?.get(source)?;
        let comment = comment.unwrap_or_default();
        let position = |wanted: &str| {
            entries
                .iter()
                .find(|(c, _)| c == wanted)
                .map(|(_, idx)| *idx)
        };
        let idx = position(comment).or_else(|| {
            if comment.is_empty() {
                None
            } else {
                position("")
            }
        })?;
        self.messages.get(idx)
    }

    /// Looks up a message by context, source and optional comment.
    pub fn lookup(&self, context: &str, source: &str, comment: Option<&str>) -> Lookup<'_> {
        let Some(message) = self.find(context, source, comment) else {
            return Lookup::NotFound;
        };
        if message.status == TranslationStatus::Unfinished {
            return Lookup::Unfinished;
        }
        match &message.translation {
            Translation::Singular(text) => Lookup::Translated(text),
            Translation::Plural(forms) if forms.is_empty() => Lookup::Unfinished,
            Translation::Plural(forms) => Lookup::Plural(forms),
        }
    }

    /// Looks up a message and selects the plural form for quantity `n`.
    ///
    /// Singular messages return their only text regardless of `n`.
    pub fn lookup_plural(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        n: u64,
    ) -> Lookup<'_> {
        match self.lookup(context, source, comment) {
            Lookup::Plural(forms) => match self.rule.select(forms, n) {
                Some(text) => Lookup::Translated(text),
                None => Lookup::Unfinished,
            },
            other => other,
        }
    }

    /// Returns the translation, or the source text when there is none.
    ///
    /// `n` selects the plural form for numerus messages; it is ignored
    /// otherwise. An intentionally empty finished translation is returned as
    /// the empty string, not replaced by the source.
    pub fn translate<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: Option<&str>,
        n: Option<u64>,
    ) -> Cow<'a, str> {
        let found = match n {
            Some(n) => self.lookup_plural(context, source, comment, n),
            None => self.lookup(context, source, comment),
        };
        match found {
            Lookup::Translated(text) => Cow::Borrowed(text),
            Lookup::Plural(forms) => match self.rule.select(forms, 1) {
                Some(text) => Cow::Borrowed(text),
                None => Cow::Borrowed(source),
            },
            Lookup::Unfinished | Lookup::NotFound => Cow::Borrowed(source),
        }
    }
}

impl TryFrom<&Catalog> for Translator {
    type Error = Error;

    fn try_from(catalog: &Catalog) -> Result<Self, Self::Error> {
        Translator::new(catalog)
    }
}
