//! Options for strict/controlled file reading into a `Catalog`.

/// Read behavior options for [`crate::Codec`] file-loading APIs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadOptions {
    /// Language used when the `TS` root has no `language` attribute.
    pub language_hint: Option<String>,
    /// Rejects duplicate message keys and a missing target language instead
    /// of logging them.
    pub strict: bool,
}

impl ReadOptions {
    /// Creates default read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a language hint.
    pub fn with_language_hint(mut self, language_hint: Option<String>) -> Self {
        self.language_hint = language_hint;
        self
    }

    /// Enables/disables strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
