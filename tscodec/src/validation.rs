//! Catalogue consistency checks.
//!
//! [`validate_catalog`] collects every problem it finds instead of stopping at
//! the first one; callers decide which issues are fatal.

use std::fmt::Display;

use serde::Serialize;

use crate::{
    error::Error,
    placeholder::{self, PlaceholderMismatch},
    plural_rules::collect_catalog_plural_issues,
    types::{Catalog, MessageKey, Translation, TranslationStatus},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// The same (context, source, comment) key occurs more than once.
    DuplicateKey { key: MessageKey },
    /// A finished translation does not use the source's placeholders.
    PlaceholderMismatch {
        key: MessageKey,
        mismatch: PlaceholderMismatch,
    },
    /// A numerus message has a different number of forms than the
    /// catalogue language needs.
    PluralFormCount {
        key: MessageKey,
        expected: usize,
        found: usize,
    },
    /// Plural forms stored on a message without `numerus="yes"`.
    UnexpectedPluralForms { key: MessageKey },
    /// A `<context>` with an empty `<name>`.
    EmptyContextName { position: usize },
}

impl Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Issue::DuplicateKey { key } => write!(f, "duplicate message {}", key),
            Issue::PlaceholderMismatch { key, mismatch } => {
                write!(f, "placeholder mismatch in {}: {}", key, mismatch)
            }
            Issue::PluralFormCount {
                key,
                expected,
                found,
            } => write!(
                f,
                "{}: expected {} plural form(s), found {}",
                key, expected, found
            ),
            Issue::UnexpectedPluralForms { key } => {
                write!(f, "{}: plural forms on a non-numerus message", key)
            }
            Issue::EmptyContextName { position } => {
                write!(f, "context #{} has an empty name", position + 1)
            }
        }
    }
}

/// Runs every check on `catalog`.
pub fn validate_catalog(catalog: &Catalog) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (position, context) in catalog.contexts.iter().enumerate() {
        if context.name.trim().is_empty() {
            issues.push(Issue::EmptyContextName { position });
        }
    }

    issues.extend(
        catalog
            .duplicate_keys()
            .into_iter()
            .map(|key| Issue::DuplicateKey { key }),
    );

    for (context, message) in catalog.messages() {
        if message.status != TranslationStatus::Finished {
            continue;
        }
        if !message.numerus && matches!(message.translation, Translation::Plural(_)) {
            issues.push(Issue::UnexpectedPluralForms {
                key: message.key(context),
            });
        }
        for text in message.translation.texts() {
            // An intentionally blank translation has nothing to compare.
            if text.is_empty() {
                continue;
            }
            if let Some(mismatch) = placeholder::compare(&message.source, text, message.numerus) {
                issues.push(Issue::PlaceholderMismatch {
                    key: message.key(context),
                    mismatch,
                });
                break;
            }
        }
    }

    issues.extend(
        collect_catalog_plural_issues(catalog)
            .into_iter()
            .map(|report| Issue::PluralFormCount {
                key: MessageKey::new(&report.context, &report.source, report.comment.as_deref()),
                expected: report.expected,
                found: report.found,
            }),
    );

    issues
}

impl Catalog {
    /// Fails with [`Error::Validation`] listing every issue found.
    pub fn validate(&self) -> Result<(), Error> {
        let issues = validate_catalog(self);
        if issues.is_empty() {
            return Ok(());
        }
        let lines: Vec<String> = issues.iter().map(Issue::to_string).collect();
        Err(Error::validation_error(lines.join("\n")))
    }
}
