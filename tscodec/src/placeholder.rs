//! Qt placeholder extraction and comparison.
//!
//! Qt marks substitution points with `%1` .. `%99`; an `L` after the percent
//! sign (`%L1`) requests locale-aware number formatting, and `%n` / `%Ln`
//! receive the quantity of a numerus message. Nothing here substitutes
//! values; the loader only checks that a translation keeps the arguments its
//! source text declares.

use std::collections::BTreeSet;
use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"%(L?)(n|[1-9][0-9]?)").expect("placeholder pattern is valid");
}

/// What a placeholder is substituted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Argument {
    /// `%1` .. `%99`.
    Positional(u8),
    /// `%n`, the numerus quantity.
    Count,
}

impl Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Argument::Positional(i) => write!(f, "%{}", i),
            Argument::Count => write!(f, "%n"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderToken {
    pub argument: Argument,
    /// `%L1` / `%Ln`.
    pub localized: bool,
    /// Byte offset of the `%` in the input.
    pub offset: usize,
}

/// Extracts placeholder tokens from a string in occurrence order.
pub fn extract_placeholders(input: &str) -> Vec<PlaceholderToken> {
    PLACEHOLDER
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let argument = match &caps[2] {
                "n" => Argument::Count,
                digits => Argument::Positional(digits.parse().ok()?),
            };
            Some(PlaceholderToken {
                argument,
                localized: !caps[1].is_empty(),
                offset: whole.start(),
            })
        })
        .collect()
}

/// The set of arguments a string refers to.
///
/// Order and the `L` flag are ignored: translations commonly reorder
/// arguments and may switch between `%1` and `%L1`.
pub fn signature(input: &str) -> BTreeSet<Argument> {
    extract_placeholders(input)
        .into_iter()
        .map(|t| t.argument)
        .collect()
}

/// Arguments present on one side only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PlaceholderMismatch {
    /// In the source text but not in the translation.
    pub missing: Vec<Argument>,
    /// In the translation but not in the source text.
    pub unexpected: Vec<Argument>,
}

impl Display for PlaceholderMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |args: &[Argument]| {
            args.iter()
                .map(Argument::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        match (self.missing.is_empty(), self.unexpected.is_empty()) {
            (false, true) => write!(f, "missing {}", join(&self.missing)),
            (true, false) => write!(f, "unexpected {}", join(&self.unexpected)),
            _ => write!(
                f,
                "missing {}; unexpected {}",
                join(&self.missing),
                join(&self.unexpected)
            ),
        }
    }
}

/// Compares the placeholders of a translation against its source.
///
/// For numerus messages `%n` is left out of the comparison: a form such as
/// "one file" legitimately drops the count.
pub fn compare(source: &str, translation: &str, numerus: bool) -> Option<PlaceholderMismatch> {
    let mut expected = signature(source);
    let mut actual = signature(translation);
    if numerus {
        expected.remove(&Argument::Count);
        actual.remove(&Argument::Count);
    }
    if expected == actual {
        return None;
    }
    Some(PlaceholderMismatch {
        missing: expected.difference(&actual).copied().collect(),
        unexpected: actual.difference(&expected).copied().collect(),
    })
}
