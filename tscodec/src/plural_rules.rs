//! Numerus (plural form) selection rules.
//!
//! A `.ts` file stores plural forms as an ordered list with no rule attached;
//! the consumer decides which index a quantity maps to. These rules follow the
//! ones Qt's runtime applies per language so stored forms line up with what
//! Linguist asked the translator for.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::Serialize;
use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    types::{Catalog, Translation, TranslationStatus},
};

/// A plural selection rule: maps a cardinal quantity to a form index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralRule {
    /// One form for every quantity.
    Single,
    /// `1` / everything else.
    OneOther,
    /// `0` and `1` / everything else.
    ZeroOneOther,
    /// Russian group: `21`, `31`... / `2-4`, `22-24`... / everything else.
    Slavic,
    Polish,
    Czech,
    Slovenian,
    Lithuanian,
    Latvian,
    Irish,
    Romanian,
    Arabic,
}

lazy_static! {
    /// Static mapping from base language subtag → plural rule.
    static ref RULE_TABLE: BTreeMap<&'static str, PluralRule> = {
        use PluralRule::*;
        let mut m = BTreeMap::new();

        for code in [
            "ja","zh","ko","th","vi","id","ms","hu","fa","tr","my","jv","su","bo","yo",
            "hy","km","lo","yue"
        ] {
            m.insert(code, Single);
        }

        for code in [
            "en","de","nl","sv","da","nb","nn","no","is","fi","et","hi","bn","gu","ta",
            "te","kn","ml","mr","it","es","pt","el","eu","gl","af","sw","ur","bg","ca",
            "eo","fo","fy","he","iw","sq","ne","pa","fil","tl"
        ] {
            m.insert(code, OneOther);
        }

        m.insert("fr", ZeroOneOther);

        for code in ["ru","uk","be","sr","hr","bs","sh"] {
            m.insert(code, Slavic);
        }

        m.insert("pl", Polish);

        for code in ["cs","sk"] {
            m.insert(code, Czech);
        }

        m.insert("sl", Slovenian);
        m.insert("lt", Lithuanian);
        m.insert("lv", Latvian);
        m.insert("ga", Irish);
        for code in ["ro","mo"] {
            m.insert(code, Romanian);
        }
        m.insert("ar", Arabic);

        m
    };
}

impl PluralRule {
    /// Returns the rule for a language identifier.
    ///
    /// Unknown languages get [`PluralRule::Single`]: with a single form every
    /// quantity resolves to the only translation available.
    pub fn for_language(lang: &LanguageIdentifier) -> PluralRule {
        let base = lang.language.as_str();
        // Brazilian Portuguese counts zero as singular, like French.
        if base == "pt" && lang.region.is_some_and(|r| r.as_str() == "BR") {
            return PluralRule::ZeroOneOther;
        }
        RULE_TABLE
            .get(base)
            .copied()
            .unwrap_or(PluralRule::Single)
    }

    /// Helper for Qt-style locale strings (accepts `hu_HU` as well as `hu-HU`).
    pub fn for_language_str(lang: &str) -> PluralRule {
        match lang.replace('_', "-").parse::<LanguageIdentifier>() {
            Ok(lang_id) => Self::for_language(&lang_id),
            Err(_) => PluralRule::Single,
        }
    }

    /// Number of plural forms a translator is expected to provide.
    pub fn form_count(self) -> usize {
        match self {
            PluralRule::Single => 1,
            PluralRule::OneOther | PluralRule::ZeroOneOther => 2,
            PluralRule::Slavic
            | PluralRule::Polish
            | PluralRule::Czech
            | PluralRule::Lithuanian
            | PluralRule::Latvian
            | PluralRule::Irish
            | PluralRule::Romanian => 3,
            PluralRule::Slovenian => 4,
            PluralRule::Arabic => 6,
        }
    }

    /// Selects the form index for quantity `n`.
    pub fn form_index(self, n: u64) -> usize {
        let mod10 = n % 10;
        let mod100 = n % 100;
        match self {
            PluralRule::Single => 0,
            PluralRule::OneOther => usize::from(n != 1),
            PluralRule::ZeroOneOther => usize::from(n > 1),
            PluralRule::Slavic => {
                if mod10 == 1 && mod100 != 11 {
                    0
                } else if (2..=4).contains(&mod10) && !(10..=19).contains(&mod100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&mod10) && !(10..=19).contains(&mod100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            PluralRule::Slovenian => match mod100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            PluralRule::Lithuanian => {
                if mod10 == 1 && !(11..=19).contains(&mod100) {
                    0
                } else if mod10 != 0 && !(10..=19).contains(&mod100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Latvian => {
                if mod10 == 1 && mod100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            PluralRule::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            PluralRule::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=19).contains(&mod100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Arabic => match n {
                0 => 0,
                1 => 1,
                2 => 2,
                _ if (3..=10).contains(&mod100) => 3,
                _ if mod100 >= 11 => 4,
                _ => 5,
            },
        }
    }

    /// Picks the form for `n` out of the stored forms.
    ///
    /// The index is clamped to the last stored form, so a message with fewer
    /// forms than the rule expects still resolves to a translation.
    pub fn select(self, forms: &[String], n: u64) -> Option<&str> {
        let last = forms.len().checked_sub(1)?;
        forms
            .get(self.form_index(n).min(last))
            .map(String::as_str)
    }
}

/// Non-fatal report describing a numerus message whose form count does not
/// match the catalogue language's rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluralValidationReport {
    pub language: String,
    pub context: String,
    pub source: String,
    pub comment: Option<String>,
    pub expected: usize,
    pub found: usize,
}

/// Collect non-fatal plural issues for a catalogue.
///
/// Unfinished messages without any forms are not reported; they are simply
/// untranslated.
pub fn collect_catalog_plural_issues(catalog: &Catalog) -> Vec<PluralValidationReport> {
    let rule = PluralRule::for_language_str(&catalog.language);
    let expected = rule.form_count();

    let mut reports = Vec::new();
    for (context, message) in catalog.messages() {
        if !message.numerus || !message.is_active() {
            continue;
        }
        let Translation::Plural(forms) = &message.translation else {
            continue;
        };
        if forms.is_empty() && message.status == TranslationStatus::Unfinished {
            continue;
        }
        if forms.len() != expected {
            reports.push(PluralValidationReport {
                language: catalog.language.clone(),
                context: context.to_string(),
                source: message.source.clone(),
                comment: message.comment.clone(),
                expected,
                found: forms.len(),
            });
        }
    }
    reports
}

/// Validate a catalogue for numerus messages with the wrong number of forms.
pub fn validate_catalog_plurals(catalog: &Catalog) -> Result<(), Error> {
    let reports = collect_catalog_plural_issues(catalog);
    if reports.is_empty() {
        return Ok(());
    }
    let lines: Vec<String> = reports
        .iter()
        .map(|r| {
            format!(
                "lang='{}' context='{}' source='{}': expected {} plural form(s), found {}",
                r.language, r.context, r.source, r.expected, r.found
            )
        })
        .collect();
    Err(Error::validation_error(format!(
        "Plural validation failed:\n{}",
        lines.join("\n")
    )))
}
