use std::path::{Path, PathBuf};

use tscodec::traits::Parser;
use tscodec::{
    Catalog, Codec, Lookup, ReadOptions, Translation, TranslationStatus, Translator,
    formats::TsFormat, validate_catalog,
};

struct ExpectedLookup {
    context: &'static str,
    source: &'static str,
    comment: Option<&'static str>,
    value: Option<&'static str>,
}

fn corpus_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("qt_hu_excerpt.ts")
}

fn read_corpus() -> Catalog {
    let mut codec = Codec::new();
    codec
        .read_file_by_extension(corpus_path(), None)
        .unwrap_or_else(|e| panic!("failed to read corpus: {}", e));
    codec.catalogs.remove(0)
}

fn expected_lookups() -> Vec<ExpectedLookup> {
    vec![
        ExpectedLookup {
            context: "QFileDialog",
            source: "Open",
            comment: None,
            value: Some("Megnyitás"),
        },
        ExpectedLookup {
            context: "QPrintDialog",
            source: "A4",
            comment: None,
            value: Some(""),
        },
        ExpectedLookup {
            context: "MAC_APPLICATION_MENU",
            source: "Hide %1",
            comment: None,
            value: Some("%1 elrejtése"),
        },
        ExpectedLookup {
            context: "AudioOutput",
            source: "Revert back to device '%1'",
            comment: None,
            value: Some("Visszaállás a(z) '%1' eszközre"),
        },
        ExpectedLookup {
            context: "QDirModel",
            source: "Kind",
            comment: Some("Match OS X Finder"),
            value: Some("Típus"),
        },
        ExpectedLookup {
            context: "QDirModel",
            source: "Type",
            comment: Some("All other platforms"),
            value: Some("Típus"),
        },
        ExpectedLookup {
            context: "QtXmlPatterns",
            source: "Network timeout.",
            comment: None,
            value: Some("Hálózati időtúllépés."),
        },
        ExpectedLookup {
            context: "QtXmlPatterns",
            source: "An %1-attribute with value %2 has already been declared.",
            comment: None,
            value: None,
        },
    ]
}

#[test]
fn corpus_header_and_counts() {
    let catalog = read_corpus();
    assert_eq!(catalog.language, "hu_HU");
    assert_eq!(catalog.version.as_deref(), Some("2.0"));
    assert_eq!(catalog.source_language, None);
    assert_eq!(catalog.contexts.len(), 7);
    assert_eq!(catalog.message_count(), 246);

    let counts = catalog.status_counts();
    assert_eq!(counts.get(&TranslationStatus::Unfinished), Some(&22));
    assert_eq!(counts.get(&TranslationStatus::Finished), Some(&224));
}

#[test]
fn corpus_lookups_table_driven() {
    let catalog = read_corpus();
    let translator = Translator::new(&catalog).expect("corpus has unique keys");

    for expected in expected_lookups() {
        let actual = translator.lookup(expected.context, expected.source, expected.comment);
        match expected.value {
            Some(value) => assert_eq!(
                actual,
                Lookup::Translated(value),
                "lookup mismatch for {}::{}",
                expected.context,
                expected.source
            ),
            None => assert_eq!(
                actual,
                Lookup::Unfinished,
                "expected unfinished for {}::{}",
                expected.context,
                expected.source
            ),
        }
    }
}

#[test]
fn corpus_numerus_message_uses_single_form() {
    let catalog = read_corpus();
    let translator = Translator::new(&catalog).unwrap();
    let context = "Phonon::Gstreamer::MediaObject";
    let source = "A required codec is missing. You need to install the following codec(s) to play this content: %0";
    let form = "Hiányzik egy kodek a lejátszáshoz. Kérem telepítse a következő kodek(eket): %0";

    for n in [0, 1, 2, 3, 11, 101] {
        assert_eq!(
            translator.lookup_plural(context, source, None, n),
            Lookup::Translated(form)
        );
    }
}

#[test]
fn corpus_multiline_source_is_verbatim() {
    let catalog = read_corpus();
    let message = catalog
        .find_context("Phonon::Gstreamer::MediaObject")
        .and_then(|c| c.messages.first())
        .expect("first Gstreamer message");
    assert!(message.source.starts_with("Cannot start playback. \n\nCheck your"));
    assert!(matches!(
        &message.translation,
        Translation::Singular(text) if text.ends_with("megfelelők-e.")
    ));
}

#[test]
fn corpus_relative_locations_are_preserved() {
    let catalog = read_corpus();
    let menu = catalog.find_context("MAC_APPLICATION_MENU").unwrap();
    let first = &menu.messages[0].locations[0];
    assert_eq!(
        first.filename.as_deref(),
        Some("../src/gui/kernel/qapplication.cpp")
    );
    assert_eq!(first.line.as_deref(), Some("+2346"));
    assert!(first.is_relative());
    assert_eq!(menu.messages[1].locations[0].filename, None);
}

#[test]
fn corpus_is_valid() {
    let catalog = read_corpus();
    assert_eq!(validate_catalog(&catalog), Vec::new());
}

#[test]
fn corpus_strict_read_succeeds() {
    let mut codec = Codec::new();
    let options = ReadOptions::new().with_strict(true);
    codec
        .read_file_with_options(corpus_path(), &options)
        .expect("strict read");
    assert_eq!(codec.catalogs[0].language, "hu_HU");
}

#[test]
fn corpus_write_is_byte_identical() {
    let original = std::fs::read_to_string(corpus_path()).unwrap();
    let format = TsFormat::from_str(&original).unwrap();

    let mut written = Vec::new();
    format.to_writer(&mut written).unwrap();
    assert_eq!(String::from_utf8(written).unwrap(), original);
}
