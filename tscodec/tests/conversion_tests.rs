use std::path::{Path, PathBuf};

use tscodec::formats::{FormatType, JsonFormat, TsFormat};
use tscodec::traits::Parser;
use tscodec::{Catalog, Codec, Error, convert, convert_auto};

fn corpus_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("qt_hu_excerpt.ts")
}

fn read_ts(path: &Path) -> Catalog {
    TsFormat::read_from(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
        .into()
}

#[test]
fn ts_to_json_to_ts_is_lossless() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let json = tmp.path().join("qt_hu.json");
    let ts = tmp.path().join("qt_hu.ts");

    convert_auto(corpus_path(), json.clone()).expect("ts -> json");
    convert(&json, FormatType::Json, &ts, FormatType::Ts).expect("json -> ts");

    assert_eq!(read_ts(&ts), read_ts(&corpus_path()));
    assert_eq!(
        std::fs::read_to_string(&ts).unwrap(),
        std::fs::read_to_string(corpus_path()).unwrap()
    );
}

#[test]
fn json_output_is_a_single_catalog_object() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let json = tmp.path().join("qt_hu.json");
    convert_auto(corpus_path(), json.clone()).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["language"], "hu_HU");
    assert_eq!(value["version"], "2.0");
    assert_eq!(value["contexts"].as_array().map(Vec::len), Some(7));

    let catalog: Catalog = JsonFormat::read_from(&json).unwrap().into();
    assert_eq!(catalog.message_count(), 246);
}

#[test]
fn codec_cache_holds_several_catalogs() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let cache = tmp.path().join("cache.json");

    let mut codec = Codec::new();
    codec.read_file_by_extension(corpus_path(), None).unwrap();
    codec.add_catalog(Catalog::new("de_DE"));
    codec.cache_to_file(&cache).unwrap();

    let loaded = Codec::load_from_file(&cache).unwrap();
    assert_eq!(loaded.catalogs.len(), 2);
    assert!(loaded.get_by_language("hu").is_some());
    assert!(loaded.get_by_language("de").is_some());
    assert_eq!(loaded.catalogs, codec.catalogs);
}

#[test]
fn unknown_extensions_are_rejected() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let output = tmp.path().join("qt_hu.qm");
    match convert_auto(corpus_path(), output) {
        Err(Error::UnknownFormat(message)) => assert!(message.contains("qm")),
        other => panic!("expected unknown format error, got {:?}", other),
    }
}

#[test]
fn missing_input_is_an_io_error() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let missing = tmp.path().join("nope.ts");
    let output = tmp.path().join("nope.json");
    assert!(matches!(
        convert(&missing, FormatType::Ts, &output, FormatType::Json),
        Err(Error::Io(_))
    ));
}
