//! Tests for the Localizator service over in-memory storage

use std::io;

use rstest::{fixture, rstest};

use localizator::application::{
    ApplicationError, Localizator, LocalizatorSettings, LocalizedValue, StringEntry,
};
use localizator::domain::{AddOutcome, DomainError, LocalizationNode};
use localizator::infrastructure::{LocalizationWriter, MemoryStorage, TextReader};
use localizator::util::testing;

const ENG: &str = r#"{
  "greeting": "Hello, {name}!",
  "fruit": { "apple": "Apple" },
  "colors": ["red", "green", "blue"],
  "count": "42"
}"#;

const GER: &str = r#"{
  "greeting": "Hallo, {name}!",
  "fruit": { "apple": "Apfel", "pear": "Birne" }
}"#;

#[fixture]
fn storage() -> MemoryStorage {
    testing::init_test_setup();
    MemoryStorage::new().with("eng", ENG).with("ger", GER)
}

fn localizator_over(storage: &MemoryStorage) -> Localizator {
    let mut localizator = Localizator::new(
        LocalizatorSettings::new()
            .with_reader(storage.clone())
            .with_writer(storage.clone()),
    );
    localizator.set_localization("eng");
    localizator
}

struct FailingWriter;

impl LocalizationWriter for FailingWriter {
    fn write(&self, _localization: &str, _text: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "disk says no"))
    }
}

// ============================================================
// Loading
// ============================================================

#[test]
fn given_no_reader_when_reading_then_cannot_read() {
    let mut localizator = Localizator::new(LocalizatorSettings::new());
    assert!(matches!(
        localizator.get_string("greeting"),
        Err(ApplicationError::CannotRead)
    ));
}

#[rstest]
fn given_unknown_localization_when_reading_then_cannot_read_localization(storage: MemoryStorage) {
    let mut localizator = localizator_over(&storage);
    assert!(matches!(
        localizator.get_string_for("fra", "greeting"),
        Err(ApplicationError::CannotReadLocalization(id)) if id == "fra"
    ));
}

#[rstest]
fn given_caching_when_storage_changes_then_reload_picks_it_up(storage: MemoryStorage) {
    // Arrange
    let mut localizator = localizator_over(&storage);
    assert_eq!(localizator.get_string("count").unwrap(), "42");
    assert!(localizator.is_cached("eng"));
    storage.insert("eng", r#"{"count": "7"}"#);

    // Act
    let cached = localizator.get_string("count").unwrap();
    localizator.reload("eng").unwrap();
    let reloaded = localizator.get_string("count").unwrap();

    // Assert
    assert_eq!(cached, "42");
    assert_eq!(reloaded, "7");
}

#[rstest]
fn given_caching_disabled_when_storage_changes_then_next_read_sees_it(storage: MemoryStorage) {
    // Arrange
    let mut localizator = Localizator::new(
        LocalizatorSettings::new()
            .with_reader(storage.clone())
            .caching(false),
    );
    localizator.set_localization("eng");
    assert_eq!(localizator.get_string("count").unwrap(), "42");

    // Act
    storage.insert("eng", r#"{"count": "7"}"#);

    // Assert
    assert!(!localizator.is_cached("eng"));
    assert_eq!(localizator.get_string("count").unwrap(), "7");
}

#[rstest]
#[case(r#""just text""#)]
#[case(r#"["a", "b"]"#)]
fn given_non_object_root_when_loading_then_type_mismatch(#[case] text: &str) {
    let storage = MemoryStorage::new().with("eng", text);
    let mut localizator = localizator_over(&storage);
    assert!(matches!(
        localizator.get_string("anything"),
        Err(ApplicationError::Domain(DomainError::TypeMismatch { .. }))
    ));
}

#[test]
fn given_malformed_json_when_loading_then_json_error() {
    let storage = MemoryStorage::new().with("eng", "{ not json");
    let mut localizator = localizator_over(&storage);
    assert!(matches!(
        localizator.get_string("x"),
        Err(ApplicationError::Json(_))
    ));
}

#[test]
fn given_empty_text_when_loading_then_tree_is_empty_category() {
    let storage = MemoryStorage::new().with("eng", "");
    let mut localizator = localizator_over(&storage);
    assert_eq!(
        localizator.tree_for("eng").unwrap(),
        LocalizationNode::empty_category()
    );
}

// ============================================================
// Reads
// ============================================================

#[rstest]
fn given_loaded_localization_when_reading_then_returns_values(storage: MemoryStorage) {
    let mut localizator = localizator_over(&storage);

    assert_eq!(localizator.get_string("fruit.apple").unwrap(), "Apple");
    assert_eq!(localizator.get_string_for("ger", "fruit.apple").unwrap(), "Apfel");
    assert_eq!(
        localizator.get_array("colors").unwrap(),
        vec!["red", "green", "blue"]
    );
    assert_eq!(localizator.get_array_element("colors", 2).unwrap(), "blue");
    assert!(localizator.contains("fruit").unwrap());
    assert!(!localizator.contains("fruit.pear").unwrap());
    assert!(!localizator.contains("bad path").unwrap());
}

#[rstest]
fn given_array_when_index_past_end_then_index_out_of_range(storage: MemoryStorage) {
    let mut localizator = localizator_over(&storage);
    assert!(matches!(
        localizator.get_array_element("colors", 5),
        Err(ApplicationError::Domain(DomainError::IndexOutOfRange { index: 5, len: 3 }))
    ));
}

#[rstest]
fn given_missing_path_when_get_string_or_then_returns_fallback(storage: MemoryStorage) {
    let mut localizator = localizator_over(&storage);
    assert_eq!(localizator.get_string_or("fruit.kiwi", "Kiwi?"), "Kiwi?");
    assert_eq!(localizator.get_string_or_for("fra", "greeting", "Hi"), "Hi");
    assert_eq!(localizator.get_string_or("fruit.apple", "x"), "Apple");
}

#[rstest]
fn given_placeholders_when_get_formatted_then_substitutes(storage: MemoryStorage) {
    let mut localizator = localizator_over(&storage);
    assert_eq!(
        localizator.get_formatted("greeting", &[("name", "Ann")]).unwrap(),
        "Hello, Ann!"
    );
    assert_eq!(
        localizator
            .get_formatted_for("ger", "greeting", &[("name", "Ann")])
            .unwrap(),
        "Hallo, Ann!"
    );
}

#[rstest]
fn given_path_prefix_when_reading_then_prefix_is_prepended() {
    // Arrange
    let storage = MemoryStorage::new().with("eng", r#"{"app": {"title": "Editor"}}"#);
    let mut localizator = Localizator::new(
        LocalizatorSettings::new()
            .with_reader(storage.clone())
            .path_prefix("app"),
    );

    // Act
    let title = localizator.get_string_for("eng", "title");
    let physical = localizator.resolve_physical_path("title", "eng").unwrap();

    // Assert
    assert_eq!(title.unwrap(), "Editor");
    assert_eq!(physical.to_string(), "app.title");
}

#[rstest]
fn given_localized_value_when_resolving_then_converts_or_falls_back(storage: MemoryStorage) {
    let mut localizator = localizator_over(&storage);
    let count = LocalizedValue::new("count", |text| text.parse::<u32>().unwrap_or(0));
    let missing = LocalizedValue::text("menu.quit");

    assert_eq!(count.resolve(&mut localizator), 42);
    assert_eq!(missing.resolve(&mut localizator), "menu.quit");
}

// ============================================================
// Mutations and persistence
// ============================================================

#[rstest]
fn given_new_string_when_adding_then_persists_to_storage(storage: MemoryStorage) {
    // Arrange
    let mut localizator = localizator_over(&storage);

    // Act
    let outcome = localizator.add_string("fruit", "banana", "Banana").unwrap();

    // Assert
    assert_eq!(outcome, AddOutcome::Added);
    let written = storage.get("eng").unwrap();
    assert!(written.contains("\"banana\": \"Banana\""));
    assert_eq!(localizator.get_string("fruit.banana").unwrap(), "Banana");
}

#[rstest]
fn given_existing_string_when_adding_then_nothing_is_written(storage: MemoryStorage) {
    let mut localizator = localizator_over(&storage);

    let outcome = localizator.add_string("fruit", "apple", "Other").unwrap();

    assert_eq!(outcome, AddOutcome::AlreadyExisted);
    assert_eq!(storage.get("eng").unwrap(), ENG);
    assert_eq!(localizator.get_string("fruit.apple").unwrap(), "Apple");
}

#[rstest]
fn given_missing_string_when_get_string_init_then_creates_once(storage: MemoryStorage) {
    let mut localizator = localizator_over(&storage);

    assert_eq!(localizator.get_string_init("fruit.banana", "Banana").unwrap(), "Banana");
    assert_eq!(localizator.get_string_init("fruit.banana", "Other").unwrap(), "Banana");
    assert!(storage.get("eng").unwrap().contains("Banana"));
}

#[rstest]
fn given_existing_string_when_setting_then_persists_new_value(storage: MemoryStorage) {
    let mut localizator = localizator_over(&storage);

    localizator.set_string_for("ger", "fruit.pear", "Nashi").unwrap();

    assert!(storage.get("ger").unwrap().contains("Nashi"));
    assert!(localizator.set_string("fruit.kiwi", "Kiwi").is_err());
}

#[rstest]
fn given_batch_with_existing_entries_when_adding_then_reports_success(storage: MemoryStorage) {
    // Arrange
    let mut localizator = localizator_over(&storage);
    let entries = [
        StringEntry::new("apple", "ignored"),
        StringEntry::new("plum", "Plum"),
        StringEntry::new("fig", "Fig"),
    ];

    // Act
    let all_ok = localizator.add_strings("fruit", &entries).unwrap();
    let categories_ok = localizator.add_categories("", &["menu", "fruit"]).unwrap();

    // Assert
    assert!(all_ok);
    assert!(categories_ok);
    assert_eq!(localizator.get_string("fruit.apple").unwrap(), "Apple");
    assert_eq!(localizator.get_string("fruit.fig").unwrap(), "Fig");
    assert!(localizator.contains("menu").unwrap());
    assert!(storage.get("eng").unwrap().contains("\"menu\": {}"));
}

#[rstest]
fn given_batch_under_string_when_adding_then_reports_failure(storage: MemoryStorage) {
    let mut localizator = localizator_over(&storage);

    let all_ok = localizator
        .add_strings("count", &[StringEntry::new("a", "1")])
        .unwrap();

    assert!(!all_ok);
    assert_eq!(storage.get("eng").unwrap(), ENG);
}

#[rstest]
fn given_no_writer_when_adding_then_change_stays_in_memory(storage: MemoryStorage) {
    // Arrange
    let mut localizator = Localizator::with_reader(storage.clone());
    localizator.set_localization("eng");

    // Act
    localizator.add_category("", "menu").unwrap();

    // Assert
    assert!(localizator.contains("menu").unwrap());
    assert_eq!(storage.get("eng").unwrap(), ENG);
}

#[rstest]
fn given_read_only_localization_when_adding_then_cannot_write_localization() {
    let storage = MemoryStorage::new().with("eng", ENG).with_read_only("eng");
    let mut localizator = localizator_over(&storage);

    let result = localizator.add_string("fruit", "kiwi", "Kiwi");

    assert!(matches!(
        result,
        Err(ApplicationError::CannotWriteLocalization(id)) if id == "eng"
    ));
    assert_eq!(storage.get("eng").unwrap(), ENG);
}

#[rstest]
fn given_failing_writer_when_adding_then_operation_failed(storage: MemoryStorage) {
    let mut localizator = Localizator::new(
        LocalizatorSettings::new()
            .with_reader(storage.clone())
            .with_writer(FailingWriter),
    );

    let result = localizator.add_string_for("eng", "", "title", "Title");

    assert!(matches!(result, Err(ApplicationError::OperationFailed { .. })));
}

// ============================================================
// Merging and equivalence
// ============================================================

#[rstest]
fn given_no_writer_when_merging_then_cannot_write(storage: MemoryStorage) {
    let mut localizator = Localizator::with_reader(storage.clone());
    assert!(matches!(
        localizator.merge_localizations("eng", "ger", true, ""),
        Err(ApplicationError::CannotWrite)
    ));
}

#[rstest]
fn given_two_localizations_when_merging_then_both_persisted_and_equivalent(storage: MemoryStorage) {
    // Arrange
    let mut localizator = localizator_over(&storage);
    assert!(!localizator.are_localizations_equivalent("eng", "ger").unwrap());

    // Act
    localizator
        .merge_localizations("eng", "ger", false, "TODO")
        .unwrap();

    // Assert
    assert!(localizator.are_localizations_equivalent("eng", "ger").unwrap());
    assert!(localizator.are_localizations_equivalent("ger", "eng").unwrap());
    assert_eq!(localizator.get_string_for("eng", "fruit.pear").unwrap(), "TODO");
    assert_eq!(localizator.get_string_for("ger", "count").unwrap(), "TODO");
    assert_eq!(
        localizator.get_array_for("ger", "colors").unwrap(),
        vec!["TODO"; 3]
    );
    assert!(storage.get("eng").unwrap().contains("pear"));
    assert!(storage.get("ger").unwrap().contains("colors"));
}

// ============================================================
// Single-file layout
// ============================================================

const SHARED: &str = r#"{
  "eng": { "menu": { "open": "Open" } },
  "ger": { "menu": { "open": "Öffnen", "close": "Schließen" } }
}"#;

fn single_file_localizator(writer: &MemoryStorage) -> Localizator {
    Localizator::new(
        LocalizatorSettings::new()
            .with_reader(TextReader::new(SHARED))
            .with_writer(writer.clone())
            .single_file(true),
    )
}

#[test]
fn given_single_file_when_reading_then_localization_selects_sub_root() {
    let writer = MemoryStorage::new();
    let mut localizator = single_file_localizator(&writer);

    assert_eq!(localizator.get_string_for("eng", "menu.open").unwrap(), "Open");
    assert_eq!(localizator.get_string_for("ger", "menu.open").unwrap(), "Öffnen");
    assert_eq!(
        localizator
            .resolve_physical_path("menu.open", "ger")
            .unwrap()
            .to_string(),
        "ger.menu.open"
    );
    assert!(localizator.is_cached("eng") && localizator.is_cached("ger"));
}

#[test]
fn given_single_file_when_adding_then_writes_whole_document() {
    let writer = MemoryStorage::new();
    let mut localizator = single_file_localizator(&writer);

    localizator.add_string_for("eng", "menu", "close", "Close").unwrap();

    let written = writer.get("eng").expect("document written under the id");
    assert!(written.contains("Close"));
    assert!(written.contains("Schließen"));
    assert_eq!(localizator.get_string_for("eng", "menu.close").unwrap(), "Close");
}

#[test]
fn given_single_file_when_merging_then_sub_roots_become_equivalent() {
    // Arrange
    let writer = MemoryStorage::new();
    let mut localizator = single_file_localizator(&writer);

    // Act
    localizator
        .merge_localizations("eng", "ger", true, "")
        .unwrap();

    // Assert
    assert!(localizator.are_localizations_equivalent("eng", "ger").unwrap());
    assert_eq!(
        localizator.get_string_for("eng", "menu.close").unwrap(),
        "Schließen"
    );
    assert_eq!(localizator.get_string_for("ger", "menu.open").unwrap(), "Öffnen");
    assert!(writer.get("ger").unwrap().contains("\"close\""));
}

#[test]
fn given_single_file_when_localization_missing_then_path_not_found() {
    let writer = MemoryStorage::new();
    let mut localizator = single_file_localizator(&writer);
    assert!(matches!(
        localizator.get_string_for("fra", "menu.open"),
        Err(ApplicationError::Domain(DomainError::PathNotFound(_)))
    ));
}
