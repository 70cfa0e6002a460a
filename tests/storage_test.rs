//! Tests for file-backed readers and writers

use std::fs;

use tempfile::TempDir;

use localizator::application::{Localizator, LocalizatorSettings};
use localizator::infrastructure::{
    ConstantFileReader, ConstantFileWriter, FolderReader, FolderWriter, InfraError,
    LocalizationReader, LocalizationWriter, MemoryStorage, TextReader,
};

#[test]
fn given_folder_when_reading_then_uses_id_and_extension() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("eng.json"), r#"{"a": "b"}"#).unwrap();
    let reader = FolderReader::new(temp.path(), ".json").unwrap();

    // Act / Assert
    assert!(reader.can_read("eng"));
    assert!(!reader.can_read("ger"));
    assert_eq!(reader.read("eng").unwrap(), r#"{"a": "b"}"#);
    assert_eq!(reader.path_for("ger"), temp.path().join("ger.json"));
}

#[test]
fn given_extension_without_dot_when_creating_then_fails() {
    let temp = TempDir::new().unwrap();

    assert!(matches!(
        FolderReader::new(temp.path(), "json"),
        Err(InfraError::IncorrectFileExtension(_))
    ));
    assert!(matches!(
        FolderWriter::new(temp.path(), "txt"),
        Err(InfraError::IncorrectFileExtension(ext)) if ext == "txt"
    ));
}

#[test]
fn given_missing_folder_when_writing_then_creates_it() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let folder = temp.path().join("nested").join("strings");
    let writer = FolderWriter::new(&folder, ".loc").unwrap();

    // Act
    writer.write("eng", "{}").unwrap();

    // Assert
    assert!(writer.can_write("eng"));
    assert_eq!(fs::read_to_string(folder.join("eng.loc")).unwrap(), "{}");
}

#[test]
fn given_constant_file_when_reading_any_id_then_returns_same_text() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("all.json");
    let reader = ConstantFileReader::new(&file);
    assert!(!reader.can_read("eng"));

    ConstantFileWriter::new(&file).write("eng", "{}").unwrap();

    assert!(reader.can_read("eng") && reader.can_read("ger"));
    assert_eq!(reader.read("ger").unwrap(), "{}");
}

#[test]
fn given_text_reader_when_reading_then_every_id_is_available() {
    let reader = TextReader::new(r#"{"x": "y"}"#);
    assert!(reader.can_read("anything"));
    assert_eq!(reader.read("other").unwrap(), r#"{"x": "y"}"#);
}

#[test]
fn given_memory_storage_when_marked_read_only_then_refuses_that_id() {
    let storage = MemoryStorage::new().with_read_only("eng");
    assert!(!storage.can_write("eng"));
    assert!(storage.can_write("ger"));
    assert!(!storage.can_read("eng"));
    assert!(storage.read("eng").is_err());
}

#[test]
fn given_folder_localizator_when_merging_then_files_are_rewritten() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("eng.json"), r#"{"a": {"x": "1"}}"#).unwrap();
    fs::write(temp.path().join("ger.json"), r#"{"a": {"x": "2", "y": "3"}}"#).unwrap();
    let mut localizator = Localizator::new(
        LocalizatorSettings::new()
            .with_reader(FolderReader::new(temp.path(), ".json").unwrap())
            .with_writer(FolderWriter::new(temp.path(), ".json").unwrap()),
    );

    // Act
    localizator
        .merge_localizations("eng", "ger", true, "")
        .unwrap();

    // Assert
    let eng: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("eng.json")).unwrap()).unwrap();
    assert_eq!(eng, serde_json::json!({"a": {"x": "1", "y": "3"}}));
    let ger: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("ger.json")).unwrap()).unwrap();
    assert_eq!(ger, serde_json::json!({"a": {"x": "2", "y": "3"}}));
}
