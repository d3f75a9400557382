/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use langding::file_utils::FileManager;
use std::fs;

use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "exists.html", "<html></html>")?;

    assert!(FileManager::file_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.html"));
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("nested").join("output");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(test_subdir.is_dir());
    Ok(())
}

/// Test that find_html_files returns only top-level HTML files, sorted
#[test]
fn test_find_html_files_withMixedContent_shouldFilterAndSort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.html", "<html></html>")?;
    common::create_test_file(temp_dir.path(), "a.HTML", "<html></html>")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "not a page")?;
    let subdir = temp_dir.path().join("sub");
    fs::create_dir(&subdir)?;
    common::create_test_file(&subdir, "nested.html", "<html></html>")?;

    let files = FileManager::find_html_files(temp_dir.path())?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    // Extension matching is case-insensitive, nested files are not picked up
    assert_eq!(names, vec!["a.HTML", "b.html"]);

    Ok(())
}

/// Test write_to_file followed by read_to_string
#[test]
fn test_write_and_read_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("deep").join("page.html");
    let content = "<html><body>roundtrip</body></html>";

    // Parent directory is created on demand
    FileManager::write_to_file(&path, content)?;
    let read_back = FileManager::read_to_string(&path)?;

    assert_eq!(read_back, content);
    Ok(())
}

/// Test that reading a missing file fails with context
#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    let result = FileManager::read_to_string("definitely/not/here.html");
    assert!(result.is_err());
}

/// Test artifact naming helpers
#[test]
fn test_output_naming_helpers_shouldDeriveFromSourceName() {
    assert_eq!(
        FileManager::template_filename("index.html"),
        "template_index.html"
    );
    assert_eq!(
        FileManager::rendered_filename("German", "index.html"),
        "german_index.html"
    );
    assert_eq!(
        FileManager::translations_filename("index"),
        "index_translations.json"
    );
}
