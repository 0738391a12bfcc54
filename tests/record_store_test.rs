mod common;

use common::{question_file, workbook};
use paper_picker::{FormatError, RecordStore};

#[test]
fn test_one_record_per_data_row() {
    let mut store = RecordStore::new();

    let records = store
        .load(&question_file(&["mcq", "short", "long", "mcq"]))
        .unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(records[3].display_text(), "Question 4");
    assert_eq!(records[2].type_key(), "long");
}

#[test]
fn test_new_load_replaces_previous_records() {
    let mut store = RecordStore::new();
    store.load(&question_file(&["mcq"; 6])).unwrap();

    store.load(&question_file(&["short", "short"])).unwrap();

    assert_eq!(store.len(), 2);
    assert!(store.records().iter().all(|r| r.type_key() == "short"));
}

#[test]
fn test_missing_type_column_empties_the_store() {
    let mut store = RecordStore::new();
    store.load(&question_file(&["mcq", "mcq"])).unwrap();

    let result = store.load(&workbook(&[&["QuestionText"], &["Only text"]]));

    assert_eq!(result, Err(FormatError::MissingColumns));
    assert!(store.is_empty());
}

#[test]
fn test_required_columns_are_case_sensitive() {
    let mut store = RecordStore::new();

    let result = store.load(&workbook(&[
        &["questiontext", "questiontype"],
        &["lower-case headers", "mcq"],
    ]));

    assert_eq!(result, Err(FormatError::MissingColumns));
}

#[test]
fn test_first_row_without_text_fails_validation() {
    let mut store = RecordStore::new();

    let result = store.load(&workbook(&[
        &["QuestionText", "QuestionType"],
        &["", "mcq"],
        &["Has text", "short"],
    ]));

    assert_eq!(result, Err(FormatError::MissingColumns));
    assert!(store.is_empty());
}

#[test]
fn test_unreadable_bytes() {
    let mut store = RecordStore::new();
    let result = store.load(b"PK\x03\x04 truncated zip");
    assert!(matches!(result, Err(FormatError::Unreadable(_))));
}
