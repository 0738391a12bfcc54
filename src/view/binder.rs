use crate::models::RecordStore;
use crate::selection::{SelectionCounts, SelectionState};
use crate::view::ViewItem;

/// 把记录和选中状态投影为可渲染的列表项
pub fn project(records: &RecordStore, selection: &SelectionState) -> Vec<ViewItem> {
    records
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| ViewItem {
            index,
            text: record.display_text(),
            type_key: record.type_key(),
            badge: record.badge(),
            checked: selection.is_selected(index),
        })
        .collect()
}

pub fn counter_text(counts: &SelectionCounts) -> String {
    format!("Selected: {}", counts.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionRecord;
    use serde_json::json;

    #[test]
    fn test_project_applies_placeholders_and_checks() {
        let mut first = QuestionRecord::new();
        first.insert("QuestionText", json!("Name the largest planet."));
        first.insert("QuestionType", json!("Short"));
        let mut second = QuestionRecord::new();
        second.insert("QuestionType", json!(""));
        let records = RecordStore::from_records(vec![first, second]);

        let mut selection = SelectionState::new();
        selection.toggle(1, true);

        let items = project(&records, &selection);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "Name the largest planet.");
        assert_eq!(items[0].badge, "SHORT");
        assert!(!items[0].checked);
        assert_eq!(items[1].text, "No question text found.");
        assert_eq!(items[1].badge, "N/A");
        assert!(items[1].checked);
    }

    #[test]
    fn test_project_ignores_indices_beyond_the_store() {
        let records = RecordStore::from_records(vec![QuestionRecord::new()]);
        let mut selection = SelectionState::new();
        selection.select_all([0, 4]);

        let items = project(&records, &selection);

        assert_eq!(items.len(), 1);
        assert!(items[0].checked);
    }

    #[test]
    fn test_counter_text() {
        let counts = SelectionCounts {
            total: 3,
            ..Default::default()
        };
        assert_eq!(counter_text(&counts), "Selected: 3");
    }
}
