//! Note records as handed out by the note service.

use serde::{Deserialize, Serialize};

use crate::ui::text::ellipsize;

/// Glyph drawn in front of a checked checklist item
pub const CHECKED: char = '☒';
/// Glyph drawn in front of an unchecked checklist item
pub const UNCHECKED: char = '☐';

/// A single note, either free text or a checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable identifier assigned by the service
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub trashed: bool,
    /// Label ids attached to this note
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(flatten)]
    pub body: NoteBody,
}

/// Content of a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteBody {
    Checklist { items: Vec<ChecklistItem> },
    Text {
        #[serde(default)]
        text: String,
    },
}

/// One line of a checklist note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

impl Note {
    /// Free-text note
    pub fn text(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_body(id, title, NoteBody::Text { text: text.into() })
    }

    /// Checklist note from `(text, checked)` pairs
    pub fn checklist<I, S>(id: impl Into<String>, title: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|(text, checked)| ChecklistItem {
                text: text.into(),
                checked,
            })
            .collect();
        Self::with_body(id, title, NoteBody::Checklist { items })
    }

    fn with_body(id: impl Into<String>, title: impl Into<String>, body: NoteBody) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            pinned: false,
            archived: false,
            trashed: false,
            labels: Vec::new(),
            body,
        }
    }

    pub fn toggle_archived(&mut self) {
        self.archived = !self.archived;
    }

    pub fn toggle_pinned(&mut self) {
        self.pinned = !self.pinned;
    }
}

impl NoteBody {
    /// Number of content rows the body occupies when fully shown
    pub fn line_count(&self) -> usize {
        match self {
            NoteBody::Text { text } => text.split('\n').count(),
            NoteBody::Checklist { items } => items.len(),
        }
    }

    /// Content rows, each fitted to `width` cells
    pub fn render_lines(&self, width: usize) -> Vec<String> {
        match self {
            NoteBody::Text { text } => text.split('\n').map(|line| ellipsize(line, width)).collect(),
            NoteBody::Checklist { items } => items
                .iter()
                .map(|item| {
                    let mark = if item.checked { CHECKED } else { UNCHECKED };
                    format!("{mark}{}", ellipsize(&item.text, width.saturating_sub(1)))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count() {
        assert_eq!(Note::text("a", "", "").body.line_count(), 1);
        assert_eq!(Note::text("a", "", "one\ntwo\nthree").body.line_count(), 3);
        assert_eq!(Note::text("a", "", "trailing\n").body.line_count(), 2);

        let list = Note::checklist("b", "", [("milk", false), ("eggs", true)]);
        assert_eq!(list.body.line_count(), 2);
        let empty = Note::checklist("c", "", Vec::<(String, bool)>::new());
        assert_eq!(empty.body.line_count(), 0);
    }

    #[test]
    fn test_render_lines_text() {
        let note = Note::text("a", "", "short\na much longer line");
        assert_eq!(note.body.render_lines(8), vec!["short", "a much ⋯"]);
    }

    #[test]
    fn test_render_lines_checklist() {
        let note = Note::checklist("b", "", [("milk", false), ("bread and butter", true)]);
        assert_eq!(note.body.render_lines(6), vec!["☐milk", "☒brea⋯"]);
    }

    #[test]
    fn test_toggles() {
        let mut note = Note::text("a", "t", "x");
        note.toggle_archived();
        note.toggle_pinned();
        assert!(note.archived && note.pinned);
        note.toggle_pinned();
        assert!(!note.pinned);
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let json = r#"[
            {"id": "1", "title": "Groceries", "labels": ["l1"], "items": [{"text": "milk", "checked": true}]},
            {"id": "2", "text": "hello\nworld", "pinned": true},
            {"id": "3", "title": "Empty"}
        ]"#;
        let notes: Vec<Note> = serde_json::from_str(json).unwrap();
        assert_eq!(notes[0].body, NoteBody::Checklist {
            items: vec![ChecklistItem { text: "milk".into(), checked: true }],
        });
        assert_eq!(notes[1].title, "");
        assert!(notes[1].pinned);
        assert_eq!(notes[1].body, NoteBody::Text { text: "hello\nworld".into() });
        assert_eq!(notes[0].labels, vec!["l1"]);
        assert_eq!(notes[2].body, NoteBody::Text { text: String::new() });
    }
}
