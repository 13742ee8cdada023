//! Note card widget
//!
//! Renders one note as a block of rows:
//! - Title (underlined) with the archived/pinned glyphs at the right edge
//! - Text lines, or checklist items prefixed with a checkbox glyph

use ratatui::style::Style;

use super::canvas::Canvas;
use super::list::ListItem;
use super::text::ellipsize;
use super::theme::{Highlight, StyleRegistry};
use super::widget::{Widget, WidgetBase};
use crate::note::Note;

/// Cells taken by the status glyphs plus the gap before them
const STATUS_WIDTH: u16 = 3;
const ARCHIVED_GLYPH: char = '⊔';
const PINNED_GLYPH: char = '○';

/// Item widget wrapping a single [`Note`]
#[derive(Debug)]
pub struct NoteCard {
    base: WidgetBase,
    note: Note,
    styles: StyleRegistry,
    active: bool,
    selected: bool,
    background: Style,
}

impl NoteCard {
    pub fn new(note: Note, styles: StyleRegistry) -> Self {
        let mut card = Self {
            base: WidgetBase::default(),
            note,
            styles,
            active: false,
            selected: false,
            background: styles.plain,
        };
        card.update_highlight();
        card
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn highlight(&self) -> Highlight {
        Highlight::from_flags(self.active, self.selected)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn update_highlight(&mut self) {
        self.background = self.styles.background(self.highlight());
    }

    fn status_glyphs(&self) -> String {
        let archived = if self.note.archived { ARCHIVED_GLYPH } else { ' ' };
        let pinned = if self.note.pinned { PINNED_GLYPH } else { ' ' };
        format!("{archived}{pinned}")
    }
}

impl Widget for NoteCard {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn render(&mut self, parent: &mut Canvas<'_>) {
        let (width, height) = self.size();
        if width == 0 || height == 0 {
            return;
        }

        let mut canvas = parent.region(self.base.area());
        if canvas.area().is_empty() {
            return;
        }
        canvas.set_base_style(self.background);
        canvas.clear();

        let mut first_row = 0;
        if !self.note.title.is_empty() {
            if width > STATUS_WIDTH {
                canvas.put_str_clipped(width - 2, 0, &self.status_glyphs(), self.styles.status);
            }
            let title = ellipsize(&self.note.title, usize::from(width.saturating_sub(STATUS_WIDTH)));
            canvas.put_str_clipped(0, 0, &title, self.styles.title);
            first_row = 1;
        }

        let rows = height.saturating_sub(first_row);
        let lines = self.note.body.render_lines(usize::from(width));
        for (row, line) in (first_row..).zip(lines.iter().take(usize::from(rows))) {
            canvas.put_str_clipped(0, row, line, Style::default());
        }
    }
}

impl ListItem for NoteCard {
    type Record = Note;

    fn build(record: Note, styles: StyleRegistry) -> Self {
        Self::new(record, styles)
    }

    /// Title row plus one row per line or checklist item
    fn height(&self) -> u16 {
        let rows = 1 + self.note.body.line_count();
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        self.update_highlight();
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.update_highlight();
    }

    fn record(&self) -> &Note {
        &self.note
    }

    fn record_mut(&mut self) -> &mut Note {
        &mut self.note
    }
}
