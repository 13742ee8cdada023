//! Column layout for the note wall
//!
//! Provides:
//! - Equal-width column spans, cached until the total width changes
//! - A greedy packer that drops each item into the currently shortest column
//!
//! The packer is a heuristic: it never moves an item once placed, so columns can
//! end up less balanced than an optimal partition would be.

use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

/// Cells reserved around the list content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub top: u16,
    pub bottom: u16,
    pub left: u16,
    pub right: u16,
}

/// Horizontal cell range `start..end` of one column
///
/// Empty (`start == end`) when the list is narrower than its column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub start: u16,
    pub end: u16,
}

impl ColumnSpan {
    pub fn width(&self) -> u16 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }

    /// Width given to an item in this column. The last cell is left as a gutter.
    pub fn item_width(&self) -> u16 {
        self.width().saturating_sub(1)
    }
}

/// Column layout configuration plus the cached spans
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    columns: u16,
    margin: u16,
    insets: Insets,
    spans: Vec<ColumnSpan>,
    last_width: Option<u16>,
}

impl ColumnLayout {
    /// Create a layout with at least one column
    pub fn new(columns: u16, margin: u16, insets: Insets) -> Self {
        Self {
            columns: columns.max(1),
            margin,
            insets,
            spans: Vec::new(),
            last_width: None,
        }
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn spans(&self) -> &[ColumnSpan] {
        &self.spans
    }

    /// Recompute the column spans for `total_width`.
    ///
    /// Does nothing if the width is unchanged since the last call. Returns whether
    /// the spans were recomputed. Remainder cells of the division stay unused.
    pub fn update_width(&mut self, total_width: u16) -> bool {
        if self.last_width == Some(total_width) {
            return false;
        }
        self.last_width = Some(total_width);

        let inner = total_width.saturating_sub(self.insets.left.saturating_add(self.insets.right));
        let width = inner / self.columns;
        let left = self.insets.left;
        self.spans = (0..self.columns)
            .map(|i| {
                let start = left + i * width;
                ColumnSpan {
                    start,
                    end: start + width,
                }
            })
            .collect();
        tracing::debug!(total_width, column_width = width, "recomputed column spans");
        true
    }

    /// Start a placement pass over a list area `total_height` rows tall
    pub fn packer(&self, total_height: u16) -> Packer<'_> {
        let max_y = total_height.saturating_sub(self.insets.bottom);
        let queue = (0..self.spans.len())
            .map(|column| ColumnLoad {
                column,
                height: self.insets.top,
            })
            .filter(|load| load.height < max_y)
            .collect();
        Packer {
            spans: &self.spans,
            queue,
            max_y,
            margin: self.margin,
        }
    }
}

/// Accumulated height of one column during a placement pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLoad {
    column: usize,
    height: u16,
}

/// Where an item landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub column: usize,
    /// Area relative to the list's origin
    pub area: Rect,
}

/// One greedy placement pass
///
/// The work-list holds only columns that still have room, shortest first, ties
/// going to the lower column index.
#[derive(Debug)]
pub struct Packer<'a> {
    spans: &'a [ColumnSpan],
    queue: Vec<ColumnLoad>,
    max_y: u16,
    margin: u16,
}

impl Packer<'_> {
    /// Place an item that wants `height` rows. `None` once every column is full.
    pub fn place(&mut self, height: u16) -> Option<Slot> {
        let load = self.queue.first_mut()?;
        let start = load.height;
        let height = height.min(self.max_y - start);
        let span = self.spans[load.column];

        let slot = Slot {
            column: load.column,
            area: Rect::new(span.start, start, span.item_width(), height),
        };

        load.height = start.saturating_add(height).saturating_add(self.margin);
        if load.height >= self.max_y {
            self.queue.remove(0);
        } else {
            self.queue.sort_by_key(|l| (l.height, l.column));
        }
        Some(slot)
    }

    pub fn is_full(&self) -> bool {
        self.queue.is_empty()
    }
}
