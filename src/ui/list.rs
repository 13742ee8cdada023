//! Multi-column list widget
//!
//! Owns a sequence of item widgets, places them with [`ColumnLayout`] on every
//! render and keeps exactly one of them active.

use crossterm::event::KeyEvent;

use super::canvas::Canvas;
use super::layout::{ColumnLayout, Insets};
use super::theme::StyleRegistry;
use super::widget::{Widget, WidgetBase};
use crate::input::{list_command, ListCommand};
use crate::note::Note;

/// Record flags the list key bindings can flip
pub trait Flags {
    fn toggle_archived(&mut self);
    fn toggle_pinned(&mut self);
}

impl Flags for Note {
    fn toggle_archived(&mut self) {
        Note::toggle_archived(self);
    }

    fn toggle_pinned(&mut self) {
        Note::toggle_pinned(self);
    }
}

/// Item widget contract used by [`ListWidget`]
pub trait ListItem: Widget {
    type Record: Flags;

    fn build(record: Self::Record, styles: StyleRegistry) -> Self;

    /// Rows needed to show the whole record. Must not depend on anything but the record.
    fn height(&self) -> u16;

    fn set_active(&mut self, active: bool);
    fn set_selected(&mut self, selected: bool);

    fn record(&self) -> &Self::Record;
    fn record_mut(&mut self) -> &mut Self::Record;
}

/// List of item widgets laid out in columns
#[derive(Debug)]
pub struct ListWidget<T> {
    base: WidgetBase,
    layout: ColumnLayout,
    styles: StyleRegistry,
    items: Vec<T>,
    active: usize,
}

impl<T: ListItem> ListWidget<T> {
    pub fn new(layout: ColumnLayout, styles: StyleRegistry) -> Self {
        Self {
            base: WidgetBase::default(),
            layout,
            styles,
            items: Vec::new(),
            active: 0,
        }
    }

    /// Two columns, one blank row between items, no insets
    pub fn two_column(styles: StyleRegistry) -> Self {
        Self::new(ColumnLayout::new(2, 1, Insets::default()), styles)
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_item(&self) -> Option<&T> {
        self.items.get(self.active)
    }

    /// Replace every item with widgets built from `records`, activating the first
    pub fn set_elements<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = T::Record>,
    {
        let styles = self.styles;
        self.items = records.into_iter().map(|r| T::build(r, styles)).collect();
        self.active = 0;
        self.set_focus(None);
        if let Some(first) = self.items.first_mut() {
            first.set_active(true);
        }
    }

    /// Move the active item by `delta`, wrapping around both ends
    pub fn change_active(&mut self, delta: isize) {
        if self.items.is_empty() {
            self.active = 0;
            return;
        }
        let len = self.items.len() as isize;
        self.items[self.active].set_active(false);
        self.active = (self.active as isize + delta).rem_euclid(len) as usize;
        self.items[self.active].set_active(true);
    }

    fn run(&mut self, command: ListCommand) {
        match command {
            ListCommand::Next => self.change_active(1),
            ListCommand::Previous => self.change_active(-1),
            ListCommand::ToggleArchived => {
                if let Some(item) = self.items.get_mut(self.active) {
                    item.record_mut().toggle_archived();
                }
            }
            ListCommand::TogglePinned => {
                if let Some(item) = self.items.get_mut(self.active) {
                    item.record_mut().toggle_pinned();
                }
            }
            ListCommand::Open => {}
        }
    }
}

impl<T: ListItem> Widget for ListWidget<T> {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.base.set_size(width, height);
        self.layout.update_width(width);
    }

    fn move_to(&mut self, x: u16, y: u16) {
        self.base.set_origin(x, y);
        self.layout.update_width(self.base.area().width);
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut dyn Widget> {
        self.items.get_mut(index).map(|item| item as &mut dyn Widget)
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match list_command(key) {
            Some(command) => {
                self.run(command);
                true
            }
            None => false,
        }
    }

    fn render(&mut self, parent: &mut Canvas<'_>) {
        let (width, height) = self.size();
        self.layout.update_width(width);

        let mut canvas = parent.region(self.base.area());
        let mut packer = self.layout.packer(height);
        for item in &mut self.items {
            if packer.is_full() {
                break;
            }
            let Some(slot) = packer.place(item.height()) else {
                break;
            };
            tracing::trace!(column = slot.column, area = ?slot.area, "placed item");
            item.resize(slot.area.width, slot.area.height);
            item.move_to(slot.area.x, slot.area.y);
            item.render(&mut canvas);
        }
    }
}
