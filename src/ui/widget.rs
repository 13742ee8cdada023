//! Widget tree primitives
//!
//! Every widget has a rectangle in its parent's coordinate space and at most one
//! focused child. Children are owned by their parent and addressed by index, so the
//! focus slot is a plain `Option<usize>` rather than a reference into the tree.

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use super::canvas::Canvas;

/// State shared by every widget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetBase {
    area: Rect,
    focus: Option<usize>,
}

impl WidgetBase {
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.area.width = width;
        self.area.height = height;
    }

    pub fn set_origin(&mut self, x: u16, y: u16) {
        self.area.x = x;
        self.area.y = y;
    }
}

/// A rectangular node in the widget tree
pub trait Widget {
    fn base(&self) -> &WidgetBase;
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Change the size, keeping the origin
    fn resize(&mut self, width: u16, height: u16) {
        self.base_mut().set_size(width, height);
    }

    /// Change the origin, keeping the size
    fn move_to(&mut self, x: u16, y: u16) {
        self.base_mut().set_origin(x, y);
    }

    fn size(&self) -> (u16, u16) {
        let area = self.base().area();
        (area.width, area.height)
    }

    /// Route future input to child `index` before handling it here. Last call wins.
    fn set_focus(&mut self, index: Option<usize>) {
        self.base_mut().focus = index;
    }

    /// Child at `index`, if this widget has children
    fn child_mut(&mut self, _index: usize) -> Option<&mut dyn Widget> {
        None
    }

    fn focused_child_mut(&mut self) -> Option<&mut dyn Widget> {
        let index = self.base().focus()?;
        self.child_mut(index)
    }

    /// This widget's own key bindings. Returns true if the key was consumed.
    fn handle_key(&mut self, _key: &KeyEvent) -> bool {
        false
    }

    /// Offer `key` to the focused child first, then to [`Widget::handle_key`].
    fn dispatch_input(&mut self, key: &KeyEvent) -> bool {
        if let Some(child) = self.focused_child_mut() {
            if child.dispatch_input(key) {
                return true;
            }
        }
        self.handle_key(key)
    }

    /// Draw into `parent`, the canvas of the widget that owns this one
    fn render(&mut self, _parent: &mut Canvas<'_>) {}
}
