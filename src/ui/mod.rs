//! UI module - widget tree and rendering
//!
//! Structure:
//! - `canvas.rs` - Clipping drawing surface over the frame buffer
//! - `widget.rs` - Widget trait and focus handling
//! - `layout.rs` - Column spans and greedy placement
//! - `list.rs` - Multi-column list widget
//! - `note_card.rs` - Note card item widget
//! - `theme.rs` - Color themes and the style registry
//! - `text.rs` - Text fitting

pub mod canvas;
pub mod layout;
pub mod list;
pub mod note_card;
pub mod text;
pub mod theme;
pub mod widget;

// Re-export commonly used types
pub use canvas::Canvas;
pub use layout::{ColumnLayout, Insets};
pub use list::ListWidget;
pub use note_card::NoteCard;
pub use theme::{StyleRegistry, Theme};
pub use widget::Widget;
