use crossterm::event::{Event, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::Paragraph,
    Frame,
};
use std::collections::HashSet;
use thiserror::Error;

use crate::config::Config;
use crate::input::{app_command, AppCommand};
use crate::store::{NoteQuery, NoteService, StoreError};
use crate::ui::list::ListItem;
use crate::ui::{Canvas, ColumnLayout, ListWidget, NoteCard, StyleRegistry, Widget};

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("sync failed: {0}")]
    Sync(#[from] StoreError),
    #[error("label {0:?} not found")]
    UnknownLabel(String),
}

/// What the main loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Root controller: owns the note list and talks to the note service
pub struct App<S> {
    service: S,
    list: ListWidget<NoteCard>,
    styles: StyleRegistry,
    label: String,
    ignore: HashSet<String>,
    show_status_bar: bool,
    /// Last refresh failure, shown in the status bar until the next success
    last_error: Option<String>,
}

impl<S: NoteService> App<S> {
    /// Build the app for a terminal of `size` and load the first batch of notes
    pub fn new(service: S, config: &Config, size: (u16, u16)) -> Self {
        let styles = StyleRegistry::from_theme(&config.resolve_theme());
        let layout = ColumnLayout::new(
            config.layout.columns,
            config.layout.margin,
            config.layout.insets,
        );
        let mut app = Self {
            service,
            list: ListWidget::new(layout, styles),
            styles,
            label: config.label.clone(),
            ignore: config.ignore.clone(),
            show_status_bar: config.appearance.show_status_bar,
            last_error: None,
        };
        app.resize(size.0, size.1);
        app.refresh_or_report();
        app
    }

    pub fn list(&self) -> &ListWidget<NoteCard> {
        &self.list
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the list with the current notes. On failure the old list stays.
    pub fn refresh(&mut self) -> Result<usize, RefreshError> {
        self.service.sync()?;
        let label = self
            .service
            .find_label(&self.label)
            .ok_or_else(|| RefreshError::UnknownLabel(self.label.clone()))?;

        let query = NoteQuery {
            archived: false,
            trashed: false,
            labels: vec![label],
        };
        let notes: Vec<_> = self
            .service
            .find(&query)
            .into_iter()
            .filter(|note| !self.ignore.contains(&note.id))
            .collect();
        let count = notes.len();
        self.list.set_elements(notes);
        Ok(count)
    }

    fn refresh_or_report(&mut self) {
        match self.refresh() {
            Ok(count) => {
                tracing::info!("Loaded {} notes labelled {:?}", count, self.label);
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!("Refresh failed: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Terminal size changed
    pub fn resize(&mut self, width: u16, height: u16) {
        let bar = u16::from(self.show_status_bar);
        self.list.resize(width, height.saturating_sub(bar));
    }

    pub fn handle_event(&mut self, event: &Event) -> Flow {
        match event {
            Event::Resize(width, height) => {
                self.resize(*width, *height);
                Flow::Continue
            }
            Event::Key(key) => self.handle_key(key),
            // Mouse, focus and paste events are not used
            _ => Flow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Flow {
        if self.list.dispatch_input(key) {
            return Flow::Continue;
        }
        match app_command(key) {
            Some(AppCommand::Quit) => Flow::Quit,
            Some(AppCommand::Refresh) => {
                self.refresh_or_report();
                Flow::Continue
            }
            None => Flow::Continue,
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        let bar = u16::from(self.show_status_bar);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(bar)])
            .split(area);

        self.list.render(&mut Canvas::new(f.buffer_mut(), chunks[0]));
        if self.show_status_bar {
            self.draw_status_bar(f, chunks[1]);
        }
    }

    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let line = match &self.last_error {
            Some(error) => Span::styled(format!(" {error} | r: retry | q: quit"), self.styles.error),
            None => {
                let total = self.list.len();
                let position = if self.list.is_empty() { 0 } else { self.list.active() + 1 };
                let pinned = self
                    .list
                    .active_item()
                    .is_some_and(|item| item.record().pinned);
                Span::styled(
                    format!(
                        " {}/{}{} | j/k: nav | e: archive | f: pin | r: refresh | q: quit",
                        position,
                        total,
                        if pinned { " (pinned)" } else { "" }
                    ),
                    self.styles.bar,
                )
            }
        };
        f.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;
    use crate::store::LabelId;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    /// In-memory note service
    #[derive(Default)]
    struct FakeService {
        notes: Vec<Note>,
        fail_sync: bool,
        syncs: usize,
    }

    impl NoteService for FakeService {
        fn login(&mut self, _username: &str, _secret: &str) -> Result<(), StoreError> {
            Ok(())
        }

        fn sync(&mut self) -> Result<(), StoreError> {
            self.syncs += 1;
            if self.fail_sync {
                Err(StoreError::NotLoggedIn)
            } else {
                Ok(())
            }
        }

        fn find_label(&self, name: &str) -> Option<LabelId> {
            (name == "todo").then(|| LabelId("l1".into()))
        }

        fn find(&self, query: &NoteQuery) -> Vec<Note> {
            self.notes.iter().filter(|n| query.matches(n)).cloned().collect()
        }
    }

    fn todo(id: &str, title: &str) -> Note {
        let mut note = Note::text(id, title, "body");
        note.labels = vec!["l1".into()];
        note
    }

    fn service() -> FakeService {
        let mut archived = todo("3", "archived");
        archived.archived = true;
        FakeService {
            notes: vec![todo("1", "first"), todo("2", "second"), archived, todo("4", "hidden")],
            ..FakeService::default()
        }
    }

    fn config() -> Config {
        let mut config = Config { username: "me".into(), ..Config::default() };
        config.ignore.insert("4".into());
        config
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ids(app: &App<FakeService>) -> Vec<String> {
        app.list().items().iter().map(|i| i.note().id.clone()).collect()
    }

    #[test]
    fn test_startup_loads_filtered_notes() {
        let app = App::new(service(), &config(), (40, 12));
        assert_eq!(ids(&app), vec!["1", "2"]);
        assert_eq!(app.list().size(), (40, 11));
        assert!(app.last_error().is_none());
    }

    #[test]
    fn test_keys_reach_the_list() {
        let mut app = App::new(service(), &config(), (40, 12));
        assert_eq!(app.handle_event(&press(KeyCode::Char('j'))), Flow::Continue);
        assert_eq!(app.list().active(), 1);
        assert_eq!(app.handle_event(&press(KeyCode::Char('f'))), Flow::Continue);
        assert!(app.list().items()[1].note().pinned);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(service(), &config(), (40, 12));
        assert_eq!(app.handle_event(&press(KeyCode::Char('q'))), Flow::Quit);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(app.handle_event(&ctrl_c), Flow::Quit);
    }

    #[test]
    fn test_refresh_rebuilds_list() {
        let mut app = App::new(service(), &config(), (40, 12));
        app.handle_event(&press(KeyCode::Char('j')));
        app.service.notes.push(todo("5", "new"));
        app.handle_event(&press(KeyCode::Char('r')));
        assert_eq!(app.service.syncs, 2);
        assert_eq!(ids(&app), vec!["1", "2", "5"]);
        assert_eq!(app.list().active(), 0);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_list() {
        let mut app = App::new(service(), &config(), (40, 12));
        app.service.fail_sync = true;
        app.handle_event(&press(KeyCode::Char('r')));
        assert_eq!(ids(&app), vec!["1", "2"]);
        assert!(app.last_error().unwrap().contains("sync failed"));

        app.service.fail_sync = false;
        app.handle_event(&press(KeyCode::Char('r')));
        assert!(app.last_error().is_none());
    }

    #[test]
    fn test_unknown_label_is_reported() {
        let mut config = config();
        config.label = "groceries".into();
        let app = App::new(service(), &config, (40, 12));
        assert!(app.list().is_empty());
        assert_eq!(app.last_error(), Some("label \"groceries\" not found"));
    }

    #[test]
    fn test_resize_event() {
        let mut app = App::new(service(), &config(), (40, 12));
        app.handle_event(&Event::Resize(60, 20));
        assert_eq!(app.list().size(), (60, 19));
        assert_eq!(app.list().layout().spans()[0].end, 60);
    }

    #[test]
    fn test_draw() {
        let mut app = App::new(service(), &config(), (20, 6));
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String { (0..20).map(|x| buffer[(x, y)].symbol()).collect() };
        assert!(row(0).starts_with("first"));
        assert!(row(1).starts_with("body"));
        assert!(row(3).starts_with("second"));
        assert!(row(5).starts_with(" 1/2"));
    }

    #[test]
    fn test_draw_empty_wall() {
        let mut app = App::new(FakeService::default(), &config(), (20, 4));
        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let top: String = (0..20).map(|x| buffer[(x, 0)].symbol()).collect();
        assert_eq!(top.trim(), "");
    }
}
