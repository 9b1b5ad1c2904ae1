// App state and main event loop.
// Composes the tab bar with the selection store and handles keyboard and mouse input.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::prelude::*;

use crate::config::{Config, ThemeMode};
use crate::state::{RowLayout, Tab, TabBar};
use crate::store::{SelectionStore, Storage};
use crate::ui;

/// How long to wait for input before advancing animations.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Tabs shown by the demo.
pub fn demo_tabs() -> Vec<Tab> {
    vec![
        Tab::new("overview", "Overview").with_content(
            "Production deployment is healthy.\n\
             Last build finished 4 minutes ago in 38s.\n\
             3 preview deployments are active.",
        ),
        Tab::new("integrations", "Integrations").with_content(
            "GitHub        connected\n\
             Slack         connected\n\
             Log drain     not configured",
        ),
        Tab::new("activity", "Activity").with_content(
            "09:42  Deployment promoted to production\n\
             09:40  Build completed\n\
             09:38  Commit pushed to main\n\
             Yesterday  Environment variable updated",
        ),
        Tab::new("domains", "Domains"),
        Tab::new("usage", "Usage").with_content(
            "Bandwidth       12.4 GB of 100 GB\n\
             Function calls  182k of 1M",
        ),
        Tab::new("monitoring", "Monitoring")
            .with_content("No incidents in the last 30 days."),
        Tab::new("settings", "Settings").with_content(
            "Project name    slidetab\n\
             Root directory  ./\n\
             Build command   cargo build --release\n\
             Output          target/release",
        ),
    ]
}

/// Main application state.
pub struct App {
    /// The tab bar widget.
    pub bar: TabBar,
    /// Layout of the tab row in terminal cells.
    pub layout: RowLayout,
    /// Where the tab bar was last drawn.
    pub bar_area: Rect,
    /// Persisted selections, shared by every tab group.
    pub store: SelectionStore<Box<dyn Storage>>,
    /// Tab group this bar persists its selection under.
    pub group: String,
    pub theme: ThemeMode,
    /// Message shown at the right of the status bar.
    pub status: Option<String>,
    /// Whether the app should exit.
    pub should_quit: bool,
    /// Tab ids selected by the user and not yet persisted.
    selections: Rc<RefCell<Vec<String>>>,
}

impl App {
    pub fn new(config: &Config, storage: Box<dyn Storage>, now: Instant) -> Self {
        let mut store = SelectionStore::open(storage);
        store.subscribe(|selections| {
            tracing::debug!(groups = selections.len(), "Tab selections changed");
        });

        let tabs = demo_tabs();
        let layout = ui::layout_tabs(&tabs);

        let selections: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = Rc::clone(&selections);
        let mut bar = TabBar::new(tabs)
            .with_active_tab(store.get(&config.group))
            .with_on_change(move |id| sink.borrow_mut().push(id.to_string()));
        bar.mount(&layout, now);

        tracing::info!(
            group = %config.group,
            active = bar.active_tab().map(|t| t.id.as_str()).unwrap_or(""),
            "App started"
        );

        Self {
            bar,
            layout,
            bar_area: Rect::default(),
            store,
            group: config.group.clone(),
            theme: config.theme,
            status: None,
            should_quit: false,
            selections,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            let now = Instant::now();
            self.bar.tick(&self.layout, now);
            self.update_content_height(now);

            terminal.draw(|frame| ui::draw(frame, self, now))?;
            self.bar.frame(&self.layout, Instant::now());

            self.handle_events()?;
            self.persist_selections();
        }
        self.bar.unmount();
        Ok(())
    }

    /// Handle keyboard and other events.
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                self.bar.select_previous(&self.layout, now);
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                self.bar.select_next(&self.layout, now);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.bar.select(index, &self.layout, now);
            }
            KeyCode::Char('t') => self.theme = self.theme.toggle(),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let now = Instant::now();
        let target = self.tab_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.bar.hover(target, &self.layout, now);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.bar.hover(target, &self.layout, now);
                if let Some(index) = target {
                    self.bar.select(index, &self.layout, now);
                }
            }
            _ => {}
        }
    }

    /// Tab under a terminal cell, if the cell lies on the tab bar's label row.
    fn tab_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.bar_area;
        if row != area.y || column < area.x || column >= area.right() {
            return None;
        }
        self.layout.hit_test(f32::from(column - area.x))
    }

    fn update_content_height(&mut self, now: Instant) {
        let height = self
            .bar
            .active_tab()
            .and_then(|tab| tab.content.as_deref())
            .map(ui::measure_height)
            .unwrap_or(0);
        self.bar.set_content_height(f32::from(height), now);
    }

    /// Save user selections made since the last call.
    pub fn persist_selections(&mut self) {
        let pending: Vec<String> = self.selections.borrow_mut().drain(..).collect();
        for id in pending {
            self.status = Some(match self.store.set(self.group.as_str(), id.as_str()) {
                Ok(()) => format!("saved {} ", id),
                Err(e) => format!("not saved: {} ", e),
            });
        }
    }
}
