// slidetab: an animated horizontal tab bar and a persisted tab selection store.
// The widget state is renderer agnostic; the ui module draws it with ratatui.

pub mod app;
pub mod config;
pub mod error;
pub mod state;
pub mod store;
pub mod ui;

pub use config::{Config, ThemeMode};
pub use error::{Result, SlidetabError};
pub use state::{Geometry, LayoutProbe, Tab, TabBar};
pub use store::{SelectionStore, Storage};
