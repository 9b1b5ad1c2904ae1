// Runtime configuration.
// Reads theme, tab group, state directory, and log filter from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Result, SlidetabError};
use crate::store::paths;

/// Default tab group identifier used by the demo.
pub const DEFAULT_GROUP: &str = "demo";

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Color context the widget renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggle(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = SlidetabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(SlidetabError::InvalidConfig(format!(
                "unknown theme '{}', expected 'light' or 'dark'",
                other
            ))),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub theme: ThemeMode,
    /// Tab group identifier the demo persists its selection under.
    pub group: String,
    /// Directory holding the persisted selection blob and the log file.
    pub state_dir: Option<PathBuf>,
    pub log_filter: String,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let theme = match lookup("SLIDETAB_THEME") {
            Some(value) => value.parse()?,
            None => ThemeMode::default(),
        };

        let group = lookup("SLIDETAB_GROUP")
            .filter(|g| !g.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GROUP.to_string());

        let state_dir = lookup("SLIDETAB_STATE_DIR")
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .or_else(paths::state_dir);

        let log_filter = lookup("SLIDETAB_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            theme,
            group,
            state_dir,
            log_filter,
        })
    }

    /// State directory, or an error when the platform provides none.
    pub fn require_state_dir(&self) -> Result<&PathBuf> {
        self.state_dir.as_ref().ok_or(SlidetabError::NoStateDir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.group, DEFAULT_GROUP);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SLIDETAB_THEME", "Light"),
            ("SLIDETAB_GROUP", "sidebar"),
            ("SLIDETAB_STATE_DIR", "/tmp/slidetab-test"),
            ("SLIDETAB_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.group, "sidebar");
        assert_eq!(
            config.require_state_dir().unwrap(),
            &PathBuf::from("/tmp/slidetab-test")
        );
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_invalid_theme() {
        let err = Config::from_lookup(lookup(&[("SLIDETAB_THEME", "sepia")])).unwrap_err();
        assert!(matches!(err, SlidetabError::InvalidConfig(_)));
    }

    #[test]
    fn test_blank_group_falls_back() {
        let config = Config::from_lookup(lookup(&[("SLIDETAB_GROUP", "  ")])).unwrap();
        assert_eq!(config.group, DEFAULT_GROUP);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggle().name(), "dark");
    }
}
