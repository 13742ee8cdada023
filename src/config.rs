use anyhow::{bail, Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::credentials::FileCredentials;
use crate::ui::layout::Insets;
use crate::ui::theme::{serde_color, Theme};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Account used to log in to the note service
    pub username: String,
    /// Note ids never shown on the wall
    pub ignore: HashSet<String>,
    /// Only notes carrying this label are shown
    pub label: String,
    pub store: StoreConfig,
    pub layout: LayoutConfig,
    pub appearance: AppearanceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON snapshot read by the local note store
    pub path: PathBuf,
    /// Credentials file, see `credentials.rs`
    pub credentials: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub columns: u16,
    /// Blank rows between stacked notes
    pub margin: u16,
    pub insets: Insets,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Preset name: "keep", "midnight", "nord", "gruvbox"
    pub theme: String,
    pub show_status_bar: bool,
    #[serde(deserialize_with = "serde_color::deserialize_option")]
    pub card_bg: Option<Color>,
    #[serde(deserialize_with = "serde_color::deserialize_option")]
    pub card_fg: Option<Color>,
    #[serde(deserialize_with = "serde_color::deserialize_option")]
    pub active_bg: Option<Color>,
    #[serde(deserialize_with = "serde_color::deserialize_option")]
    pub active_fg: Option<Color>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: String::new(),
            ignore: HashSet::new(),
            label: "todo".to_string(),
            store: StoreConfig::default(),
            layout: LayoutConfig::default(),
            appearance: AppearanceConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: data.join("notewall").join("notes.json"),
            credentials: FileCredentials::default_path(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 1,
            margin: 1,
            insets: Insets::default(),
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "keep".to_string(),
            show_status_bar: true,
            card_bg: None,
            card_fg: None,
            active_bg: None,
            active_fg: None,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        let config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            tracing::info!("Config file not found, using defaults");
            Self::default()
        };
        Ok(config.expand_paths())
    }

    fn expand_paths(mut self) -> Self {
        self.store.path = expand(&self.store.path);
        self.store.credentials = expand(&self.store.credentials);
        self
    }

    /// Reject configurations the wall cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            bail!("`username` is not set in the config file");
        }
        if self.label.trim().is_empty() {
            bail!("`label` must not be empty");
        }
        if self.layout.columns == 0 {
            bail!("`layout.columns` must be at least 1");
        }
        Ok(())
    }

    /// Preset named in the config with any color overrides applied
    pub fn resolve_theme(&self) -> Theme {
        let appearance = &self.appearance;
        let mut theme = Theme::from_preset(&appearance.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, using default", appearance.theme);
            Theme::default()
        });
        if let Some(c) = appearance.card_bg {
            theme.card_bg = c;
        }
        if let Some(c) = appearance.card_fg {
            theme.card_fg = c;
        }
        if let Some(c) = appearance.active_bg {
            theme.active_bg = c;
        }
        if let Some(c) = appearance.active_fg {
            theme.active_fg = c;
        }
        theme
    }
}

fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<Config> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        Config::load(path.to_str().unwrap())
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load("/definitely/not/a/config.toml").unwrap();
        assert_eq!(config.label, "todo");
        assert_eq!(config.layout.columns, 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_full_config() {
        let config = load(
            r##"
            username = "me@example.com"
            ignore = ["abc", "def"]
            label = "wall"

            [store]
            path = "/tmp/notes.json"

            [layout]
            columns = 2
            margin = 0
            insets = { top = 1, left = 2 }

            [appearance]
            theme = "nord"
            show_status_bar = false
            active_bg = "#ff0000"
            "##,
        )
        .unwrap();

        config.validate().unwrap();
        assert!(config.ignore.contains("abc") && config.ignore.contains("def"));
        assert_eq!(config.store.path, PathBuf::from("/tmp/notes.json"));
        assert_eq!(config.layout.insets, Insets { top: 1, bottom: 0, left: 2, right: 0 });
        assert!(!config.appearance.show_status_bar);

        let theme = config.resolve_theme();
        assert_eq!(theme.active_bg, Color::Rgb(255, 0, 0));
        assert_eq!(theme.card_bg, Theme::nord().card_bg);
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let err = load("[appearance]\ncard_bg = \"#nothex\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_validate() {
        let mut config = Config { username: "me".into(), ..Config::default() };
        config.validate().unwrap();
        config.layout.columns = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let mut config = Config::default();
        config.appearance.theme = "solarized".into();
        assert_eq!(config.resolve_theme(), Theme::default());
    }
}
