//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--show-hidden`, `--dirs-only`, `--no-preview`, `--sort`)
//! 2. `--config <FILE>`
//! 3. `$NAVFM_CONFIG` environment variable (path to config file)
//! 4. Global `~/.config/navfm/config.toml`
//! 5. Built-in defaults
//!
//! The result is frozen into a [`Settings`] snapshot at startup; nothing is
//! ever written back.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::fs::listing::SortKey;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Program used to open files in the foreground.
    pub editor: Option<String>,
    /// Program used to open files detached in the background.
    pub opener: Option<String>,
    /// Show dotfiles.
    pub show_hidden: Option<bool>,
    /// Only list directories.
    pub dirs_only: Option<bool>,
    /// Whether the preview pane is shown.
    pub preview: Option<bool>,
}

/// Listing order settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SortConfig {
    /// Sort key: "name", "modified", "size".
    pub by: Option<String>,
    /// Directories always listed first.
    pub dirs_first: Option<bool>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub sort: SortConfig,
}

/// Immutable per-session settings handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub editor: String,
    pub opener: String,
    pub show_hidden: bool,
    pub dirs_only: bool,
    pub preview: bool,
    pub sort: SortKey,
    pub dirs_first: bool,
}

impl Default for Settings {
    fn default() -> Self {
        AppConfig::default().settings()
    }
}

// ── Default constants ────────────────────────────────────────────────────────

pub const DEFAULT_EDITOR: &str = "nvim";
pub const DEFAULT_OPENER: &str = "xdg-open";

fn env_or(var: &str, default: &str) -> String {
    match std::env::var(var) {
        Ok(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path; that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("NAVFM_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("navfm").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning logged).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => {
            debug!(path = %path.display(), "loaded config file");
            Some(cfg)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse config file");
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `Some` values in `other` win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                editor: other.general.editor.clone().or(self.general.editor),
                opener: other.general.opener.clone().or(self.general.opener),
                show_hidden: other.general.show_hidden.or(self.general.show_hidden),
                dirs_only: other.general.dirs_only.or(self.general.dirs_only),
                preview: other.general.preview.or(self.general.preview),
            },
            sort: SortConfig {
                by: other.sort.by.clone().or(self.sort.by),
                dirs_first: other.sort.dirs_first.or(self.sort.dirs_first),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            match load_file(cli_path) {
                Some(file_cfg) => config = config.merge(&file_cfg),
                None => warn!(path = %cli_path.display(), "config file not loaded"),
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Foreground editor: config, then `$EDITOR`, then `nvim`.
    pub fn editor(&self) -> String {
        self.general
            .editor
            .clone()
            .unwrap_or_else(|| env_or("EDITOR", DEFAULT_EDITOR))
    }

    /// Background opener: config, then `$OPENER`, then `xdg-open`.
    pub fn opener(&self) -> String {
        self.general
            .opener
            .clone()
            .unwrap_or_else(|| env_or("OPENER", DEFAULT_OPENER))
    }

    pub fn show_hidden(&self) -> bool {
        self.general.show_hidden.unwrap_or(false)
    }

    pub fn dirs_only(&self) -> bool {
        self.general.dirs_only.unwrap_or(false)
    }

    pub fn preview_enabled(&self) -> bool {
        self.general.preview.unwrap_or(true)
    }

    /// Sort key; unknown names fall back to name order.
    pub fn sort_by(&self) -> SortKey {
        match self.sort.by.as_deref() {
            None => SortKey::Name,
            Some(s) => s.parse().unwrap_or_else(|e| {
                warn!(error = %e, "using name order");
                SortKey::Name
            }),
        }
    }

    pub fn dirs_first(&self) -> bool {
        self.sort.dirs_first.unwrap_or(true)
    }

    /// Freeze into the session snapshot.
    pub fn settings(&self) -> Settings {
        Settings {
            editor: self.editor(),
            opener: self.opener(),
            show_hidden: self.show_hidden(),
            dirs_only: self.dirs_only(),
            preview: self.preview_enabled(),
            sort: self.sort_by(),
            dirs_first: self.dirs_first(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
