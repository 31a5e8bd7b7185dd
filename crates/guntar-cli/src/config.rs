//! Optional TOML configuration file.
//!
//! ```toml
//! output = "~/unpacked"
//!
//! [keys]
//! quit = ["q", "Esc"]
//! toggle_select = ["Space"]
//! ```

use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::path::PathBuf;

/// Settings read from the configuration file. Command-line flags win.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default extraction directory.
    pub output: Option<PathBuf>,

    /// Key overrides: action name to key names.
    pub keys: HashMap<String, Vec<String>>,
}

impl Config {
    /// Loads `explicit` if given, otherwise `~/.config/guntar/config.toml`
    /// when it exists. No file means default settings.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.is_file() => path,
                _ => return Ok(Self::default()),
            },
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), keys = config.keys.len(), "config loaded");
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(text)?;
        config.output = config.output.map(|p| expand_home(&p));
        Ok(config)
    }

    /// Extraction directory: the flag if given, else the configured one.
    pub fn output_dir(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(expand_home).or_else(|| self.output.clone())
    }
}

fn default_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("guntar").join("config.toml"))
}

/// Replaces a leading `~` with `$HOME`.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    env::var_os("HOME").map_or_else(|| path.to_path_buf(), |home| PathBuf::from(home).join(rest))
}
