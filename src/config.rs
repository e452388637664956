//! Configuration management for dicelisp

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DicelispError, Result};
use crate::lisp::DEFAULT_MAX_DEPTH;
use crate::tui::DEFAULT_PROMPT;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Interpreter settings
    #[serde(default)]
    pub interpreter: InterpreterConfig,

    /// Workbench settings
    #[serde(default)]
    pub tui: TuiConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// General configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory `import` and `open` paths are relative to.
    /// Defaults to the working directory.
    pub import_dir: Option<PathBuf>,
}

/// Interpreter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Maximum nested evaluation depth
    pub max_depth: usize,
}

/// Workbench configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Milliseconds between redraws
    pub tick_rate_ms: u64,
    /// Prompt in front of the input bar
    pub prompt: String,
    /// Title in the header line
    pub title: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log file used while the workbench owns the terminal
    pub file: Option<PathBuf>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            prompt: DEFAULT_PROMPT.to_string(),
            title: "Dice".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DicelispError::config("Could not find config directory"))?;
        Ok(config_dir.join("dicelisp").join("config.toml"))
    }

    /// The override path if given, else the default path
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(p.to_path_buf()),
            None => Self::config_path(),
        }
    }

    /// Load configuration from `path`, falling back to defaults when it is missing
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::debug!(path = %path.display(), "loaded configuration");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| DicelispError::config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Overwrite `path` with the defaults
    pub fn reset(path: &Path) -> Result<()> {
        Self::default().save(path)
    }

    /// Write a default configuration file
    pub fn init(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(DicelispError::config(
                "Configuration file already exists. Use --force to overwrite.",
            ));
        }
        Self::default().save(path)
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "general.import_dir" => self.general.import_dir.as_ref().map(|p| p.display().to_string()),

            "interpreter.max_depth" => Some(self.interpreter.max_depth.to_string()),

            "tui.tick_rate_ms" => Some(self.tui.tick_rate_ms.to_string()),
            "tui.prompt" => Some(self.tui.prompt.clone()),
            "tui.title" => Some(self.tui.title.clone()),

            "logging.level" => Some(self.logging.level.clone()),
            "logging.file" => self.logging.file.as_ref().map(|p| p.display().to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "general.import_dir" => {
                self.general.import_dir = if value.is_empty() { None } else { Some(PathBuf::from(value)) };
            }

            "interpreter.max_depth" => {
                self.interpreter.max_depth = value
                    .parse()
                    .ok()
                    .filter(|&depth: &usize| depth > 0)
                    .ok_or_else(|| DicelispError::config("Invalid number for max_depth"))?;
            }

            "tui.tick_rate_ms" => {
                self.tui.tick_rate_ms = value
                    .parse()
                    .ok()
                    .filter(|&ms: &u64| ms > 0)
                    .ok_or_else(|| DicelispError::config("Invalid number for tick_rate_ms"))?;
            }
            "tui.prompt" => {
                self.tui.prompt = value.to_string();
            }
            "tui.title" => {
                self.tui.title = value.to_string();
            }

            "logging.level" => {
                self.logging.level = value.to_string();
            }
            "logging.file" => {
                self.logging.file = if value.is_empty() { None } else { Some(PathBuf::from(value)) };
            }

            _ => {
                return Err(DicelispError::config(format!("Unknown configuration key: {}", key)));
            }
        }

        Ok(())
    }

    /// Directory imports resolve against
    pub fn import_dir(&self) -> PathBuf {
        self.general.import_dir.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        })
    }

    /// Redraw interval
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_rate_ms.max(1))
    }

    /// Where workbench logs go
    pub fn log_file(&self) -> PathBuf {
        self.logging.file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("dicelisp")
                .join("dicelisp.log")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.interpreter.max_depth, 512);
        assert_eq!(config.tui.tick_rate_ms, 100);
        assert_eq!(config.tui.prompt, " > ");
        assert_eq!(config.tick_rate(), Duration::from_millis(100));
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        config.set("interpreter.max_depth", "64").unwrap();
        assert_eq!(config.get("interpreter.max_depth"), Some("64".to_string()));

        config.set("general.import_dir", "/srv/scripts").unwrap();
        assert_eq!(config.import_dir(), PathBuf::from("/srv/scripts"));

        config.set("general.import_dir", "").unwrap();
        assert_eq!(config.get("general.import_dir"), None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("interpreter.max_depth", "zero").is_err());
        assert!(config.set("interpreter.max_depth", "0").is_err());
        assert!(config.set("tui.tick_rate_ms", "-5").is_err());
        assert!(config.set("no.such.key", "1").is_err());
    }

    #[test]
    fn test_save_load_and_init() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert_eq!(Config::load(&path).unwrap().tui.title, "Dice");

        Config::init(&path, false).unwrap();
        assert!(Config::init(&path, false).is_err());

        let mut config = Config::load(&path).unwrap();
        config.set("tui.title", "Table").unwrap();
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap().tui.title, "Table");

        Config::reset(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap().tui.title, "Dice");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[interpreter]\nmax_depth = 99\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.interpreter.max_depth, 99);
        assert_eq!(config.tui.tick_rate_ms, 100);
    }
}
