use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::utils::{GameError, GameResult};
use tracing::{debug, info};

/// Environment variables with this prefix override file settings, e.g. `CONSEQUENCE__UI__THEME=dark`.
pub const ENV_PREFIX: &str = "CONSEQUENCE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub game: GameConfig,
    pub ui: UiConfig,
    pub paths: PathConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Story id or path to a `.json` story file.
    pub story: String,
    pub show_banner: bool,
    pub offer_restart: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub theme: String,
    pub color: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    pub stories_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig {
                story: crate::story::content::STORY_ID.to_string(),
                show_banner: true,
                offer_restart: true,
            },
            ui: UiConfig {
                theme: "default".to_string(),
                color: true,
            },
            paths: PathConfig {
                stories_dir: PathBuf::from("./assets/stories"),
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
            },
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then `CONSEQUENCE__*` environment variables.
    /// A missing file is created with the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {:?} not found, writing defaults", path);
            Self::default().save_to_file(path)?;
        }

        let config = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Self::default())?)
            .add_source(::config::File::from(path).format(::config::FileFormat::Toml))
            .add_source(Self::environment())
            .build()?
            .try_deserialize::<Self>()?;

        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Defaults overridden by the environment only.
    pub fn from_env() -> GameResult<Self> {
        let config = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Self::default())?)
            .add_source(Self::environment())
            .build()?
            .try_deserialize::<Self>()?;
        Ok(config)
    }

    fn environment() -> ::config::Environment {
        ::config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| GameError::configuration(format!("Failed to create config directory: {}", e)))?;
            }
        }

        let toml_content = toml::to_string_pretty(self)?;

        std::fs::write(path, toml_content)
            .map_err(|e| GameError::configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn get_stories_dir(&self) -> &Path {
        &self.paths.stories_dir
    }

    pub fn validate(&self) -> GameResult<()> {
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => return Err(GameError::configuration(format!("Invalid logging level: {}", other))),
        }

        if self.game.story.trim().is_empty() {
            return Err(GameError::configuration("Story cannot be empty"));
        }
        if self.paths.stories_dir.as_os_str().is_empty() {
            return Err(GameError::configuration("Stories directory path cannot be empty"));
        }
        if self.ui.theme.trim().is_empty() {
            return Err(GameError::configuration("Theme cannot be empty"));
        }

        Ok(())
    }

    pub fn merge_with_cli(&mut self, cli_config: CliConfig) {
        if let Some(story) = cli_config.story {
            self.game.story = story;
        }
        if let Some(stories_dir) = cli_config.stories_dir {
            self.paths.stories_dir = stories_dir;
        }
        if let Some(theme) = cli_config.theme {
            self.ui.theme = theme;
        }
        if cli_config.no_color {
            self.ui.color = false;
        }
        if cli_config.debug {
            self.logging.level = "debug".to_string();
        }
    }
}

/// Settings that command-line flags can override.
#[derive(Debug, Default)]
pub struct CliConfig {
    pub story: Option<String>,
    pub stories_dir: Option<PathBuf>,
    pub theme: Option<String>,
    pub no_color: bool,
    pub debug: bool,
}
