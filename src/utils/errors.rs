use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Story error: {message}")]
    Story { message: String },

    #[error("Story '{story_id}' failed validation: {}", errors.join("; "))]
    InvalidStory { story_id: String, errors: Vec<String> },

    #[error("Scene not found: {scene_id}")]
    SceneNotFound { scene_id: String },

    #[error("Story '{story_id}' defines no endings")]
    NoEndings { story_id: String },

    #[error("Run is over: {message}")]
    RunOver { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl GameError {
    pub fn story<S: Into<String>>(message: S) -> Self {
        Self::Story {
            message: message.into(),
        }
    }

    pub fn invalid_story<S: Into<String>>(story_id: S, errors: Vec<String>) -> Self {
        Self::InvalidStory {
            story_id: story_id.into(),
            errors,
        }
    }

    pub fn scene_not_found<S: Into<String>>(scene_id: S) -> Self {
        Self::SceneNotFound {
            scene_id: scene_id.into(),
        }
    }

    pub fn no_endings<S: Into<String>>(story_id: S) -> Self {
        Self::NoEndings {
            story_id: story_id.into(),
        }
    }

    pub fn run_over<S: Into<String>>(message: S) -> Self {
        Self::RunOver {
            message: message.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
