use serde::{Deserialize, Serialize};
use crate::core::PlayerState;
use crate::story::conditions::{check_conditions, Condition};
use crate::utils::{GameError, GameResult};

pub const DEFAULT_ENDING_ID: &str = "ending_lone_survivor";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ending {
    pub id: String,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub criteria: Vec<Condition>,
}

impl Ending {
    pub fn new<S: Into<String>>(id: S, title: S, text: S, criteria: Vec<Condition>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            criteria,
        }
    }

    pub fn matches(&self, state: &PlayerState) -> bool {
        check_conditions(&self.criteria, state)
    }
}

/// Ordered ending list. Authoring order is the only tie-break: the first match wins.
#[derive(Debug, Clone)]
pub struct EndingResolver {
    endings: Vec<Ending>,
    fallback_index: usize,
}

impl EndingResolver {
    pub fn new(
        story_id: &str,
        endings: Vec<Ending>,
        default_ending_id: Option<String>,
    ) -> GameResult<Self> {
        if endings.is_empty() {
            return Err(GameError::no_endings(story_id));
        }

        let default_ending_id = default_ending_id.unwrap_or_else(|| DEFAULT_ENDING_ID.to_string());
        let fallback_index = endings
            .iter()
            .position(|ending| ending.id == default_ending_id)
            .unwrap_or(endings.len() - 1);

        Ok(Self {
            endings,
            fallback_index,
        })
    }

    /// First ending whose criteria all hold; else the default ending; else the last one listed.
    pub fn pick_ending(&self, state: &PlayerState) -> &Ending {
        self.endings
            .iter()
            .find(|ending| ending.matches(state))
            .unwrap_or_else(|| self.fallback())
    }

    pub fn fallback(&self) -> &Ending {
        &self.endings[self.fallback_index]
    }

    pub fn get(&self, ending_id: &str) -> Option<&Ending> {
        self.endings.iter().find(|e| e.id == ending_id)
    }

    pub fn endings(&self) -> &[Ending] {
        &self.endings
    }
}
