use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use crate::core::MAX_VISIBLE_CHOICES;
use crate::story::{CompiledStory, Effect, Ending, EndingResolver, SceneGraph, StatDelta};
use crate::utils::{GameError, GameResult};
use tracing::{debug, warn};

pub const DEFAULT_STARTING_SCENE_ID: &str = "intro";
pub const TERMINAL_SCENE_ID: &str = "THE_END";

/// An authored story as pure data. `compile` turns it into the immutable runtime form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_starting_scene")]
    pub starting_scene_id: String,
    #[serde(default = "default_terminal_scene")]
    pub terminal_scene_id: String,
    pub scenes: Vec<Scene>,
    pub endings: Vec<Ending>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ending_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub text: String,
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_enter: Option<Vec<Effect>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub target_scene_id: String,
    #[serde(default)]
    pub delta: StatDelta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Vec<Effect>>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_starting_scene() -> String {
    DEFAULT_STARTING_SCENE_ID.to_string()
}

fn default_terminal_scene() -> String {
    TERMINAL_SCENE_ID.to_string()
}

impl Story {
    pub fn new<S: Into<String>>(id: S, title: S) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            author: String::new(),
            version: default_version(),
            starting_scene_id: default_starting_scene(),
            terminal_scene_id: default_terminal_scene(),
            scenes: Vec::new(),
            endings: Vec::new(),
            default_ending_id: None,
        }
    }

    pub fn add_scene(&mut self, scene: Scene) {
        self.scenes.push(scene);
    }

    pub fn add_ending(&mut self, ending: Ending) {
        self.endings.push(ending);
    }

    pub fn get_scene(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == scene_id)
    }

    pub fn get_starting_scene(&self) -> Option<&Scene> {
        self.get_scene(&self.starting_scene_id)
    }

    pub fn get_scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.get_starting_scene().is_none() {
            errors.push(format!("Starting scene '{}' not found", self.starting_scene_id));
        }

        if self.get_scene(&self.terminal_scene_id).is_some() {
            errors.push(format!(
                "Terminal marker '{}' is also used as a scene ID",
                self.terminal_scene_id
            ));
        }

        for scene in &self.scenes {
            if let Err(mut scene_errors) = scene.validate(&self.scenes, &self.terminal_scene_id) {
                errors.append(&mut scene_errors);
            }
        }

        let mut scene_ids = HashSet::new();
        for scene in &self.scenes {
            if !scene_ids.insert(&scene.id) {
                errors.push(format!("Duplicate scene ID: '{}'", scene.id));
            }
        }

        if self.endings.is_empty() {
            errors.push("No endings defined".to_string());
        }

        let mut ending_ids = HashSet::new();
        for ending in &self.endings {
            if !ending_ids.insert(&ending.id) {
                errors.push(format!("Duplicate ending ID: '{}'", ending.id));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Scenes authoring more choices than a player can ever be shown.
    pub fn over_provisioned_scenes(&self) -> Vec<&Scene> {
        self.scenes
            .iter()
            .filter(|scene| scene.choices.len() > MAX_VISIBLE_CHOICES)
            .collect()
    }

    /// Validates the story and builds the immutable scene graph and ending resolver.
    pub fn compile(self) -> GameResult<CompiledStory> {
        if let Err(errors) = self.validate() {
            return Err(GameError::invalid_story(&self.id, errors));
        }

        for scene in self.over_provisioned_scenes() {
            warn!(
                "Scene '{}' authors {} choices; only the first {} are reachable",
                scene.id,
                scene.choices.len(),
                MAX_VISIBLE_CHOICES
            );
        }

        if let Some(default_id) = &self.default_ending_id {
            if !self.endings.iter().any(|e| &e.id == default_id) {
                warn!("Default ending '{}' not found; the last ending will be used", default_id);
            }
        }

        let endings = EndingResolver::new(&self.id, self.endings, self.default_ending_id)?;
        let graph = SceneGraph::new(self.scenes, self.starting_scene_id, self.terminal_scene_id)?;

        debug!("Compiled story '{}' with {} scenes", self.id, graph.len());
        Ok(CompiledStory::new(self.id, self.title, graph, endings))
    }
}

impl Scene {
    pub fn new<S: Into<String>>(id: S, text: S) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            choices: Vec::new(),
            on_enter: None,
        }
    }

    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn with_on_enter(mut self, effects: Vec<Effect>) -> Self {
        self.on_enter = Some(effects);
        self
    }

    pub fn add_choice(&mut self, choice: Choice) {
        self.choices.push(choice);
    }

    /// The choices a player can actually pick from, in authored order.
    pub fn visible_choices(&self) -> &[Choice] {
        let count = self.choices.len().min(MAX_VISIBLE_CHOICES);
        &self.choices[..count]
    }

    pub fn validate(&self, all_scenes: &[Scene], terminal_scene_id: &str) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.choices.is_empty() {
            errors.push(format!("Scene '{}' has no choices", self.id));
        }

        for choice in &self.choices {
            if let Err(mut choice_errors) = choice.validate(all_scenes, terminal_scene_id) {
                for error in choice_errors.iter_mut() {
                    *error = format!("Scene '{}': {}", self.id, error);
                }
                errors.append(&mut choice_errors);
            }
        }

        let mut choice_ids = HashSet::new();
        for choice in &self.choices {
            if !choice_ids.insert(&choice.id) {
                errors.push(format!("Scene '{}': Duplicate choice ID: '{}'", self.id, choice.id));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Choice {
    pub fn new<S: Into<String>>(id: S, text: S, target_scene_id: S) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            target_scene_id: target_scene_id.into(),
            delta: StatDelta::NONE,
            after: None,
        }
    }

    pub fn with_delta(mut self, morality: i32, trauma: i32, stress: i32) -> Self {
        self.delta = StatDelta::new(morality, trauma, stress);
        self
    }

    pub fn with_after(mut self, effects: Vec<Effect>) -> Self {
        self.after = Some(effects);
        self
    }

    pub fn sets_flag<S: Into<String>>(self, flag: S) -> Self {
        self.with_after(vec![Effect::set_flag(flag)])
    }

    pub fn validate(&self, all_scenes: &[Scene], terminal_scene_id: &str) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.target_scene_id != terminal_scene_id
            && !all_scenes.iter().any(|s| s.id == self.target_scene_id)
        {
            errors.push(format!(
                "Choice '{}': Target scene '{}' not found",
                self.id, self.target_scene_id
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
