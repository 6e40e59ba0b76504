use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use crate::core::PlayerState;
use crate::story::{Choice, Ending};

/// One entry of a run's journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: Uuid,
    pub run_id: Uuid,
    pub event_type: GameEventType,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventType {
    RunStarted,
    SceneEntered,
    ChoiceMade,
    FlagSet,
    SceneMissing,
    EndingReached,
    RunQuit,
}

impl GameEvent {
    pub fn new(run_id: Uuid, event_type: GameEventType, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            run_id,
            event_type,
            timestamp: Utc::now(),
            data,
        }
    }

    pub fn run_started(run_id: Uuid, story_id: &str, state: &PlayerState) -> Self {
        let data = serde_json::json!({
            "story_id": story_id,
            "scene_id": state.current_scene_id,
            "clock": state.clock.formatted(),
        });
        Self::new(run_id, GameEventType::RunStarted, data)
    }

    pub fn scene_entered(run_id: Uuid, scene_id: &str, state: &PlayerState) -> Self {
        let data = serde_json::json!({
            "scene_id": scene_id,
            "clock": state.clock.formatted(),
        });
        Self::new(run_id, GameEventType::SceneEntered, data)
    }

    pub fn choice_made(run_id: Uuid, choice: &Choice, from_scene: &str) -> Self {
        let data = serde_json::json!({
            "choice_id": choice.id,
            "choice_text": choice.text,
            "from_scene": from_scene,
            "target_scene": choice.target_scene_id,
            "consequence": choice.delta.describe(),
        });
        Self::new(run_id, GameEventType::ChoiceMade, data)
    }

    pub fn flag_set(run_id: Uuid, flag: &str) -> Self {
        let data = serde_json::json!({ "flag": flag });
        Self::new(run_id, GameEventType::FlagSet, data)
    }

    pub fn scene_missing(run_id: Uuid, scene_id: &str) -> Self {
        let data = serde_json::json!({ "scene_id": scene_id });
        Self::new(run_id, GameEventType::SceneMissing, data)
    }

    pub fn ending_reached(run_id: Uuid, ending: &Ending, state: &PlayerState) -> Self {
        let data = serde_json::json!({
            "ending_id": ending.id,
            "ending_title": ending.title,
            "final_state": state,
        });
        Self::new(run_id, GameEventType::EndingReached, data)
    }

    pub fn run_quit(run_id: Uuid, state: &PlayerState) -> Self {
        let data = serde_json::json!({ "scene_id": state.current_scene_id });
        Self::new(run_id, GameEventType::RunQuit, data)
    }
}

pub trait GameEventHandler {
    fn handle_event(&mut self, event: &GameEvent);
}

/// Bounded in-memory journal; drops the oldest entries once full.
pub struct EventLogger {
    events: Vec<GameEvent>,
    max_events: usize,
}

impl EventLogger {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    pub fn get_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn get_events_by_type(&self, event_type: &GameEventType) -> Vec<&GameEvent> {
        self.events
            .iter()
            .filter(|event| &event.event_type == event_type)
            .collect()
    }

    pub fn get_recent_events(&self, count: usize) -> Vec<&GameEvent> {
        self.events
            .iter()
            .rev()
            .take(count)
            .collect()
    }

    pub fn export_events(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.events)
    }

    pub fn get_event_count(&self) -> usize {
        self.events.len()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());

        if self.events.len() > self.max_events {
            self.events.remove(0);
        }
    }
}
