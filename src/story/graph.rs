//! Runtime form of a story: scenes stored once in an arena and looked up by id.
//!
//! Nothing here is mutable after construction, so a compiled story can be shared
//! behind an `Arc` by any number of concurrent playthroughs.

use std::collections::HashMap;
use crate::story::{EndingResolver, Scene};
use crate::utils::{GameError, GameResult};

#[derive(Debug)]
pub struct SceneGraph {
    scenes: Vec<Scene>,
    index: HashMap<String, usize>,
    starting_scene_id: String,
    terminal_scene_id: String,
}

impl SceneGraph {
    pub fn new(
        scenes: Vec<Scene>,
        starting_scene_id: String,
        terminal_scene_id: String,
    ) -> GameResult<Self> {
        let mut index = HashMap::with_capacity(scenes.len());
        for (position, scene) in scenes.iter().enumerate() {
            if index.insert(scene.id.clone(), position).is_some() {
                return Err(GameError::story(format!("Duplicate scene ID: '{}'", scene.id)));
            }
        }

        Ok(Self {
            scenes,
            index,
            starting_scene_id,
            terminal_scene_id,
        })
    }

    pub fn lookup(&self, scene_id: &str) -> Option<&Scene> {
        self.index.get(scene_id).map(|&position| &self.scenes[position])
    }

    pub fn contains(&self, scene_id: &str) -> bool {
        self.index.contains_key(scene_id)
    }

    pub fn is_terminal(&self, scene_id: &str) -> bool {
        scene_id == self.terminal_scene_id
    }

    pub fn starting_scene_id(&self) -> &str {
        &self.starting_scene_id
    }

    pub fn terminal_scene_id(&self) -> &str {
        &self.terminal_scene_id
    }

    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

/// A validated story ready to be played.
#[derive(Debug)]
pub struct CompiledStory {
    pub id: String,
    pub title: String,
    graph: SceneGraph,
    endings: EndingResolver,
}

impl CompiledStory {
    pub fn new(id: String, title: String, graph: SceneGraph, endings: EndingResolver) -> Self {
        Self {
            id,
            title,
            graph,
            endings,
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn endings(&self) -> &EndingResolver {
        &self.endings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::Choice;

    fn scenes() -> Vec<Scene> {
        vec![
            Scene::new("intro", "Start").with_choice(Choice::new("go", "Go", "hall")),
            Scene::new("hall", "Hall").with_choice(Choice::new("end", "End", "THE_END")),
        ]
    }

    #[test]
    fn test_lookup() {
        let graph = SceneGraph::new(scenes(), "intro".to_string(), "THE_END".to_string()).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.lookup("hall").map(|s| s.text.as_str()), Some("Hall"));
        assert!(graph.lookup("THE_END").is_none());
        assert!(graph.lookup("cellar").is_none());
        assert!(graph.is_terminal("THE_END"));
        assert!(!graph.is_terminal("hall"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut scenes = scenes();
        scenes.push(Scene::new("hall", "Another hall"));

        let result = SceneGraph::new(scenes, "intro".to_string(), "THE_END".to_string());
        assert!(result.is_err());
    }
}
