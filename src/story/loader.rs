use std::path::{Path, PathBuf};
use tokio::fs;
use crate::story::{content, Story};
use crate::utils::{GameError, GameResult};
use tracing::{info, warn};

/// Finds stories: the built-in one, `{id}.json` files in the stories directory, or an explicit path.
pub struct StoryLoader {
    stories_directory: PathBuf,
}

impl StoryLoader {
    pub fn new<P: AsRef<Path>>(stories_directory: P) -> Self {
        Self {
            stories_directory: stories_directory.as_ref().to_path_buf(),
        }
    }

    /// Accepts a story id or a path to a `.json` story file.
    pub async fn load(&self, story: &str) -> GameResult<Story> {
        let as_path = Path::new(story);
        if as_path.extension().and_then(|s| s.to_str()) == Some("json") {
            return self.load_story_file(as_path).await;
        }
        self.load_story(story).await
    }

    pub async fn load_story(&self, story_id: &str) -> GameResult<Story> {
        if story_id == content::STORY_ID {
            info!("Loading built-in story: {}", story_id);
            return Ok(content::consequence());
        }

        let story_path = self.story_path(story_id);
        if !story_path.exists() {
            return Err(GameError::story(format!("Story file not found: {}", story_id)));
        }

        self.load_story_file(&story_path).await
    }

    pub async fn load_story_file(&self, story_path: &Path) -> GameResult<Story> {
        info!("Loading story from: {:?}", story_path);

        let content = fs::read_to_string(story_path)
            .await
            .map_err(|e| GameError::story(format!("Failed to read story file {:?}: {}", story_path, e)))?;

        let story: Story = serde_json::from_str(&content)
            .map_err(|e| GameError::story(format!("Failed to parse story JSON: {}", e)))?;

        if let Err(errors) = story.validate() {
            return Err(GameError::invalid_story(&story.id, errors));
        }

        info!("Successfully loaded story: {} ({})", story.title, story.id);
        Ok(story)
    }

    pub async fn list_available_stories(&self) -> GameResult<Vec<StoryMetadata>> {
        let mut stories = vec![StoryMetadata::from_story(&content::consequence())];

        if !self.stories_directory.exists() {
            warn!("Stories directory does not exist: {:?}", self.stories_directory);
            return Ok(stories);
        }

        let mut entries = fs::read_dir(&self.stories_directory)
            .await
            .map_err(|e| GameError::story(format!("Failed to read stories directory: {}", e)))?;

        while let Some(entry) = entries.next_entry().await
            .map_err(|e| GameError::story(format!("Failed to read directory entry: {}", e)))? {

            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                match self.load_story_metadata(&path).await {
                    Ok(metadata) => stories.push(metadata),
                    Err(e) => {
                        warn!("Failed to load metadata for story at {:?}: {}", path, e);
                        continue;
                    }
                }
            }
        }

        stories.sort_by(|a, b| a.title.cmp(&b.title));

        info!("Found {} stories", stories.len());
        Ok(stories)
    }

    pub async fn story_exists(&self, story_id: &str) -> bool {
        story_id == content::STORY_ID || self.story_path(story_id).exists()
    }

    fn story_path(&self, story_id: &str) -> PathBuf {
        self.stories_directory.join(format!("{}.json", story_id))
    }

    async fn load_story_metadata(&self, path: &Path) -> GameResult<StoryMetadata> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| GameError::story(format!("Failed to read story file: {}", e)))?;

        let value: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| GameError::story(format!("Failed to parse story JSON: {}", e)))?;

        let text = |key: &str, fallback: &str| {
            value.get(key)
                .and_then(|v| v.as_str())
                .unwrap_or(fallback)
                .to_string()
        };

        Ok(StoryMetadata {
            id: text("id", "unknown"),
            title: text("title", "Untitled"),
            description: text("description", "No description available"),
            author: text("author", "Unknown"),
            version: text("version", "1.0.0"),
            scene_count: value.get("scenes")
                .and_then(|v| v.as_array())
                .map(|arr| arr.len())
                .unwrap_or(0),
        })
    }
}

#[derive(Debug, Clone)]
pub struct StoryMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub version: String,
    pub scene_count: usize,
}

impl StoryMetadata {
    pub fn from_story(story: &Story) -> Self {
        Self {
            id: story.id.clone(),
            title: story.title.clone(),
            description: story.description.clone(),
            author: story.author.clone(),
            version: story.version.clone(),
            scene_count: story.get_scene_count(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} by {} (v{})", self.title, self.author, self.version)
    }
}
