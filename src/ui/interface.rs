use dialoguer::Confirm;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::core::{GameEngine, GameEvent, RunStatus};
use crate::story::{CompiledStory, Story, StoryLoader, StoryMetadata};
use crate::ui::{components, Boundary, Display, ScriptedBoundary, TerminalBoundary, ThemeManager};
use crate::utils::{GameError, GameResult};
use tracing::{debug, error, info, warn};

/// How a scripted playthrough finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayOutcome {
    Ended { ending_id: String, title: String },
    Quit,
    InputExhausted,
}

#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub script: PathBuf,
    pub outcome: ReplayOutcome,
    pub summary: String,
    pub transcript: Vec<String>,
    pub journal: Vec<GameEvent>,
}

/// Result of checking a story without playing it.
#[derive(Debug, Clone)]
pub struct StoryCheck {
    pub story_id: String,
    pub title: String,
    pub scene_count: usize,
    pub ending_count: usize,
    pub over_provisioned: Vec<String>,
    pub errors: Vec<String>,
}

impl StoryCheck {
    pub fn from_story(story: &Story) -> Self {
        Self {
            story_id: story.id.clone(),
            title: story.title.clone(),
            scene_count: story.get_scene_count(),
            ending_count: story.endings.len(),
            over_provisioned: story.over_provisioned_scenes().iter().map(|s| s.id.clone()).collect(),
            errors: story.validate().err().unwrap_or_default(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Top-level modes of the binary: play, replay, check and list.
pub struct GameInterface {
    config: Config,
    story_loader: StoryLoader,
    theme_manager: ThemeManager,
    display: Display,
    last_journal: Vec<GameEvent>,
}

impl GameInterface {
    pub fn new(config: Config) -> GameResult<Self> {
        info!("Initializing game interface");

        let mut theme_manager = ThemeManager::new();
        if !theme_manager.set_theme(&config.ui.theme) {
            warn!("Unknown theme '{}', using default", config.ui.theme);
        }
        theme_manager.set_enabled(config.ui.color);
        if !config.ui.color {
            colored::control::set_override(false);
        }

        Ok(Self {
            story_loader: StoryLoader::new(config.get_stories_dir()),
            display: Display::new(theme_manager.clone()),
            theme_manager,
            config,
            last_journal: Vec::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn last_journal(&self) -> &[GameEvent] {
        &self.last_journal
    }

    pub async fn load_story(&self) -> GameResult<Arc<CompiledStory>> {
        let story = self.story_loader.load(&self.config.game.story).await?;
        Ok(Arc::new(story.compile()?))
    }

    /// Interactive play on the terminal, offering a restart after each ending.
    pub async fn play(&mut self) -> GameResult<RunStatus> {
        let story = self.load_story().await?;
        let mut boundary = TerminalBoundary::new(self.theme_manager.clone());

        loop {
            let status = self.play_once(Arc::clone(&story), &mut boundary)?;

            let ended = matches!(status, RunStatus::Ended(_));
            if !(ended && self.config.game.offer_restart && boundary.is_interactive()) {
                return Ok(status);
            }
            if !confirm_restart()? {
                return Ok(status);
            }
            info!("Restarting '{}'", story.id);
        }
    }

    /// One full run against any boundary. Each call starts from a brand-new state.
    pub fn play_once<B: Boundary + ?Sized>(
        &mut self,
        story: Arc<CompiledStory>,
        boundary: &mut B,
    ) -> GameResult<RunStatus> {
        if self.config.game.show_banner {
            components::render_banner(boundary)?;
        }

        let mut engine = GameEngine::new(story);
        let result = engine.run(boundary);
        self.last_journal = engine.journal().get_events().to_vec();

        let status = result?;
        debug!("Run finished: {:?} ({})", status, engine.state().summary());
        Ok(status)
    }

    /// Plays each script against its own fresh state, all sharing one compiled story.
    pub async fn replay(&mut self, scripts: &[PathBuf]) -> GameResult<Vec<ReplayReport>> {
        let story = self.load_story().await?;
        let mut tasks = Vec::with_capacity(scripts.len());

        for path in scripts {
            let script = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| GameError::story(format!("Failed to read replay script {:?}: {}", path, e)))?;

            let story = Arc::clone(&story);
            let path = path.clone();
            tasks.push(tokio::task::spawn_blocking(move || replay_script(story, path, &script)));
        }

        let mut reports = Vec::with_capacity(tasks.len());
        for joined in join_all(tasks).await {
            let report = joined.map_err(|e| GameError::story(format!("Replay task failed: {}", e)))??;
            reports.push(report);
        }

        if let Some(last) = reports.last() {
            self.last_journal = last.journal.clone();
        }

        info!("Replayed {} scripts", reports.len());
        Ok(reports)
    }

    pub async fn run_replays(&mut self, scripts: &[PathBuf]) -> GameResult<()> {
        let reports = self.replay(scripts).await?;
        for report in &reports {
            self.display.show_replay_report(report)?;
        }
        Ok(())
    }

    pub async fn check(&self) -> GameResult<StoryCheck> {
        let source = &self.config.game.story;
        let story = match self.story_loader.load(source).await {
            Ok(story) => story,
            Err(GameError::InvalidStory { story_id, errors }) => {
                let check = StoryCheck {
                    title: story_id.clone(),
                    story_id,
                    scene_count: 0,
                    ending_count: 0,
                    over_provisioned: Vec::new(),
                    errors,
                };
                self.display.show_check_report(&check)?;
                return Ok(check);
            }
            Err(e) => return Err(e),
        };

        let check = StoryCheck::from_story(&story);
        self.display.show_check_report(&check)?;
        Ok(check)
    }

    pub async fn list_stories(&self) -> GameResult<Vec<StoryMetadata>> {
        let stories = self.story_loader.list_available_stories().await?;
        self.display.show_story_list(&stories)?;
        Ok(stories)
    }

    /// Writes the journal of the most recent run as pretty JSON.
    pub async fn export_journal<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        let path = path.as_ref();
        if self.last_journal.is_empty() {
            warn!("No run recorded; writing an empty journal to {:?}", path);
        }

        let json = serde_json::to_string_pretty(&self.last_journal)?;
        tokio::fs::write(path, json).await?;

        info!("Wrote {} journal events to {:?}", self.last_journal.len(), path);
        Ok(())
    }

    pub fn report_error(&self, error: &GameError) {
        error!("{}", error);
        self.display.show_error(&error.to_string()).ok();
    }
}

fn replay_script(story: Arc<CompiledStory>, script: PathBuf, input: &str) -> GameResult<ReplayReport> {
    let mut boundary = ScriptedBoundary::from_script(input);
    let mut engine = GameEngine::new(Arc::clone(&story));
    let status = engine.run(&mut boundary)?;

    let outcome = match status {
        RunStatus::Ended(ending_id) => {
            let title = story
                .endings()
                .get(&ending_id)
                .map(|ending| ending.title.clone())
                .unwrap_or_else(|| ending_id.clone());
            ReplayOutcome::Ended { ending_id, title }
        }
        _ if boundary.is_exhausted() => ReplayOutcome::InputExhausted,
        _ => ReplayOutcome::Quit,
    };

    debug!("Replay {:?} finished: {:?}", script, outcome);
    Ok(ReplayReport {
        script,
        outcome,
        summary: engine.state().summary(),
        transcript: boundary.into_transcript(),
        journal: engine.journal().get_events().to_vec(),
    })
}

fn confirm_restart() -> GameResult<bool> {
    Confirm::new()
        .with_prompt("Play again?")
        .default(false)
        .interact()
        .map_err(|e| GameError::story(format!("Restart prompt error: {}", e)))
}
