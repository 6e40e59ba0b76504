use std::sync::Arc;
use uuid::Uuid;
use crate::core::{EventLogger, GameEvent, GameEventHandler, PlayerState};
use crate::story::{effects, CompiledStory, Ending, Scene};
use crate::ui::{Boundary, LineStyle};
use crate::utils::{GameError, GameResult};
use tracing::{debug, info, warn};

/// Choices beyond this many are authored but never shown.
pub const MAX_VISIBLE_CHOICES: usize = 4;

pub const ENDING_HEADER: &str = "=== THE END ===";
pub const QUIT_MESSAGE: &str = "Exiting.";
pub const INVALID_NOTICE: &str = "Invalid.";
pub const OUT_OF_RANGE_NOTICE: &str = "Out of range.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Running(String),
    Ended(String),
    Quit,
}

impl RunStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, RunStatus::Running(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRejection {
    NotANumber,
    OutOfRange,
}

impl InputRejection {
    pub fn notice(self) -> &'static str {
        match self {
            InputRejection::NotANumber => INVALID_NOTICE,
            InputRejection::OutOfRange => OUT_OF_RANGE_NOTICE,
        }
    }
}

/// A line of player input, interpreted against the number of visible choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    Quit,
    /// Zero-based index into the visible choices.
    Select(usize),
    Rejected(InputRejection),
}

impl PlayerInput {
    pub fn parse(input: &str, visible: usize) -> Self {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("q") {
            return PlayerInput::Quit;
        }

        match trimmed.parse::<i32>() {
            Err(_) => PlayerInput::Rejected(InputRejection::NotANumber),
            Ok(n) if n < 1 || n > visible as i32 => PlayerInput::Rejected(InputRejection::OutOfRange),
            Ok(n) => PlayerInput::Select(n as usize - 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Advanced { scene_id: String },
    Rejected(InputRejection),
    Ended { ending_id: String },
    MissingScene { scene_id: String, ending_id: String },
    Quit,
}

/// Drives one playthrough of a compiled story.
pub struct GameEngine {
    story: Arc<CompiledStory>,
    state: PlayerState,
    status: RunStatus,
    run_id: Uuid,
    journal: EventLogger,
}

impl GameEngine {
    /// Starts a fresh run at the story's starting scene, applying its on-enter effects.
    pub fn new(story: Arc<CompiledStory>) -> Self {
        let state = PlayerState::new(story.graph().starting_scene_id());
        let mut engine = Self::with_state(story, state);

        let story = Arc::clone(&engine.story);
        if let Some(scene) = story.graph().lookup(engine.state.current_scene_id.as_str()) {
            engine.enter_scene(scene);
        }
        engine
    }

    /// Resumes from an arbitrary state. The current scene is not re-entered.
    pub fn with_state(story: Arc<CompiledStory>, state: PlayerState) -> Self {
        let run_id = Uuid::new_v4();
        let mut journal = EventLogger::default();
        journal.handle_event(&GameEvent::run_started(run_id, &story.id, &state));

        info!("Starting run {} of '{}' at scene '{}'", run_id, story.id, state.current_scene_id);

        Self {
            status: RunStatus::Running(state.current_scene_id.clone()),
            story,
            state,
            run_id,
            journal,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    pub fn journal(&self) -> &EventLogger {
        &self.journal
    }

    pub fn story(&self) -> &CompiledStory {
        &self.story
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Plays turns until the run ends or the player quits.
    pub fn run<B: Boundary + ?Sized>(&mut self, boundary: &mut B) -> GameResult<RunStatus> {
        while self.is_running() {
            self.step(boundary)?;
        }
        Ok(self.status.clone())
    }

    /// One iteration: render the current scene, read one line, act on it.
    pub fn step<B: Boundary + ?Sized>(&mut self, boundary: &mut B) -> GameResult<TurnOutcome> {
        let scene_id = self.current_scene_id()?.to_string();
        let story = Arc::clone(&self.story);

        let Some(scene) = story.graph().lookup(&scene_id) else {
            return self.resolve_missing_scene(&scene_id, boundary);
        };

        self.present(scene, boundary)?;

        match boundary.read_line()? {
            Some(line) => self.submit(&line, boundary),
            None => {
                debug!("Input exhausted at scene '{}'", scene_id);
                self.quit(boundary)
            }
        }
    }

    pub fn present<B: Boundary + ?Sized>(&self, scene: &Scene, boundary: &mut B) -> GameResult<()> {
        let choices = scene.visible_choices();

        boundary.blank()?;
        boundary.write_line(LineStyle::Status, &self.state.status_line())?;
        boundary.write_line(LineStyle::SceneText, &scene.text)?;
        for (number, choice) in choices.iter().enumerate() {
            boundary.write_line(LineStyle::Choice, &format!("  {}) {}", number + 1, choice.text))?;
        }
        boundary.write_line(LineStyle::Prompt, &format!("Choose [1-{}] or q: ", choices.len()))
    }

    /// Interprets one line of input against the current scene.
    pub fn submit<B: Boundary + ?Sized>(&mut self, input: &str, boundary: &mut B) -> GameResult<TurnOutcome> {
        let scene_id = self.current_scene_id()?.to_string();
        let story = Arc::clone(&self.story);

        let Some(scene) = story.graph().lookup(&scene_id) else {
            return self.resolve_missing_scene(&scene_id, boundary);
        };

        match PlayerInput::parse(input, scene.visible_choices().len()) {
            PlayerInput::Quit => self.quit(boundary),
            PlayerInput::Rejected(rejection) => {
                debug!("Rejected input {:?} at scene '{}': {:?}", input.trim(), scene_id, rejection);
                boundary.write_line(LineStyle::Notice, rejection.notice())?;
                Ok(TurnOutcome::Rejected(rejection))
            }
            PlayerInput::Select(index) => {
                let outcome = self.choose(index)?;
                if let TurnOutcome::Ended { ending_id } = &outcome {
                    if let Some(ending) = story.endings().get(ending_id) {
                        render_ending(ending, boundary)?;
                    }
                }
                Ok(outcome)
            }
        }
    }

    /// Applies the visible choice at `index` (zero-based). Writes nothing.
    pub fn choose(&mut self, index: usize) -> GameResult<TurnOutcome> {
        let scene_id = self.current_scene_id()?.to_string();
        let story = Arc::clone(&self.story);

        let scene = story
            .graph()
            .lookup(&scene_id)
            .ok_or_else(|| GameError::scene_not_found(&scene_id))?;

        let Some(choice) = scene.visible_choices().get(index) else {
            return Ok(TurnOutcome::Rejected(InputRejection::OutOfRange));
        };

        info!("Chose '{}' at scene '{}'", choice.id, scene_id);
        self.journal.handle_event(&GameEvent::choice_made(self.run_id, choice, &scene_id));

        choice.delta.apply(&mut self.state);
        if let Some(after) = &choice.after {
            let added = effects::apply_effects(after, &mut self.state);
            self.record_flags(added);
        }

        self.state.clock.advance(1);
        self.state.visit_scene(&choice.target_scene_id);

        if story.graph().is_terminal(&choice.target_scene_id) {
            let ending_id = story.endings().pick_ending(&self.state).id.clone();
            self.finish(&ending_id);
            return Ok(TurnOutcome::Ended { ending_id });
        }

        if let Some(target) = story.graph().lookup(&choice.target_scene_id) {
            self.enter_scene(target);
        }

        debug!("Moved from scene '{}' to '{}'", scene_id, choice.target_scene_id);
        self.status = RunStatus::Running(choice.target_scene_id.clone());
        Ok(TurnOutcome::Advanced {
            scene_id: choice.target_scene_id.clone(),
        })
    }

    pub fn quit<B: Boundary + ?Sized>(&mut self, boundary: &mut B) -> GameResult<TurnOutcome> {
        info!("Player quit at scene '{}'", self.state.current_scene_id);
        boundary.write_line(LineStyle::Notice, QUIT_MESSAGE)?;

        self.journal.handle_event(&GameEvent::run_quit(self.run_id, &self.state));
        self.status = RunStatus::Quit;
        Ok(TurnOutcome::Quit)
    }

    fn current_scene_id(&self) -> GameResult<&str> {
        match &self.status {
            RunStatus::Running(scene_id) => Ok(scene_id),
            RunStatus::Ended(ending_id) => Err(GameError::run_over(format!("Run already ended with '{}'", ending_id))),
            RunStatus::Quit => Err(GameError::run_over("Run was quit")),
        }
    }

    fn enter_scene(&mut self, scene: &Scene) {
        self.journal.handle_event(&GameEvent::scene_entered(self.run_id, &scene.id, &self.state));

        if let Some(on_enter) = &scene.on_enter {
            let added = effects::apply_effects(on_enter, &mut self.state);
            self.record_flags(added);
        }
    }

    fn record_flags(&mut self, flags: Vec<String>) {
        for flag in flags {
            debug!("Flag set: {}", flag);
            self.journal.handle_event(&GameEvent::flag_set(self.run_id, &flag));
        }
    }

    fn resolve_missing_scene<B: Boundary + ?Sized>(
        &mut self,
        scene_id: &str,
        boundary: &mut B,
    ) -> GameResult<TurnOutcome> {
        warn!("Scene '{}' does not exist; resolving an ending", scene_id);
        boundary.write_line(
            LineStyle::Diagnostic,
            &format!("[Engine] Missing scene: {}. Ending now.", scene_id),
        )?;
        self.journal.handle_event(&GameEvent::scene_missing(self.run_id, scene_id));

        let story = Arc::clone(&self.story);
        let ending = story.endings().pick_ending(&self.state);
        self.finish(&ending.id);
        render_ending(ending, boundary)?;

        Ok(TurnOutcome::MissingScene {
            scene_id: scene_id.to_string(),
            ending_id: ending.id.clone(),
        })
    }

    fn finish(&mut self, ending_id: &str) {
        let story = Arc::clone(&self.story);
        if let Some(ending) = story.endings().get(ending_id) {
            info!("Run {} reached ending '{}'", self.run_id, ending.title);
            self.journal.handle_event(&GameEvent::ending_reached(self.run_id, ending, &self.state));
        }
        self.status = RunStatus::Ended(ending_id.to_string());
    }
}

pub fn render_ending<B: Boundary + ?Sized>(ending: &Ending, boundary: &mut B) -> GameResult<()> {
    boundary.blank()?;
    boundary.write_line(LineStyle::Banner, ENDING_HEADER)?;
    boundary.write_line(LineStyle::EndingTitle, &ending.title)?;
    boundary.blank()?;
    boundary.write_line(LineStyle::EndingText, &ending.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameEventType, Stat};
    use crate::story::{content, Choice, EndingResolver, SceneGraph};
    use crate::ui::ScriptedBoundary;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn compiled() -> Arc<CompiledStory> {
        Arc::new(content::consequence().compile().unwrap())
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(PlayerInput::parse("q", 4), PlayerInput::Quit);
        assert_eq!(PlayerInput::parse("  Q \n", 4), PlayerInput::Quit);
        assert_eq!(PlayerInput::parse("2", 4), PlayerInput::Select(1));
        assert_eq!(PlayerInput::parse(" 4 ", 4), PlayerInput::Select(3));
        assert_eq!(PlayerInput::parse("abc", 4), PlayerInput::Rejected(InputRejection::NotANumber));
        assert_eq!(PlayerInput::parse("", 4), PlayerInput::Rejected(InputRejection::NotANumber));
        assert_eq!(PlayerInput::parse("quit", 4), PlayerInput::Rejected(InputRejection::NotANumber));
        assert_eq!(PlayerInput::parse("0", 4), PlayerInput::Rejected(InputRejection::OutOfRange));
        assert_eq!(PlayerInput::parse("-1", 4), PlayerInput::Rejected(InputRejection::OutOfRange));
        assert_eq!(PlayerInput::parse("5", 4), PlayerInput::Rejected(InputRejection::OutOfRange));
        assert_eq!(PlayerInput::parse("3", 2), PlayerInput::Rejected(InputRejection::OutOfRange));
        assert_eq!(PlayerInput::parse("2147483647", 4), PlayerInput::Rejected(InputRejection::OutOfRange));
        assert_eq!(PlayerInput::parse("2147483648", 4), PlayerInput::Rejected(InputRejection::NotANumber));
    }

    #[test]
    fn test_first_turn_transcript() {
        let mut engine = GameEngine::new(compiled());
        let mut boundary = ScriptedBoundary::new(["q"]);

        engine.step(&mut boundary).unwrap();

        let intro = engine.story().graph().lookup("intro").unwrap().text.clone();
        assert_eq!(
            boundary.transcript(),
            &[
                "".to_string(),
                "Day 0, 08:00  |  Morality 0  Trauma 10  Stress 10".to_string(),
                intro,
                "  1) Unbolt the door and help Alex inside".to_string(),
                "  2) Stay silent and hold your breath".to_string(),
                "  3) Talk through the door and test what he admits".to_string(),
                "  4) Climb out the window to the fire escape".to_string(),
                "Choose [1-4] or q: ".to_string(),
                "Exiting.".to_string(),
            ]
        );
    }

    #[test]
    fn test_help_alex_scenario() {
        let mut engine = GameEngine::new(compiled());
        let mut boundary = ScriptedBoundary::new(["1"]);

        let outcome = engine.step(&mut boundary).unwrap();

        assert_eq!(outcome, TurnOutcome::Advanced { scene_id: "alex_inside".to_string() });
        let state = engine.state();
        assert_eq!((state.clock.day, state.clock.hour), (0, 9));
        assert_eq!(state.stat(Stat::Morality), 6);
        assert_eq!(state.stat(Stat::Trauma), 10);
        assert_eq!(state.stat(Stat::Stress), 14);
        assert_eq!(state.current_scene_id, "alex_inside");
        assert!(state.has_flag("metAlex"));
        assert_eq!(engine.status(), &RunStatus::Running("alex_inside".to_string()));
    }

    #[test]
    fn test_morality_clamps_at_upper_bound() {
        let mut state = PlayerState::new("intro");
        state.stats.morality = 98;
        let mut engine = GameEngine::with_state(compiled(), state);

        engine.choose(0).unwrap();

        assert_eq!(engine.state().stat(Stat::Morality), 100);
    }

    #[test]
    fn test_quit_never_mutates_state() {
        for input in ["q", "Q", " Q ", "\tq\n"] {
            let mut engine = GameEngine::new(compiled());
            let before = engine.state().clone();
            let mut boundary = ScriptedBoundary::new([input]);

            assert_eq!(engine.step(&mut boundary).unwrap(), TurnOutcome::Quit);
            assert_eq!(engine.state(), &before);
            assert_eq!(engine.status(), &RunStatus::Quit);
            assert_eq!(boundary.transcript().last().map(String::as_str), Some("Exiting."));
        }
    }

    #[test]
    fn test_bad_input_leaves_state_unchanged() {
        let mut engine = GameEngine::new(compiled());
        let before = engine.state().clone();
        let mut boundary = ScriptedBoundary::new(["seven", "9", "0", "q"]);

        assert_eq!(
            engine.step(&mut boundary).unwrap(),
            TurnOutcome::Rejected(InputRejection::NotANumber)
        );
        assert_eq!(
            engine.step(&mut boundary).unwrap(),
            TurnOutcome::Rejected(InputRejection::OutOfRange)
        );
        assert_eq!(
            engine.step(&mut boundary).unwrap(),
            TurnOutcome::Rejected(InputRejection::OutOfRange)
        );
        assert_eq!(engine.state(), &before);
        assert!(engine.is_running());

        let notices: Vec<&str> = boundary
            .transcript()
            .iter()
            .map(String::as_str)
            .filter(|line| *line == "Invalid." || *line == "Out of range.")
            .collect();
        assert_eq!(notices, vec!["Invalid.", "Out of range.", "Out of range."]);
    }

    #[test]
    fn test_end_of_input_quits() {
        let mut engine = GameEngine::new(compiled());
        let mut boundary = ScriptedBoundary::default();

        assert_eq!(engine.run(&mut boundary).unwrap(), RunStatus::Quit);
        assert_eq!(engine.state().current_scene_id, "intro");
    }

    #[test]
    fn test_dangling_choice_target_forces_ending_on_next_step() {
        let intro = Scene::new("intro", "A cracked door.")
            .with_choice(Choice::new("down", "Take the stairs", "collapsed_stairwell"));
        let graph = SceneGraph::new(vec![intro], "intro".to_string(), "THE_END".to_string()).unwrap();
        let endings = EndingResolver::new(
            "dangling",
            vec![Ending::new("ending_rubble", "Rubble", "The stairs were gone.", vec![])],
            None,
        )
        .unwrap();
        let story = Arc::new(CompiledStory::new(
            "dangling".to_string(),
            "Dangling".to_string(),
            graph,
            endings,
        ));
        let mut engine = GameEngine::new(story);
        let mut boundary = ScriptedBoundary::new(["1", "1"]);

        let outcome = engine.step(&mut boundary).unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::Advanced {
                scene_id: "collapsed_stairwell".to_string()
            }
        );
        assert_eq!(engine.status(), &RunStatus::Running("collapsed_stairwell".to_string()));
        assert_eq!(engine.state().clock.hour, 9);

        let outcome = engine.step(&mut boundary).unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::MissingScene {
                scene_id: "collapsed_stairwell".to_string(),
                ending_id: "ending_rubble".to_string(),
            }
        );
        assert_eq!(engine.status(), &RunStatus::Ended("ending_rubble".to_string()));
        assert_eq!(boundary.remaining_inputs(), 1);

        let transcript = boundary.transcript();
        let tail = &transcript[transcript.len() - 6..];
        assert_eq!(
            tail,
            &[
                "[Engine] Missing scene: collapsed_stairwell. Ending now.".to_string(),
                "".to_string(),
                "=== THE END ===".to_string(),
                "Rubble".to_string(),
                "".to_string(),
                "The stairs were gone.".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_scene_forces_ending() {
        let state = PlayerState::new("collapsed_stairwell");
        let mut engine = GameEngine::with_state(compiled(), state);
        let mut boundary = ScriptedBoundary::new(["1"]);

        let outcome = engine.step(&mut boundary).unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::MissingScene {
                scene_id: "collapsed_stairwell".to_string(),
                ending_id: "ending_lone_survivor".to_string(),
            }
        );
        assert_eq!(engine.status(), &RunStatus::Ended("ending_lone_survivor".to_string()));
        assert_eq!(boundary.remaining_inputs(), 1);
        assert_eq!(
            boundary.transcript(),
            &[
                "[Engine] Missing scene: collapsed_stairwell. Ending now.".to_string(),
                "".to_string(),
                "=== THE END ===".to_string(),
                "Alone On Purpose".to_string(),
                "".to_string(),
                "You chose yourself over the many. In the quiet, you learned the shape of your own shadow."
                    .to_string(),
            ]
        );
        assert_eq!(engine.journal().get_events_by_type(&GameEventType::SceneMissing).len(), 1);
    }

    #[test]
    fn test_over_provisioned_scene_shows_four_choices() {
        let state = PlayerState::new("room_inventory");
        let engine = GameEngine::with_state(compiled(), state);
        let scene = engine.story().graph().lookup("room_inventory").unwrap();
        let mut boundary = ScriptedBoundary::default();

        engine.present(scene, &mut boundary).unwrap();

        let numbered: Vec<&String> = boundary.transcript().iter().filter(|l| l.starts_with("  ")).collect();
        assert_eq!(numbered.len(), MAX_VISIBLE_CHOICES);
        for (i, line) in numbered.iter().enumerate() {
            assert!(line.starts_with(&format!("  {}) ", i + 1)));
        }
        assert_eq!(boundary.transcript().last().map(String::as_str), Some("Choose [1-4] or q: "));
    }

    #[test]
    fn test_fifth_choice_is_out_of_range() {
        let state = PlayerState::new("room_inventory");
        let mut engine = GameEngine::with_state(compiled(), state);
        let mut boundary = ScriptedBoundary::new(["5"]);

        assert_eq!(
            engine.step(&mut boundary).unwrap(),
            TurnOutcome::Rejected(InputRejection::OutOfRange)
        );
        assert_eq!(engine.state().current_scene_id, "room_inventory");
    }

    #[test]
    fn test_bloom_path_reaches_bloomborne() {
        // alley_drop -> bloom_listen -> answer -> finale_bridge -> accept_fate
        let mut engine = GameEngine::new(compiled());
        let mut boundary = ScriptedBoundary::new(["4", "3", "2", "1"]);

        let status = engine.run(&mut boundary).unwrap();

        assert_eq!(status, RunStatus::Ended("ending_bloomborne".to_string()));
        let transcript = boundary.transcript();
        let header = transcript.iter().position(|l| l == "=== THE END ===").unwrap();
        assert_eq!(transcript[header - 1], "");
        assert_eq!(transcript[header + 1], "Bloomborne");
        assert_eq!(transcript[header + 2], "");
        assert_eq!(engine.state().clock.hour, 12);
        assert_eq!(engine.journal().get_events_by_type(&GameEventType::EndingReached).len(), 1);
    }

    #[test]
    fn test_conditional_flag_needs_insight() {
        let mut state = PlayerState::new("finale_bridge");
        let mut engine = GameEngine::with_state(compiled(), state.clone());
        assert_eq!(engine.choose(3).unwrap(), TurnOutcome::Ended { ending_id: "ending_lone_survivor".to_string() });
        assert!(!engine.state().has_flag("bloomChoice"));

        state.set_flag("bloomInsight");
        let mut engine = GameEngine::with_state(compiled(), state);
        assert_eq!(engine.choose(3).unwrap(), TurnOutcome::Ended { ending_id: "ending_bloomborne".to_string() });
        assert!(engine.state().has_flag("bloomChoice"));
    }

    #[test]
    fn test_finished_run_rejects_further_turns() {
        let state = PlayerState::new("finale_bridge");
        let mut engine = GameEngine::with_state(compiled(), state);
        engine.choose(0).unwrap();

        let mut boundary = ScriptedBoundary::new(["1"]);
        assert!(matches!(engine.step(&mut boundary), Err(GameError::RunOver { .. })));
        assert!(engine.choose(0).is_err());
    }

    fn near_bounds() -> impl Strategy<Value = (i32, i32, i32)> {
        (
            prop_oneof![-100i32..=-90, 90i32..=100],
            prop_oneof![0i32..=10, 90i32..=100],
            prop_oneof![0i32..=10, 90i32..=100],
        )
    }

    proptest! {
        #[test]
        fn test_invariants_hold_for_any_choice_sequence(
            choices in prop::collection::vec(0..MAX_VISIBLE_CHOICES, 1..200),
            scene in 0usize..24,
            (morality, trauma, stress) in near_bounds(),
            hour in 20u8..24,
            day in 0u32..5,
        ) {
            let story = compiled();
            let scene_ids: Vec<String> = story.graph().scenes().map(|s| s.id.clone()).collect();

            let mut state = PlayerState::new(scene_ids[scene % scene_ids.len()].as_str());
            state.stats.set(Stat::Morality, morality);
            state.stats.set(Stat::Trauma, trauma);
            state.stats.set(Stat::Stress, stress);
            state.clock.hour = hour;
            state.clock.day = day;

            let mut engine = GameEngine::with_state(Arc::clone(&story), state);

            for index in choices {
                if !engine.is_running() {
                    // Keep walking from the finished state so long sequences cross many midnights.
                    let mut next = engine.state().clone();
                    next.current_scene_id = story.graph().starting_scene_id().to_string();
                    engine = GameEngine::with_state(Arc::clone(&story), next);
                }

                let before = engine.state().clone();
                let outcome = engine.choose(index).unwrap();
                let after = engine.state();

                prop_assert!(!matches!(outcome, TurnOutcome::Rejected(_)));
                prop_assert!(after.stats.is_within_bounds());
                prop_assert!(after.clock.hour < 24);

                let elapsed = u32::from(before.clock.hour) + 1;
                prop_assert_eq!(after.clock.hour as u32, elapsed % 24);
                prop_assert_eq!(after.clock.day, before.clock.day + elapsed / 24);
                prop_assert!(before.flags.is_subset(&after.flags));
            }
        }
    }
}
