use console::Term;
use std::io;
use crate::core::MAX_VISIBLE_CHOICES;
use crate::story::StoryMetadata;
use crate::ui::{Boundary, LineStyle, ReplayOutcome, ReplayReport, StoryCheck, ThemeManager};
use crate::utils::GameResult;

pub const BANNER_TITLE: &str = "=== CONSEQUENCE ===";

pub fn controls_line() -> String {
    format!("Controls: enter a number 1-{} to choose; q exits.", MAX_VISIBLE_CHOICES)
}

/// Opening lines of an interactive run.
pub fn render_banner<B: Boundary + ?Sized>(boundary: &mut B) -> GameResult<()> {
    boundary.write_line(LineStyle::Banner, BANNER_TITLE)?;
    boundary.write_line(LineStyle::Notice, &controls_line())
}

/// Writes reports that are not part of a run transcript: listings, checks and replays.
pub struct Display {
    term: Term,
    theme_manager: ThemeManager,
}

impl Display {
    pub fn new(theme_manager: ThemeManager) -> Self {
        Self {
            term: Term::stdout(),
            theme_manager,
        }
    }

    pub fn show_message(&self, message: &str, style: LineStyle) -> io::Result<()> {
        let styled = self.theme_manager.apply_style(message, style.theme_key());
        self.term.write_line(&styled)
    }

    pub fn show_error(&self, error: &str) -> io::Result<()> {
        self.show_message(&format!("error: {}", error), LineStyle::Diagnostic)
    }

    pub fn show_warning(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("warning: {}", message), LineStyle::Notice)
    }

    pub fn show_story_list(&self, stories: &[StoryMetadata]) -> io::Result<()> {
        self.show_message("Available stories:", LineStyle::Banner)?;
        for story in stories {
            self.show_message(
                &format!("  {:<16} {} [{} scenes]", story.id, story.display_name(), story.scene_count),
                LineStyle::Choice,
            )?;
            self.show_message(&format!("  {:<16} {}", "", story.description), LineStyle::SceneText)?;
        }
        Ok(())
    }

    pub fn show_check_report(&self, check: &StoryCheck) -> io::Result<()> {
        self.show_message(&format!("{} ({})", check.title, check.story_id), LineStyle::Banner)?;
        self.show_message(
            &format!("  {} scenes, {} endings", check.scene_count, check.ending_count),
            LineStyle::Status,
        )?;

        for scene_id in &check.over_provisioned {
            self.show_warning(&format!(
                "scene '{}' has more than {} choices; the extras are never shown",
                scene_id, MAX_VISIBLE_CHOICES
            ))?;
        }

        if check.errors.is_empty() {
            self.show_message("  OK", LineStyle::Choice)
        } else {
            for error in &check.errors {
                self.show_error(error)?;
            }
            Ok(())
        }
    }

    pub fn show_replay_report(&self, report: &ReplayReport) -> io::Result<()> {
        let outcome = match &report.outcome {
            ReplayOutcome::Ended { title, .. } => format!("ending: {}", title),
            ReplayOutcome::Quit => "quit".to_string(),
            ReplayOutcome::InputExhausted => "input exhausted".to_string(),
        };

        self.show_message(&format!("{}: {}", report.script.display(), outcome), LineStyle::EndingTitle)?;
        self.show_message(&format!("  {}", report.summary), LineStyle::Status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ScriptedBoundary;

    #[test]
    fn test_banner_lines() {
        let mut boundary = ScriptedBoundary::default();
        render_banner(&mut boundary).unwrap();

        assert_eq!(
            boundary.transcript(),
            &[
                "=== CONSEQUENCE ===".to_string(),
                "Controls: enter a number 1-4 to choose; q exits.".to_string(),
            ]
        );
    }
}
