use console::Term;
use std::collections::VecDeque;
use std::io;
use crate::ui::ThemeManager;
use crate::utils::GameResult;

/// What a transcript line is, so adapters can style it. The text is always the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Blank,
    Banner,
    Status,
    SceneText,
    Choice,
    Prompt,
    Notice,
    Diagnostic,
    EndingTitle,
    EndingText,
}

impl LineStyle {
    pub fn theme_key(self) -> &'static str {
        match self {
            LineStyle::Blank => "blank",
            LineStyle::Banner => "banner",
            LineStyle::Status => "status",
            LineStyle::SceneText => "scene_text",
            LineStyle::Choice => "choice",
            LineStyle::Prompt => "prompt",
            LineStyle::Notice => "notice",
            LineStyle::Diagnostic => "diagnostic",
            LineStyle::EndingTitle => "ending_title",
            LineStyle::EndingText => "ending_text",
        }
    }
}

/// The engine's only contact with the outside world.
pub trait Boundary {
    /// Blocks until a line is available. `None` means the input is exhausted.
    fn read_line(&mut self) -> GameResult<Option<String>>;

    fn write_line(&mut self, style: LineStyle, text: &str) -> GameResult<()>;

    fn blank(&mut self) -> GameResult<()> {
        self.write_line(LineStyle::Blank, "")
    }
}

/// Interactive adapter over the process terminal.
pub struct TerminalBoundary {
    term: Term,
    theme_manager: ThemeManager,
}

impl TerminalBoundary {
    pub fn new(theme_manager: ThemeManager) -> Self {
        Self {
            term: Term::stdout(),
            theme_manager,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

impl Boundary for TerminalBoundary {
    fn read_line(&mut self) -> GameResult<Option<String>> {
        if self.term.is_term() {
            return Ok(Some(self.term.read_line()?));
        }

        let mut line = String::new();
        let read = io::stdin().read_line(&mut line)?;
        Ok((read > 0).then_some(line))
    }

    fn write_line(&mut self, style: LineStyle, text: &str) -> GameResult<()> {
        let styled = self.theme_manager.apply_style(text, style.theme_key());

        // Prompts stay on the same line as the player's answer.
        if style == LineStyle::Prompt {
            self.term.write_str(&styled)?;
            self.term.flush()?;
        } else {
            self.term.write_line(&styled)?;
        }
        Ok(())
    }
}

/// Feeds a fixed list of inputs and records every line written.
#[derive(Debug, Default)]
pub struct ScriptedBoundary {
    inputs: VecDeque<String>,
    transcript: Vec<String>,
    exhausted: bool,
}

impl ScriptedBoundary {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
            exhausted: false,
        }
    }

    /// One input per line; a trailing newline does not add an empty input.
    pub fn from_script(script: &str) -> Self {
        Self::new(script.lines())
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn into_transcript(self) -> Vec<String> {
        self.transcript
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// True once a read found no input left.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl Boundary for ScriptedBoundary {
    fn read_line(&mut self) -> GameResult<Option<String>> {
        let line = self.inputs.pop_front();
        self.exhausted = line.is_none();
        Ok(line)
    }

    fn write_line(&mut self, _style: LineStyle, text: &str) -> GameResult<()> {
        self.transcript.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_boundary_reads_in_order() {
        let mut boundary = ScriptedBoundary::from_script("1\n q \n");

        assert_eq!(boundary.read_line().unwrap().as_deref(), Some("1"));
        assert_eq!(boundary.read_line().unwrap().as_deref(), Some(" q "));
        assert!(!boundary.is_exhausted());
        assert_eq!(boundary.read_line().unwrap(), None);
        assert!(boundary.is_exhausted());
    }

    #[test]
    fn test_scripted_boundary_records_transcript() {
        let mut boundary = ScriptedBoundary::default();
        boundary.blank().unwrap();
        boundary.write_line(LineStyle::Notice, "Invalid.").unwrap();

        assert_eq!(boundary.transcript(), &["".to_string(), "Invalid.".to_string()]);
    }
}
