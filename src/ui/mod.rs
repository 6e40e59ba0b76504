pub mod boundary;
pub mod interface;
pub mod theme;
pub mod components;

pub use boundary::{Boundary, LineStyle, ScriptedBoundary, TerminalBoundary};
pub use interface::{GameInterface, ReplayOutcome, ReplayReport, StoryCheck};
pub use theme::{Theme, ThemeManager};
pub use components::Display;
