pub mod story;
pub mod graph;
pub mod loader;
pub mod conditions;
pub mod effects;
pub mod endings;
pub mod content;

pub use story::{Story, Scene, Choice, DEFAULT_STARTING_SCENE_ID, TERMINAL_SCENE_ID};
pub use graph::{SceneGraph, CompiledStory};
pub use loader::{StoryLoader, StoryMetadata};
pub use conditions::{Condition, ComparisonOperator};
pub use effects::{Effect, StatDelta};
pub use endings::{Ending, EndingResolver, DEFAULT_ENDING_ID};
