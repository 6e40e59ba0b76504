pub mod engine;
pub mod game_state;
pub mod player;
pub mod events;

pub use engine::{GameEngine, InputRejection, PlayerInput, RunStatus, TurnOutcome, MAX_VISIBLE_CHOICES};
pub use game_state::{Clock, PlayerState};
pub use player::{PlayerStats, Stat};
pub use events::{EventLogger, GameEvent, GameEventHandler, GameEventType};
