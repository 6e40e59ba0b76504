use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use crate::core::{PlayerStats, Stat};

pub const STARTING_DAY: u32 = 0;
pub const STARTING_HOUR: u8 = 8;

/// In-world clock. Only the turn engine advances it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    pub day: u32,
    pub hour: u8,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            day: STARTING_DAY,
            hour: STARTING_HOUR,
        }
    }
}

impl Clock {
    /// Moves the clock forward, rolling the day over each time the hour passes 23.
    pub fn advance(&mut self, hours: u32) {
        let mut total = u32::from(self.hour) + hours;
        while total >= 24 {
            total -= 24;
            self.day += 1;
        }
        self.hour = total as u8;
    }

    pub fn formatted(&self) -> String {
        format!("Day {}, {:02}:00", self.day, self.hour)
    }
}

/// The only mutable object of a run: attributes, flags, position and clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub clock: Clock,
    pub stats: PlayerStats,
    pub current_scene_id: String,
    pub flags: BTreeSet<String>,
}

impl PlayerState {
    pub fn new<S: Into<String>>(starting_scene_id: S) -> Self {
        Self {
            clock: Clock::default(),
            stats: PlayerStats::default(),
            current_scene_id: starting_scene_id.into(),
            flags: BTreeSet::new(),
        }
    }

    pub fn visit_scene(&mut self, scene_id: &str) {
        self.current_scene_id = scene_id.to_string();
    }

    /// Returns `true` when the flag was not already set.
    pub fn set_flag<S: Into<String>>(&mut self, flag: S) -> bool {
        self.flags.insert(flag.into())
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        self.stats.get(stat)
    }

    pub fn status_line(&self) -> String {
        format!(
            "{}  |  Morality {}  Trauma {}  Stress {}",
            self.clock.formatted(),
            self.stats.morality,
            self.stats.trauma,
            self.stats.stress
        )
    }

    pub fn summary(&self) -> String {
        let flags = if self.flags.is_empty() {
            "none".to_string()
        } else {
            self.flags.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        format!("{} | flags: {}", self.status_line(), flags)
    }
}
