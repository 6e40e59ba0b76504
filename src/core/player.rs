use serde::{Deserialize, Serialize};
use std::fmt;

/// The three tracked attributes. Each has fixed bounds and every write clamps into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Morality,
    Trauma,
    Stress,
}

impl Stat {
    pub const ALL: [Stat; 3] = [Stat::Morality, Stat::Trauma, Stat::Stress];

    pub fn bounds(self) -> (i32, i32) {
        match self {
            Stat::Morality => (-100, 100),
            Stat::Trauma => (0, 100),
            Stat::Stress => (0, 100),
        }
    }

    pub fn clamp(self, value: i32) -> i32 {
        let (min, max) = self.bounds();
        value.clamp(min, max)
    }

    pub fn name(self) -> &'static str {
        match self {
            Stat::Morality => "morality",
            Stat::Trauma => "trauma",
            Stat::Stress => "stress",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub morality: i32,
    pub trauma: i32,
    pub stress: i32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            morality: 0,
            trauma: 10,
            stress: 10,
        }
    }
}

impl PlayerStats {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Morality => self.morality,
            Stat::Trauma => self.trauma,
            Stat::Stress => self.stress,
        }
    }

    /// Adds `amount` to `stat` and clamps the result. Returns the previous value.
    pub fn modify(&mut self, stat: Stat, amount: i32) -> i32 {
        let old_value = self.get(stat);
        let new_value = stat.clamp(old_value.saturating_add(amount));
        match stat {
            Stat::Morality => self.morality = new_value,
            Stat::Trauma => self.trauma = new_value,
            Stat::Stress => self.stress = new_value,
        }
        old_value
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        let value = stat.clamp(value);
        match stat {
            Stat::Morality => self.morality = value,
            Stat::Trauma => self.trauma = value,
            Stat::Stress => self.stress = value,
        }
    }

    pub fn is_within_bounds(&self) -> bool {
        Stat::ALL.iter().all(|&stat| {
            let (min, max) = stat.bounds();
            (min..=max).contains(&self.get(stat))
        })
    }
}
