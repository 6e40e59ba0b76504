use serde::{Deserialize, Serialize};
use crate::core::{PlayerState, Stat};

/// Signed changes to the three attributes, applied together when a choice is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatDelta {
    pub morality: i32,
    pub trauma: i32,
    pub stress: i32,
}

impl StatDelta {
    pub const NONE: StatDelta = StatDelta {
        morality: 0,
        trauma: 0,
        stress: 0,
    };

    pub const fn new(morality: i32, trauma: i32, stress: i32) -> Self {
        Self {
            morality,
            trauma,
            stress,
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Morality => self.morality,
            Stat::Trauma => self.trauma,
            Stat::Stress => self.stress,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Each field clamps independently, so the order the three are applied in does not matter.
    pub fn apply(&self, state: &mut PlayerState) {
        for stat in Stat::ALL {
            let amount = self.get(stat);
            if amount != 0 {
                state.stats.modify(stat, amount);
            }
        }
    }

    /// Human-readable summary such as `morality +6, stress +4`.
    pub fn describe(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let parts: Vec<String> = Stat::ALL
            .iter()
            .filter(|&&stat| self.get(stat) != 0)
            .map(|&stat| format!("{} {:+}", stat, self.get(stat)))
            .collect();

        Some(parts.join(", "))
    }
}

/// A flag mutation carried as data by a choice (after-effect) or a scene (on-enter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    SetFlag { flag: String },
    /// Sets `flag` only when `requires` is already set and `flag` is not.
    SetFlagIf { flag: String, requires: String },
}

impl Effect {
    pub fn set_flag<S: Into<String>>(flag: S) -> Self {
        Self::SetFlag { flag: flag.into() }
    }

    pub fn set_flag_if<S: Into<String>>(flag: S, requires: S) -> Self {
        Self::SetFlagIf {
            flag: flag.into(),
            requires: requires.into(),
        }
    }

    /// Applies the effect and returns the flag it added, if any.
    pub fn apply(&self, state: &mut PlayerState) -> Option<String> {
        match self {
            Effect::SetFlag { flag } => state.set_flag(flag.as_str()).then(|| flag.clone()),
            Effect::SetFlagIf { flag, requires } => {
                if state.has_flag(requires) && !state.has_flag(flag) {
                    state.set_flag(flag.as_str());
                    Some(flag.clone())
                } else {
                    None
                }
            }
        }
    }
}

/// Applies effects in authored order and collects the flags that were newly set.
pub fn apply_effects(effects: &[Effect], state: &mut PlayerState) -> Vec<String> {
    effects
        .iter()
        .filter_map(|effect| effect.apply(state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_applies_all_three() {
        let mut state = PlayerState::new("intro");
        StatDelta::new(6, 0, 4).apply(&mut state);

        assert_eq!(state.stats.morality, 6);
        assert_eq!(state.stats.trauma, 10);
        assert_eq!(state.stats.stress, 14);
    }

    #[test]
    fn test_delta_clamps_each_field() {
        let mut state = PlayerState::new("intro");
        state.stats.morality = 98;
        state.stats.trauma = 3;

        StatDelta::new(6, -12, 200).apply(&mut state);

        assert_eq!(state.stats.morality, 100);
        assert_eq!(state.stats.trauma, 0);
        assert_eq!(state.stats.stress, 100);
    }

    #[test]
    fn test_describe_delta() {
        assert_eq!(
            StatDelta::new(6, 0, 4).describe().as_deref(),
            Some("morality +6, stress +4")
        );
        assert_eq!(StatDelta::new(0, -4, 0).describe().as_deref(), Some("trauma -4"));
        assert_eq!(StatDelta::NONE.describe(), None);
    }

    #[test]
    fn test_set_flag_effect() {
        let mut state = PlayerState::new("intro");
        let effect = Effect::set_flag("manipulator");

        assert_eq!(effect.apply(&mut state).as_deref(), Some("manipulator"));
        assert_eq!(effect.apply(&mut state), None);
        assert!(state.has_flag("manipulator"));
    }

    #[test]
    fn test_conditional_flag_requires_other_flag() {
        let mut state = PlayerState::new("intro");
        let effect = Effect::set_flag_if("bloomChoice", "bloomInsight");

        assert_eq!(effect.apply(&mut state), None);
        assert!(!state.has_flag("bloomChoice"));

        state.set_flag("bloomInsight");
        assert_eq!(effect.apply(&mut state).as_deref(), Some("bloomChoice"));
        assert!(state.has_flag("bloomChoice"));
    }

    #[test]
    fn test_conditional_flag_skips_when_already_set() {
        let mut state = PlayerState::new("intro");
        state.set_flag("bloomInsight");
        state.set_flag("bloomChoice");

        let effect = Effect::set_flag_if("bloomChoice", "bloomInsight");
        assert_eq!(effect.apply(&mut state), None);
        assert_eq!(state.flags.len(), 2);
    }

    #[test]
    fn test_apply_effects_in_order() {
        let mut state = PlayerState::new("intro");
        let effects = vec![
            Effect::set_flag("bloomInsight"),
            Effect::set_flag_if("bloomChoice", "bloomInsight"),
        ];

        let added = apply_effects(&effects, &mut state);
        assert_eq!(added, vec!["bloomInsight".to_string(), "bloomChoice".to_string()]);
    }

    #[test]
    fn test_effect_json_shape() {
        let effect: Effect =
            serde_json::from_str(r#"{"type":"set_flag_if","flag":"a","requires":"b"}"#).unwrap();
        assert_eq!(effect, Effect::set_flag_if("a", "b"));
    }
}
