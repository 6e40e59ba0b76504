use serde::{Deserialize, Serialize};
use crate::core::{PlayerState, Stat};

/// A pure test over the player's state. Evaluating one never mutates anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    Flag { flag: String },
    Stat {
        stat: Stat,
        operator: ComparisonOperator,
        value: i32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
}

impl ComparisonOperator {
    pub fn compare(self, actual: i32, expected: i32) -> bool {
        match self {
            ComparisonOperator::Equals => actual == expected,
            ComparisonOperator::NotEquals => actual != expected,
            ComparisonOperator::GreaterThan => actual > expected,
            ComparisonOperator::LessThan => actual < expected,
            ComparisonOperator::GreaterEqual => actual >= expected,
            ComparisonOperator::LessEqual => actual <= expected,
        }
    }
}

impl Condition {
    pub fn flag<S: Into<String>>(flag: S) -> Self {
        Self::Flag { flag: flag.into() }
    }

    pub fn stat(stat: Stat, operator: ComparisonOperator, value: i32) -> Self {
        Self::Stat {
            stat,
            operator,
            value,
        }
    }

    pub fn stat_at_least(stat: Stat, value: i32) -> Self {
        Self::stat(stat, ComparisonOperator::GreaterEqual, value)
    }

    pub fn stat_at_most(stat: Stat, value: i32) -> Self {
        Self::stat(stat, ComparisonOperator::LessEqual, value)
    }

    pub fn stat_below(stat: Stat, value: i32) -> Self {
        Self::stat(stat, ComparisonOperator::LessThan, value)
    }

    pub fn is_met(&self, state: &PlayerState) -> bool {
        match self {
            Condition::Flag { flag } => state.has_flag(flag),
            Condition::Stat {
                stat,
                operator,
                value,
            } => operator.compare(state.stat(*stat), *value),
        }
    }
}

/// All conditions must hold. An empty list always holds.
pub fn check_conditions(conditions: &[Condition], state: &PlayerState) -> bool {
    conditions.iter().all(|condition| condition.is_met(state))
}
