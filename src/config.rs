//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// How a person's age is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgePolicy {
    /// Completed years: the count goes up on the birthday itself.
    #[default]
    Adjusted,
    /// Difference of calendar years only, so the count goes up on January 1.
    Naive,
}

/// Where a February 29 birthday lands in a year without a leap day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeapDayPolicy {
    /// Celebrate on February 28.
    #[default]
    Feb28,
    /// Celebrate on March 1.
    Mar1,
}

/// Knobs shared by every derived birthday fact.
///
/// # Example
///
/// ```
/// use my_family::{AgePolicy, EngineConfig, LeapDayPolicy};
///
/// let config = EngineConfig::new()
///     .with_age_policy(AgePolicy::Naive)
///     .with_leap_day_policy(LeapDayPolicy::Mar1);
///
/// assert_eq!(config.age_policy(), AgePolicy::Naive);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    age_policy:      AgePolicy,
    leap_day_policy: LeapDayPolicy,
}

impl EngineConfig {
    /// Defaults: adjusted age, Feb 29 observed on Feb 28.
    pub const fn new() -> Self {
        Self {
            age_policy:      AgePolicy::Adjusted,
            leap_day_policy: LeapDayPolicy::Feb28,
        }
    }

    #[must_use]
    pub const fn with_age_policy(mut self, policy: AgePolicy) -> Self {
        self.age_policy = policy;
        self
    }

    #[must_use]
    pub const fn with_leap_day_policy(mut self, policy: LeapDayPolicy) -> Self {
        self.leap_day_policy = policy;
        self
    }

    pub const fn age_policy(&self) -> AgePolicy {
        self.age_policy
    }

    pub const fn leap_day_policy(&self) -> LeapDayPolicy {
        self.leap_day_policy
    }
}
