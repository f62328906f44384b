//! Day trivia and sign descriptions, supplied by the caller as data.

use std::collections::HashMap;

use serde::Deserialize;

use crate::{LunarAnimal, MonthDay, ZodiacSign};

#[derive(Debug, thiserror::Error)]
pub enum AlmanacError {
    #[error("Invalid almanac payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Lookups keyed by day of year or by sign. Unknown keys yield an empty slice.
pub trait Almanac {
    fn historic_events(&self, md: MonthDay) -> &[String];
    fn famous_birthdays(&self, md: MonthDay) -> &[String];
    fn fun_facts(&self, md: MonthDay) -> &[String];
    fn zodiac_traits(&self, sign: ZodiacSign) -> &[String];
    fn lunar_traits(&self, animal: LunarAnimal) -> &[String];
}

/// An [`Almanac`] backed by maps loaded once from JSON.
///
/// ```
/// use my_family::{Almanac, StaticAlmanac, ZodiacSign};
///
/// let almanac = StaticAlmanac::from_json(r#"{"zodiacTraits": {"Leo": ["Bold"]}}"#).unwrap();
/// assert_eq!(almanac.zodiac_traits(ZodiacSign::Leo), ["Bold"]);
/// assert!(almanac.zodiac_traits(ZodiacSign::Virgo).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticAlmanac {
    historic_events:  HashMap<MonthDay, Vec<String>>,
    famous_birthdays: HashMap<MonthDay, Vec<String>>,
    fun_facts:        HashMap<MonthDay, Vec<String>>,
    zodiac_traits:    HashMap<ZodiacSign, Vec<String>>,
    lunar_traits:     HashMap<LunarAnimal, Vec<String>>,
}

impl StaticAlmanac {
    /// # Errors
    /// Returns `AlmanacError::Json` if the payload is not valid JSON or has an
    /// unknown month-day, sign or animal key.
    pub fn from_json(json: &str) -> Result<Self, AlmanacError> {
        let almanac: Self = serde_json::from_str(json)?;
        tracing::debug!(
            days = almanac.historic_events.len() + almanac.famous_birthdays.len() + almanac.fun_facts.len(),
            signs = almanac.zodiac_traits.len(),
            animals = almanac.lunar_traits.len(),
            "loaded almanac"
        );
        Ok(almanac)
    }
}

fn lookup<'a, K: std::hash::Hash + Eq>(map: &'a HashMap<K, Vec<String>>, key: &K) -> &'a [String] {
    map.get(key).map(Vec::as_slice).unwrap_or_default()
}

impl Almanac for StaticAlmanac {
    fn historic_events(&self, md: MonthDay) -> &[String] {
        lookup(&self.historic_events, &md)
    }

    fn famous_birthdays(&self, md: MonthDay) -> &[String] {
        lookup(&self.famous_birthdays, &md)
    }

    fn fun_facts(&self, md: MonthDay) -> &[String] {
        lookup(&self.fun_facts, &md)
    }

    fn zodiac_traits(&self, sign: ZodiacSign) -> &[String] {
        lookup(&self.zodiac_traits, &sign)
    }

    fn lunar_traits(&self, animal: LunarAnimal) -> &[String] {
        lookup(&self.lunar_traits, &animal)
    }
}
