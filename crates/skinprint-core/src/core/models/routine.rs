use super::product::Product;
use crate::core::utils::steps::step_cmp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

/// Where a product is added: one time of day or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutineSlot {
    Am,
    Pm,
    Both,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid time of day: '{0}'. Expected 'am', 'pm' or 'both'.")]
pub struct ParseTimeOfDayError(pub String);

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "am" | "morning" => Ok(TimeOfDay::Am),
            "pm" | "evening" | "night" => Ok(TimeOfDay::Pm),
            _ => Err(ParseTimeOfDayError(s.to_string())),
        }
    }
}

impl FromStr for RoutineSlot {
    type Err = ParseTimeOfDayError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "both" => Ok(RoutineSlot::Both),
            other => match TimeOfDay::from_str(other) {
                Ok(TimeOfDay::Am) => Ok(RoutineSlot::Am),
                Ok(TimeOfDay::Pm) => Ok(RoutineSlot::Pm),
                Err(_) => Err(ParseTimeOfDayError(s.to_string())),
            },
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TimeOfDay::Am => "AM",
                TimeOfDay::Pm => "PM",
            }
        )
    }
}

impl fmt::Display for RoutineSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RoutineSlot::Am => "am",
                RoutineSlot::Pm => "pm",
                RoutineSlot::Both => "both",
            }
        )
    }
}

impl RoutineSlot {
    pub fn times(self) -> &'static [TimeOfDay] {
        match self {
            RoutineSlot::Am => &[TimeOfDay::Am],
            RoutineSlot::Pm => &[TimeOfDay::Pm],
            RoutineSlot::Both => &[TimeOfDay::Am, TimeOfDay::Pm],
        }
    }
}

/// A product placed in a routine together with the function the user assigned it.
///
/// The assigned function may differ from the catalog's (a serum used as a "treatment").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoutineEntry {
    pub product: Product,
    pub function: String,
}

impl RoutineEntry {
    pub fn new(product: Product, function: Option<&str>) -> Self {
        let function = function
            .map(str::to_string)
            .unwrap_or_else(|| product.function.clone());
        Self { product, function }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    #[serde(rename = "AM", default)]
    am: Vec<RoutineEntry>,
    #[serde(rename = "PM", default)]
    pm: Vec<RoutineEntry>,
}

impl Routine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self, time: TimeOfDay) -> &[RoutineEntry] {
        match time {
            TimeOfDay::Am => &self.am,
            TimeOfDay::Pm => &self.pm,
        }
    }

    fn entries_mut(&mut self, time: TimeOfDay) -> &mut Vec<RoutineEntry> {
        match time {
            TimeOfDay::Am => &mut self.am,
            TimeOfDay::Pm => &mut self.pm,
        }
    }

    pub fn add(&mut self, slot: RoutineSlot, entry: RoutineEntry) {
        for &time in slot.times() {
            self.entries_mut(time).push(entry.clone());
        }
    }

    /// Removes the entry at `index` in insertion order.
    pub fn remove(&mut self, time: TimeOfDay, index: usize) -> Option<RoutineEntry> {
        let entries = self.entries_mut(time);
        (index < entries.len()).then(|| entries.remove(index))
    }

    pub fn clear(&mut self, time: TimeOfDay) {
        self.entries_mut(time).clear();
    }

    pub fn is_empty(&self) -> bool {
        self.am.is_empty() && self.pm.is_empty()
    }

    /// Entries in application order. Stable, so entries sharing a step keep insertion order.
    pub fn sorted_steps(&self, time: TimeOfDay) -> Vec<&RoutineEntry> {
        let mut steps: Vec<&RoutineEntry> = self.entries(time).iter().collect();
        steps.sort_by(|a, b| step_cmp(&a.function, &b.function));
        steps
    }

    pub fn products(&self, time: TimeOfDay) -> Vec<Product> {
        self.entries(time)
            .iter()
            .map(|entry| entry.product.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, function: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            brand: "Brand".to_string(),
            function: function.to_string(),
            ingredients: vec![],
            description: String::new(),
        }
    }

    #[test]
    fn add_with_both_places_entry_in_each_slot() {
        let mut routine = Routine::new();
        routine.add(
            RoutineSlot::Both,
            RoutineEntry::new(product("p1", "cleanser"), None),
        );
        assert_eq!(routine.entries(TimeOfDay::Am).len(), 1);
        assert_eq!(routine.entries(TimeOfDay::Pm).len(), 1);
    }

    #[test]
    fn entry_defaults_to_catalog_function_unless_overridden() {
        let entry = RoutineEntry::new(product("p1", "serum"), None);
        assert_eq!(entry.function, "serum");
        let entry = RoutineEntry::new(product("p1", "serum"), Some("treatment"));
        assert_eq!(entry.function, "treatment");
    }

    #[test]
    fn sorted_steps_orders_by_function_and_is_stable() {
        let mut routine = Routine::new();
        routine.add(RoutineSlot::Am, RoutineEntry::new(product("m", "moisturizer"), None));
        routine.add(RoutineSlot::Am, RoutineEntry::new(product("t", "treatment"), None));
        routine.add(RoutineSlot::Am, RoutineEntry::new(product("s1", "serum"), None));
        routine.add(RoutineSlot::Am, RoutineEntry::new(product("c", "cleanser"), None));
        routine.add(RoutineSlot::Am, RoutineEntry::new(product("s2", "serum"), None));

        let ids: Vec<&str> = routine
            .sorted_steps(TimeOfDay::Am)
            .iter()
            .map(|entry| entry.product.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "s1", "s2", "m", "t"]);
    }

    #[test]
    fn remove_out_of_range_returns_none() {
        let mut routine = Routine::new();
        routine.add(RoutineSlot::Pm, RoutineEntry::new(product("p1", "serum"), None));
        assert!(routine.remove(TimeOfDay::Am, 0).is_none());
        assert!(routine.remove(TimeOfDay::Pm, 1).is_none());
        assert_eq!(routine.remove(TimeOfDay::Pm, 0).unwrap().product.id, "p1");
        assert!(routine.is_empty());
    }

    #[test]
    fn slot_and_time_parse_from_user_input() {
        assert_eq!("AM".parse::<RoutineSlot>(), Ok(RoutineSlot::Am));
        assert_eq!("Both".parse::<RoutineSlot>(), Ok(RoutineSlot::Both));
        assert_eq!("night".parse::<TimeOfDay>(), Ok(TimeOfDay::Pm));
        assert!("noon".parse::<RoutineSlot>().is_err());
    }

    #[test]
    fn serializes_with_upper_case_time_keys() {
        let mut routine = Routine::new();
        routine.add(RoutineSlot::Am, RoutineEntry::new(product("p1", "serum"), None));
        let json = serde_json::to_value(&routine).unwrap();
        assert!(json.get("AM").is_some());
        assert_eq!(json["PM"].as_array().map(Vec::len), Some(0));
    }
}
