//! Appliance loads and their aggregation into energy and peak power figures.

use serde::{Deserialize, Serialize};

/// Appliance category; decides how the rating was entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceCategory {
    /// Rated in watts.
    General,
    /// Rated in BTU/h and converted to watts on entry.
    AirConditioner { btu_per_hour: f64 },
}

/// How long a load runs per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadUsage {
    /// Total daily hours, no day/night split.
    Hours(f64),
    /// Hours served during daylight and after dark.
    DayNight { day_hours: f64, night_hours: f64 },
}

impl LoadUsage {
    /// Whole hours plus minutes, as collected by an hour/minute picker.
    pub fn from_clock(hours: f64, minutes: f64) -> Self {
        Self::Hours(hours + minutes / 60.0)
    }

    pub fn total_hours(self) -> f64 {
        match self {
            Self::Hours(h) => h,
            Self::DayNight {
                day_hours,
                night_hours,
            } => day_hours + night_hours,
        }
    }

    /// Hours known to be served in daylight.
    pub fn day_hours(self) -> f64 {
        match self {
            Self::Hours(_) => 0.0,
            Self::DayNight { day_hours, .. } => day_hours,
        }
    }

    /// Hours that must be served from storage.
    ///
    /// An unsplit duration counts entirely as nighttime.
    pub fn night_hours(self) -> f64 {
        match self {
            Self::Hours(h) => h,
            Self::DayNight { night_hours, .. } => night_hours,
        }
    }
}

/// A single appliance line in the load list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadEntry {
    /// Display name.
    pub name: String,
    pub category: DeviceCategory,
    /// Rated power per unit (W).
    pub rated_power_w: f64,
    /// Number of identical units (> 0).
    pub quantity: u32,
    pub usage: LoadUsage,
}

impl LoadEntry {
    /// Creates a load rated in watts.
    pub fn new(name: impl Into<String>, rated_power_w: f64, quantity: u32, usage: LoadUsage) -> Self {
        Self {
            name: name.into(),
            category: DeviceCategory::General,
            rated_power_w,
            quantity,
            usage,
        }
    }

    /// Creates an air-conditioner load from its BTU/h rating.
    ///
    /// The rating is converted with `btu_per_watt` and the name is annotated
    /// with the BTU/h rating.
    pub fn air_conditioner(
        name: impl Into<String>,
        btu_per_hour: f64,
        quantity: u32,
        usage: LoadUsage,
        btu_per_watt: f64,
    ) -> Self {
        let name = name.into();
        Self {
            name: format!("{name} ({btu_per_hour} BTU)"),
            category: DeviceCategory::AirConditioner { btu_per_hour },
            rated_power_w: btu_per_hour / btu_per_watt,
            quantity,
            usage,
        }
    }

    /// Combined power of all units (W).
    pub fn power_w(&self) -> f64 {
        self.rated_power_w * f64::from(self.quantity)
    }

    /// Daily energy (Wh).
    pub fn energy_wh(&self) -> f64 {
        self.power_w() * self.usage.total_hours()
    }

    pub fn daytime_energy_wh(&self) -> f64 {
        self.power_w() * self.usage.day_hours()
    }

    pub fn nighttime_energy_wh(&self) -> f64 {
        self.power_w() * self.usage.night_hours()
    }
}

/// Session-scoped list of loads for one design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadList {
    entries: Vec<LoadEntry>,
}

impl LoadList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: LoadEntry) {
        self.entries.push(entry);
    }

    /// Removes and returns the entry at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<LoadEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Drops every entry, e.g. when the system type changes.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LoadEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total daily energy (Wh).
    pub fn total_daily_energy_wh(&self) -> f64 {
        self.entries.iter().map(LoadEntry::energy_wh).sum()
    }

    /// Energy served during daylight (Wh).
    pub fn total_daytime_energy_wh(&self) -> f64 {
        self.entries.iter().map(LoadEntry::daytime_energy_wh).sum()
    }

    /// Energy that must come from the battery (Wh).
    pub fn total_nighttime_energy_wh(&self) -> f64 {
        self.entries.iter().map(LoadEntry::nighttime_energy_wh).sum()
    }

    /// Worst-case coincident load: every unit running at once (W).
    pub fn peak_instantaneous_load_w(&self) -> f64 {
        self.entries.iter().map(LoadEntry::power_w).sum()
    }

    /// Whether every entry carries a day/night split.
    pub fn has_day_night_split(&self) -> bool {
        !self.entries.is_empty()
            && self
                .entries
                .iter()
                .all(|e| matches!(e.usage, LoadUsage::DayNight { .. }))
    }
}

impl FromIterator<LoadEntry> for LoadList {
    fn from_iter<T: IntoIterator<Item = LoadEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
