//! Input records and the rejection taxonomy shared by all sizers.

use serde::{Deserialize, Serialize};

/// Battery bank voltages the sizers accept.
pub const BATTERY_VOLTAGES: &[f64] = &[12.0, 24.0, 48.0];

/// Reasons a sizing request is refused. No partial result accompanies them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SizingError {
    /// Panel Isc or wattage is missing or not a positive number.
    #[error("invalid panel selection: {0} must be a positive number (select a panel size)")]
    InvalidPanelSelection(&'static str),
    /// Nothing to size against.
    #[error("total daily load energy is zero: add at least one load before sizing")]
    ZeroLoadEnergy,
    /// Grid-tie economics input is not usable.
    #[error("invalid economic input: {0} must be a positive number")]
    InvalidEconomicInput(&'static str),
    #[error("invalid water system parameter `{field}`: {reason}")]
    InvalidWaterParameters { field: &'static str, reason: String },
    #[error("invalid system parameter `{field}`: {reason}")]
    InvalidSystemParameter { field: &'static str, reason: String },
}

/// Selected panel from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    /// Rated power (Wp).
    pub wattage_w: f64,
    /// Short-circuit current (A).
    pub isc_a: f64,
}

impl PanelSpec {
    pub fn new(wattage_w: f64, isc_a: f64) -> Self {
        Self { wattage_w, isc_a }
    }

    /// Rejects panels whose Isc or wattage is not a positive number.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidPanelSelection`] naming the bad field.
    pub fn validate(&self) -> Result<(), SizingError> {
        if !is_positive(self.isc_a) {
            return Err(SizingError::InvalidPanelSelection("panel Isc"));
        }
        if !is_positive(self.wattage_w) {
            return Err(SizingError::InvalidPanelSelection("panel wattage"));
        }
        Ok(())
    }
}

/// Parameters of a battery-backed (off-grid or hybrid) design.
///
/// Fractions are expressed in `(0, 1]`, not percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemParameters {
    /// Days the bank must carry the full load without sun.
    pub autonomy_days: f64,
    /// Battery bank voltage: 12, 24 or 48 V.
    pub battery_voltage: f64,
    /// Usable fraction of battery capacity.
    pub depth_of_discharge: f64,
    pub inverter_efficiency: f64,
    /// Derating for wiring, soiling and temperature losses.
    pub system_loss_factor: f64,
    /// Equivalent full-sun hours per day.
    pub peak_sun_hours: f64,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            autonomy_days: 1.0,
            battery_voltage: 24.0,
            depth_of_discharge: 0.8,
            inverter_efficiency: 0.9,
            system_loss_factor: 0.95,
            peak_sun_hours: 5.0,
        }
    }
}

impl SystemParameters {
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidSystemParameter`] for the first bad field.
    pub fn validate(&self) -> Result<(), SizingError> {
        if !BATTERY_VOLTAGES.contains(&self.battery_voltage) {
            return Err(SizingError::InvalidSystemParameter {
                field: "battery_voltage",
                reason: format!("must be 12, 24 or 48 V, got {}", self.battery_voltage),
            });
        }
        if !is_positive(self.autonomy_days) {
            return Err(SizingError::InvalidSystemParameter {
                field: "autonomy_days",
                reason: format!("must be > 0, got {}", self.autonomy_days),
            });
        }
        check_fraction("depth_of_discharge", self.depth_of_discharge)?;
        check_fraction("inverter_efficiency", self.inverter_efficiency)?;
        check_fraction("system_loss_factor", self.system_loss_factor)?;
        check_peak_sun_hours(self.peak_sun_hours)
    }
}

/// Parameters of a grid-tied design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTieParameters {
    /// Selected inverter/system size (kW).
    pub system_size_kw: f64,
    /// Electricity price per kWh.
    pub price_per_unit: f64,
    pub peak_sun_hours: f64,
    pub system_loss_factor: f64,
}

impl Default for GridTieParameters {
    fn default() -> Self {
        Self {
            system_size_kw: 5.0,
            price_per_unit: 4.0,
            peak_sun_hours: 5.0,
            system_loss_factor: 0.9,
        }
    }
}

impl GridTieParameters {
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidEconomicInput`] for a bad price or size,
    /// [`SizingError::InvalidSystemParameter`] for bad solar inputs.
    pub fn validate(&self) -> Result<(), SizingError> {
        if !is_positive(self.price_per_unit) {
            return Err(SizingError::InvalidEconomicInput("price per unit"));
        }
        if !is_positive(self.system_size_kw) {
            return Err(SizingError::InvalidEconomicInput("system size"));
        }
        check_fraction("system_loss_factor", self.system_loss_factor)?;
        check_peak_sun_hours(self.peak_sun_hours)
    }
}

/// Sprinkler zone description for the pumping sizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaterSystemParameters {
    /// Flow of a single sprinkler head (L/h).
    pub sprinkler_flow_lph: f64,
    pub sprinklers_per_zone: u32,
    /// Operating pressure at the sprinkler (bar).
    pub sprinkler_pressure_bar: f64,
    /// Elevation from water source to outlet (m).
    pub static_head_m: f64,
    /// Length of pipe run to the zone (m).
    pub pipe_length_m: f64,
}

impl Default for WaterSystemParameters {
    fn default() -> Self {
        Self {
            sprinkler_flow_lph: 480.0,
            sprinklers_per_zone: 4,
            sprinkler_pressure_bar: 2.0,
            static_head_m: 5.0,
            pipe_length_m: 50.0,
        }
    }
}

impl WaterSystemParameters {
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidWaterParameters`] for the first bad field.
    pub fn validate(&self) -> Result<(), SizingError> {
        let positive = [
            ("sprinkler_flow_lph", self.sprinkler_flow_lph),
            ("sprinkler_pressure_bar", self.sprinkler_pressure_bar),
        ];
        for (field, value) in positive {
            if !is_positive(value) {
                return Err(SizingError::InvalidWaterParameters {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }
        if self.sprinklers_per_zone == 0 {
            return Err(SizingError::InvalidWaterParameters {
                field: "sprinklers_per_zone",
                reason: "must be at least 1".into(),
            });
        }
        let non_negative = [
            ("static_head_m", self.static_head_m),
            ("pipe_length_m", self.pipe_length_m),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SizingError::InvalidWaterParameters {
                    field,
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Rule-of-thumb constants without a cited standard; overridable per design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Heuristics {
    /// Divisor turning an air-conditioner BTU/h rating into watts.
    pub btu_per_watt: f64,
    /// Head lost per 10 m of pipe (m).
    pub friction_loss_per_10m: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            btu_per_watt: 10.5,
            friction_loss_per_10m: 1.5,
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn check_fraction(field: &'static str, value: f64) -> Result<(), SizingError> {
    if is_positive(value) && value <= 1.0 {
        Ok(())
    } else {
        Err(SizingError::InvalidSystemParameter {
            field,
            reason: format!("must be in (0, 1], got {value}"),
        })
    }
}

fn check_peak_sun_hours(value: f64) -> Result<(), SizingError> {
    if is_positive(value) {
        Ok(())
    } else {
        Err(SizingError::InvalidSystemParameter {
            field: "peak_sun_hours",
            reason: format!("must be a positive number, got {value}"),
        })
    }
}
