//! TOML design files and preset designs.
//!
//! A design names the system type and carries every input the matching
//! sizer needs. Percentages are entered as percent (e.g. `80` for 80 %
//! depth of discharge) and converted to fractions for the engine.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::PanelCatalog;
use crate::loads::{LoadEntry, LoadList, LoadUsage};
use crate::sizing::{
    GridTieParameters, Heuristics, PanelSpec, SizingError, SizingResult, SystemKind,
    SystemParameters, WaterSystemParameters, size_grid_tie, size_water, strategy_for,
};

/// Panel used when a design names neither a model nor explicit ratings.
pub const DEFAULT_PANEL_MODEL: &str = "400W";

/// Top-level design parsed from TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignConfig {
    /// Which sizer runs.
    pub system: SystemKind,
    /// Battery-backed system parameters (off-grid, hybrid).
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub panel: PanelConfig,
    #[serde(default)]
    pub grid_tie: GridTieConfig,
    #[serde(default)]
    pub water: WaterConfig,
    #[serde(default)]
    pub heuristics: Heuristics,
    /// Appliance list (off-grid, hybrid).
    #[serde(default)]
    pub loads: Vec<LoadConfig>,
}

/// Battery-backed system parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParametersConfig {
    pub autonomy_days: f64,
    /// Bank voltage: 12, 24 or 48.
    pub battery_voltage: f64,
    pub depth_of_discharge_pct: f64,
    pub inverter_efficiency_pct: f64,
    pub system_loss_factor_pct: f64,
    pub peak_sun_hours: f64,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            autonomy_days: 1.0,
            battery_voltage: 24.0,
            depth_of_discharge_pct: 80.0,
            inverter_efficiency_pct: 90.0,
            system_loss_factor_pct: 95.0,
            peak_sun_hours: 5.0,
        }
    }
}

impl ParametersConfig {
    pub fn to_system_parameters(&self) -> SystemParameters {
        SystemParameters {
            autonomy_days: self.autonomy_days,
            battery_voltage: self.battery_voltage,
            depth_of_discharge: self.depth_of_discharge_pct / 100.0,
            inverter_efficiency: self.inverter_efficiency_pct / 100.0,
            system_loss_factor: self.system_loss_factor_pct / 100.0,
            peak_sun_hours: self.peak_sun_hours,
        }
    }
}

/// Panel selection: a catalog model, or explicit ratings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    /// Catalog selector such as `"400W"`.
    pub model: Option<String>,
    pub wattage_w: Option<f64>,
    pub isc_a: Option<f64>,
}

impl PanelConfig {
    /// Resolves the selection against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unknown model, for a model combined
    /// with explicit ratings, or for only one of the two ratings.
    pub fn resolve(&self, catalog: &PanelCatalog) -> Result<PanelSpec, ConfigError> {
        match (&self.model, self.wattage_w, self.isc_a) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(ConfigError {
                field: "panel".into(),
                message: "give either model or wattage_w/isc_a, not both".into(),
            }),
            (None, Some(wattage_w), Some(isc_a)) => Ok(PanelSpec::new(wattage_w, isc_a)),
            (None, Some(_), None) | (None, None, Some(_)) => Err(ConfigError {
                field: "panel".into(),
                message: "explicit panels need both wattage_w and isc_a".into(),
            }),
            (model, None, None) => {
                let model = model.as_deref().unwrap_or(DEFAULT_PANEL_MODEL);
                catalog.get(model).ok_or_else(|| ConfigError {
                    field: "panel.model".into(),
                    message: format!(
                        "unknown panel \"{model}\", available: {}",
                        catalog.models().collect::<Vec<_>>().join(", ")
                    ),
                })
            }
        }
    }
}

/// Grid-tie inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridTieConfig {
    pub system_size_kw: f64,
    pub price_per_unit: f64,
    pub peak_sun_hours: f64,
    pub system_loss_factor_pct: f64,
}

impl Default for GridTieConfig {
    fn default() -> Self {
        Self {
            system_size_kw: 5.0,
            price_per_unit: 4.0,
            peak_sun_hours: 5.0,
            system_loss_factor_pct: 90.0,
        }
    }
}

impl GridTieConfig {
    pub fn to_parameters(&self) -> GridTieParameters {
        GridTieParameters {
            system_size_kw: self.system_size_kw,
            price_per_unit: self.price_per_unit,
            peak_sun_hours: self.peak_sun_hours,
            system_loss_factor: self.system_loss_factor_pct / 100.0,
        }
    }
}

/// Sprinkler zone inputs; same units as [`WaterSystemParameters`].
pub type WaterConfig = WaterSystemParameters;

/// How a load's rating is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadCategory {
    /// `power_w` in watts.
    #[default]
    General,
    /// `btu_per_hour`, converted with `heuristics.btu_per_watt`.
    AirConditioner,
}

/// One `[[loads]]` entry.
///
/// Usage is either `hours` (plus optional `minutes`) or
/// `day_hours`/`night_hours`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadConfig {
    pub name: String,
    #[serde(default)]
    pub category: LoadCategory,
    pub power_w: Option<f64>,
    pub btu_per_hour: Option<f64>,
    #[serde(default = "one")]
    pub quantity: u32,
    pub hours: Option<f64>,
    pub minutes: Option<f64>,
    pub day_hours: Option<f64>,
    pub night_hours: Option<f64>,
}

fn one() -> u32 {
    1
}

impl LoadConfig {
    /// Converts the entry into an engine load.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming `loads[index]` for the first problem found.
    pub fn to_entry(&self, index: usize, heuristics: &Heuristics) -> Result<LoadEntry, ConfigError> {
        let err = |field: &str, message: String| ConfigError {
            field: format!("loads[{index}].{field}"),
            message,
        };

        if self.quantity == 0 {
            return Err(err("quantity", "must be > 0".into()));
        }
        let usage = self.usage().map_err(|message| err("hours", message))?;

        match self.category {
            LoadCategory::General => {
                if self.btu_per_hour.is_some() {
                    return Err(err(
                        "btu_per_hour",
                        "only air_conditioner loads take btu_per_hour".into(),
                    ));
                }
                let power_w = self
                    .power_w
                    .ok_or_else(|| err("power_w", "is required for general loads".into()))?;
                if !is_positive(power_w) {
                    return Err(err("power_w", format!("must be > 0, got {power_w}")));
                }
                Ok(LoadEntry::new(&self.name, power_w, self.quantity, usage))
            }
            LoadCategory::AirConditioner => {
                if self.power_w.is_some() {
                    return Err(err(
                        "power_w",
                        "air_conditioner loads are rated with btu_per_hour".into(),
                    ));
                }
                let btu = self.btu_per_hour.ok_or_else(|| {
                    err("btu_per_hour", "is required for air_conditioner loads".into())
                })?;
                if !is_positive(btu) {
                    return Err(err("btu_per_hour", format!("must be > 0, got {btu}")));
                }
                Ok(LoadEntry::air_conditioner(
                    &self.name,
                    btu,
                    self.quantity,
                    usage,
                    heuristics.btu_per_watt,
                ))
            }
        }
    }

    fn usage(&self) -> Result<LoadUsage, String> {
        let split = self.day_hours.is_some() || self.night_hours.is_some();
        let clock = self.hours.is_some() || self.minutes.is_some();
        let usage = match (split, clock) {
            (true, true) => return Err("use either hours/minutes or day_hours/night_hours".into()),
            (false, false) => return Err("a running time is required".into()),
            (true, false) => {
                let day_hours = self.day_hours.unwrap_or(0.0);
                let night_hours = self.night_hours.unwrap_or(0.0);
                check_hours(day_hours)?;
                check_hours(night_hours)?;
                LoadUsage::DayNight {
                    day_hours,
                    night_hours,
                }
            }
            (false, true) => {
                let hours = self.hours.unwrap_or(0.0);
                let minutes = self.minutes.unwrap_or(0.0);
                check_hours(hours)?;
                if !(0.0..60.0).contains(&minutes) {
                    return Err(format!("minutes must be in [0, 60), got {minutes}"));
                }
                LoadUsage::from_clock(hours, minutes)
            }
        };

        let total = usage.total_hours();
        if total <= 0.0 {
            return Err("running time must be > 0".into());
        }
        if total > 24.0 {
            return Err(format!("running time must not exceed 24 h, got {total}"));
        }
        Ok(usage)
    }
}

fn check_hours(hours: f64) -> Result<(), String> {
    if (0.0..=24.0).contains(&hours) {
        Ok(())
    } else {
        Err(format!("hours must be in [0, 24], got {hours}"))
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"parameters.battery_voltage"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Why a design could not be sized.
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    /// The design file itself is inconsistent.
    #[error("{}", join_errors(.0))]
    Invalid(Vec<ConfigError>),
    /// The engine refused the inputs.
    #[error(transparent)]
    Sizing(#[from] SizingError),
}

impl From<ConfigError> for DesignError {
    fn from(err: ConfigError) -> Self {
        Self::Invalid(vec![err])
    }
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl DesignConfig {
    /// Simple off-grid cabin: two floodlights on a 24 V bank.
    pub fn off_grid_cabin() -> Self {
        Self {
            loads: vec![LoadConfig::hours("LED floodlight", 100.0, 2, 5.0)],
            ..Self::empty(SystemKind::OffGrid)
        }
    }

    /// Off-grid cabin whose loads are split into daytime and nighttime use.
    pub fn day_night_cabin() -> Self {
        Self {
            loads: vec![
                LoadConfig::day_night("Water pump", 500.0, 1, 2.0, 0.0),
                LoadConfig::day_night("LED lamp", 50.0, 4, 0.0, 5.0),
                LoadConfig::day_night("Refrigerator", 120.0, 1, 10.0, 14.0),
            ],
            ..Self::empty(SystemKind::OffGrid)
        }
    }

    /// Hybrid home on a 48 V bank with an air conditioner.
    pub fn hybrid_home() -> Self {
        let mut air_conditioner = LoadConfig::day_night("Air conditioner", 0.0, 1, 4.0, 6.0);
        air_conditioner.category = LoadCategory::AirConditioner;
        air_conditioner.power_w = None;
        air_conditioner.btu_per_hour = Some(12000.0);
        Self {
            parameters: ParametersConfig {
                battery_voltage: 48.0,
                ..ParametersConfig::default()
            },
            panel: PanelConfig {
                model: Some("550W".into()),
                ..PanelConfig::default()
            },
            loads: vec![
                air_conditioner,
                LoadConfig::day_night("Refrigerator", 150.0, 1, 12.0, 12.0),
                LoadConfig::day_night("LED lamp", 20.0, 10, 1.0, 5.0),
                LoadConfig::day_night("Television", 120.0, 1, 2.0, 3.0),
            ],
            ..Self::empty(SystemKind::Hybrid)
        }
    }

    /// 5 kW rooftop grid-tie system.
    pub fn grid_tie_5kw() -> Self {
        Self::empty(SystemKind::GridTie)
    }

    /// One sprinkler zone of four 480 L/h heads.
    pub fn sprinkler() -> Self {
        Self::empty(SystemKind::Water)
    }

    fn empty(system: SystemKind) -> Self {
        Self {
            system,
            parameters: ParametersConfig::default(),
            panel: PanelConfig::default(),
            grid_tie: GridTieConfig::default(),
            water: WaterConfig::default(),
            heuristics: Heuristics::default(),
            loads: Vec::new(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &[
        "off_grid_cabin",
        "day_night_cabin",
        "hybrid_home",
        "grid_tie_5kw",
        "sprinkler",
    ];

    /// Loads a design from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "off_grid_cabin" => Ok(Self::off_grid_cabin()),
            "day_night_cabin" => Ok(Self::day_night_cabin()),
            "hybrid_home" => Ok(Self::hybrid_home()),
            "grid_tie_5kw" => Ok(Self::grid_tie_5kw()),
            "sprinkler" => Ok(Self::sprinkler()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a design from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "design".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a design from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the design is valid. Engine-level rejections
    /// such as an empty load list are left to the sizer.
    pub fn validate(&self, catalog: &PanelCatalog) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.panel.resolve(catalog) {
            errors.push(e);
        }

        let h = &self.heuristics;
        if !is_positive(h.btu_per_watt) {
            errors.push(ConfigError {
                field: "heuristics.btu_per_watt".into(),
                message: "must be > 0".into(),
            });
        }
        if !h.friction_loss_per_10m.is_finite() || h.friction_loss_per_10m < 0.0 {
            errors.push(ConfigError {
                field: "heuristics.friction_loss_per_10m".into(),
                message: "must be >= 0".into(),
            });
        }

        match self.system {
            SystemKind::OffGrid | SystemKind::Hybrid => {
                let p = &self.parameters;
                for (field, pct) in [
                    ("parameters.depth_of_discharge_pct", p.depth_of_discharge_pct),
                    ("parameters.inverter_efficiency_pct", p.inverter_efficiency_pct),
                    ("parameters.system_loss_factor_pct", p.system_loss_factor_pct),
                ] {
                    check_percent(&mut errors, field, pct);
                }
                if ![12.0, 24.0, 48.0].contains(&p.battery_voltage) {
                    errors.push(ConfigError {
                        field: "parameters.battery_voltage".into(),
                        message: format!("must be 12, 24 or 48, got {}", p.battery_voltage),
                    });
                }
                if !is_positive(p.peak_sun_hours) {
                    errors.push(ConfigError {
                        field: "parameters.peak_sun_hours".into(),
                        message: "must be > 0".into(),
                    });
                }
                if !is_positive(p.autonomy_days) {
                    errors.push(ConfigError {
                        field: "parameters.autonomy_days".into(),
                        message: format!("must be > 0, got {}", p.autonomy_days),
                    });
                }
                for (i, load) in self.loads.iter().enumerate() {
                    if let Err(e) = load.to_entry(i, h) {
                        errors.push(e);
                    }
                }
            }
            SystemKind::GridTie => {
                let g = &self.grid_tie;
                check_percent(
                    &mut errors,
                    "grid_tie.system_loss_factor_pct",
                    g.system_loss_factor_pct,
                );
                if !is_positive(g.peak_sun_hours) {
                    errors.push(ConfigError {
                        field: "grid_tie.peak_sun_hours".into(),
                        message: "must be > 0".into(),
                    });
                }
            }
            SystemKind::Water => {}
        }

        errors
    }

    /// Engine load list built from `[[loads]]`.
    ///
    /// # Errors
    ///
    /// Returns the first load that cannot be converted.
    pub fn load_list(&self) -> Result<LoadList, ConfigError> {
        self.loads
            .iter()
            .enumerate()
            .map(|(i, load)| load.to_entry(i, &self.heuristics))
            .collect()
    }

    /// Validates the design and runs the sizer for its system type.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::Invalid`] when validation fails and
    /// [`DesignError::Sizing`] when the engine rejects the inputs.
    pub fn size(&self, catalog: &PanelCatalog) -> Result<SizingResult, DesignError> {
        let errors = self.validate(catalog);
        if !errors.is_empty() {
            return Err(DesignError::Invalid(errors));
        }
        let panel = self.panel.resolve(catalog)?;
        let loads = self.load_list()?;

        let result = if let Some(strategy) = strategy_for(self.system, &loads) {
            strategy
                .size(&loads, &self.parameters.to_system_parameters(), &panel)?
                .into()
        } else if self.system == SystemKind::GridTie {
            SizingResult::GridTie(size_grid_tie(&self.grid_tie.to_parameters(), &panel)?)
        } else {
            SizingResult::Water(size_water(&self.water, &panel, &self.heuristics)?)
        };
        Ok(result)
    }
}

fn check_percent(errors: &mut Vec<ConfigError>, field: &str, pct: f64) {
    if !(pct > 0.0 && pct <= 100.0) {
        errors.push(ConfigError {
            field: field.into(),
            message: format!("must be in (0, 100], got {pct}"),
        });
    }
}

impl LoadConfig {
    fn hours(name: &str, power_w: f64, quantity: u32, hours: f64) -> Self {
        Self {
            name: name.into(),
            category: LoadCategory::General,
            power_w: Some(power_w),
            btu_per_hour: None,
            quantity,
            hours: Some(hours),
            minutes: None,
            day_hours: None,
            night_hours: None,
        }
    }

    fn day_night(name: &str, power_w: f64, quantity: u32, day_hours: f64, night_hours: f64) -> Self {
        Self {
            hours: None,
            day_hours: Some(day_hours),
            night_hours: Some(night_hours),
            ..Self::hours(name, power_w, quantity, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PanelCatalog {
        PanelCatalog::builtin()
    }

    #[test]
    fn all_presets_are_valid() {
        for name in DesignConfig::PRESETS {
            let cfg = DesignConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg
                .as_ref()
                .map(|c| c.validate(&catalog()))
                .unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn all_presets_size() {
        for name in DesignConfig::PRESETS {
            let result = DesignConfig::from_preset(name)
                .map_err(DesignError::from)
                .and_then(|c| c.size(&catalog()));
            assert!(result.is_ok(), "preset \"{name}\" should size: {result:?}");
        }
    }

    #[test]
    fn from_preset_unknown() {
        let e = DesignConfig::from_preset("nonexistent").unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
system = "off-grid"

[parameters]
autonomy_days = 2
battery_voltage = 48
depth_of_discharge_pct = 50
inverter_efficiency_pct = 95
system_loss_factor_pct = 90
peak_sun_hours = 4.5

[panel]
model = "450W"

[heuristics]
btu_per_watt = 11.0

[[loads]]
name = "Lamp"
power_w = 20
quantity = 4
hours = 5
minutes = 30

[[loads]]
name = "Air Conditioner"
category = "air_conditioner"
btu_per_hour = 9000
hours = 8
"#;
        let cfg = DesignConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.system, SystemKind::OffGrid);
        assert!(cfg.validate(&catalog()).is_empty());

        let params = cfg.parameters.to_system_parameters();
        assert_eq!(params.depth_of_discharge, 0.5);
        assert_eq!(params.battery_voltage, 48.0);

        let loads = cfg.load_list().unwrap();
        assert_eq!(loads.len(), 2);
        assert_eq!(loads.entries()[0].usage, LoadUsage::Hours(5.5));
        assert_eq!(loads.entries()[1].name, "Air Conditioner (9000 BTU)");
        assert!((loads.entries()[1].rated_power_w - 9000.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
system = "water"

[water]
sprinkler_flow_lph = 480
bogus_field = true
"#;
        assert!(DesignConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn missing_system_is_rejected() {
        assert!(DesignConfig::from_toml_str("[panel]\nmodel = \"400W\"\n").is_err());
    }

    #[test]
    fn explicit_panel_ratings() {
        let toml = r#"
system = "grid-tie"

[panel]
wattage_w = 375
isc_a = 9.6
"#;
        let cfg = DesignConfig::from_toml_str(toml).unwrap();
        assert_eq!(
            cfg.panel.resolve(&catalog()),
            Ok(PanelSpec::new(375.0, 9.6))
        );
    }

    #[test]
    fn panel_model_and_ratings_conflict() {
        let panel = PanelConfig {
            model: Some("400W".into()),
            wattage_w: Some(400.0),
            isc_a: None,
        };
        assert_eq!(panel.resolve(&catalog()).unwrap_err().field, "panel");
    }

    #[test]
    fn unknown_panel_model() {
        let panel = PanelConfig {
            model: Some("999W".into()),
            ..PanelConfig::default()
        };
        let err = panel.resolve(&catalog()).unwrap_err();
        assert_eq!(err.field, "panel.model");
        assert!(err.message.contains("400W"));
    }

    #[test]
    fn validation_catches_bad_voltage_and_percent() {
        let mut cfg = DesignConfig::off_grid_cabin();
        cfg.parameters.battery_voltage = 36.0;
        cfg.parameters.depth_of_discharge_pct = 0.8;
        cfg.parameters.inverter_efficiency_pct = 120.0;
        let errors = cfg.validate(&catalog());
        assert!(errors.iter().any(|e| e.field == "parameters.battery_voltage"));
        assert!(
            errors
                .iter()
                .any(|e| e.field == "parameters.inverter_efficiency_pct")
        );
        // 0.8 % is small but legal
        assert!(
            !errors
                .iter()
                .any(|e| e.field == "parameters.depth_of_discharge_pct")
        );
    }

    #[test]
    fn validation_reports_load_index() {
        let mut cfg = DesignConfig::off_grid_cabin();
        cfg.loads.push(LoadConfig {
            quantity: 0,
            ..LoadConfig::hours("Broken", 10.0, 1, 1.0)
        });
        let errors = cfg.validate(&catalog());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "loads[1].quantity");
    }

    #[test]
    fn load_needs_exactly_one_usage_form() {
        let both = LoadConfig {
            day_hours: Some(2.0),
            ..LoadConfig::hours("Both", 10.0, 1, 1.0)
        };
        assert!(both.to_entry(0, &Heuristics::default()).is_err());

        let neither = LoadConfig {
            hours: None,
            ..LoadConfig::hours("Neither", 10.0, 1, 1.0)
        };
        assert!(neither.to_entry(0, &Heuristics::default()).is_err());
    }

    #[test]
    fn air_conditioner_needs_btu() {
        let ac = LoadConfig {
            category: LoadCategory::AirConditioner,
            ..LoadConfig::hours("AC", 1000.0, 1, 8.0)
        };
        let err = ac.to_entry(0, &Heuristics::default()).unwrap_err();
        assert_eq!(err.field, "loads[0].power_w");
    }

    #[test]
    fn empty_load_list_is_a_sizing_error() {
        let mut cfg = DesignConfig::off_grid_cabin();
        cfg.loads.clear();
        assert!(cfg.validate(&catalog()).is_empty());
        let err = cfg.size(&catalog()).unwrap_err();
        assert!(matches!(
            err,
            DesignError::Sizing(SizingError::ZeroLoadEnergy)
        ));
    }

    #[test]
    fn presets_pick_expected_strategies() {
        let day_night = DesignConfig::day_night_cabin().size(&catalog()).unwrap();
        assert_eq!(
            day_night.log().get("1.1").map(|s| s.title.as_str()),
            Some("Daytime load energy")
        );
        let hybrid = DesignConfig::hybrid_home().size(&catalog()).unwrap();
        assert_eq!(hybrid.kind(), SystemKind::Hybrid);
    }

    #[test]
    fn zero_running_time_is_rejected() {
        let kettle = LoadConfig {
            minutes: Some(0.0),
            ..LoadConfig::hours("Kettle", 2000.0, 1, 0.0)
        };
        let err = kettle.to_entry(1, &Heuristics::default()).unwrap_err();
        assert_eq!(err.field, "loads[1].hours");

        let idle = LoadConfig::day_night("Idle", 100.0, 1, 0.0, 0.0);
        assert!(idle.to_entry(0, &Heuristics::default()).is_err());

        let mut cfg = DesignConfig::off_grid_cabin();
        cfg.loads.push(kettle);
        let fields: Vec<_> = cfg.validate(&catalog()).into_iter().map(|e| e.field).collect();
        assert_eq!(fields, ["loads[1].hours"]);
    }

    #[test]
    fn minutes_add_to_hours() {
        let laptop = LoadConfig {
            minutes: Some(30.0),
            ..LoadConfig::hours("Laptop", 65.0, 1, 3.0)
        };
        let entry = laptop.to_entry(0, &Heuristics::default()).unwrap();
        assert_eq!(entry.usage, LoadUsage::Hours(3.5));
    }

    #[test]
    fn zero_autonomy_is_rejected() {
        let mut cfg = DesignConfig::off_grid_cabin();
        cfg.parameters.autonomy_days = 0.0;
        let errors = cfg.validate(&catalog());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "parameters.autonomy_days");
        assert!(matches!(cfg.size(&catalog()), Err(DesignError::Invalid(_))));
    }
}
