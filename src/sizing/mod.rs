//! Sizing engine: one entry point per system type, each returning its
//! recommendations together with the derivation log that produced them.

pub mod array;
pub mod diagram;
pub mod electronics;
pub mod grid_tie;
pub mod strategy;
pub mod types;
pub mod water;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use diagram::DiagramLabel;
pub use grid_tie::{GridTieSizing, size_grid_tie};
pub use strategy::{
    BatterySystemSizing, DayNightOffGridStrategy, HybridStrategy, OffGridStrategy,
    SizingStrategy, strategy_for,
};
pub use types::{
    GridTieParameters, Heuristics, PanelSpec, SizingError, SystemParameters,
    WaterSystemParameters,
};
pub use water::{WaterSizing, size_water};

use crate::derivation::DerivationLog;
use crate::loads::LoadList;

/// Kind of installation being sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemKind {
    OffGrid,
    Hybrid,
    GridTie,
    Water,
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OffGrid => "off-grid",
            Self::Hybrid => "hybrid",
            Self::GridTie => "grid-tie",
            Self::Water => "water",
        })
    }
}

/// Sizes an off-grid system, choosing the day/night model when every load
/// carries a split.
///
/// # Errors
///
/// See [`SizingStrategy::size`].
pub fn size_off_grid(
    loads: &LoadList,
    params: &SystemParameters,
    panel: &PanelSpec,
) -> Result<BatterySystemSizing, SizingError> {
    strategy::off_grid_strategy(loads).size(loads, params, panel)
}

/// Sizes a hybrid system.
///
/// # Errors
///
/// See [`SizingStrategy::size`].
pub fn size_hybrid(
    loads: &LoadList,
    params: &SystemParameters,
    panel: &PanelSpec,
) -> Result<BatterySystemSizing, SizingError> {
    HybridStrategy.size(loads, params, panel)
}

/// Outcome of a successful sizing run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "system", rename_all = "kebab-case")]
pub enum SizingResult {
    OffGrid(BatterySystemSizing),
    Hybrid(BatterySystemSizing),
    GridTie(GridTieSizing),
    Water(WaterSizing),
}

impl SizingResult {
    pub fn kind(&self) -> SystemKind {
        match self {
            Self::OffGrid(_) => SystemKind::OffGrid,
            Self::Hybrid(_) => SystemKind::Hybrid,
            Self::GridTie(_) => SystemKind::GridTie,
            Self::Water(_) => SystemKind::Water,
        }
    }

    pub fn log(&self) -> &DerivationLog {
        match self {
            Self::OffGrid(s) | Self::Hybrid(s) => &s.log,
            Self::GridTie(s) => &s.log,
            Self::Water(s) => &s.log,
        }
    }

    pub fn diagram_labels(&self) -> Vec<DiagramLabel> {
        match self {
            Self::OffGrid(s) | Self::Hybrid(s) => s.diagram_labels(),
            Self::GridTie(s) => s.diagram_labels(),
            Self::Water(s) => s.diagram_labels(),
        }
    }
}

impl From<BatterySystemSizing> for SizingResult {
    fn from(sizing: BatterySystemSizing) -> Self {
        match sizing.profile.kind {
            SystemKind::Hybrid => Self::Hybrid(sizing),
            _ => Self::OffGrid(sizing),
        }
    }
}

impl fmt::Display for SizingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffGrid(s) | Self::Hybrid(s) => {
                writeln!(f, "--- Sizing Summary ({}) ---", s.profile.name)?;
                writeln!(f, "Daily load energy:     {:.2} Wh", s.energy.daily_wh)?;
                writeln!(
                    f,
                    "Solar array:           {} x {}W ({:.0} Wp), {} string(s) of {}",
                    s.array.actual_panels,
                    s.panel.wattage_w,
                    s.array.actual_wp,
                    s.array.strings,
                    s.array.panels_per_string
                )?;
                writeln!(f, "Recommended inverter:  {} kW", s.inverter.recommended_kw)?;
                writeln!(
                    f,
                    "Battery bank:          {} x {}Ah @ {}V ({:.2} Ah required)",
                    s.battery.count, s.battery.unit_ah, s.battery.voltage, s.battery.capacity_ah
                )?;
                writeln!(
                    f,
                    "PV fuse / breaker:     {}A / {}A",
                    s.dc.pv_fuse.rating_a, s.dc.pv_breaker.rating_a
                )?;
                writeln!(f, "Battery breaker:       {}A", s.dc.battery_breaker.rating_a)?;
                write!(
                    f,
                    "AC breaker / cable:    {}A / {}",
                    s.ac.breaker.rating_a, s.ac.cable
                )
            }
            Self::GridTie(s) => {
                writeln!(f, "--- Sizing Summary (grid-tie) ---")?;
                writeln!(f, "Daily energy yield:    {:.2} kWh", s.economics.daily_kwh)?;
                writeln!(f, "Monthly savings:       {:.2}", s.economics.monthly_savings)?;
                writeln!(f, "Yearly savings:        {:.2}", s.economics.yearly_savings)?;
                writeln!(f, "Recommended inverter:  {} kW", s.inverter_kw)?;
                writeln!(
                    f,
                    "Solar array:           {} x {}W ({:.0} Wp)",
                    s.panels, s.panel.wattage_w, s.array_wp
                )?;
                writeln!(f, "String layout:         {}", s.layout)?;
                writeln!(f, "DC breaker:            {}A", s.dc_breaker.rating_a)?;
                write!(
                    f,
                    "AC breaker / cable:    {}A / {}",
                    s.ac.breaker.rating_a, s.ac.cable
                )
            }
            Self::Water(s) => {
                writeln!(f, "--- Sizing Summary (water) ---")?;
                writeln!(f, "Zone flow:             {:.2} m³/h", s.hydraulics.zone_flow_m3h)?;
                writeln!(f, "Total dynamic head:    {:.2} m", s.hydraulics.total_head_m)?;
                writeln!(f, "Recommended pump:      {}", s.pump.class)?;
                writeln!(
                    f,
                    "Pipes (main/sub/lat):  {} / {} / {}",
                    s.pipes.main, s.pipes.sub_main, s.pipes.lateral
                )?;
                write!(
                    f,
                    "Pump solar array:      {} x {}W ({:.0} Wp)",
                    s.panels, s.panel.wattage_w, s.array_wp
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{LoadEntry, LoadUsage};

    fn lamp_loads() -> LoadList {
        [LoadEntry::new("Lamp", 100.0, 2, LoadUsage::Hours(5.0))]
            .into_iter()
            .collect()
    }

    #[test]
    fn battery_sizing_maps_to_its_kind() {
        let panel = PanelSpec::new(400.0, 10.0);
        let params = SystemParameters::default();
        let off_grid: SizingResult = size_off_grid(&lamp_loads(), &params, &panel).unwrap().into();
        let hybrid: SizingResult = size_hybrid(&lamp_loads(), &params, &panel).unwrap().into();
        assert_eq!(off_grid.kind(), SystemKind::OffGrid);
        assert_eq!(hybrid.kind(), SystemKind::Hybrid);
    }

    #[test]
    fn summary_names_recommended_inverter() {
        let result: SizingResult = size_off_grid(
            &lamp_loads(),
            &SystemParameters::default(),
            &PanelSpec::new(400.0, 10.0),
        )
        .unwrap()
        .into();
        let summary = result.to_string();
        assert!(summary.contains("Recommended inverter:  0.3 kW"));
        assert!(summary.contains("Battery bank:          1 x 100Ah @ 24V"));
    }

    #[test]
    fn system_kind_serde_names() {
        assert_eq!(
            serde_json::to_string(&SystemKind::GridTie).unwrap(),
            "\"grid-tie\""
        );
        assert_eq!(SystemKind::OffGrid.to_string(), "off-grid");
    }

    #[test]
    fn result_json_is_tagged_by_system() {
        let result = SizingResult::GridTie(
            size_grid_tie(&GridTieParameters::default(), &PanelSpec::new(400.0, 10.0)).unwrap(),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["system"], "grid-tie");
        assert_eq!(json["panels"], 13);
    }
}
