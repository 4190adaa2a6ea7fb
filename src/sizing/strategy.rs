//! Battery-backed sizing: simple off-grid, day/night off-grid and hybrid.
//!
//! The three variants share one pipeline and differ only in their
//! [`Profile`]: how PV energy is derived from the loads, which battery
//! formula applies, how the inverter is rounded and which AC breaker
//! ladder protects its output.

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::SystemKind;
use super::array::{self, ArrayLayout};
use super::electronics::{
    self, AC_SURGE_RATING, AcProtection, BATTERY_CHARGING_EFFICIENCY, BatteryBank, BatteryFormula,
    DcProtection, InverterRounding, InverterSizing, PV_FUSE_FACTOR,
};
use super::types::{PanelSpec, SizingError, SystemParameters};
use crate::derivation::DerivationLog;
use crate::loads::LoadList;
use crate::standards::{GRID_AC_BREAKER_LADDER_A, OFF_GRID_AC_BREAKER_LADDER_A};

/// How the PV energy requirement is derived from the load list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnergyModel {
    /// All energy passes through the inverter once.
    Combined,
    /// Nighttime energy is first charged into the battery.
    DayNight,
}

/// Fixed choices that distinguish one battery-backed variant from another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub kind: SystemKind,
    pub energy_model: EnergyModel,
    pub battery_formula: BatteryFormula,
    pub inverter_rounding: InverterRounding,
    pub ac_breaker_ladder: &'static [f64],
}

/// Load energy figures feeding the array and battery sizers (Wh/day).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyBudget {
    pub daily_wh: f64,
    pub daytime_wh: f64,
    pub nighttime_wh: f64,
    /// Energy the array must deliver per day.
    pub pv_required_wh: f64,
}

/// Complete recommendation for an off-grid or hybrid system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatterySystemSizing {
    pub profile: Profile,
    pub panel: PanelSpec,
    pub energy: EnergyBudget,
    pub array: ArrayLayout,
    pub inverter: InverterSizing,
    pub battery: BatteryBank,
    pub dc: DcProtection,
    pub ac: AcProtection,
    pub log: DerivationLog,
}

/// A battery-backed sizing variant.
pub trait SizingStrategy {
    fn profile(&self) -> Profile;

    fn name(&self) -> &'static str {
        self.profile().name
    }

    /// Sizes the system for `loads`.
    ///
    /// # Errors
    ///
    /// Returns a [`SizingError`] when the load list, the panel or the
    /// parameters cannot be sized, checked in that order; no log is
    /// produced in that case.
    fn size(
        &self,
        loads: &LoadList,
        params: &SystemParameters,
        panel: &PanelSpec,
    ) -> Result<BatterySystemSizing, SizingError> {
        size_battery_backed(self.profile(), loads, params, panel)
    }
}

/// Off-grid system with a single daily duration per load.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffGridStrategy;

impl SizingStrategy for OffGridStrategy {
    fn profile(&self) -> Profile {
        Profile {
            name: "off-grid",
            kind: SystemKind::OffGrid,
            energy_model: EnergyModel::Combined,
            battery_formula: BatteryFormula::IncludingInverterLoss,
            inverter_rounding: InverterRounding::TenthKilowatt,
            ac_breaker_ladder: OFF_GRID_AC_BREAKER_LADDER_A,
        }
    }
}

/// Off-grid system whose loads are split into daytime and nighttime hours.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayNightOffGridStrategy;

impl SizingStrategy for DayNightOffGridStrategy {
    fn profile(&self) -> Profile {
        Profile {
            name: "off-grid (day/night)",
            kind: SystemKind::OffGrid,
            energy_model: EnergyModel::DayNight,
            battery_formula: BatteryFormula::BackupOnly,
            inverter_rounding: InverterRounding::TenthKilowatt,
            ac_breaker_ladder: OFF_GRID_AC_BREAKER_LADDER_A,
        }
    }
}

/// Grid-connected system with battery backup and a class-rated hybrid inverter.
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridStrategy;

impl SizingStrategy for HybridStrategy {
    fn profile(&self) -> Profile {
        Profile {
            name: "hybrid",
            kind: SystemKind::Hybrid,
            energy_model: EnergyModel::DayNight,
            battery_formula: BatteryFormula::BackupOnly,
            inverter_rounding: InverterRounding::HybridClass,
            ac_breaker_ladder: GRID_AC_BREAKER_LADDER_A,
        }
    }
}

/// Picks the battery-backed variant for a system type.
///
/// Off-grid uses the day/night model only when every load carries a split.
/// Returns `None` for system types without a battery bank.
pub fn strategy_for(kind: SystemKind, loads: &LoadList) -> Option<Box<dyn SizingStrategy>> {
    match kind {
        SystemKind::OffGrid => Some(off_grid_strategy(loads)),
        SystemKind::Hybrid => Some(Box::new(HybridStrategy)),
        SystemKind::GridTie | SystemKind::Water => None,
    }
}

/// Off-grid variant for `loads`: day/night only when every load is split.
pub fn off_grid_strategy(loads: &LoadList) -> Box<dyn SizingStrategy> {
    if loads.has_day_night_split() {
        Box::new(DayNightOffGridStrategy)
    } else {
        Box::new(OffGridStrategy)
    }
}

/// Runs the shared battery-backed pipeline for `profile`.
///
/// # Errors
///
/// See [`SizingStrategy::size`].
#[instrument(skip_all, fields(strategy = profile.name))]
pub fn size_battery_backed(
    profile: Profile,
    loads: &LoadList,
    params: &SystemParameters,
    panel: &PanelSpec,
) -> Result<BatterySystemSizing, SizingError> {
    let daily_wh = loads.total_daily_energy_wh();
    if !daily_wh.is_finite() || daily_wh <= 0.0 {
        return Err(SizingError::ZeroLoadEnergy);
    }
    panel.validate()?;
    params.validate()?;

    let daytime_wh = loads.total_daytime_energy_wh();
    let nighttime_wh = loads.total_nighttime_energy_wh();
    let pv_required_wh = match profile.energy_model {
        EnergyModel::Combined => {
            daily_wh / params.inverter_efficiency / params.system_loss_factor
        }
        EnergyModel::DayNight => {
            (daytime_wh + nighttime_wh / BATTERY_CHARGING_EFFICIENCY)
                / params.inverter_efficiency
                / params.system_loss_factor
        }
    };
    let energy = EnergyBudget {
        daily_wh,
        daytime_wh,
        nighttime_wh,
        pv_required_wh,
    };
    debug!(daily_wh, daytime_wh, nighttime_wh, pv_required_wh, "energy budget");

    let controller_v = array::controller_max_voltage(params.battery_voltage);
    let layout = array::size_array(
        pv_required_wh,
        params.peak_sun_hours,
        panel.wattage_w,
        controller_v,
    );
    let inverter =
        electronics::size_inverter(loads.peak_instantaneous_load_w(), profile.inverter_rounding);
    let battery = electronics::size_battery_bank(daily_wh, params, profile.battery_formula);
    let dc = electronics::size_dc_protection(
        panel.isc_a,
        layout.actual_wp,
        inverter.recommended_w(),
        params.battery_voltage,
        controller_v,
    );
    let ac = electronics::size_ac_protection(inverter.recommended_w(), profile.ac_breaker_ladder);

    let mut sizing = BatterySystemSizing {
        profile,
        panel: *panel,
        energy,
        array: layout,
        inverter,
        battery,
        dc,
        ac,
        log: DerivationLog::new(),
    };
    sizing.log = derivation_log(&sizing, params);

    info!(
        panels = layout.actual_panels,
        array_wp = layout.actual_wp,
        inverter_kw = inverter.recommended_kw,
        batteries = battery.count,
        "battery-backed system sized"
    );
    Ok(sizing)
}

fn derivation_log(s: &BatterySystemSizing, params: &SystemParameters) -> DerivationLog {
    let mut log = DerivationLog::new();
    let e = &s.energy;
    let eff = params.inverter_efficiency;
    let loss = params.system_loss_factor;
    let v = params.battery_voltage;
    let inverter_w = s.inverter.recommended_w();

    log.section("System sizing");
    match s.profile.energy_model {
        EnergyModel::Combined => {
            log.step("PV energy required", "(Load energy / Inverter eff.) / Loss factor")
                .substitution(format!("({:.2} / {eff}) / {loss}", e.daily_wh))
                .unit("Wh/day")
                .result(format!("{:.2}", e.pv_required_wh));
        }
        EnergyModel::DayNight => {
            log.step("Daytime load energy", "Σ(Power × Quantity × Daytime hours)")
                .unit("Wh/day")
                .result(format!("{:.2}", e.daytime_wh));
            log.step("Nighttime load energy", "Σ(Power × Quantity × Nighttime hours)")
                .unit("Wh/day")
                .result(format!("{:.2}", e.nighttime_wh));
            log.step(
                "PV energy required",
                "(Daytime energy + Nighttime energy / Charging eff.) / Inverter eff. / Loss factor",
            )
            .substitution(format!(
                "({:.2} + {:.2} / {BATTERY_CHARGING_EFFICIENCY}) / {eff} / {loss}",
                e.daytime_wh, e.nighttime_wh
            ))
            .unit("Wh/day")
            .result(format!("{:.2}", e.pv_required_wh));
        }
    }
    log.step("Array size (theoretical)", "PV energy / Peak sun hours")
        .substitution(format!(
            "{:.2}Wh / {}h",
            e.pv_required_wh, params.peak_sun_hours
        ))
        .unit("Wp")
        .result(format!("{:.2}", s.array.theoretical_wp));
    log.step(
        "Panel layout",
        format!(
            "Whole series strings of at most {}V",
            s.array.max_input_voltage
        ),
    )
    .substitution(format!(
        "From {:.2}Wp arranged into {} panels",
        s.array.theoretical_wp, s.array.actual_panels
    ))
    .result(format!(
        "{} panels per series string, {} string(s)",
        s.array.panels_per_string, s.array.strings
    ));
    log.step("Array size (installed)", "Installed panels × Panel wattage")
        .substitution(format!(
            "{} × {}W",
            s.array.actual_panels, s.panel.wattage_w
        ))
        .unit("Wp")
        .result(format!("{:.0}", s.array.actual_wp));
    let inverter_formula = match s.profile.inverter_rounding {
        InverterRounding::TenthKilowatt => "Peak load × 1.25",
        InverterRounding::HybridClass => "Peak load × 1.25, next hybrid inverter class",
    };
    log.step("Inverter size", inverter_formula)
        .substitution(format!("{:.2}W × 1.25", s.inverter.peak_load_w))
        .result(format!(
            "{:.2} W (recommended {}kW)",
            s.inverter.required_w, s.inverter.recommended_kw
        ));
    let (battery_formula, battery_substitution) = match s.profile.battery_formula {
        BatteryFormula::IncludingInverterLoss => (
            "(Load energy × Autonomy days) / (V × DoD × Inverter eff.)",
            format!(
                "({:.2} × {}) / ({v} × {} × {eff})",
                e.daily_wh, params.autonomy_days, params.depth_of_discharge
            ),
        ),
        BatteryFormula::BackupOnly => (
            "(Load energy × Autonomy days) / (V × DoD)",
            format!(
                "({:.2} × {}) / ({v} × {})",
                e.daily_wh, params.autonomy_days, params.depth_of_discharge
            ),
        ),
    };
    log.step("Battery size", battery_formula)
        .substitution(battery_substitution)
        .result(format!(
            "{:.2} Ah (recommended {} × {}Ah {v}V)",
            s.battery.capacity_ah, s.battery.count, s.battery.unit_ah
        ));

    log.section("DC protection");
    log.step("PV string fuse", format!("Isc × {PV_FUSE_FACTOR}"))
        .substitution(format!("{:.2}A × {PV_FUSE_FACTOR}", s.panel.isc_a))
        .result(format!(
            "recommended {}A (overcurrent protection for each PV string)",
            s.dc.pv_fuse.rating_a
        ));
    log.step(
        "PV1-F cable size",
        format!("Ampacity above {:.2} A", s.dc.pv_fuse.current_a),
    )
    .result(format!("recommended {} (UV and weather resistant PV cable)", s.dc.pv_cable));
    log.step("DC surge (PV)", "Above the controller input voltage")
        .result(format!(
            "recommended > {}Vdc (surge protection on the array side)",
            s.dc.surge_above_v
        ));
    log.step("DC breaker (PV to controller)", "(Installed Wp / System V) × 1.25")
        .substitution(format!("({:.2}W / {v}V) × 1.25", s.array.actual_wp))
        .result(format!(
            "{:.2} A (recommended {}A array breaker)",
            s.dc.pv_breaker.current_a, s.dc.pv_breaker.rating_a
        ));
    log.step(
        "Main DC breaker (battery to inverter)",
        "(Inverter W / System V) × 1.25",
    )
    .substitution(format!("({inverter_w}W / {v}V) × 1.25"))
    .result(format!(
        "{:.2} A (recommended {}A battery breaker)",
        s.dc.battery_breaker.current_a, s.dc.battery_breaker.rating_a
    ));

    log.section("AC protection");
    log.step("AC fuse (output)", "Equal to the AC breaker rating")
        .result(format!("recommended {}A (AC load fuse)", s.ac.fuse_a));
    log.step("AC surge (output)", "Selected by mains voltage")
        .result(format!("recommended {AC_SURGE_RATING} (surge protection on the AC side)"));
    log.step("AC breaker (output)", "(Inverter W / 230V) × 1.25")
        .substitution(format!("({inverter_w}W / 230V) × 1.25"))
        .result(format!(
            "{:.2} A (recommended {}A output breaker)",
            s.ac.breaker.current_a, s.ac.breaker.rating_a
        ));
    log.step("AC cable size", "Selected by AC breaker rating")
        .result(format!("recommended {} (VAF/THW cable for AC loads)", s.ac.cable));

    log
}
