//! Sprinkler pumping: zone hydraulics, pump class, pipe diameters and the
//! pump's own PV array.

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::array;
use super::types::{Heuristics, PanelSpec, SizingError, WaterSystemParameters};
use crate::derivation::DerivationLog;
use crate::standards::{self, KW_PER_HP, PUMP_EFFICIENCY, PipeSize, PumpSizing};

/// Metres of water column per bar.
pub const METERS_HEAD_PER_BAR: f64 = 10.2;

/// Electrical watts drawn per nameplate horsepower.
pub const WATTS_PER_HP: f64 = 746.0;

/// PV oversizing for a directly driven pump.
pub const PUMP_ARRAY_FACTOR: f64 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hydraulics {
    /// Flow of one zone (m³/h).
    pub zone_flow_m3h: f64,
    pub pressure_head_m: f64,
    pub friction_head_m: f64,
    /// Static + pressure + friction head (m).
    pub total_head_m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipeSelection {
    pub main: PipeSize,
    pub sub_main: PipeSize,
    pub lateral: PipeSize,
}

/// Complete recommendation for a sprinkler zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterSizing {
    pub params: WaterSystemParameters,
    pub panel: PanelSpec,
    pub hydraulics: Hydraulics,
    pub pump: PumpSizing,
    pub pipes: PipeSelection,
    /// Electrical load of the pump (W).
    pub pump_load_w: f64,
    pub required_pv_wp: f64,
    pub panels: u32,
    pub array_wp: f64,
    pub log: DerivationLog,
}

/// Sizes the pump, pipes and PV array for one sprinkler zone.
///
/// # Errors
///
/// Returns [`SizingError::InvalidWaterParameters`] or
/// [`SizingError::InvalidPanelSelection`]; no log is produced in that case.
#[instrument(skip_all)]
pub fn size_water(
    params: &WaterSystemParameters,
    panel: &PanelSpec,
    heuristics: &Heuristics,
) -> Result<WaterSizing, SizingError> {
    params.validate()?;
    panel.validate()?;
    if !heuristics.friction_loss_per_10m.is_finite() || heuristics.friction_loss_per_10m < 0.0 {
        return Err(SizingError::InvalidWaterParameters {
            field: "friction_loss_per_10m",
            reason: format!(
                "must be a non-negative number, got {}",
                heuristics.friction_loss_per_10m
            ),
        });
    }

    let sprinkler_m3h = params.sprinkler_flow_lph / 1000.0;
    let zone_flow_m3h = sprinkler_m3h * f64::from(params.sprinklers_per_zone);
    let pressure_head_m = params.sprinkler_pressure_bar * METERS_HEAD_PER_BAR;
    let friction_head_m = params.pipe_length_m / 10.0 * heuristics.friction_loss_per_10m;
    let hydraulics = Hydraulics {
        zone_flow_m3h,
        pressure_head_m,
        friction_head_m,
        total_head_m: params.static_head_m + pressure_head_m + friction_head_m,
    };
    debug!(zone_flow_m3h, total_head_m = hydraulics.total_head_m, "duty point");

    let pump = standards::pump_size(zone_flow_m3h, hydraulics.total_head_m);
    let pipes = PipeSelection {
        main: standards::pipe_size(zone_flow_m3h),
        sub_main: standards::pipe_size(zone_flow_m3h / 2.0),
        lateral: standards::pipe_size(sprinkler_m3h * 2.0),
    };
    let pump_load_w = pump.nameplate_hp() * WATTS_PER_HP;
    let required_pv_wp = pump_load_w * PUMP_ARRAY_FACTOR;
    let panels = array::ceil_count(required_pv_wp / panel.wattage_w);

    let mut sizing = WaterSizing {
        params: *params,
        panel: *panel,
        hydraulics,
        pump,
        pipes,
        pump_load_w,
        required_pv_wp,
        panels,
        array_wp: f64::from(panels) * panel.wattage_w,
        log: DerivationLog::new(),
    };
    sizing.log = derivation_log(&sizing, heuristics);

    info!(pump = %pump.class, panels, "water system sized");
    Ok(sizing)
}

fn derivation_log(s: &WaterSizing, heuristics: &Heuristics) -> DerivationLog {
    let p = &s.params;
    let h = &s.hydraulics;
    let mut log = DerivationLog::new();

    log.section("Hydraulics");
    log.step("Zone flow", "Sprinkler flow × Sprinklers per zone / 1000")
        .substitution(format!(
            "{}L/h × {} / 1000",
            p.sprinkler_flow_lph, p.sprinklers_per_zone
        ))
        .unit("m³/h")
        .result(format!("{:.2}", h.zone_flow_m3h));
    log.step("Pressure head", format!("Pressure (bar) × {METERS_HEAD_PER_BAR}"))
        .substitution(format!(
            "{}bar × {METERS_HEAD_PER_BAR}",
            p.sprinkler_pressure_bar
        ))
        .unit("m")
        .result(format!("{:.2}", h.pressure_head_m));
    log.step(
        "Friction loss",
        format!(
            "(Pipe length / 10) × {}",
            heuristics.friction_loss_per_10m
        ),
    )
    .substitution(format!(
        "({}m / 10) × {}",
        p.pipe_length_m, heuristics.friction_loss_per_10m
    ))
    .unit("m")
    .result(format!("{:.2}", h.friction_head_m));
    log.step("Total dynamic head", "Static head + Pressure head + Friction loss")
        .substitution(format!(
            "{} + {:.2} + {:.2}",
            p.static_head_m, h.pressure_head_m, h.friction_head_m
        ))
        .unit("m")
        .result(format!("{:.2}", h.total_head_m));

    log.section("Pump");
    log.step("Hydraulic power", "Flow × Head × 9.81 / 3600")
        .substitution(format!(
            "{:.2} × {:.2} × 9.81 / 3600",
            h.zone_flow_m3h, h.total_head_m
        ))
        .unit("kW")
        .result(format!("{:.3}", s.pump.hydraulic_kw));
    log.step("Shaft power", format!("Hydraulic power / {PUMP_EFFICIENCY}"))
        .substitution(format!("{:.3} / {PUMP_EFFICIENCY}", s.pump.hydraulic_kw))
        .unit("kW")
        .result(format!("{:.3}", s.pump.shaft_kw));
    log.step("Pump size", format!("Shaft power / {KW_PER_HP}, next pump class"))
        .substitution(format!(
            "{:.3} / {KW_PER_HP} = {:.2} HP",
            s.pump.shaft_kw, s.pump.computed_hp
        ))
        .result(format!("recommended {} pump", s.pump.class));

    log.section("Pipes");
    log.step("Main pipe", "Selected by zone flow")
        .substitution(format!("{:.2} m³/h", h.zone_flow_m3h))
        .result(format!("recommended {}", s.pipes.main));
    log.step("Sub-main pipe", "Selected by half the zone flow")
        .substitution(format!("{:.2} m³/h", h.zone_flow_m3h / 2.0))
        .result(format!("recommended {}", s.pipes.sub_main));
    log.step("Lateral pipe", "Selected by two sprinklers' flow")
        .substitution(format!("{:.2} m³/h", p.sprinkler_flow_lph / 1000.0 * 2.0))
        .result(format!("recommended {}", s.pipes.lateral));

    log.section("Pump solar array");
    log.step("Pump load", format!("Pump HP × {WATTS_PER_HP}"))
        .substitution(format!("{} HP × {WATTS_PER_HP}", s.pump.nameplate_hp()))
        .unit("W")
        .result(format!("{:.0}", s.pump_load_w));
    log.step("Required PV", format!("Pump load × {PUMP_ARRAY_FACTOR}"))
        .substitution(format!("{:.0}W × {PUMP_ARRAY_FACTOR}", s.pump_load_w))
        .unit("Wp")
        .result(format!("{:.1}", s.required_pv_wp));
    log.step("Panels", "Required PV / Panel wattage, rounded up")
        .substitution(format!("{:.1}Wp / {}W", s.required_pv_wp, s.panel.wattage_w))
        .result(format!(
            "{} × {}W panels ({:.0} Wp)",
            s.panels, s.panel.wattage_w, s.array_wp
        ));

    log
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::standards::PumpClass;

    fn sprinkler_zone() -> WaterSystemParameters {
        WaterSystemParameters {
            sprinkler_flow_lph: 480.0,
            sprinklers_per_zone: 4,
            sprinkler_pressure_bar: 2.0,
            static_head_m: 5.0,
            pipe_length_m: 50.0,
        }
    }

    #[test]
    fn sprinkler_zone_duty_point() {
        let s = size_water(
            &sprinkler_zone(),
            &PanelSpec::new(400.0, 10.0),
            &Heuristics::default(),
        )
        .unwrap();
        let h = s.hydraulics;
        assert_relative_eq!(h.zone_flow_m3h, 1.92, epsilon = 1e-9);
        assert_relative_eq!(h.pressure_head_m, 20.4, epsilon = 1e-9);
        assert_relative_eq!(h.friction_head_m, 7.5, epsilon = 1e-9);
        assert_relative_eq!(h.total_head_m, 32.9, epsilon = 1e-9);
        assert_eq!(s.pump.class, PumpClass::HalfHp);
        assert_eq!(s.pipes.main, PipeSize::One);
        assert_eq!(s.pipes.sub_main, PipeSize::ThreeQuarter);
        assert_eq!(s.pipes.lateral, PipeSize::ThreeQuarter);
    }

    #[test]
    fn pump_array_follows_nameplate() {
        let s = size_water(
            &sprinkler_zone(),
            &PanelSpec::new(400.0, 10.0),
            &Heuristics::default(),
        )
        .unwrap();
        assert_relative_eq!(s.pump_load_w, 373.0);
        assert_relative_eq!(s.required_pv_wp, 484.9, epsilon = 1e-9);
        assert_eq!(s.panels, 2);
        assert_eq!(s.log.get("2.3").unwrap().result, "recommended 0.5 HP pump");
        assert_eq!(s.log.get("1.4").unwrap().result_with_unit(), "32.90 m");
        assert_eq!(s.log.len(), 13);
    }

    #[test]
    fn friction_heuristic_is_configurable() {
        let heuristics = Heuristics {
            friction_loss_per_10m: 3.0,
            ..Heuristics::default()
        };
        let s = size_water(&sprinkler_zone(), &PanelSpec::new(400.0, 10.0), &heuristics).unwrap();
        assert_relative_eq!(s.hydraulics.friction_head_m, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_sprinklers_rejected_without_log() {
        let params = WaterSystemParameters {
            sprinklers_per_zone: 0,
            ..sprinkler_zone()
        };
        let err = size_water(&params, &PanelSpec::new(400.0, 10.0), &Heuristics::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SizingError::InvalidWaterParameters {
                field: "sprinklers_per_zone",
                ..
            }
        ));
    }

    #[test]
    fn large_zone_needs_bigger_pump_and_pipe() {
        let params = WaterSystemParameters {
            sprinkler_flow_lph: 2000.0,
            sprinklers_per_zone: 10,
            sprinkler_pressure_bar: 3.0,
            static_head_m: 20.0,
            pipe_length_m: 200.0,
        };
        let s = size_water(&params, &PanelSpec::new(550.0, 13.9), &Heuristics::default()).unwrap();
        assert_eq!(s.pump.class, PumpClass::LargerThanThreeHp);
        assert_eq!(s.pipes.main, PipeSize::Three);
        assert_relative_eq!(s.pump_load_w, s.pump.computed_hp.ceil() * WATTS_PER_HP);
    }
}
