//! Grid-tied system: energy yield, savings and equipment for a chosen size.

use std::fmt;

use serde::Serialize;
use tracing::{info, instrument};

use super::array::{self, GRID_TIE_INVERTER_MAX_V};
use super::electronics::{
    self, AC_SURGE_RATING, AcProtection, PV_FUSE_FACTOR, Rated, SAFETY_FACTOR,
};
use super::types::{GridTieParameters, PanelSpec, SizingError};
use crate::derivation::DerivationLog;
use crate::standards::{self, CableSize, GRID_AC_BREAKER_LADDER_A, GRID_TIE_DC_BREAKER_LADDER_A};

/// Days per billing month.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// DC surge protector rating on the grid-tie array side (V).
pub const GRID_TIE_DC_SURGE_V: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridTieEconomics {
    pub daily_kwh: f64,
    pub monthly_kwh: f64,
    pub monthly_savings: f64,
    pub yearly_savings: f64,
}

impl GridTieEconomics {
    pub fn compute(params: &GridTieParameters) -> Self {
        let daily_kwh = params.system_size_kw * params.peak_sun_hours * params.system_loss_factor;
        let monthly_kwh = daily_kwh * DAYS_PER_MONTH;
        let monthly_savings = monthly_kwh * params.price_per_unit;
        Self {
            daily_kwh,
            monthly_kwh,
            monthly_savings,
            yearly_savings: monthly_savings * 12.0,
        }
    }
}

/// How the grid-tie panels are strung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StringLayout {
    /// Every panel in one series string.
    Single { panels: u32 },
    /// Several strings of the maximum series length; the last may be short.
    Multiple { panels_per_string: u32, strings: u32 },
}

impl StringLayout {
    fn for_panels(panels: u32, max_in_series: u32) -> Self {
        if panels <= max_in_series {
            Self::Single { panels }
        } else {
            Self::Multiple {
                panels_per_string: max_in_series,
                strings: panels.div_ceil(max_in_series),
            }
        }
    }

    pub fn strings(self) -> u32 {
        match self {
            Self::Single { .. } => 1,
            Self::Multiple { strings, .. } => strings,
        }
    }
}

impl fmt::Display for StringLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single { panels } => write!(f, "{panels} panels in series, 1 string"),
            Self::Multiple {
                panels_per_string,
                strings,
            } => write!(
                f,
                "{panels_per_string} panels per series string, {strings} strings \
                 (panel count may need adjusting to divide evenly)"
            ),
        }
    }
}

/// Complete recommendation for a grid-tied system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridTieSizing {
    pub params: GridTieParameters,
    pub panel: PanelSpec,
    pub economics: GridTieEconomics,
    /// Inverter size, equal to the selected system size (kW).
    pub inverter_kw: f64,
    pub panels: u32,
    pub array_wp: f64,
    pub layout: StringLayout,
    pub pv_fuse: Rated,
    pub pv_cable: CableSize,
    pub dc_surge_v: f64,
    pub dc_breaker: Rated,
    pub ac: AcProtection,
    pub log: DerivationLog,
}

/// Sizes a grid-tied system of the selected size.
///
/// The panel count covers the inverter rating without rounding up to whole
/// strings.
///
/// # Errors
///
/// Returns [`SizingError::InvalidPanelSelection`] or
/// [`SizingError::InvalidEconomicInput`]; no log is produced in that case.
#[instrument(skip_all, fields(size_kw = params.system_size_kw))]
pub fn size_grid_tie(
    params: &GridTieParameters,
    panel: &PanelSpec,
) -> Result<GridTieSizing, SizingError> {
    panel.validate()?;
    params.validate()?;

    let economics = GridTieEconomics::compute(params);
    let inverter_w = params.system_size_kw * 1000.0;
    let panels = array::ceil_count(inverter_w / panel.wattage_w);
    let layout = StringLayout::for_panels(
        panels,
        array::max_panels_in_series(GRID_TIE_INVERTER_MAX_V),
    );
    let pv_fuse = electronics::pv_string_fuse(panel.isc_a);
    let dc_current = panel.isc_a * f64::from(layout.strings()) * SAFETY_FACTOR;

    let mut sizing = GridTieSizing {
        params: *params,
        panel: *panel,
        economics,
        inverter_kw: params.system_size_kw,
        panels,
        array_wp: f64::from(panels) * panel.wattage_w,
        layout,
        pv_fuse,
        pv_cable: standards::pv_cable_size(pv_fuse.current_a),
        dc_surge_v: GRID_TIE_DC_SURGE_V,
        dc_breaker: Rated {
            current_a: dc_current,
            rating_a: standards::round_up_to_standard(dc_current, GRID_TIE_DC_BREAKER_LADDER_A),
        },
        ac: electronics::size_ac_protection(inverter_w, GRID_AC_BREAKER_LADDER_A),
        log: DerivationLog::new(),
    };
    sizing.log = derivation_log(&sizing);

    info!(
        panels,
        yearly_savings = economics.yearly_savings,
        "grid-tie system sized"
    );
    Ok(sizing)
}

fn derivation_log(s: &GridTieSizing) -> DerivationLog {
    let p = &s.params;
    let e = &s.economics;
    let inverter_w = s.inverter_kw * 1000.0;
    let mut log = DerivationLog::new();

    log.section("Energy savings");
    log.step("Daily energy yield", "System size (kW) × PSH × Loss factor")
        .substitution(format!(
            "{}kW × {} × {}",
            p.system_size_kw, p.peak_sun_hours, p.system_loss_factor
        ))
        .unit("kWh/day")
        .result(format!("{:.2}", e.daily_kwh));
    log.step("Monthly savings", "Monthly energy × Price per unit")
        .substitution(format!("{:.2}kWh × {}", e.monthly_kwh, p.price_per_unit))
        .highlight()
        .result(format!("{:.2} per month", e.monthly_savings));
    log.step("Yearly savings", "Monthly savings × 12")
        .substitution(format!("{:.2} × 12", e.monthly_savings))
        .highlight()
        .result(format!("{:.2} per year", e.yearly_savings));

    log.section(format!("Equipment for a {} kW system", s.inverter_kw));
    log.step("Grid-tie inverter size", "Selected by system size")
        .result(format!("recommended {}kW", s.inverter_kw));
    log.step("Solar array size", "Inverter W / Panel W")
        .substitution(format!("{inverter_w}W / {}W", s.panel.wattage_w))
        .result(format!("{:.0} Wp ({} panels installed)", s.array_wp, s.panels));
    log.step(
        "Panel layout",
        format!("Series strings of at most {GRID_TIE_INVERTER_MAX_V}V"),
    )
    .result(s.layout.to_string());

    log.section("DC protection");
    log.step("PV string fuse", format!("Isc × {PV_FUSE_FACTOR}"))
        .substitution(format!("{:.2}A × {PV_FUSE_FACTOR}", s.panel.isc_a))
        .result(format!(
            "recommended {}A (overcurrent protection for each PV string)",
            s.pv_fuse.rating_a
        ));
    log.step(
        "PV1-F cable size",
        format!("Ampacity above {:.2} A", s.pv_fuse.current_a),
    )
    .result(format!("recommended {} (UV and weather resistant PV cable)", s.pv_cable));
    log.step("DC surge (PV)", "Selected by inverter input voltage")
        .result(format!(
            "recommended {}Vdc (surge protection on the array side)",
            s.dc_surge_v
        ));
    log.step("DC breaker", "(Isc × Strings) × 1.25")
        .substitution(format!(
            "({:.2}A × {}) × 1.25",
            s.panel.isc_a,
            s.layout.strings()
        ))
        .result(format!(
            "recommended {}A (main array breaker)",
            s.dc_breaker.rating_a
        ));

    log.section("AC protection");
    log.step("AC breaker (output)", "(Inverter W / 230V) × 1.25")
        .substitution(format!("({inverter_w}W / 230V) × 1.25"))
        .result(format!(
            "recommended {}A (grid connection breaker)",
            s.ac.breaker.rating_a
        ));
    log.step("AC cable size", "Selected by AC breaker rating")
        .result(format!("recommended {} (grid connection cable)", s.ac.cable));
    log.step("AC surge (output)", "Selected by mains voltage")
        .result(format!("recommended {AC_SURGE_RATING} (surge protection on the AC side)"));

    log
}
