//! Inverter, battery bank and protective-device sizing.

use serde::Serialize;
use tracing::warn;

use super::types::SystemParameters;
use crate::standards::{
    self, BATTERY_BREAKER_LADDER_A, CableSize, HYBRID_INVERTER_CLASSES_KW, PV_BREAKER_LADDER_A,
    PV_FUSE_LADDER_A,
};

/// Margin applied to continuous currents and to peak load.
pub const SAFETY_FACTOR: f64 = 1.25;

/// Isc multiplier for PV string fuses (1.25 × 1.25).
pub const PV_FUSE_FACTOR: f64 = 1.56;

/// Nominal single-phase mains voltage (V).
pub const AC_VOLTAGE: f64 = 230.0;

/// AC-side surge protector rating.
pub const AC_SURGE_RATING: &str = "275Vac";

/// Capacity of one battery unit in the bank (Ah).
pub const BATTERY_UNIT_AH: f64 = 100.0;

/// Round-trip efficiency of charging energy into the battery.
pub const BATTERY_CHARGING_EFFICIENCY: f64 = 0.85;

/// How a computed inverter rating is snapped to a purchasable size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InverterRounding {
    /// Up to the next 0.1 kW.
    TenthKilowatt,
    /// Up to the next hybrid inverter class.
    HybridClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InverterSizing {
    /// Sum of all loads running at once (W).
    pub peak_load_w: f64,
    /// Peak load with margin (W).
    pub required_w: f64,
    /// Recommended inverter (kW).
    pub recommended_kw: f64,
}

impl InverterSizing {
    pub fn recommended_w(&self) -> f64 {
        (self.recommended_kw * 1000.0).round()
    }
}

/// Sizes the inverter for a coincident peak load.
pub fn size_inverter(peak_load_w: f64, rounding: InverterRounding) -> InverterSizing {
    let required_w = peak_load_w * SAFETY_FACTOR;
    let recommended_kw = match rounding {
        InverterRounding::TenthKilowatt => (required_w / 100.0).ceil() / 10.0,
        InverterRounding::HybridClass => {
            let kw = standards::round_up_to_standard(required_w / 1000.0, HYBRID_INVERTER_CLASSES_KW);
            if kw * 1000.0 < required_w {
                warn!(
                    required_w,
                    largest_kw = kw,
                    "peak load exceeds the largest hybrid inverter class"
                );
            }
            kw
        }
    };
    InverterSizing {
        peak_load_w,
        required_w,
        recommended_kw,
    }
}

/// Battery capacity formula.
///
/// The two variants disagree on whether inverter losses are charged against
/// the bank; both are kept so designs can be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatteryFormula {
    /// `(E × days / η_inv) / (V × DoD)`.
    IncludingInverterLoss,
    /// `(E × days) / (V × DoD)`.
    BackupOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryBank {
    /// Energy the bank must hold before depth-of-discharge derating (Wh).
    pub energy_wh: f64,
    /// Required capacity at bank voltage (Ah).
    pub capacity_ah: f64,
    /// Capacity of one unit (Ah).
    pub unit_ah: f64,
    /// Units needed; `count * unit_ah >= capacity_ah`.
    pub count: u32,
    /// Bank voltage (V).
    pub voltage: f64,
}

/// Sizes the battery bank for `daily_energy_wh` over the autonomy period.
pub fn size_battery_bank(
    daily_energy_wh: f64,
    params: &SystemParameters,
    formula: BatteryFormula,
) -> BatteryBank {
    let energy_wh = match formula {
        BatteryFormula::IncludingInverterLoss => {
            daily_energy_wh * params.autonomy_days / params.inverter_efficiency
        }
        BatteryFormula::BackupOnly => daily_energy_wh * params.autonomy_days,
    };
    let capacity_ah = energy_wh / (params.battery_voltage * params.depth_of_discharge);
    BatteryBank {
        energy_wh,
        capacity_ah,
        unit_ah: BATTERY_UNIT_AH,
        count: super::array::ceil_count(capacity_ah / BATTERY_UNIT_AH),
        voltage: params.battery_voltage,
    }
}

/// Continuous current and the device rating chosen for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rated {
    /// Design current including margin (A).
    pub current_a: f64,
    /// Selected standard rating (A).
    pub rating_a: f64,
}

impl Rated {
    fn on_ladder(current_a: f64, ladder: &[f64]) -> Self {
        Self {
            current_a,
            rating_a: standards::round_up_to_standard(current_a, ladder),
        }
    }
}

/// PV string fuse for a panel short-circuit current.
pub fn pv_string_fuse(isc_a: f64) -> Rated {
    Rated::on_ladder(isc_a * PV_FUSE_FACTOR, PV_FUSE_LADDER_A)
}

/// Array-side and battery-side protection of a battery-backed system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DcProtection {
    pub pv_fuse: Rated,
    /// PV1-F cable sized on the fuse design current.
    pub pv_cable: CableSize,
    /// DC surge protector must exceed this voltage (V).
    pub surge_above_v: f64,
    /// Breaker between array and charge controller.
    pub pv_breaker: Rated,
    /// Main breaker between battery bank and inverter.
    pub battery_breaker: Rated,
}

/// Sizes DC protection from the installed array and the recommended inverter.
///
/// # Arguments
///
/// * `isc_a` - Panel short-circuit current (A)
/// * `actual_wp` - Installed array power (Wp)
/// * `inverter_w` - Recommended inverter rating (W)
/// * `battery_voltage` - Bank voltage (V)
/// * `controller_max_v` - Charge-controller PV input limit (V)
pub fn size_dc_protection(
    isc_a: f64,
    actual_wp: f64,
    inverter_w: f64,
    battery_voltage: f64,
    controller_max_v: f64,
) -> DcProtection {
    let pv_fuse = pv_string_fuse(isc_a);
    DcProtection {
        pv_fuse,
        pv_cable: standards::pv_cable_size(pv_fuse.current_a),
        surge_above_v: controller_max_v,
        pv_breaker: Rated::on_ladder(
            actual_wp / battery_voltage * SAFETY_FACTOR,
            PV_BREAKER_LADDER_A,
        ),
        battery_breaker: Rated::on_ladder(
            inverter_w / battery_voltage * SAFETY_FACTOR,
            BATTERY_BREAKER_LADDER_A,
        ),
    }
}

/// Inverter output protection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcProtection {
    pub breaker: Rated,
    /// Output fuse, matched to the breaker (A).
    pub fuse_a: f64,
    pub cable: CableSize,
}

/// Sizes the AC breaker, fuse and cable for an inverter on `ladder`.
pub fn size_ac_protection(inverter_w: f64, ladder: &[f64]) -> AcProtection {
    let breaker = Rated::on_ladder(inverter_w / AC_VOLTAGE * SAFETY_FACTOR, ladder);
    AcProtection {
        breaker,
        fuse_a: breaker.rating_a,
        cable: standards::ac_cable_size(breaker.rating_a),
    }
}
