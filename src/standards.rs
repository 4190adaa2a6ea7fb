//! Standard component ratings and the lookups that snap computed values onto them.

use std::fmt;

use serde::Serialize;

/// PV string fuse ratings (A).
pub const PV_FUSE_LADDER_A: &[f64] = &[10.0, 15.0, 20.0, 25.0, 30.0];

/// DC breaker ratings between the array and the charge controller (A).
pub const PV_BREAKER_LADDER_A: &[f64] = &[
    16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0,
];

/// Main DC breaker ratings between the battery bank and the inverter (A).
pub const BATTERY_BREAKER_LADDER_A: &[f64] = &[63.0, 80.0, 100.0, 125.0, 150.0, 200.0];

/// AC output breaker ratings for off-grid inverters (A).
pub const OFF_GRID_AC_BREAKER_LADDER_A: &[f64] = &[10.0, 16.0, 20.0, 25.0, 32.0];

/// AC breaker ratings for grid-connected inverters (A).
pub const GRID_AC_BREAKER_LADDER_A: &[f64] = &[10.0, 16.0, 20.0, 25.0, 32.0, 50.0];

/// DC breaker ratings for a grid-tie combiner (A).
pub const GRID_TIE_DC_BREAKER_LADDER_A: &[f64] = &[16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0];

/// Commercially available hybrid inverter sizes (kW).
pub const HYBRID_INVERTER_CLASSES_KW: &[f64] = &[1.5, 3.0, 5.0, 10.0];

/// Assumed pump efficiency used to go from hydraulic to shaft power.
pub const PUMP_EFFICIENCY: f64 = 0.6;

/// Kilowatts per mechanical horsepower.
pub const KW_PER_HP: f64 = 0.7457;

/// Returns the smallest standard rating that is `>= value`.
///
/// Values above the largest rating clamp to the largest rating; this is a
/// lookup, not a validation.
///
/// # Arguments
///
/// * `value` - Computed quantity (current, power, ...)
/// * `standards` - Allowed ratings in ascending order
///
/// # Panics
///
/// Panics if `standards` is empty.
pub fn round_up_to_standard(value: f64, standards: &[f64]) -> f64 {
    assert!(!standards.is_empty(), "standards ladder must not be empty");
    debug_assert!(standards.windows(2).all(|w| w[0] <= w[1]));

    standards
        .iter()
        .copied()
        .find(|&standard| value <= standard)
        .unwrap_or(standards[standards.len() - 1])
}

/// Conductor cross-section recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CableSize {
    #[serde(rename = "2.5 mm²")]
    Mm2p5,
    #[serde(rename = "4.0 mm²")]
    Mm4,
    #[serde(rename = "6.0 mm²")]
    Mm6,
    #[serde(rename = "10.0 mm² or larger")]
    Mm10OrLarger,
}

impl fmt::Display for CableSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mm2p5 => "2.5 mm²",
            Self::Mm4 => "4.0 mm²",
            Self::Mm6 => "6.0 mm²",
            Self::Mm10OrLarger => "10.0 mm² or larger",
        })
    }
}

/// PV1-F cable for the given continuous current (A).
pub fn pv_cable_size(ampacity_a: f64) -> CableSize {
    if ampacity_a <= 30.0 {
        CableSize::Mm2p5
    } else if ampacity_a <= 41.0 {
        CableSize::Mm4
    } else if ampacity_a <= 55.0 {
        CableSize::Mm6
    } else {
        CableSize::Mm10OrLarger
    }
}

/// AC cable for the given breaker rating (A).
pub fn ac_cable_size(breaker_a: f64) -> CableSize {
    if breaker_a <= 16.0 {
        CableSize::Mm2p5
    } else if breaker_a <= 20.0 {
        CableSize::Mm4
    } else if breaker_a <= 32.0 {
        CableSize::Mm6
    } else {
        CableSize::Mm10OrLarger
    }
}

/// Nominal pipe diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PipeSize {
    #[serde(rename = "1/2\"")]
    Half,
    #[serde(rename = "3/4\"")]
    ThreeQuarter,
    #[serde(rename = "1\"")]
    One,
    #[serde(rename = "1-1/4\"")]
    OneAndQuarter,
    #[serde(rename = "1-1/2\"")]
    OneAndHalf,
    #[serde(rename = "2\"")]
    Two,
    #[serde(rename = "3\"")]
    Three,
    #[serde(rename = "larger than 3\"")]
    LargerThanThree,
}

/// Upper flow bound (m³/h, inclusive) for each pipe tier.
const PIPE_TIERS: &[(f64, PipeSize)] = &[
    (0.5, PipeSize::Half),
    (1.2, PipeSize::ThreeQuarter),
    (2.0, PipeSize::One),
    (3.5, PipeSize::OneAndQuarter),
    (5.0, PipeSize::OneAndHalf),
    (9.0, PipeSize::Two),
    (20.0, PipeSize::Three),
];

impl fmt::Display for PipeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Half => "1/2\"",
            Self::ThreeQuarter => "3/4\"",
            Self::One => "1\"",
            Self::OneAndQuarter => "1-1/4\"",
            Self::OneAndHalf => "1-1/2\"",
            Self::Two => "2\"",
            Self::Three => "3\"",
            Self::LargerThanThree => "larger than 3\"",
        })
    }
}

/// Pipe diameter able to carry `flow_m3_per_h`.
pub fn pipe_size(flow_m3_per_h: f64) -> PipeSize {
    PIPE_TIERS
        .iter()
        .find(|(max_flow, _)| flow_m3_per_h <= *max_flow)
        .map_or(PipeSize::LargerThanThree, |(_, size)| *size)
}

/// Pump motor class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PumpClass {
    #[serde(rename = "0.5 HP")]
    HalfHp,
    #[serde(rename = "1 HP")]
    OneHp,
    #[serde(rename = "1.5 HP")]
    OneAndHalfHp,
    #[serde(rename = "2 HP")]
    TwoHp,
    #[serde(rename = "3 HP")]
    ThreeHp,
    #[serde(rename = "larger than 3 HP")]
    LargerThanThreeHp,
}

const PUMP_CLASSES: &[(f64, PumpClass)] = &[
    (0.5, PumpClass::HalfHp),
    (1.0, PumpClass::OneHp),
    (1.5, PumpClass::OneAndHalfHp),
    (2.0, PumpClass::TwoHp),
    (3.0, PumpClass::ThreeHp),
];

impl PumpClass {
    /// Rated horsepower, `None` above the largest class.
    pub fn rated_hp(self) -> Option<f64> {
        PUMP_CLASSES
            .iter()
            .find(|(_, class)| *class == self)
            .map(|(hp, _)| *hp)
    }
}

impl fmt::Display for PumpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HalfHp => "0.5 HP",
            Self::OneHp => "1 HP",
            Self::OneAndHalfHp => "1.5 HP",
            Self::TwoHp => "2 HP",
            Self::ThreeHp => "3 HP",
            Self::LargerThanThreeHp => "larger than 3 HP",
        })
    }
}

/// Pump power chain for a duty point, plus the selected motor class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PumpSizing {
    /// Water power delivered (kW).
    pub hydraulic_kw: f64,
    /// Power at the pump shaft (kW).
    pub shaft_kw: f64,
    /// Shaft power in horsepower.
    pub computed_hp: f64,
    /// Selected motor class.
    pub class: PumpClass,
}

impl PumpSizing {
    /// Horsepower used for electrical sizing.
    ///
    /// Above the largest class the computed figure is rounded up to a whole HP.
    pub fn nameplate_hp(&self) -> f64 {
        self.class
            .rated_hp()
            .unwrap_or_else(|| self.computed_hp.ceil())
    }
}

/// Selects a pump class for `flow_m3_per_h` against `head_m` of total head.
pub fn pump_size(flow_m3_per_h: f64, head_m: f64) -> PumpSizing {
    let hydraulic_kw = flow_m3_per_h * head_m * 9.81 / 3600.0;
    let shaft_kw = hydraulic_kw / PUMP_EFFICIENCY;
    let computed_hp = shaft_kw / KW_PER_HP;
    let class = PUMP_CLASSES
        .iter()
        .find(|(hp, _)| computed_hp <= *hp)
        .map_or(PumpClass::LargerThanThreeHp, |(_, class)| *class);

    PumpSizing {
        hydraulic_kw,
        shaft_kw,
        computed_hp,
        class,
    }
}
