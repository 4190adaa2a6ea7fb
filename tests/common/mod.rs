//! Shared fixtures for integration tests.
#![allow(dead_code)]

use solar_sizer::loads::{LoadEntry, LoadList, LoadUsage};
use solar_sizer::sizing::{GridTieParameters, PanelSpec, SystemParameters, WaterSystemParameters};

/// 400 Wp panel with a 10 A short-circuit current.
pub fn panel_400w() -> PanelSpec {
    PanelSpec::new(400.0, 10.0)
}

/// 24 V bank, 80 % DoD, 90 % inverter efficiency, 0.95 loss, 5 PSH, 1 day.
pub fn default_params() -> SystemParameters {
    SystemParameters::default()
}

/// Two 100 W lamps for 5 hours: 1000 Wh/day, 200 W peak.
pub fn two_lamps() -> LoadList {
    [LoadEntry::new("Lamp", 100.0, 2, LoadUsage::Hours(5.0))]
        .into_iter()
        .collect()
}

/// Single load drawing `power_w` for `hours`.
pub fn single_load(power_w: f64, hours: f64) -> LoadList {
    [LoadEntry::new("Load", power_w, 1, LoadUsage::Hours(hours))]
        .into_iter()
        .collect()
}

/// Loads that all carry a daytime/nighttime split.
pub fn split_loads() -> LoadList {
    [
        LoadEntry::new(
            "Pump",
            500.0,
            1,
            LoadUsage::DayNight {
                day_hours: 2.0,
                night_hours: 0.0,
            },
        ),
        LoadEntry::new(
            "Lamp",
            50.0,
            4,
            LoadUsage::DayNight {
                day_hours: 0.0,
                night_hours: 5.0,
            },
        ),
    ]
    .into_iter()
    .collect()
}

/// 5 kW, 5 PSH, 0.9 loss, price 4.
pub fn five_kw() -> GridTieParameters {
    GridTieParameters {
        system_size_kw: 5.0,
        price_per_unit: 4.0,
        peak_sun_hours: 5.0,
        system_loss_factor: 0.9,
    }
}

/// Four 480 L/h heads at 2 bar, 5 m static head, 50 m of pipe.
pub fn four_head_zone() -> WaterSystemParameters {
    WaterSystemParameters::default()
}
