//! PV array sizing: panel counts and uniform series-string layout.

use serde::Serialize;

/// Open-circuit voltage assumed for every catalog panel (V).
pub const PANEL_VOC_V: f64 = 48.0;

/// Maximum PV input of a grid-tie inverter (V).
pub const GRID_TIE_INVERTER_MAX_V: f64 = 550.0;

/// Charge-controller PV input limit for a battery bank voltage.
pub fn controller_max_voltage(battery_voltage: f64) -> f64 {
    if battery_voltage >= 48.0 { 150.0 } else { 100.0 }
}

/// Result of laying panels out into equal-length series strings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrayLayout {
    /// Array power needed to meet the daily energy (Wp).
    pub theoretical_wp: f64,
    /// Panels needed before string rounding.
    pub theoretical_panels: u32,
    /// Panels per series string, limited by the input voltage.
    pub panels_per_string: u32,
    /// Parallel strings.
    pub strings: u32,
    /// Installed panels: always `strings * panels_per_string`.
    pub actual_panels: u32,
    /// Installed array power (Wp).
    pub actual_wp: f64,
    /// Voltage limit the strings were sized against (V).
    pub max_input_voltage: f64,
}

/// Sizes an array that delivers `required_daily_wh` and splits it into full strings.
///
/// # Arguments
///
/// * `required_daily_wh` - Energy the array must produce per day (Wh)
/// * `peak_sun_hours` - Equivalent full-sun hours per day
/// * `panel_wattage_w` - Rated power of one panel (Wp)
/// * `max_input_voltage` - Controller or inverter PV input limit (V)
///
/// # Returns
///
/// An [`ArrayLayout`] whose installed capacity is never below the theoretical one.
pub fn size_array(
    required_daily_wh: f64,
    peak_sun_hours: f64,
    panel_wattage_w: f64,
    max_input_voltage: f64,
) -> ArrayLayout {
    let theoretical_wp = required_daily_wh / peak_sun_hours;
    let theoretical_panels = ceil_count(theoretical_wp / panel_wattage_w);
    let panels_per_string = max_panels_in_series(max_input_voltage);
    let strings = theoretical_panels.div_ceil(panels_per_string);
    let actual_panels = strings * panels_per_string;

    ArrayLayout {
        theoretical_wp,
        theoretical_panels,
        panels_per_string,
        strings,
        actual_panels,
        actual_wp: f64::from(actual_panels) * panel_wattage_w,
        max_input_voltage,
    }
}

/// Longest series string whose open-circuit voltage stays within `max_input_voltage`.
pub fn max_panels_in_series(max_input_voltage: f64) -> u32 {
    floor_count(max_input_voltage / PANEL_VOC_V).max(1)
}

/// Rounds a non-negative continuous count up to a whole number.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn ceil_count(value: f64) -> u32 {
    value.max(0.0).ceil() as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_count(value: f64) -> u32 {
    value.max(0.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn off_grid_cabin_layout() {
        // 1000 Wh load through 0.9 inverter and 0.95 losses
        let required = 1000.0 / 0.9 / 0.95;
        let layout = size_array(required, 5.0, 400.0, controller_max_voltage(24.0));
        assert_relative_eq!(layout.theoretical_wp, 233.918, epsilon = 1e-3);
        assert_eq!(layout.theoretical_panels, 1);
        assert_eq!(layout.panels_per_string, 2);
        assert_eq!(layout.strings, 1);
        assert_eq!(layout.actual_panels, 2);
        assert_eq!(layout.actual_wp, 800.0);
    }

    #[test]
    fn controller_limit_depends_on_bank_voltage() {
        assert_eq!(controller_max_voltage(12.0), 100.0);
        assert_eq!(controller_max_voltage(24.0), 100.0);
        assert_eq!(controller_max_voltage(48.0), 150.0);
    }

    #[test]
    fn layout_is_whole_strings_and_never_undersized() {
        for wh in (100..40_000).step_by(730) {
            for max_v in [100.0, 150.0, GRID_TIE_INVERTER_MAX_V] {
                let layout = size_array(f64::from(wh), 4.5, 330.0, max_v);
                assert_eq!(layout.actual_panels % layout.panels_per_string, 0);
                assert!(layout.actual_panels >= layout.theoretical_panels);
                assert!(layout.actual_wp >= layout.theoretical_wp);
            }
        }
    }

    #[test]
    fn grid_tie_string_limit() {
        let layout = size_array(5000.0 * 5.0, 5.0, 400.0, GRID_TIE_INVERTER_MAX_V);
        assert_eq!(layout.theoretical_panels, 13);
        assert_eq!(layout.panels_per_string, 11);
        assert_eq!(layout.strings, 2);
        assert_eq!(max_panels_in_series(GRID_TIE_INVERTER_MAX_V), 11);
    }
}
