//! Annotations for the wiring diagram, keyed by diagram slot.

use serde::Serialize;

use super::grid_tie::GridTieSizing;
use super::strategy::BatterySystemSizing;
use super::water::WaterSizing;
use crate::sizing::electronics::AC_SURGE_RATING;

/// Text placed on one diagram slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramLabel {
    pub slot: &'static str,
    pub text: String,
}

impl DiagramLabel {
    fn new(slot: &'static str, text: impl Into<String>) -> Self {
        Self {
            slot,
            text: text.into(),
        }
    }
}

impl BatterySystemSizing {
    pub fn diagram_labels(&self) -> Vec<DiagramLabel> {
        let pv_breaker = format!("{}A\nBreaker", self.dc.pv_breaker.rating_a);
        let ac_breaker = self.ac.breaker.rating_a;
        vec![
            DiagramLabel::new(
                "solar-panels",
                format!(
                    "{}W x {} panels\n(total {:.0} Wp)",
                    self.panel.wattage_w, self.array.actual_panels, self.array.actual_wp
                ),
            ),
            DiagramLabel::new(
                "charge-controller",
                format!("{}A\nMPPT", self.dc.pv_breaker.rating_a),
            ),
            DiagramLabel::new(
                "inverter",
                format!("{} kW\nInverter", self.inverter.recommended_kw),
            ),
            DiagramLabel::new(
                "battery",
                format!(
                    "{}Ah x {} units\n(total {:.0}Ah)",
                    self.battery.unit_ah, self.battery.count, self.battery.capacity_ah
                ),
            ),
            DiagramLabel::new(
                "ac-load",
                format!("AC load\n{:.0}W peak", self.inverter.peak_load_w),
            ),
            DiagramLabel::new("dc-load", "DC load\n(if any)"),
            DiagramLabel::new(
                "og-pv-fuse",
                format!("{}A\nFuse DC", self.dc.pv_fuse.rating_a),
            ),
            DiagramLabel::new(
                "og-dc-surge",
                format!(">{}Vdc\nDC Surge", self.dc.surge_above_v),
            ),
            DiagramLabel::new("og-pv-breaker", pv_breaker.clone()),
            DiagramLabel::new("og-ctrl-batt-breaker", pv_breaker),
            DiagramLabel::new(
                "og-batt-inv-breaker",
                format!("{}A\nBreaker", self.dc.battery_breaker.rating_a),
            ),
            DiagramLabel::new("og-ac-fuse", format!("{}A\nFuse AC", self.ac.fuse_a)),
            DiagramLabel::new("og-ac-surge", format!("{AC_SURGE_RATING}\nAC Surge")),
            DiagramLabel::new("og-ac-breaker", format!("{ac_breaker}A\nBreaker")),
        ]
    }
}

impl GridTieSizing {
    pub fn diagram_labels(&self) -> Vec<DiagramLabel> {
        vec![
            DiagramLabel::new(
                "solar-panels",
                format!(
                    "{}W x {} panels\n(total {:.0} Wp)",
                    self.panel.wattage_w, self.panels, self.array_wp
                ),
            ),
            DiagramLabel::new(
                "gridtie-inverter",
                format!("{} kW\nGrid-Tie", self.inverter_kw),
            ),
            DiagramLabel::new("gt-pv-fuse", format!("{}A\nFuse DC", self.pv_fuse.rating_a)),
            DiagramLabel::new("gt-dc-surge", format!("{}Vdc\nDC Surge", self.dc_surge_v)),
            DiagramLabel::new(
                "gt-dc-breaker",
                format!("{}A\nDC Breaker", self.dc_breaker.rating_a),
            ),
        ]
    }
}

impl WaterSizing {
    pub fn diagram_labels(&self) -> Vec<DiagramLabel> {
        vec![
            DiagramLabel::new(
                "solar-panels",
                format!(
                    "{}W x {} panels\n(total {:.0} Wp)",
                    self.panel.wattage_w, self.panels, self.array_wp
                ),
            ),
            DiagramLabel::new("pump", format!("{}\nPump", self.pump.class)),
            DiagramLabel::new("main-pipe", format!("{}\nMain", self.pipes.main)),
            DiagramLabel::new("sub-main-pipe", format!("{}\nSub-main", self.pipes.sub_main)),
            DiagramLabel::new("lateral-pipe", format!("{}\nLateral", self.pipes.lateral)),
        ]
    }
}
