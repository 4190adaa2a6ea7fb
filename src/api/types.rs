//! API request and response bodies.
//!
//! Request sections use the same shapes as the design file, so a `[panel]`
//! table and a `"panel"` object accept the same fields.

use serde::{Deserialize, Serialize};

use crate::config::{
    DesignConfig, GridTieConfig, LoadConfig, PanelConfig, ParametersConfig, WaterConfig,
};
use crate::sizing::{DiagramLabel, Heuristics, SizingResult, SystemKind};

/// Body of `POST /size/off-grid` and `POST /size/hybrid`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatterySystemRequest {
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub panel: PanelConfig,
    pub heuristics: Option<Heuristics>,
    pub loads: Vec<LoadConfig>,
}

/// Body of `POST /size/grid-tie`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridTieRequest {
    #[serde(default)]
    pub grid_tie: GridTieConfig,
    #[serde(default)]
    pub panel: PanelConfig,
}

/// Body of `POST /size/water`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaterRequest {
    #[serde(default)]
    pub water: WaterConfig,
    #[serde(default)]
    pub panel: PanelConfig,
    pub heuristics: Option<Heuristics>,
}

impl BatterySystemRequest {
    pub fn into_design(self, system: SystemKind, default_heuristics: Heuristics) -> DesignConfig {
        DesignConfig {
            system,
            parameters: self.parameters,
            panel: self.panel,
            grid_tie: GridTieConfig::default(),
            water: WaterConfig::default(),
            heuristics: self.heuristics.unwrap_or(default_heuristics),
            loads: self.loads,
        }
    }
}

impl GridTieRequest {
    pub fn into_design(self, default_heuristics: Heuristics) -> DesignConfig {
        DesignConfig {
            system: SystemKind::GridTie,
            parameters: ParametersConfig::default(),
            panel: self.panel,
            grid_tie: self.grid_tie,
            water: WaterConfig::default(),
            heuristics: default_heuristics,
            loads: Vec::new(),
        }
    }
}

impl WaterRequest {
    pub fn into_design(self, default_heuristics: Heuristics) -> DesignConfig {
        DesignConfig {
            system: SystemKind::Water,
            parameters: ParametersConfig::default(),
            panel: self.panel,
            grid_tie: GridTieConfig::default(),
            water: self.water,
            heuristics: self.heuristics.unwrap_or(default_heuristics),
            loads: Vec::new(),
        }
    }
}

/// Successful sizing: the result with its log, plus diagram annotations.
#[derive(Debug, Serialize)]
pub struct SizingResponse {
    pub result: SizingResult,
    pub diagram: Vec<DiagramLabel>,
}

impl From<SizingResult> for SizingResponse {
    fn from(result: SizingResult) -> Self {
        Self {
            diagram: result.diagram_labels(),
            result,
        }
    }
}

/// One catalog panel in `GET /panels`.
#[derive(Debug, Serialize)]
pub struct PanelEntry {
    pub model: String,
    pub wattage_w: f64,
    pub isc_a: f64,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_request_defaults_sections() {
        let body = r#"{"loads": [{"name": "Lamp", "power_w": 100, "quantity": 2, "hours": 5}]}"#;
        let request: BatterySystemRequest = serde_json::from_str(body).unwrap();
        let design = request.into_design(SystemKind::OffGrid, Heuristics::default());
        assert_eq!(design.system, SystemKind::OffGrid);
        assert_eq!(design.parameters.battery_voltage, 24.0);
        assert_eq!(design.loads.len(), 1);
    }

    #[test]
    fn unknown_request_field_is_rejected() {
        let body = r#"{"grid_tie": {}, "colour": "blue"}"#;
        assert!(serde_json::from_str::<GridTieRequest>(body).is_err());
    }
}
