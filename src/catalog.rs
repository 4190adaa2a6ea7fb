//! Panel catalog: maps a panel selector such as `"400W"` to its ratings.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::sizing::PanelSpec;

/// Panels offered by the CLI and the API.
const BUILTIN_PANELS: &[(&str, f64, f64)] = &[
    ("340W", 340.0, 9.18),
    ("400W", 400.0, 10.0),
    ("450W", 450.0, 11.5),
    ("550W", 550.0, 13.9),
];

/// Named panel models.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PanelCatalog {
    panels: BTreeMap<String, PanelSpec>,
}

impl PanelCatalog {
    pub fn builtin() -> Self {
        BUILTIN_PANELS
            .iter()
            .map(|&(model, wattage_w, isc_a)| (model.to_string(), PanelSpec::new(wattage_w, isc_a)))
            .collect()
    }

    pub fn insert(&mut self, model: impl Into<String>, panel: PanelSpec) {
        self.panels.insert(model.into(), panel);
    }

    pub fn get(&self, model: &str) -> Option<PanelSpec> {
        self.panels.get(model).copied()
    }

    /// Model names in sorted order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.panels.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PanelSpec)> {
        self.panels.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, PanelSpec)> for PanelCatalog {
    fn from_iter<T: IntoIterator<Item = (String, PanelSpec)>>(iter: T) -> Self {
        Self {
            panels: iter.into_iter().collect(),
        }
    }
}
