//! Design files and presets: parsing, validation and sizing.

use std::path::Path;

use solar_sizer::catalog::PanelCatalog;
use solar_sizer::config::{DesignConfig, DesignError};
use solar_sizer::io::export::write_csv;
use solar_sizer::sizing::{SizingError, SizingResult, SystemKind};

const DESIGNS: &[(&str, SystemKind)] = &[
    ("designs/off_grid_cabin.toml", SystemKind::OffGrid),
    ("designs/day_night_farmhouse.toml", SystemKind::OffGrid),
    ("designs/hybrid_home.toml", SystemKind::Hybrid),
    ("designs/grid_tie_5kw.toml", SystemKind::GridTie),
    ("designs/sprinkler_zone.toml", SystemKind::Water),
];

#[test]
fn shipped_designs_are_valid_and_size() {
    let catalog = PanelCatalog::builtin();
    for &(path, kind) in DESIGNS {
        let design = DesignConfig::from_toml_file(Path::new(path)).unwrap();
        assert_eq!(design.system, kind, "{path}");
        let errors = design.validate(&catalog);
        assert!(errors.is_empty(), "{path}: {errors:?}");
        let result = design.size(&catalog).unwrap();
        assert_eq!(result.kind(), kind, "{path}");
    }
}

#[test]
fn every_preset_sizes() {
    let catalog = PanelCatalog::builtin();
    for name in DesignConfig::PRESETS {
        let design = DesignConfig::from_preset(name).unwrap();
        let result = design.size(&catalog).unwrap();
        assert!(!result.log().is_empty(), "{name}");
    }
}

#[test]
fn farmhouse_uses_day_night_model() {
    let design =
        DesignConfig::from_toml_file(Path::new("designs/day_night_farmhouse.toml")).unwrap();
    let SizingResult::OffGrid(s) = design.size(&PanelCatalog::builtin()).unwrap() else {
        panic!("expected an off-grid result");
    };
    assert_eq!(s.profile.name, "off-grid (day/night)");
    assert_eq!(s.log.get("1.2").unwrap().title, "Nighttime load energy");
}

#[test]
fn hybrid_home_air_conditioner_sets_inverter_class() {
    let design = DesignConfig::from_toml_file(Path::new("designs/hybrid_home.toml")).unwrap();
    let SizingResult::Hybrid(s) = design.size(&PanelCatalog::builtin()).unwrap() else {
        panic!("expected a hybrid result");
    };
    assert_eq!(s.inverter.recommended_kw, 3.0);
    assert_eq!(s.battery.voltage, 48.0);
}

#[test]
fn empty_load_list_is_a_sizing_error() {
    let design = DesignConfig::from_toml_str("system = \"off-grid\"").unwrap();
    let err = design.size(&PanelCatalog::builtin()).unwrap_err();
    assert!(matches!(err, DesignError::Sizing(SizingError::ZeroLoadEnergy)));
}

#[test]
fn validation_reports_every_bad_field() {
    let toml = r#"
system = "off-grid"

[parameters]
battery_voltage = 36
depth_of_discharge_pct = 0

[panel]
model = "999W"

[[loads]]
name = "Lamp"
quantity = 0
hours = 2
"#;
    let design = DesignConfig::from_toml_str(toml).unwrap();
    let errors = design.validate(&PanelCatalog::builtin());
    let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"panel.model"));
    assert!(fields.contains(&"parameters.battery_voltage"));
    assert!(fields.contains(&"parameters.depth_of_discharge_pct"));
    assert!(fields.contains(&"loads[0].quantity"));

    assert!(matches!(
        design.size(&PanelCatalog::builtin()),
        Err(DesignError::Invalid(_))
    ));
}

#[test]
fn csv_export_matches_log() {
    let design = DesignConfig::from_preset("grid_tie_5kw").unwrap();
    let result = design.size(&PanelCatalog::builtin()).unwrap();

    let mut buf = Vec::new();
    write_csv(result.log(), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "step,title,formula,substitution,result,unit");
    assert_eq!(lines.len(), result.log().len() + 1);
    assert!(lines[2].starts_with("1.2,Monthly savings"));
}
