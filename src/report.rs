//! Terminal tables for derivation logs and diagram labels.

use comfy_table::{Attribute, Cell, Color, Table, modifiers, presets};

use crate::derivation::DerivationLog;
use crate::sizing::DiagramLabel;

#[must_use]
pub fn build_log_table(log: &DerivationLog) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Step", "Title", "Formula", "Calculation", "Result"]);
    for section in log.sections() {
        table.add_row(vec![
            Cell::new(format!("{}.", section.number)).add_attribute(Attribute::Bold),
            Cell::new(&section.title).add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
        ]);
        for step in log.steps().iter().filter(|s| s.section == section.number) {
            let result = Cell::new(step.result_with_unit());
            table.add_row(vec![
                Cell::new(step.number()),
                Cell::new(&step.title),
                Cell::new(&step.formula).add_attribute(Attribute::Dim),
                Cell::new(step.substitution.as_deref().unwrap_or("")),
                if step.highlight {
                    result.fg(Color::Green).add_attribute(Attribute::Bold)
                } else {
                    result
                },
            ]);
        }
    }
    table
}

#[must_use]
pub fn build_labels_table(labels: &[DiagramLabel]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Diagram slot", "Label"]);
    for label in labels {
        table.add_row(vec![Cell::new(label.slot), Cell::new(label.text.replace('\n', " / "))]);
    }
    table
}
