//! Ordered calculation trail produced alongside every sizing result.
//!
//! Steps are numbered `section.index` in the order they are appended. The
//! numbering and wording are part of the output: presentation layers show
//! them verbatim and tests compare them verbatim.

use std::fmt;

use serde::Serialize;

/// One numbered calculation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivationStep {
    /// Section number (1-based).
    pub section: u8,
    /// Position within the section (1-based).
    pub index: u8,
    /// Short description of what is computed.
    pub title: String,
    /// Formula in words.
    pub formula: String,
    /// Formula with the actual values substituted, when meaningful.
    pub substitution: Option<String>,
    /// Computed value or recommendation.
    pub result: String,
    /// Unit appended to `result`, if not already part of it.
    pub unit: Option<String>,
    /// Marks headline figures such as savings.
    pub highlight: bool,
}

impl DerivationStep {
    /// Dotted step number, e.g. `"2.4"`.
    pub fn number(&self) -> String {
        format!("{}.{}", self.section, self.index)
    }

    /// Result with its unit, if any.
    pub fn result_with_unit(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} {unit}", self.result),
            None => self.result.clone(),
        }
    }
}

impl fmt::Display for DerivationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}:", self.number(), self.title)?;
        writeln!(f, "    formula: {}", self.formula)?;
        if let Some(substitution) = &self.substitution {
            writeln!(f, "    calculation: {substitution}")?;
        }
        write!(f, "    result: {}", self.result_with_unit())
    }
}

/// Numbered section heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub number: u8,
    pub title: String,
}

/// Append-only derivation trail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivationLog {
    sections: Vec<Section>,
    steps: Vec<DerivationStep>,
}

impl DerivationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the next numbered section; subsequent steps belong to it.
    pub fn section(&mut self, title: impl Into<String>) {
        let number = self.current_section() + 1;
        self.sections.push(Section {
            number,
            title: title.into(),
        });
    }

    /// Starts a step in the current section; call [`StepBuilder::result`] to append it.
    ///
    /// # Panics
    ///
    /// Panics if no section has been opened yet.
    pub fn step(&mut self, title: impl Into<String>, formula: impl Into<String>) -> StepBuilder<'_> {
        let section = self.current_section();
        assert!(section > 0, "a section must be opened before adding steps");
        let index = self.steps.iter().filter(|s| s.section == section).count() + 1;
        StepBuilder {
            log: self,
            step: DerivationStep {
                section,
                index: u8::try_from(index).unwrap_or(u8::MAX),
                title: title.into(),
                formula: formula.into(),
                substitution: None,
                result: String::new(),
                unit: None,
                highlight: false,
            },
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn steps(&self) -> &[DerivationStep] {
        &self.steps
    }

    /// Looks up a step by its dotted number.
    pub fn get(&self, number: &str) -> Option<&DerivationStep> {
        self.steps.iter().find(|s| s.number() == number)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    fn current_section(&self) -> u8 {
        self.sections.last().map_or(0, |s| s.number)
    }
}

impl fmt::Display for DerivationLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}. {}", section.number, section.title)?;
            for step in self.steps.iter().filter(|s| s.section == section.number) {
                writeln!(f, "{step}")?;
            }
        }
        Ok(())
    }
}

/// Pending step; nothing is appended until [`StepBuilder::result`].
#[must_use]
pub struct StepBuilder<'a> {
    log: &'a mut DerivationLog,
    step: DerivationStep,
}

impl StepBuilder<'_> {
    pub fn substitution(mut self, substitution: impl Into<String>) -> Self {
        self.step.substitution = Some(substitution.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.step.unit = Some(unit.into());
        self
    }

    pub fn highlight(mut self) -> Self {
        self.step.highlight = true;
        self
    }

    /// Sets the result and appends the step.
    pub fn result(mut self, result: impl Into<String>) {
        self.step.result = result.into();
        self.log.steps.push(self.step);
    }
}
