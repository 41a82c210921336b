//! In-memory form of a parsed SMPS instance.
//!
//! The parsers are the only writers. Everything downstream (stage discovery,
//! scenario synthesis, the emitters) reads through the accessors.

use std::collections::{HashMap, HashSet};

use crate::errors::{Error, Result};

/// Objective row name used when the core file declares no `N` row.
pub const DEFAULT_OBJECTIVE: &str = "obj";

/// One stage marker from the PERIODS section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    /// Period label, e.g. `STAGE-2`
    pub label: String,
    /// First variable belonging to the stage
    pub first_variable: String,
    /// First constraint belonging to the stage
    pub first_constraint: String,
}

impl Period {
    pub fn new(
        label: impl Into<String>,
        first_variable: impl Into<String>,
        first_constraint: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            first_variable: first_variable.into(),
            first_constraint: first_constraint.into(),
        }
    }
}

/// Parsed core model plus stage markers.
///
/// `variables` and `constraints` keep first-seen order and never hold
/// duplicates. Coefficients are stored per variable, then per row, with
/// last-write-wins semantics.
#[derive(Debug, Clone, Default)]
pub struct Model {
    variables: Vec<String>,
    variable_index: HashSet<String>,
    constraints: Vec<String>,
    constraint_index: HashSet<String>,
    objective_rows: Vec<String>,
    coefficients: HashMap<String, HashMap<String, f64>>,
    rhs: HashMap<String, f64>,
    objective_constants: HashMap<String, f64>,
    periods: Vec<Period>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variables in column-section order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Constraints in row-section order, objective rows excluded.
    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    /// The first `N` row of the row section, if any.
    pub fn objective(&self) -> Option<&str> {
        self.objective_rows.first().map(String::as_str)
    }

    /// Objective row name used in emitted perturbations.
    pub fn objective_name(&self) -> &str {
        self.objective().unwrap_or(DEFAULT_OBJECTIVE)
    }

    pub fn is_constraint(&self, name: &str) -> bool {
        self.constraint_index.contains(name)
    }

    pub fn is_objective_row(&self, name: &str) -> bool {
        self.objective_rows.iter().any(|row| row == name)
    }

    pub fn coefficient(&self, variable: &str, row: &str) -> Option<f64> {
        self.coefficients
            .get(variable)
            .and_then(|rows| rows.get(row))
            .copied()
    }

    /// All `(variable, row, value)` entries, in no particular order.
    pub fn coefficients(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.coefficients.iter().flat_map(|(variable, rows)| {
            rows.iter()
                .map(move |(row, value)| (variable.as_str(), row.as_str(), *value))
        })
    }

    pub fn coefficient_count(&self) -> usize {
        self.coefficients.values().map(HashMap::len).sum()
    }

    pub fn rhs(&self, constraint: &str) -> Option<f64> {
        self.rhs.get(constraint).copied()
    }

    pub fn rhs_entries(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.rhs.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Right-hand sides given to objective rows (objective constants).
    pub fn objective_constant(&self, row: &str) -> Option<f64> {
        self.objective_constants.get(row).copied()
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// The marker of the second stage, where all randomness lives.
    pub fn second_stage(&self) -> Result<&Period> {
        self.periods.get(1).ok_or(Error::MissingSecondStage)
    }

    pub(crate) fn push_objective_row(&mut self, name: &str) {
        if !self.is_objective_row(name) {
            self.objective_rows.push(name.to_string());
        }
    }

    pub(crate) fn push_constraint(&mut self, name: &str) {
        if self.constraint_index.insert(name.to_string()) {
            self.constraints.push(name.to_string());
        }
    }

    pub(crate) fn push_variable(&mut self, name: &str) {
        if self.variable_index.insert(name.to_string()) {
            self.variables.push(name.to_string());
        }
    }

    pub(crate) fn set_coefficient(&mut self, variable: &str, row: &str, value: f64) {
        self.coefficients
            .entry(variable.to_string())
            .or_default()
            .insert(row.to_string(), value);
    }

    /// Records a right-hand side. Returns false if `row` is neither a
    /// constraint nor an objective row.
    pub(crate) fn set_rhs(&mut self, row: &str, value: f64) -> bool {
        if self.is_constraint(row) {
            self.rhs.insert(row.to_string(), value);
            true
        } else if self.is_objective_row(row) {
            self.objective_constants.insert(row.to_string(), value);
            true
        } else {
            false
        }
    }

    pub(crate) fn push_period(&mut self, period: Period) {
        self.periods.push(period);
    }
}
