//! Scenario synthesis.
//!
//! Every problem class shares one scenario layout: `N` equally weighted
//! scenarios, each realising randomness in the second stage only. What a
//! class contributes is data: which perturbation kinds it supports, the name
//! prefixes that select eligible rows and columns, and the probabilities it
//! draws with. [`ProblemClass::perturbation`] turns a class and a kind into a
//! [`Perturbation`], and [`synthesize_with`] renders any perturbation.

pub mod boundary;
pub mod rng;

pub use boundary::{discover_stages, second_stage, StageRule};
pub use rng::ScenarioRng;

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::errors::{Error, Result};
use crate::io::format_g;
use crate::model::Model;
use rng::{bernoulli, poisson, RoundedUniform};

/// Name of the RHS vector in emitted right-hand-side perturbations.
pub const RHS_SET: &str = "RHS";

/// Parent node of every scenario: all scenarios branch from the root.
const PARENT: &str = "ROOT";

/// Which part of the second-stage data is randomised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerturbationKind {
    /// Right-hand sides of second-stage constraints
    #[default]
    Rhs,
    /// Constraint-matrix coefficients
    Coef,
    /// Objective coefficients
    Obj,
}

impl PerturbationKind {
    pub const ALL: [PerturbationKind; 3] = [Self::Rhs, Self::Coef, Self::Obj];

    pub fn name(self) -> &'static str {
        match self {
            Self::Rhs => "rhs",
            Self::Coef => "coef",
            Self::Obj => "obj",
        }
    }
}

impl std::fmt::Display for PerturbationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PerturbationKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| Error::UnknownPerturbationKind {
                name: name.to_string(),
                available: Self::ALL.map(Self::name).join(", "),
            })
    }
}

/// Right-hand-side randomisation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RhsRule {
    /// Scenario headers without any perturbation lines
    HeadersOnly,
    /// Each second-stage constraint gets a rounded uniform draw (0 or 1)
    RoundedUniform,
}

/// Flips nominal unit coefficients of eligible pairs to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientRule {
    pub constraint_prefix: &'static str,
    pub variable_prefix: &'static str,
    pub flip_probability: f64,
}

/// Replaces objective coefficients of eligible variables with
/// `(Poisson(1) + 1) * 100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveRule {
    pub variable_prefix: &'static str,
    pub emit_probability: f64,
}

/// A fully specified perturbation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Perturbation {
    Rhs(RhsRule),
    Coefficient(CoefficientRule),
    Objective(ObjectiveRule),
}

impl Perturbation {
    pub fn kind(&self) -> PerturbationKind {
        match self {
            Self::Rhs(_) => PerturbationKind::Rhs,
            Self::Coefficient(_) => PerturbationKind::Coef,
            Self::Objective(_) => PerturbationKind::Obj,
        }
    }
}

/// The instance families the generator knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemClass {
    /// Recoverable robustness tail assignment
    RRTailAssign,
    /// Tail assignment with recovery columns
    TailAssign,
    /// Stochastic server location
    Sslp,
    /// MIPLIB noswot
    Noswot,
    /// Stochastic network interdiction
    Snip,
}

impl ProblemClass {
    pub const ALL: [ProblemClass; 5] = [
        Self::RRTailAssign,
        Self::TailAssign,
        Self::Sslp,
        Self::Noswot,
        Self::Snip,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::RRTailAssign => "rrtailassign",
            Self::TailAssign => "tailassign",
            Self::Sslp => "sslp",
            Self::Noswot => "noswot",
            Self::Snip => "snip",
        }
    }

    /// Prefixes that open the second stage when writing a stage file.
    pub fn stage_rule(self) -> Option<StageRule> {
        let (constraint_prefix, variable_prefix) = match self {
            Self::RRTailAssign | Self::TailAssign => return None,
            Self::Sslp => ("c2", "y_1_1"),
            Self::Noswot => ("p", "pr"),
            Self::Snip => ("sinkcons", "node"),
        };
        Some(StageRule {
            constraint_prefix,
            variable_prefix,
        })
    }

    /// The rule this class uses for `kind`.
    pub fn perturbation(self, kind: PerturbationKind) -> Result<Perturbation> {
        let rule = match (self, kind) {
            (Self::Sslp | Self::TailAssign, PerturbationKind::Rhs) => {
                Some(Perturbation::Rhs(RhsRule::RoundedUniform))
            }
            (Self::Noswot, PerturbationKind::Rhs) => Some(Perturbation::Rhs(RhsRule::HeadersOnly)),
            (Self::RRTailAssign, PerturbationKind::Coef) => {
                Some(Perturbation::Coefficient(CoefficientRule {
                    constraint_prefix: "RecoveryFlight",
                    variable_prefix: "Recovery",
                    flip_probability: 0.01,
                }))
            }
            (Self::TailAssign, PerturbationKind::Coef) => {
                Some(Perturbation::Coefficient(CoefficientRule {
                    constraint_prefix: "Recovery",
                    variable_prefix: "Recovery",
                    flip_probability: 0.05,
                }))
            }
            (Self::RRTailAssign | Self::TailAssign, PerturbationKind::Obj) => {
                Some(Perturbation::Objective(ObjectiveRule {
                    variable_prefix: "Recovery",
                    emit_probability: 0.1,
                }))
            }
            _ => None,
        };
        rule.ok_or(Error::UnsupportedPerturbation { class: self, kind })
    }

    /// Extra trailing field on every scenario header line.
    pub fn header_trailer(self) -> Option<&'static str> {
        match self {
            Self::RRTailAssign => Some("0.0"),
            _ => None,
        }
    }

    pub fn supports(self, kind: PerturbationKind) -> bool {
        self.perturbation(kind).is_ok()
    }
}

impl std::fmt::Display for ProblemClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProblemClass {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.name() == name)
            .ok_or_else(|| Error::UnknownProblemClass {
                name: name.to_string(),
                available: Self::ALL.map(Self::name).join(", "),
            })
    }
}

/// Rendered scenario section of a scenario file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioBlock {
    pub text: String,
    pub scenarios: usize,
    pub perturbations: usize,
}

/// Scenario text for `class`, seeded from `scenario_count`.
pub fn synthesize(
    class: ProblemClass,
    model: &Model,
    scenario_count: usize,
    kind: PerturbationKind,
) -> Result<ScenarioBlock> {
    let perturbation = class.perturbation(kind)?;
    let _span = info_span!("synthesize", %class, %kind, scenario_count).entered();
    render(model, scenario_count, &perturbation, class.header_trailer())
}

/// Scenario text for an explicit perturbation rule, seeded from `scenario_count`.
///
/// Headers carry no class-specific trailer.
pub fn synthesize_with(
    model: &Model,
    scenario_count: usize,
    perturbation: &Perturbation,
) -> Result<ScenarioBlock> {
    render(model, scenario_count, perturbation, None)
}

fn render(
    model: &Model,
    scenario_count: usize,
    perturbation: &Perturbation,
    trailer: Option<&'static str>,
) -> Result<ScenarioBlock> {
    if scenario_count == 0 {
        return Err(Error::Validation {
            errors: vec!["Number of scenarios must be greater than 0.".to_string()],
        });
    }

    let mut rng = ScenarioRng::for_scenario_count(scenario_count);
    let mut writer = BlockWriter::new(model.second_stage()?.label.clone(), scenario_count, trailer);

    match perturbation {
        Perturbation::Rhs(rule) => rhs_scenarios(model, *rule, &mut rng, &mut writer)?,
        Perturbation::Coefficient(rule) => {
            coefficient_scenarios(model, rule, &mut rng, &mut writer)?
        }
        Perturbation::Objective(rule) => objective_scenarios(model, rule, &mut rng, &mut writer)?,
    }

    debug!(
        scenarios = scenario_count,
        perturbations = writer.perturbations,
        "scenarios synthesized"
    );
    Ok(writer.finish())
}

struct BlockWriter {
    text: String,
    stage_label: String,
    scenario_count: usize,
    weight: String,
    trailer: Option<&'static str>,
    perturbations: usize,
}

impl BlockWriter {
    fn new(stage_label: String, scenario_count: usize, trailer: Option<&'static str>) -> Self {
        Self {
            text: String::new(),
            stage_label,
            scenario_count,
            weight: format_g(1.0 / scenario_count as f64),
            trailer,
            perturbations: 0,
        }
    }

    fn scenarios(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.scenario_count
    }

    fn header(&mut self, scenario: usize) {
        let _ = write!(
            self.text,
            " SC SCEN{}      {}         {}        {}",
            scenario, PARENT, self.weight, self.stage_label
        );
        if let Some(trailer) = self.trailer {
            let _ = write!(self.text, "        {}", trailer);
        }
        self.text.push('\n');
    }

    fn entry(&mut self, column: &str, row: &str, value: f64) {
        let _ = writeln!(self.text, "    {}      {}               {}", column, row, format_g(value));
        self.perturbations += 1;
    }

    fn finish(self) -> ScenarioBlock {
        ScenarioBlock {
            text: self.text,
            scenarios: self.scenario_count,
            perturbations: self.perturbations,
        }
    }
}

fn rhs_scenarios(
    model: &Model,
    rule: RhsRule,
    rng: &mut ScenarioRng,
    writer: &mut BlockWriter,
) -> Result<()> {
    let constraints = boundary::second_stage_constraints(model)?;

    for scenario in writer.scenarios() {
        writer.header(scenario);
        if rule == RhsRule::HeadersOnly {
            continue;
        }
        for constraint in constraints {
            let value = rng.sample(&RoundedUniform);
            writer.entry(RHS_SET, constraint, value);
        }
    }
    Ok(())
}

fn coefficient_scenarios(
    model: &Model,
    rule: &CoefficientRule,
    rng: &mut ScenarioRng,
    writer: &mut BlockWriter,
) -> Result<()> {
    let flip = bernoulli(rule.flip_probability)?;
    let constraints: Vec<&str> = boundary::second_stage_constraints(model)?
        .iter()
        .filter(|name| name.starts_with(rule.constraint_prefix))
        .map(String::as_str)
        .collect();
    let variables: Vec<&str> = boundary::second_stage_variables(model)?
        .iter()
        .filter(|name| name.starts_with(rule.variable_prefix))
        .map(String::as_str)
        .collect();

    for scenario in writer.scenarios() {
        writer.header(scenario);
        for &constraint in &constraints {
            for &variable in &variables {
                if model.coefficient(variable, constraint) != Some(1.0) {
                    continue;
                }
                if rng.sample(&flip) {
                    writer.entry(variable, constraint, 0.0);
                }
            }
        }
    }
    Ok(())
}

fn objective_scenarios(
    model: &Model,
    rule: &ObjectiveRule,
    rng: &mut ScenarioRng,
    writer: &mut BlockWriter,
) -> Result<()> {
    let emit = bernoulli(rule.emit_probability)?;
    let cost_steps = poisson(1.0)?;
    let objective = model.objective_name();
    let variables: Vec<&str> = boundary::second_stage_variables(model)?
        .iter()
        .filter(|name| name.starts_with(rule.variable_prefix))
        .map(String::as_str)
        .collect();

    for scenario in writer.scenarios() {
        writer.header(scenario);
        for &variable in &variables {
            if rng.sample(&emit) {
                let steps: f64 = rng.sample(&cost_steps);
                let cost = (steps + 1.0) * 100.0;
                writer.entry(variable, objective, cost);
            }
        }
    }
    Ok(())
}
