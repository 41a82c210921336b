//! Stage-boundary discovery.
//!
//! Two directions: splitting a parsed model at the boundary names of its
//! second period, and finding those boundary names from a class's name
//! prefixes when no stage file exists yet.

use crate::errors::{Error, Result};
use crate::model::{Model, Period};

/// Name prefixes that open the second stage of a problem class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageRule {
    pub constraint_prefix: &'static str,
    pub variable_prefix: &'static str,
}

/// Names from `boundary` (inclusive) to the end; empty if `boundary` never occurs.
///
/// Once the boundary is reached every later name belongs to the second stage.
pub fn second_stage<'a>(names: &'a [String], boundary: &str) -> &'a [String] {
    match names.iter().position(|name| name == boundary) {
        Some(start) => &names[start..],
        None => &[],
    }
}

/// Second-stage constraints of `model`.
pub fn second_stage_constraints(model: &Model) -> Result<&[String]> {
    let stage = model.second_stage()?;
    Ok(second_stage(model.constraints(), &stage.first_constraint))
}

/// Second-stage variables of `model`.
pub fn second_stage_variables(model: &Model) -> Result<&[String]> {
    let stage = model.second_stage()?;
    Ok(second_stage(model.variables(), &stage.first_variable))
}

/// The first name, followed by the first later name starting with `prefix`.
fn stage_starts<'a>(names: &'a [String], prefix: &str) -> Vec<&'a str> {
    let Some((first, rest)) = names.split_first() else {
        return Vec::new();
    };

    std::iter::once(first.as_str())
        .chain(
            rest.iter()
                .find(|name| name.starts_with(prefix))
                .map(String::as_str),
        )
        .collect()
}

/// Stage markers for a core model, labelled `STAGE-1`, `STAGE-2`, ...
pub fn discover_stages(model: &Model, rule: &StageRule) -> Result<Vec<Period>> {
    if model.constraints().is_empty() || model.variables().is_empty() {
        return Err(Error::EmptyModel);
    }

    let constraints = stage_starts(model.constraints(), rule.constraint_prefix);
    let variables = stage_starts(model.variables(), rule.variable_prefix);
    if constraints.len() != variables.len() {
        return Err(Error::StageBoundaryMismatch {
            constraints: constraints.len(),
            variables: variables.len(),
        });
    }

    Ok(variables
        .into_iter()
        .zip(constraints)
        .enumerate()
        .map(|(index, (variable, constraint))| {
            Period::new(format!("STAGE-{}", index + 1), variable, constraint)
        })
        .collect())
}
