//! Command-line input checks.
//!
//! Every check runs, and every failure is reported together, so a user
//! fixes all problems in one pass instead of one per invocation.

use std::path::PathBuf;

use crate::errors::{Error, Result};
use crate::io::file_exists;
use crate::synth::{PerturbationKind, ProblemClass};

/// Raw inputs as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct InputRequest<'a> {
    pub class: &'a str,
    pub instance: &'a str,
    pub extensions: &'a [&'a str],
    pub scenario_count: Option<i64>,
    pub perturbation: Option<&'a str>,
}

/// Inputs that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInputs {
    pub class: ProblemClass,
    pub scenario_count: Option<usize>,
    pub perturbation: Option<PerturbationKind>,
}

/// Check all inputs, accumulating every failure into [`Error::Validation`].
pub fn validate_inputs(request: &InputRequest<'_>) -> Result<ValidInputs> {
    let mut errors = Vec::new();

    let class = request
        .class
        .parse::<ProblemClass>()
        .map_err(|e| errors.push(e.to_string()))
        .ok();

    errors.extend(missing_instance_files(request.instance, request.extensions));

    let scenario_count = match request.scenario_count.map(check_scenario_count) {
        Some(Err(message)) => {
            errors.push(message);
            None
        }
        Some(Ok(count)) => Some(count),
        None => None,
    };

    let perturbation = match request.perturbation.map(str::parse::<PerturbationKind>) {
        Some(Err(e)) => {
            errors.push(e.to_string());
            None
        }
        Some(Ok(kind)) => Some(kind),
        None => None,
    };

    match class {
        Some(class) if errors.is_empty() => Ok(ValidInputs {
            class,
            scenario_count,
            perturbation,
        }),
        _ => Err(Error::Validation { errors }),
    }
}

/// Messages for every `<instance>.<ext>` that does not exist.
pub fn missing_instance_files(instance: &str, extensions: &[&str]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| PathBuf::from(format!("{}.{}", instance, ext)))
        .filter(|path| !file_exists(path))
        .map(|path| {
            format!(
                "<{}> must exist. Please input a valid instance name.",
                path.display()
            )
        })
        .collect()
}

/// A scenario count must be positive.
pub fn check_scenario_count(count: i64) -> std::result::Result<usize, String> {
    usize::try_from(count)
        .ok()
        .filter(|count| *count > 0)
        .ok_or_else(|| "Number of scenarios must be greater than 0.".to_string())
}
