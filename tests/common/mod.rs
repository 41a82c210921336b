#![allow(dead_code)]

use indoc::indoc;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two constraints, two variables, boundary at `c2_1` / `y_1_1`.
pub const SSLP_CORE: &str = indoc! {"
    NAME          sslp_tiny
    ROWS
     N  obj
     L  c1
     G  c2_1
    COLUMNS
        x_1       obj       3          c1        1
        y_1_1     obj       2          c2_1      1
    RHS
        RHS       c1        1          c2_1      1
    ENDATA
"};

pub const SSLP_TIME: &str = indoc! {"
    TIME          sslp_tiny
    PERIODS       LP
        x_1       c1        STAGE-1
        y_1_1     c2_1      STAGE-2
    ENDATA
"};

/// Tail-assignment shaped model: recovery variables and flight rows in stage two.
pub const TAIL_CORE: &str = indoc! {"
    NAME          tail
    ROWS
     N  cost
     E  Flight_1
     E  RecoveryFlight_1
     E  RecoveryFlight_2
     L  Capacity_1
     E  RecoveryBase_1
    COLUMNS
        MARKER                 'MARKER'                 'INTORG'
        Route_1   cost      10         Flight_1  1
        Route_1   RecoveryFlight_1   1
        Recovery_1  cost    5          RecoveryFlight_1  1
        Recovery_1  RecoveryFlight_2  1
        Recovery_2  cost    5          RecoveryFlight_2  2
        Recovery_2  Capacity_1        1
        Recovery_2  RecoveryBase_1    1
        Spare_1   cost      1          RecoveryFlight_1  1
        MARKER                 'MARKER'                 'INTEND'
    RHS
        RHS       Flight_1  1          RecoveryFlight_1  1
        RHS       RecoveryFlight_2  1  Capacity_1  4
    ENDATA
"};

pub const TAIL_TIME: &str = indoc! {"
    TIME          tail
    PERIODS       LP
        Route_1     Flight_1          STAGE-1
        Recovery_1  RecoveryFlight_1  STAGE-2
    ENDATA
"};

/// Writes `<name>.cor` and `<name>.tim` into `dir` and returns the base path.
pub fn write_instance(dir: &TempDir, name: &str, core: &str, time: &str) -> PathBuf {
    let base = dir.path().join(name);
    fs::write(base.with_extension("cor"), core).unwrap();
    fs::write(base.with_extension("tim"), time).unwrap();
    base
}

pub fn with_ext(base: &Path, ext: &str) -> PathBuf {
    base.with_extension(ext)
}

/// Weights of every ` SC ` header line.
pub fn scenario_weights(text: &str) -> Vec<f64> {
    text.lines()
        .filter(|line| line.starts_with(" SC "))
        .map(|line| line.split_whitespace().nth(3).unwrap().parse().unwrap())
        .collect()
}

/// Non-header lines of the scenario body.
pub fn perturbation_lines(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| line.starts_with("    "))
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}
