mod common;

use common::*;
use pretty_assertions::assert_eq;
use smpsgen::io::scenario_file_text;
use smpsgen::{
    build_model, manifest_path_for, synthesize, synthesize_with, write_manifest,
    write_scenario_file, write_stage_file, CoefficientRule, GenerationOutcome, Instance,
    InstancePaths, Perturbation, PerturbationKind, ProblemClass, ReadOptions,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn tail_model(dir: &TempDir) -> smpsgen::Model {
    let base = write_instance(dir, "tail", TAIL_CORE, TAIL_TIME);
    build_model(&with_ext(&base, "cor"), &with_ext(&base, "tim")).unwrap()
}

#[test]
fn test_rhs_two_scenarios_end_to_end() {
    let dir = TempDir::new().unwrap();
    let base = write_instance(&dir, "sslp", SSLP_CORE, SSLP_TIME);
    let model = build_model(&with_ext(&base, "cor"), &with_ext(&base, "tim")).unwrap();
    let out = dir.path().join("sslp_2.sto");

    let outcome =
        write_scenario_file(ProblemClass::Sslp, &model, 2, PerturbationKind::Rhs, &out).unwrap();
    assert_eq!(outcome, GenerationOutcome::Written { entries: 2 });

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("STOCH\nSCENARIOS     DISCRETE\n"));
    assert!(text.ends_with("ENDATA\n"));

    let headers: Vec<&str> = text.lines().filter(|l| l.starts_with(" SC ")).collect();
    assert_eq!(
        headers,
        vec![
            " SC SCEN1      ROOT         0.5        STAGE-2",
            " SC SCEN2      ROOT         0.5        STAGE-2",
        ]
    );

    let entries = perturbation_lines(&text);
    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert_eq!(entry[0], "RHS");
        assert_eq!(entry[1], "c2_1");
        assert!(entry[2] == "0" || entry[2] == "1", "value {}", entry[2]);
    }
}

#[test]
fn test_coefficient_flip_certain() {
    let dir = TempDir::new().unwrap();
    let model = tail_model(&dir);
    let rule = Perturbation::Coefficient(CoefficientRule {
        constraint_prefix: "RecoveryFlight",
        variable_prefix: "Recovery",
        flip_probability: 1.0,
    });

    let block = synthesize_with(&model, 3, &rule).unwrap();
    let entries = perturbation_lines(&block.text);

    // Unit coefficients of Recovery* columns on RecoveryFlight* rows, per scenario;
    // Recovery_2 has coefficient 2 there, Route_1 and Spare_1 are filtered out.
    let expected = vec![
        vec!["Recovery_1", "RecoveryFlight_1", "0"],
        vec!["Recovery_1", "RecoveryFlight_2", "0"],
    ];
    assert_eq!(entries.len(), 6);
    for scenario in entries.chunks(2) {
        assert_eq!(scenario, expected.as_slice());
    }
    assert_eq!(block.perturbations, 6);
}

#[test]
fn test_coefficient_flip_never() {
    let dir = TempDir::new().unwrap();
    let model = tail_model(&dir);
    let rule = Perturbation::Coefficient(CoefficientRule {
        constraint_prefix: "RecoveryFlight",
        variable_prefix: "Recovery",
        flip_probability: 0.0,
    });

    let block = synthesize_with(&model, 4, &rule).unwrap();
    assert!(perturbation_lines(&block.text).is_empty());
    assert_eq!(scenario_weights(&block.text), vec![0.25; 4]);
    assert_eq!(block.text.lines().count(), 4);
}

#[test]
fn test_objective_perturbation_only_touches_recovery_columns() {
    let dir = TempDir::new().unwrap();
    let model = tail_model(&dir);

    let block = synthesize(ProblemClass::RRTailAssign, &model, 200, PerturbationKind::Obj).unwrap();
    let entries = perturbation_lines(&block.text);

    assert!(!entries.is_empty());
    for entry in &entries {
        assert!(entry[0].starts_with("Recovery"), "{:?}", entry);
        assert_eq!(entry[1], "cost");
        let value: f64 = entry[2].parse().unwrap();
        assert!(value >= 100.0 && value % 100.0 == 0.0);
    }
}

#[test]
fn test_unsupported_kind_writes_empty_body() {
    let dir = TempDir::new().unwrap();
    let base = write_instance(&dir, "sslp", SSLP_CORE, SSLP_TIME);
    let model = build_model(&with_ext(&base, "cor"), &with_ext(&base, "tim")).unwrap();
    let out = dir.path().join("sslp_5.sto");

    let outcome =
        write_scenario_file(ProblemClass::Snip, &model, 5, PerturbationKind::Coef, &out).unwrap();

    assert!(matches!(outcome, GenerationOutcome::NotImplemented { .. }));
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "STOCH\nSCENARIOS     DISCRETE\nENDATA\n"
    );
}

#[test]
fn test_same_count_reproduces_file() {
    let dir = TempDir::new().unwrap();
    let model = tail_model(&dir);
    let first = dir.path().join("first.sto");
    let second = dir.path().join("second.sto");

    for out in [&first, &second] {
        write_scenario_file(ProblemClass::RRTailAssign, &model, 40, PerturbationKind::Obj, out)
            .unwrap();
    }

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_scenario_file_text_wraps_block() {
    let dir = TempDir::new().unwrap();
    let model = tail_model(&dir);
    let block = synthesize(ProblemClass::RRTailAssign, &model, 2, PerturbationKind::Coef).unwrap();
    let text = scenario_file_text(&block.text);

    assert_eq!(scenario_weights(&text), vec![0.5, 0.5]);
    assert!(text.ends_with("ENDATA\n"));
}

#[test]
fn test_tail_assignment_headers_differ_by_class() {
    let dir = TempDir::new().unwrap();
    let model = tail_model(&dir);

    let recoverable =
        synthesize(ProblemClass::RRTailAssign, &model, 2, PerturbationKind::Obj).unwrap();
    let plain = synthesize(ProblemClass::TailAssign, &model, 2, PerturbationKind::Obj).unwrap();

    let first_header = |text: &str| text.lines().next().unwrap().to_string();
    assert_eq!(
        first_header(&recoverable.text),
        " SC SCEN1      ROOT         0.5        STAGE-2        0.0"
    );
    assert_eq!(
        first_header(&plain.text),
        " SC SCEN1      ROOT         0.5        STAGE-2"
    );
}

fn flip_count(class: ProblemClass, model: &smpsgen::Model, scenarios: usize) -> usize {
    synthesize(class, model, scenarios, PerturbationKind::Coef)
        .unwrap()
        .perturbations
}

#[test]
fn test_flip_rates_are_class_specific() {
    let dir = TempDir::new().unwrap();
    let model = tail_model(&dir);

    // Unit coefficients on RecoveryFlight rows: 2 per scenario.
    // Any Recovery row adds Recovery_2 on RecoveryBase_1: 3 per scenario.
    let recoverable = flip_count(ProblemClass::RRTailAssign, &model, 2000);
    let plain = flip_count(ProblemClass::TailAssign, &model, 2000);

    assert!(
        (10..90).contains(&recoverable),
        "{} of 4000 flipped at 1%",
        recoverable
    );
    assert!(
        (200..420).contains(&plain),
        "{} of 6000 flipped at 5%",
        plain
    );
}

#[test]
fn test_plain_tail_assignment_selects_all_recovery_rows() {
    let dir = TempDir::new().unwrap();
    let model = tail_model(&dir);

    let block = synthesize(ProblemClass::TailAssign, &model, 500, PerturbationKind::Coef).unwrap();
    let entries = perturbation_lines(&block.text);
    for entry in &entries {
        assert!(entry[0].starts_with("Recovery"), "{:?}", entry);
        assert!(entry[1].starts_with("Recovery"), "{:?}", entry);
        assert_eq!(entry[2], "0");
    }
    assert!(entries.iter().any(|entry| entry[1] == "RecoveryBase_1"));

    let rhs = synthesize(ProblemClass::TailAssign, &model, 3, PerturbationKind::Rhs).unwrap();
    // Every second-stage row, RecoveryFlight_1 through RecoveryBase_1, per scenario
    assert_eq!(rhs.perturbations, 12);
}

#[test]
fn test_stage_file_from_core() {
    let dir = TempDir::new().unwrap();
    let base = write_instance(&dir, "sslp", SSLP_CORE, SSLP_TIME);
    let model = smpsgen::parse_core_file(&with_ext(&base, "cor")).unwrap();
    let out = dir.path().join("generated.tim");

    let outcome = write_stage_file(ProblemClass::Sslp, &model, &out).unwrap();

    assert_eq!(outcome, GenerationOutcome::Written { entries: 2 });
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "TIME\nPERIODS   LP\n     x_1     c1     STAGE-1\n     y_1_1     c2_1     STAGE-2\nENDATA\n"
    );

    // The generated file reads back to the same boundaries
    let periods = smpsgen::parse_stage_file(&out).unwrap();
    assert_eq!(periods[1].first_variable, "y_1_1");
    assert_eq!(periods[1].first_constraint, "c2_1");
}

#[test]
fn test_stage_file_without_rule_is_header_only() {
    let dir = TempDir::new().unwrap();
    let model = tail_model(&dir);
    let out = dir.path().join("tail.tim");

    let outcome = write_stage_file(ProblemClass::RRTailAssign, &model, &out).unwrap();

    assert!(!outcome.is_written());
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "TIME\nPERIODS   LP\nENDATA\n"
    );
}

#[test]
fn test_manifest_lists_bundle() {
    let dir = TempDir::new().unwrap();
    let scenario = dir.path().join("instA_10.sto");
    let manifest = manifest_path_for(&scenario);
    assert_eq!(manifest, dir.path().join("instA_10.smps"));

    write_manifest(
        Path::new("instA.cor"),
        Path::new("instA.tim"),
        Path::new("instA_10.sto"),
        &manifest,
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        "instA.cor\ninstA.tim\ninstA_10.sto\n"
    );
}

#[test]
fn test_instance_full_bundle() {
    let dir = TempDir::new().unwrap();
    let base = write_instance(&dir, "sslp", SSLP_CORE, SSLP_TIME);
    let name = base.to_string_lossy().into_owned();

    let mut instance = Instance::from_paths(
        ProblemClass::Sslp,
        InstancePaths::for_instance(&name, Some(3), None),
    );
    instance
        .read(ReadOptions {
            core: true,
            stage: true,
        })
        .unwrap();
    instance.write_scenario_file(3, PerturbationKind::Rhs).unwrap();
    let manifest = instance.write_manifest().unwrap();

    assert_eq!(manifest, dir.path().join("sslp_3.smps"));
    let listed: Vec<String> = fs::read_to_string(&manifest)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(
        listed,
        vec![
            format!("{}.cor", name),
            format!("{}.tim", name),
            format!("{}_3.sto", name),
        ]
    );
    assert!(dir.path().join("sslp_3.sto").exists());
}
