use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn diagnostics_reports_clock_source_and_summary() {
    let mut cmd = cargo_bin_cmd!("dualchrono");
    cmd.arg("--diagnostics")
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected clock source"))
        .stdout(predicate::str::contains("Benchmark summary"));
}

#[test]
fn diagnostics_honors_tick_cadence_flag() {
    let mut cmd = cargo_bin_cmd!("dualchrono");
    cmd.arg("--diagnostics")
        .arg("--tick-ms")
        .arg("100")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tick cadence: 100 ms"));
}

#[test]
fn zero_tick_cadence_fails_with_clear_error() {
    let mut cmd = cargo_bin_cmd!("dualchrono");
    cmd.arg("--diagnostics")
        .arg("--tick-ms")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--tick-ms must be between"));
}

#[test]
fn unknown_language_is_rejected_by_the_parser() {
    let mut cmd = cargo_bin_cmd!("dualchrono");
    cmd.arg("--diagnostics")
        .arg("--lang")
        .arg("fr")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
