use crate::helpers::cli_runner::{EnvGuard, run_cli};
use serial_test::serial;

#[test]
#[serial]
fn deal_is_reproducible_from_seed() {
    let _env = EnvGuard::apply(&[]);
    let a = run_cli(&["deal", "--seed", "2024"]);
    let b = run_cli(&["deal", "--seed", "2024"]);
    assert_eq!(a.exit_code, 0, "stderr: {}", a.stderr);
    assert_eq!(a.stdout, b.stdout);
    assert!(a.stdout.contains("Player: ["));
}

#[test]
#[serial]
fn play_with_zero_delay_settles() {
    let _env = EnvGuard::apply(&[]);
    let res = run_cli(&["play", "--seed", "11", "--delay-ms", "0"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.trim_end().lines().last().unwrap().starts_with("Result: "));
}

#[test]
fn missing_required_argument_exits_2() {
    let res = run_cli(&["sim"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("--rounds"));
}

#[test]
fn stats_on_missing_file_reports_error() {
    let res = run_cli(&["stats", "--input", "/definitely/not/here.jsonl"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Error: "));
}

#[test]
#[serial]
fn sim_rejects_zero_rounds() {
    let _env = EnvGuard::apply(&[]);
    let res = run_cli(&["sim", "--rounds", "0"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("rounds must be >= 1"));
}
