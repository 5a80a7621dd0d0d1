use crate::helpers::cli_runner::{EnvGuard, run_cli};
use blackjack_engine::logger::RoundRecord;
use serial_test::serial;

#[test]
#[serial]
fn sim_then_stats_then_verify() {
    let _env = EnvGuard::apply(&[]);
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("logs").join("rounds.jsonl");
    let log_str = log.to_string_lossy().into_owned();

    let sim = run_cli(&["sim", "--rounds", "150", "--seed", "5", "--output", &log_str]);
    assert_eq!(sim.exit_code, 0, "stderr: {}", sim.stderr);
    assert!(sim.stdout.starts_with("Simulated: 150 rounds"));

    let content = std::fs::read_to_string(&log).unwrap();
    assert!(!content.contains('\r'));
    assert_eq!(content.lines().count(), 150);

    let stats = run_cli(&["stats", "--input", &log_str]);
    assert_eq!(stats.exit_code, 0, "stderr: {}", stats.stderr);
    let v: serde_json::Value = serde_json::from_str(&stats.stdout).unwrap();
    assert_eq!(v["rounds"], 150);
    let winners = &v["winners"];
    let total = winners["player"].as_u64().unwrap()
        + winners["dealer"].as_u64().unwrap()
        + winners["nobody"].as_u64().unwrap();
    assert_eq!(total, 150);

    let verify = run_cli(&["verify", "--input", &log_str]);
    assert_eq!(verify.exit_code, 0, "stderr: {}", verify.stderr);
    assert!(verify.stdout.contains("Verify: OK (rounds=150)"));
}

#[test]
#[serial]
fn verify_flags_a_tampered_log() {
    let _env = EnvGuard::apply(&[]);
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("rounds.jsonl");
    let log_str = log.to_string_lossy().into_owned();
    assert_eq!(
        run_cli(&["sim", "--rounds", "10", "--seed", "1", "--output", &log_str]).exit_code,
        0
    );

    let content = std::fs::read_to_string(&log).unwrap();
    let mut records: Vec<RoundRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    records[4].dealer.swap(0, 1);
    let rewritten: String = records
        .iter()
        .map(|r| serde_json::to_string(r).unwrap() + "\n")
        .collect();
    std::fs::write(&log, rewritten).unwrap();

    let verify = run_cli(&["verify", "--input", &log_str]);
    assert_eq!(verify.exit_code, 2);
    assert!(verify.stdout.contains("Verify: FAIL"));
    assert!(verify.stderr.contains("Round 5: Seed"));
}

#[test]
#[serial]
fn stats_reads_compressed_logs_in_directories() {
    let _env = EnvGuard::apply(&[]);
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("a.jsonl");
    let plain_str = plain.to_string_lossy().into_owned();
    assert_eq!(
        run_cli(&["sim", "--rounds", "20", "--seed", "9", "--output", &plain_str]).exit_code,
        0
    );
    let compressed = zstd::bulk::compress(&std::fs::read(&plain).unwrap(), 3).unwrap();
    std::fs::write(dir.path().join("b.jsonl.zst"), compressed).unwrap();

    let dir_str = dir.path().to_string_lossy().into_owned();
    let stats = run_cli(&["stats", "--input", &dir_str]);
    assert_eq!(stats.exit_code, 0, "stderr: {}", stats.stderr);
    let v: serde_json::Value = serde_json::from_str(&stats.stdout).unwrap();
    assert_eq!(v["rounds"], 40);
}
