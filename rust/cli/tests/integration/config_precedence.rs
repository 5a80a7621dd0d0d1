use crate::helpers::cli_runner::{EnvGuard, run_cli};
use serial_test::serial;

fn cfg_json(res: &crate::helpers::cli_runner::CliResult) -> serde_json::Value {
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    serde_json::from_str(&res.stdout).expect("cfg prints JSON")
}

#[test]
#[serial]
fn defaults_without_file_or_env() {
    let _env = EnvGuard::apply(&[]);
    let v = cfg_json(&run_cli(&["cfg"]));
    assert_eq!(v["stand_on"]["value"], 17);
    assert_eq!(v["stand_on"]["source"], "default");
    assert_eq!(v["dealer_delay_ms"]["value"], 1000);
}

#[test]
#[serial]
fn file_then_env_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blackjack.toml");
    std::fs::write(&path, "seed = 10\nstand_on = 14\n").unwrap();
    let path_str = path.to_string_lossy().into_owned();

    let _env = EnvGuard::apply(&[
        ("BLACKJACK_CONFIG", path_str.as_str()),
        ("BLACKJACK_STAND_ON", "19"),
    ]);
    let v = cfg_json(&run_cli(&["cfg"]));
    assert_eq!(v["seed"]["value"], 10);
    assert_eq!(v["seed"]["source"], "file");
    assert_eq!(v["stand_on"]["value"], 19);
    assert_eq!(v["stand_on"]["source"], "env");
    assert_eq!(v["dealer_delay_ms"]["source"], "default");
}

#[test]
#[serial]
fn configured_seed_drives_deal() {
    let _env = EnvGuard::apply(&[("BLACKJACK_SEED", "77")]);
    let from_env = run_cli(&["deal"]);
    drop(_env);
    let _env = EnvGuard::apply(&[]);
    let explicit = run_cli(&["deal", "--seed", "77"]);
    assert_eq!(from_env.exit_code, 0);
    assert_eq!(from_env.stdout, explicit.stdout);
}

#[test]
#[serial]
fn unknown_file_key_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blackjack.toml");
    std::fs::write(&path, "decks = 6\n").unwrap();
    let path_str = path.to_string_lossy().into_owned();

    let _env = EnvGuard::apply(&[("BLACKJACK_CONFIG", path_str.as_str())]);
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid configuration"));
}

#[test]
#[serial]
fn invalid_env_fails_game_commands() {
    let _env = EnvGuard::apply(&[("BLACKJACK_STAND_ON", "40")]);
    let res = run_cli(&["sim", "--rounds", "3"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Configuration error"));
}
