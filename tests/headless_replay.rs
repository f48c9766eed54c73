use stashgrid_testkit::{read_jsonl, unique_temp_path};
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn run_stashgrid(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_stashgrid"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn stashgrid")
}

#[test]
fn demo_script_replays_against_shipped_config() {
    let log = unique_temp_path("stashgrid-demo", "jsonl");
    let config = repo_path("config/stashgrid.toml");
    let script = repo_path("demos/split_and_swap.json");

    let output = run_stashgrid(&[
        "--config",
        config.to_str().unwrap(),
        "--script",
        script.to_str().unwrap(),
        "--event-log",
        log.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "stashgrid failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cell 0: 1 2\n"), "stdout:\n{stdout}");
    assert!(stdout.contains("cell 1: 0 0\n"), "stdout:\n{stdout}");
    assert!(stdout.contains("cell 12: 2 10\n"), "stdout:\n{stdout}");
    assert!(stdout.contains("cell 26: 1 8\n"), "stdout:\n{stdout}");
    assert!(stdout.trim_end().ends_with("hand: 0 0"), "stdout:\n{stdout}");

    let records = read_jsonl(&log).expect("event log readable");
    let kinds: Vec<&str> = records
        .iter()
        .map(|record| record["kind"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(
        kinds,
        [
            "applied",
            "applied",
            "applied",
            "applied",
            "applied",
            "applied",
            "unresolved",
            "rejected"
        ]
    );
    assert_eq!(records[1]["payload"]["transition"]["branch"], "deposited");
    assert_eq!(records[2]["payload"]["transition"]["branch"], "merged");
    assert_eq!(records[3]["payload"]["transition"]["branch"], "swapped");
    assert_eq!(records[3]["payload"]["cell_index"], 12);

    let _ = std::fs::remove_file(&log);
}

#[test]
fn stack_cap_from_config_limits_deposits() {
    let config = unique_temp_path("stashgrid-capped", "toml");
    let script = unique_temp_path("stashgrid-capped", "json");
    std::fs::write(
        &config,
        r#"
        [inventory]
        cell_count = 4
        max_stack = 6

        [layout]
        row_size = 2

        [[seed]]
        cell = 0
        item = 9
        amount = 6

        [[seed]]
        cell = 1
        item = 9
        amount = 4
        "#,
    )
    .expect("write config");
    std::fs::write(
        &script,
        r#"{"steps": [
            {"action": "primary", "cell": 1},
            {"action": "primary", "cell": 0},
            {"action": "secondary", "cell": 2},
            {"action": "primary", "cell": 2}
        ]}"#,
    )
    .expect("write script");

    let log = unique_temp_path("stashgrid-capped", "jsonl");
    let output = run_stashgrid(&[
        "--config",
        config.to_str().unwrap(),
        "--script",
        script.to_str().unwrap(),
        "--event-log",
        log.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "stashgrid failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // Lift cell 1, fail to merge into the full cell 0, then build cell 2 up to 4.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim_end(),
        "cell 0: 9 6\ncell 1: 0 0\ncell 2: 9 4\ncell 3: 0 0\nhand: 0 0"
    );

    let records = read_jsonl(&log).expect("event log readable");
    assert_eq!(records[1]["kind"], "rejected");
    assert!(records[1]["payload"]["error"]
        .as_str()
        .is_some_and(|err| err.contains("stack cap")));

    let _ = std::fs::remove_file(&config);
    let _ = std::fs::remove_file(&script);
    let _ = std::fs::remove_file(&log);
}

#[test]
fn invalid_script_fails_the_run() {
    let script = unique_temp_path("stashgrid-empty", "json");
    std::fs::write(&script, r#"{"steps": []}"#).expect("write script");

    let output = run_stashgrid(&["--script", script.to_str().unwrap(), "--quiet"]);
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("no steps"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let _ = std::fs::remove_file(&script);
}
