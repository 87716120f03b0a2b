use serde_json::Value;
use std::process::{Command, Output};

fn queue_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_queue_sim"))
        .args(args)
        .output()
        .expect("run queue_sim")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is a JSON report")
}

#[test]
fn queue_sim_prints_average_and_mm1_expectation() {
    let output = queue_sim(&["--lambd", "0.5", "--max-t", "5000"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Average time spent in the system:"));
    assert!(stdout.contains("Theoretical expectation for random server choice (d=1): 2"));
}

#[test]
fn queue_sim_json_report_is_reproducible() {
    let args = [
        "--lambd", "0.8", "--n", "10", "--d", "2", "--max-t", "500", "--seed", "7", "--json",
    ];
    let a = stdout_json(&queue_sim(&args));
    let b = stdout_json(&queue_sim(&args));
    assert_eq!(a, b);
    assert_eq!(a["config"]["servers"], 10);
    assert_eq!(a["config"]["choices"], 2);
    assert!(a["jobs_completed"].as_u64().is_some_and(|n| n > 0));
    assert!(a["deadline_misses"].is_null());
}

#[test]
fn queue_sim_edf_without_deadline_flag_reports_deadline_stats() {
    let output = queue_sim(&[
        "--lambd", "0.9", "--n", "4", "--d", "2", "--max-t", "1000", "--discipline", "edf",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deadline misses / Total jobs:"));
    assert!(stdout.contains("Deadline miss rate:"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("switching to deadline mode"));
}

#[test]
fn queue_sim_rejects_invalid_configuration() {
    for args in [
        &["--lambd", "0"][..],
        &["--n", "2", "--d", "3"][..],
        &["--distribution", "pareto"][..],
    ] {
        let output = queue_sim(args);
        assert_eq!(output.status.code(), Some(2), "args {args:?}");
        assert!(String::from_utf8_lossy(&output.stderr).contains("error"));
    }
}

#[test]
fn queue_sim_prints_tail_fractions() {
    let output = queue_sim(&[
        "--lambd", "0.7", "--n", "20", "--d", "2", "--max-t", "500", "--tail-len", "3",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines = stdout
        .lines()
        .filter(|line| line.starts_with("queue_len>="))
        .count();
    assert_eq!(lines, 3);
}
