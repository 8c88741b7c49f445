use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sched_replay"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch sched_replay")
}

fn assert_failed(output: &Output) {
    assert!(!output.status.success(), "{output:?}");
    assert_eq!(output.status.code(), Some(1), "{output:?}");
    assert!(!output.stderr.is_empty(), "no message on stderr");
    assert!(
        output.stdout.is_empty(),
        "stdout not empty: {}",
        String::from_utf8_lossy(&output.stdout)
    );
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sched_replay-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn missing_argument_prints_usage() {
    let output = run(&[]);
    assert_failed(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("<processes.csv>"));
}

#[test]
fn extra_arguments_are_rejected() {
    assert_failed(&run(&["a.csv", "b.csv"]));
}

#[test]
fn unreadable_file_names_the_path() {
    let path = std::env::temp_dir().join("sched_replay-does-not-exist.csv");
    let output = run(&[path.to_str().unwrap()]);
    assert_failed(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("sched_replay-does-not-exist.csv"));
}

#[test]
fn malformed_record_prints_nothing_to_stdout() {
    let path = scratch_file("malformed.csv", "1,5,0,1\n2,three,2,1\n");
    let output = run(&[path.to_str().unwrap()]);
    fs::remove_file(&path).unwrap();

    assert_failed(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 2"));
}

#[test]
fn invalid_process_fails_before_any_report() {
    let path = scratch_file("duplicate.csv", "1,5,0,1\n1,3,2,1\n");
    let output = run(&[path.to_str().unwrap()]);
    fs::remove_file(&path).unwrap();

    assert_failed(&output);
}

#[test]
fn sample_workload_prints_every_policy() {
    let sample = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/processes.csv");
    let output = run(&[sample.to_str().unwrap()]);
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let titles = [
        "First-come, first-serve",
        "Shortest-job-first (SJF)",
        "SJF with Priority scheduling",
        "Round-robin scheduling",
    ];
    let positions: Vec<usize> = titles
        .iter()
        .map(|title| stdout.find(title).unwrap_or_else(|| panic!("{title} missing")))
        .collect();
    assert!(positions.is_sorted());
    assert_eq!(stdout.matches("Gantt schedule").count(), 4);
    assert_eq!(stdout.matches("Schedule table").count(), 4);
}
