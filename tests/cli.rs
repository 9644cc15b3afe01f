//! End-to-end tests that run the compiled binary.
//!
//! These exercise argument parsing, config discovery in the working
//! directory, and exit codes; pixel work is covered by resize_pipeline.
//!
//! Run with: cargo test --test cli

use std::process::Command;

use tempfile::TempDir;

fn reframe() -> Command {
    Command::new(env!("CARGO_BIN_EXE_reframe"))
}

#[test]
fn gen_config_ignores_a_broken_config_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("reframe.toml"), "not = [valid").unwrap();

    let out = reframe()
        .arg("gen-config")
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "gen-config failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[geometry]"));
    assert!(stdout.contains("[render]"));
}

#[test]
fn a_broken_config_still_fails_the_resolving_commands() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("reframe.toml"), "not = [valid").unwrap();

    let out = reframe()
        .args(["plan", "--size", "100x100"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[test]
fn plan_picks_up_the_local_config() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("reframe.toml"),
        "[geometry]\nratio = \"square\"\n",
    )
    .unwrap();

    let out = reframe()
        .args(["plan", "--size", "1000x500"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "plan failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Target: 500x500"), "stdout: {stdout}");
}
