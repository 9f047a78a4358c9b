use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_logging_to_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("state").join("tm.log");

    let config_path = root.join("config.toml");
    let config_content = format!(
        r#"
version = 1
[profiles.default]
notes_root = "{}"
state_dir = "{}"

[logging]
level = "debug"
file = "{{{{state_dir}}}}/tm.log"
"#,
        root.join("notes").display(),
        root.join("state").display()
    );
    fs::write(&config_path, &config_content).unwrap();
    fs::create_dir(root.join("notes")).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tm"));
    cmd.arg("--config").arg(&config_path).arg("doctor").assert().success();

    assert!(log_file.exists(), "Log file should be created");
}

#[test]
fn test_logging_level_parsing() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let config_path = root.join("config.toml");
    let config_content = format!(
        r#"
version = 1
[profiles.default]
notes_root = "{}"
state_dir = "{}"

[logging]
level = "trace"
"#,
        root.display(),
        root.join("state").display()
    );
    fs::write(&config_path, &config_content).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tm"));
    cmd.arg("--config").arg(&config_path).arg("doctor").assert().success();
}

#[test]
fn test_verbose_flag_logs_debug_to_stderr() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let config_path = root.join("config.toml");
    let config_content = format!(
        r#"
version = 1
[profiles.default]
notes_root = "{}"
state_dir = "{}"

[logging]
level = "error"
"#,
        root.display(),
        root.join("state").display()
    );
    fs::write(&config_path, &config_content).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tm"));
    cmd.env_remove("RUST_LOG");
    cmd.arg("--config").arg(&config_path).arg("-v").arg("doctor");
    cmd.assert()
        .success()
        .stderr(predicates::str::contains("doctor: configuration loaded"));
}
