use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

struct Fixture {
    dir: TempDir,
    config: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let notes = dir.path().join("notes");
        write_file(
            &notes.join("work/meeting.md"),
            "tags: project, urgent\n## Agenda\nreview budget\n## Notes\nlater\n",
        );
        write_file(&notes.join("personal/diary.md"), "dear diary\n");
        write_file(&notes.join("a.md"), "tags: projects\n");
        write_file(&notes.join("b.md"), "tags: side_projects\n");

        let config = dir.path().join("config.toml");
        write_file(
            &config,
            &format!(
                r#"
version = 1
[profiles.default]
notes_root = "{}"
state_dir = "{}"
editor = "true"

[index]
workers = 2
"#,
                notes.display(),
                dir.path().join("state").display()
            ),
        );
        Self { dir, config }
    }

    fn tm(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tm"));
        cmd.env_remove("RUST_LOG");
        cmd.arg("--config").arg(&self.config);
        cmd
    }

    fn state(&self, name: &str) -> PathBuf {
        self.dir.path().join("state").join(name)
    }
}

#[test]
fn index_then_find_json() {
    let fx = Fixture::new();

    fx.tm()
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexing complete:"))
        .stdout(predicate::str::contains("Notes indexed:  3"));

    let index = fs::read_to_string(fx.state("index")).unwrap();
    assert!(index.contains("work/meeting,project,urgent"));
    assert!(!index.contains("diary"));

    fx.tm()
        .args(["find", "--json", "urgent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"TAG_FILE\""))
        .stdout(predicate::str::contains("\"work/meeting\""));
}

#[test]
fn find_builds_missing_index() {
    let fx = Fixture::new();
    assert!(!fx.state("index").exists());

    fx.tm()
        .args(["find", "proj"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TAG_FILES"))
        .stdout(predicate::str::contains("a.md"))
        .stdout(predicate::str::contains("b.md"))
        .stdout(predicate::str::contains("work/meeting"));

    assert!(fx.state("index").exists());
}

#[test]
fn find_reports_nothing() {
    let fx = Fixture::new();

    fx.tm()
        .args(["find", "diary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NOTHING"))
        .stdout(predicate::str::contains("(no matching notes)"));
}

#[test]
fn bare_query_prints_first_section() {
    let fx = Fixture::new();

    fx.tm()
        .args(["work", "meeting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("review budget"))
        .stdout(predicate::str::contains("later").not());
}

#[test]
fn show_tag_with_single_match() {
    let fx = Fixture::new();

    fx.tm()
        .args(["show", "urgent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("review budget"));
}

#[test]
fn show_without_match_fails() {
    let fx = Fixture::new();

    fx.tm()
        .args(["show", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no matching notes"));
}

#[test]
fn edit_new_note_marks_index_stale() {
    let fx = Fixture::new();
    fx.tm().arg("index").assert().success();
    assert!(!fx.state("update-index").exists());

    fx.tm().args(["edit", "inbox/todo"]).assert().success();

    assert!(fx.state("update-index").exists());
    assert!(fx.dir.path().join("notes/inbox").is_dir());
}

#[test]
fn edit_folder_fails() {
    let fx = Fixture::new();

    fx.tm()
        .args(["edit", "work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is a folder"));
    assert!(!fx.state("update-index").exists());
}
