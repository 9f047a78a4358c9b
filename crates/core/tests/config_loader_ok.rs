use std::fs;
use std::path::PathBuf;
use tagmark_core::config::loader::ConfigLoader;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_default_profile_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
notes_root = "/tmp/notes"
state_dir = "/tmp/state"
excluded_folders = ["{{notes_root}}/archive", "drafts"]
editor = "nano"

[index]
workers = 3
channel_capacity = 16
skip_unreadable = true
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.notes_root.display().to_string(), "/tmp/notes");
    assert_eq!(rc.index_file.display().to_string(), "/tmp/state/index");
    assert_eq!(rc.stale_marker.display().to_string(), "/tmp/state/update-index");
    assert_eq!(
        rc.excluded_folders,
        [PathBuf::from("/tmp/notes/archive"), PathBuf::from("drafts")]
    );
    assert_eq!(rc.editor, "nano");
    assert_eq!(rc.workers, 3);
    assert_eq!(rc.channel_capacity, 16);
    assert!(rc.skip_unreadable);
}

#[test]
fn load_with_profile_override_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("tagmark/config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
notes_root = "/tmp/def"
state_dir = "/tmp/def-state"

[profiles.work]
notes_root = "/tmp/work"
state_dir = "/tmp/work-state"
index_file = "{{state_dir}}/work.index"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), Some("work")).expect("should load");
    assert_eq!(rc.active_profile, "work");
    assert_eq!(rc.notes_root.display().to_string(), "/tmp/work");
    assert_eq!(rc.index_file.display().to_string(), "/tmp/work-state/work.index");
}

#[test]
fn index_section_defaults() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(
        &cfg_path,
        "version = 1\n[profiles.default]\nnotes_root = \"/n\"\nstate_dir = \"/s\"\n",
    );

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert!(rc.workers >= 1);
    assert_eq!(rc.channel_capacity, 256);
    assert!(!rc.skip_unreadable);
    assert_eq!(rc.logging.level, "info");
    assert!(rc.logging.file.is_none());
}

#[test]
fn log_file_is_substituted() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
[profiles.default]
notes_root = "/n"
state_dir = "/s"

[logging]
level = "warn"
file = "{{state_dir}}/tm.log"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.logging.level, "warn");
    assert_eq!(rc.logging.file, Some(PathBuf::from("/s/tm.log")));
}
