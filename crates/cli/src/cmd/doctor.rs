use std::path::Path;

use tagmark_core::config::loader::{default_config_path, ConfigLoader};
use tagmark_core::{doctor_stub, Notebook};

use crate::logging;

pub fn run(config: Option<&Path>, profile: Option<&str>, verbose: bool) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            logging::init(&rc, verbose);
            tracing::debug!(profile = %rc.active_profile, "doctor: configuration loaded");

            println!("OK   tm doctor");
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("notes_root: {}", rc.notes_root.display());
            println!("index_file: {}", rc.index_file.display());
            println!("stale_marker: {}", rc.stale_marker.display());
            println!("editor: {}", rc.editor);
            println!("index.workers: {}", rc.workers);
            println!("index.channel_capacity: {}", rc.channel_capacity);
            println!("index.skip_unreadable: {}", rc.skip_unreadable);

            let nb = Notebook::new(rc);
            if !nb.config().notes_root.is_dir() {
                println!("warning: notes_root is not a directory");
            }
            match nb.load_store() {
                Ok(store) => println!(
                    "index: {} notes, {} tags{}",
                    store.note_count(),
                    store.tag_count(),
                    if nb.marker().is_stale() { " (stale)" } else { "" }
                ),
                Err(e) => println!("index: {e}"),
            }
            println!("{}", doctor_stub());
        }
        Err(e) => {
            println!("FAIL tm doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
