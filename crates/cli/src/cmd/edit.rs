//! Edit command implementation.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{bail, Result, WrapErr};
use tagmark_core::{Notebook, ResolutionKind};

use crate::prompt;

/// Appended to the "create a new note" choice among tag matches.
const NEW_NOTE_MARK: &str = "(NEW)";

pub fn run(
    config: Option<&Path>,
    profile: Option<&str>,
    verbose: bool,
    query: &[String],
) -> Result<()> {
    let nb = Notebook::new(super::load_config(config, profile, verbose)?);

    let segments: Vec<&str> =
        query.iter().flat_map(|s| s.split('/')).filter(|s| !s.is_empty()).collect();
    let joined = segments.join("/");
    if joined.is_empty() {
        bail!("nothing to edit: give a note path");
    }
    if segments.iter().any(|s| matches!(*s, "." | "..")) {
        bail!("note path must stay inside the notes root: {joined}");
    }

    let resolution = nb.resolve(query)?;
    tracing::debug!(kind = %resolution.kind, files = ?resolution.files, "resolved query");

    let note = match resolution.kind {
        ResolutionKind::Folder => bail!("{joined} is a folder and cannot be edited"),
        ResolutionKind::Nothing => joined,
        ResolutionKind::File => resolution.files.into_iter().next().unwrap_or(joined),
        ResolutionKind::TagFile | ResolutionKind::TagFiles => {
            let mut candidates = resolution.files;
            candidates.push(format!("{joined}{NEW_NOTE_MARK}"));
            match prompt::pick("Select a note to edit", &candidates)? {
                Some(choice) => match choice.strip_suffix(NEW_NOTE_MARK) {
                    Some(new) => new.to_string(),
                    None => choice,
                },
                None => return Ok(()),
            }
        }
    };

    let path = nb.note_path(&note);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create folder {}", parent.display()))?;
    }

    super::open_editor(&nb.config().editor, &path)?;
    nb.mark_edited()?;
    tracing::debug!(note = %note, "note edited, index marked stale");
    Ok(())
}
