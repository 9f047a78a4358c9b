//! Show command implementation.

use std::path::Path;

use color_eyre::eyre::{bail, Result};
use tagmark_core::{Notebook, ResolutionKind};

use crate::{prompt, render};

/// Sections start at lines beginning with this.
const SECTION_DELIM: &str = "## ";

/// Sections this long or longer open in the editor instead.
const MAX_PRINT_LINES: usize = 30;

pub fn run(
    config: Option<&Path>,
    profile: Option<&str>,
    verbose: bool,
    query: &[String],
) -> Result<()> {
    let nb = Notebook::new(super::load_config(config, profile, verbose)?);

    let resolution = nb.resolve(query)?;
    tracing::debug!(kind = %resolution.kind, files = ?resolution.files, "resolved query");

    match resolution.kind {
        ResolutionKind::Nothing => bail!("no matching notes: {}", query.join(" ")),
        ResolutionKind::Folder => match resolution.files.first() {
            Some(folder) => super::open_editor(&nb.config().editor, &nb.folder_path(folder)),
            None => Ok(()),
        },
        ResolutionKind::File | ResolutionKind::TagFile | ResolutionKind::TagFiles => {
            show_note(&nb, &resolution.files)
        }
    }
}

fn show_note(nb: &Notebook, candidates: &[String]) -> Result<()> {
    let Some(note) = prompt::pick("Select a note", candidates)? else {
        return Ok(());
    };

    let text = nb.read_section(&note, SECTION_DELIM)?;
    if text.lines().count() < MAX_PRINT_LINES {
        render::print_section(&text)?;
        Ok(())
    } else {
        super::open_editor(&nb.config().editor, &nb.note_path(&note))
    }
}
