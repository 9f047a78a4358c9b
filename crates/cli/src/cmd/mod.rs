pub mod doctor;
pub mod edit;
pub mod find;
pub mod index;
pub mod show;

use std::path::Path;
use std::process::Command;

use color_eyre::eyre::{bail, Result, WrapErr};
use tagmark_core::config::loader::ConfigLoader;
use tagmark_core::config::ResolvedConfig;

use crate::logging;

/// Load the configuration and start logging.
pub(crate) fn load_config(
    config: Option<&Path>,
    profile: Option<&str>,
    verbose: bool,
) -> Result<ResolvedConfig> {
    let rc = ConfigLoader::load(config, profile)
        .wrap_err("failed to load configuration (run `tm doctor` to diagnose)")?;
    logging::init(&rc, verbose);
    Ok(rc)
}

/// Run the configured editor on `target` and wait for it.
///
/// The editor setting may carry arguments, e.g. `code --wait`.
pub(crate) fn open_editor(editor: &str, target: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("no editor configured");
    };

    tracing::debug!(editor, target = %target.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(target)
        .status()
        .wrap_err_with(|| format!("failed to launch editor '{editor}'"))?;

    if !status.success() {
        bail!("editor exited with status: {status}");
    }
    Ok(())
}
