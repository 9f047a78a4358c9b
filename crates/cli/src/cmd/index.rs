//! Index command implementation.

use std::io::Write;
use std::path::Path;

use color_eyre::eyre::Result;
use tagmark_core::index::ProgressCallback;
use tagmark_core::Notebook;

/// Run the index command.
pub fn run(config: Option<&Path>, profile: Option<&str>, verbose: bool) -> Result<()> {
    let nb = Notebook::new(super::load_config(config, profile, verbose)?);
    let rc = nb.config();

    println!("Indexing notes: {}", rc.notes_root.display());

    let progress: ProgressCallback = if verbose {
        Box::new(|current, total, path| {
            println!("[{}/{}] {}", current, total, path);
        })
    } else {
        Box::new(|current, total, _path| {
            if current % 50 == 0 || current == total {
                print!("\rIndexing... {}/{}", current, total);
                std::io::stdout().flush().ok();
            }
        })
    };

    let stats = nb.rebuild(Some(progress))?;

    if !verbose {
        println!();
    }
    println!();
    println!("Indexing complete:");
    println!("  Files found:    {}", stats.files_found);
    println!("  Notes indexed:  {}", stats.notes_indexed);
    if stats.notes_skipped > 0 {
        println!("  Notes skipped:  {}", stats.notes_skipped);
    }
    println!("  Duration:       {}ms", stats.duration_ms);
    println!();
    println!("Index stored at: {}", rc.index_file.display());
    Ok(())
}
