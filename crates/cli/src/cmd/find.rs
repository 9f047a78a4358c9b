//! Find command: print how a query resolves.

use std::path::Path;

use color_eyre::eyre::Result;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};
use tagmark_core::{Notebook, Resolution, ResolutionKind};

use crate::FindArgs;

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "#")]
    n: usize,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Path")]
    path: String,
}

#[derive(Debug, Serialize)]
struct FindOutput<'a> {
    query: &'a [String],
    kind: ResolutionKind,
    files: &'a [String],
}

pub fn run(
    config: Option<&Path>,
    profile: Option<&str>,
    verbose: bool,
    args: FindArgs,
) -> Result<()> {
    let nb = Notebook::new(super::load_config(config, profile, verbose)?);
    let resolution = nb.resolve(&args.query)?;

    if args.json {
        let output =
            FindOutput { query: &args.query, kind: resolution.kind, files: &resolution.files };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(&nb, &resolution);
    }
    Ok(())
}

fn print_table(nb: &Notebook, resolution: &Resolution) {
    println!("{}", resolution.kind);
    if resolution.is_nothing() {
        println!("(no matching notes)");
        return;
    }

    let rows: Vec<CandidateRow> = resolution
        .files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let path = match resolution.kind {
                ResolutionKind::Folder => nb.folder_path(file),
                _ => nb.note_path(file),
            };
            CandidateRow { n: i + 1, note: file.clone(), path: path.display().to_string() }
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
}
