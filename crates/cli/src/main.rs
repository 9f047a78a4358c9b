mod cmd;
mod logging;
mod prompt;
mod render;

use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "tm",
    version,
    about = "Look up markdown notes by path and tag"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    /// Debug logging; `index` also lists every note as it is scanned
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a note section, or open a folder in the editor
    Show(QueryArgs),

    /// Edit a note, creating it when nothing matches
    Edit(QueryArgs),

    /// Rebuild the tag index
    Index,

    /// Print how a query resolves without opening anything
    Find(FindArgs),

    /// Validate configuration and print resolved paths
    Doctor,

    /// Anything else is a query: `tm work urgent` is `tm show work urgent`
    #[command(external_subcommand)]
    Query(Vec<OsString>),
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Folder segments followed by a note name or tag (e.g. "work urgent")
    pub query: Vec<String>,
}

#[derive(Debug, Args)]
pub struct FindArgs {
    /// Folder segments followed by a note name or tag
    pub query: Vec<String>,

    /// Print the resolution as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Some(Commands::Show(args)) => {
            cmd::show::run(config, profile, cli.verbose, &args.query)
        }
        Some(Commands::Edit(args)) => {
            cmd::edit::run(config, profile, cli.verbose, &args.query)
        }
        Some(Commands::Index) => cmd::index::run(config, profile, cli.verbose),
        Some(Commands::Find(args)) => cmd::find::run(config, profile, cli.verbose, args),
        Some(Commands::Doctor) => {
            cmd::doctor::run(config, profile, cli.verbose);
            Ok(())
        }
        Some(Commands::Query(words)) => {
            cmd::show::run(config, profile, cli.verbose, &lossy(words))
        }
        None => cmd::show::run(config, profile, cli.verbose, &[]),
    }
}

fn lossy(words: Vec<OsString>) -> Vec<String> {
    words.into_iter().map(|w| w.to_string_lossy().into_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tm").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_subcommand_after_global_flags() {
        let cli = parse(&["--config", "/tmp/tm.toml", "-v", "index"]);
        assert!(matches!(cli.command, Some(Commands::Index)));
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/tm.toml")));

        let cli = parse(&["--profile", "work", "doctor"]);
        assert!(matches!(cli.command, Some(Commands::Doctor)));
        assert_eq!(cli.profile.as_deref(), Some("work"));
    }

    #[test]
    fn test_find_flags_after_global_flags() {
        let cli = parse(&["--config", "c.toml", "find", "--json", "urgent"]);
        match cli.command {
            Some(Commands::Find(args)) => {
                assert!(args.json);
                assert_eq!(args.query, ["urgent"]);
            }
            other => panic!("expected find, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_words_are_a_show_query() {
        let cli = parse(&["--config", "c.toml", "work", "meeting"]);
        match cli.command {
            Some(Commands::Query(words)) => assert_eq!(lossy(words), ["work", "meeting"]),
            other => panic!("expected a query, got {other:?}"),
        }
    }

    #[test]
    fn test_no_arguments() {
        assert!(parse(&[]).command.is_none());
    }
}
