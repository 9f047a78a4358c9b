//! Colorized printing of note sections.

use std::io::{self, Write};

use crossterm::style::{style, Stylize};

/// Markers that start a trailing comment. The first marker found in a line
/// wins, in this order.
const COMMENT_MARKERS: [&str; 3] = ["#", "//", "-- "];

/// Print `text` to stdout. Code-fence lines are dropped, heading and comment
/// lines are green, everything else is yellow with trailing comments green.
pub fn print_section(text: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_section(&mut out, text)?;
    out.flush()
}

fn write_section(out: &mut impl Write, text: &str) -> io::Result<()> {
    for line in text.lines() {
        if line.starts_with("```") {
            continue;
        }
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') || trimmed.starts_with("//") {
            writeln!(out, "{}", style(line).green())?;
            continue;
        }
        match split_comment(line) {
            Some((code, comment)) => {
                writeln!(out, "{}{}", style(code).yellow(), style(comment).green())?
            }
            None => writeln!(out, "{}", style(line).yellow())?,
        }
    }
    Ok(())
}

fn split_comment(line: &str) -> Option<(&str, &str)> {
    COMMENT_MARKERS.iter().find_map(|marker| line.find(marker)).map(|n| line.split_at(n))
}
