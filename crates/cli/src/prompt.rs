//! Interactive choice between candidate notes.

use color_eyre::eyre::Result;
use dialoguer::{theme::ColorfulTheme, FuzzySelect, Select};

const CANCEL: &str = "Cancel";

/// Past this many candidates the list becomes filterable.
const FUZZY_THRESHOLD: usize = 10;

/// Pick one of `candidates`. A single candidate is returned without asking.
/// `None` means the user cancelled.
pub fn pick(prompt: &str, candidates: &[String]) -> Result<Option<String>> {
    match candidates {
        [] => Ok(None),
        [only] => Ok(Some(only.clone())),
        _ => select(prompt, candidates),
    }
}

fn select(prompt: &str, candidates: &[String]) -> Result<Option<String>> {
    let mut items: Vec<&str> = candidates.iter().map(String::as_str).collect();
    items.push(CANCEL);

    let theme = ColorfulTheme::default();
    let selection = if candidates.len() > FUZZY_THRESHOLD {
        FuzzySelect::with_theme(&theme)
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact_opt()?
    } else {
        Select::with_theme(&theme)
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact_opt()?
    };

    let chosen = selection.and_then(|idx| candidates.get(idx)).cloned();
    if chosen.is_none() {
        tracing::debug!("selection cancelled");
    }
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_candidates_picks_nothing() {
        assert_eq!(pick("Select a note", &[]).unwrap(), None);
    }

    #[test]
    fn test_single_candidate_needs_no_prompt() {
        let candidates = vec!["work/meeting".to_string()];
        assert_eq!(pick("Select a note", &candidates).unwrap().as_deref(), Some("work/meeting"));
    }
}
