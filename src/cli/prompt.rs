//! Interactive scan type prompt
//!
//! Tab completes the typed text to the best match and, pressed again
//! without editing, cycles through the other matches. Enter commits an
//! exact label, an unambiguous match, or the highlighted candidate.

use std::cell::RefCell;

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Completion, Confirm, Input, Select};

use crate::error::Result;
use crate::scan_types::{MatchCycle, ScanTypeCatalog, matcher};

#[derive(Debug, Default)]
struct CompleterState {
    cycle: MatchCycle,
    /// Label the last Tab put into the input line
    offered: Option<String>,
}

/// Tab completion over the catalog labels
pub struct ScanTypeCompleter<'a> {
    labels: &'a [String],
    state: RefCell<CompleterState>,
}

impl<'a> ScanTypeCompleter<'a> {
    pub fn new(labels: &'a [String]) -> Self {
        Self {
            labels,
            state: RefCell::new(CompleterState::default()),
        }
    }

    /// Highlighted position if `input` is the query being cycled or the
    /// label Tab last offered for it, otherwise 0.
    pub fn highlight_index(&self, input: &str) -> usize {
        let state = self.state.borrow();
        if state.cycle.query() == input || state.offered.as_deref() == Some(input) {
            state.cycle.index()
        } else {
            0
        }
    }
}

impl Completion for ScanTypeCompleter<'_> {
    fn get(&self, input: &str) -> Option<String> {
        let mut state = self.state.borrow_mut();

        let cycling = state.offered.as_deref() == Some(input);
        if !cycling {
            state.cycle = MatchCycle::new();
            state.cycle.set_query(input);
        }

        let matches = matcher::ranked(state.cycle.query(), self.labels);
        if matches.is_empty() {
            state.offered = None;
            return None;
        }
        if cycling {
            state.cycle.advance(matches.len());
        }

        let label = state.cycle.highlighted(&matches)?.to_string();
        state.offered = Some(label.clone());
        Some(label)
    }
}

/// What Enter on the scan type prompt leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<'a> {
    /// The input is a catalog label
    Exact(&'a str),
    /// One match stands out
    AutoSelected(&'a str),
    /// Several matches; the highlighted one is taken
    Highlighted(&'a str),
    NoMatch,
}

/// Decide what the typed text commits to.
pub fn decide<'a>(input: &str, catalog: &'a ScanTypeCatalog, highlight: usize) -> Choice<'a> {
    let input = input.trim();
    if let Some(label) = catalog.labels().iter().find(|label| label.as_str() == input) {
        return Choice::Exact(label);
    }

    let matches = matcher::ranked(input, catalog.labels());
    if matches.is_empty() {
        return Choice::NoMatch;
    }
    if let Some(label) = matcher::unique_best(&matches) {
        return Choice::AutoSelected(label);
    }

    Choice::Highlighted(matches[highlight.min(matches.len() - 1)].label)
}

/// Prompt until a scan type is chosen.
///
/// With validation off (or nothing to choose from), text matching nothing
/// may be confirmed as-is; otherwise the full catalog is offered.
pub fn choose_scan_type(catalog: &ScanTypeCatalog, validate: bool) -> Result<String> {
    let theme = ColorfulTheme::default();
    let completer = ScanTypeCompleter::new(catalog.labels());

    loop {
        let input: String = Input::with_theme(&theme)
            .with_prompt("Scan type (Tab to complete)")
            .completion_with(&completer)
            .allow_empty(true)
            .interact_text()?;
        let typed = input.trim();

        match decide(typed, catalog, completer.highlight_index(typed)) {
            Choice::Exact(label) => return Ok(label.to_string()),
            Choice::AutoSelected(label) => {
                println!("{} {}", "Auto-selected:".dimmed(), label);
                return Ok(label.to_string());
            }
            Choice::Highlighted(label) => {
                println!("{} {}", "Selected:".dimmed(), label);
                return Ok(label.to_string());
            }
            Choice::NoMatch if !validate || catalog.is_empty() => {
                let keep = Confirm::with_theme(&theme)
                    .with_prompt(format!("No known scan type matches '{}'. Use it anyway?", typed))
                    .default(false)
                    .interact()?;
                if keep {
                    return Ok(typed.to_string());
                }
            }
            Choice::NoMatch => {
                eprintln!("{}", format!("No scan type matches '{}'.", typed).yellow());
                let index = Select::with_theme(&theme)
                    .with_prompt("Scan type (choose)")
                    .items(catalog.labels())
                    .default(0)
                    .interact()?;
                return Ok(catalog.labels()[index].clone());
            }
        }
    }
}
