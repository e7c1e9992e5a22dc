/// Burn selection parsing and the selector seam
///
/// The workflow never talks to a terminal directly: it hands the non-zero
/// account list to a `Selector` and gets back 1-based positions to act on.
/// The interactive implementation lives in `prompt`; tests script their own.
use crate::account::TokenAccountRecord;
use crate::errors::SweepError;
use crate::logger::{self, LogTag};

/// Supplies the burn selection for the non-zero accounts
pub trait Selector {
    /// Given the non-zero records, return the 1-based position indices to
    /// burn and close, in the order they should be processed
    fn select(&mut self, candidates: &[&TokenAccountRecord]) -> Vec<usize>;
}

/// Strict parse of a whitespace-separated list of 1-based positions.
/// Empty input is a valid empty selection; any non-integer token fails the
/// whole input rather than producing a partial parse.
pub fn parse_selection(input: &str) -> Result<Vec<usize>, SweepError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    trimmed
        .split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| SweepError::SelectionParse(format!("not a number: '{}'", token)))
        })
        .collect()
}

/// Parse a selection, degrading a malformed input to the empty selection.
/// The parse failure is surfaced as a warning but never aborts the session;
/// zero-balance accounts are still processed.
pub fn selection_or_empty(input: &str) -> Vec<usize> {
    match parse_selection(input) {
        Ok(indices) => indices,
        Err(e) => {
            logger::log(
                LogTag::Prompt,
                "WARNING",
                &format!("Invalid input ({}). Using only zero-balance tokens.", e),
            );
            Vec::new()
        }
    }
}
