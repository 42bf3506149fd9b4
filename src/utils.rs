//! Shared helpers for anchor derivation and warning presentation.
use log::warn;
use regex::Regex;

use crate::types::Warning;

/// Slugify a heading title for use as an anchor ID.
/// Converts to lowercase, replaces non-alphanumeric characters with dashes,
/// and trims leading/trailing dashes.
///
/// The external renderer derives its generated anchors with this same
/// function; keeping a single implementation is what keeps indexed anchors
/// and real in-page anchors in lockstep.
#[must_use]
pub fn slugify(text: &str) -> String {
  text
    .to_lowercase()
    .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "-")
    .trim_matches('-')
    .to_string()
}

/// Create a regex that never matches anything.
///
/// Used as a fallback when one of the crate's compiled patterns fails to
/// build: a broken pattern degrades to "no matches" instead of aborting
/// generation.
///
/// # Panics
///
/// Panics if the pattern `r"[^\s\S]"` fails to compile, which should never
/// happen.
#[must_use]
pub fn never_matching_regex() -> Regex {
  // The character class asserts something impossible, so the pattern is
  // valid yet can match no input.
  #[allow(
    clippy::expect_used,
    reason = "This pattern is guaranteed to be valid"
  )]
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}

/// Forward a batch of warnings to the `log` facade, one line each.
///
/// Convenience for hosts that surface diagnostics through their logger;
/// callers wanting a report object consume the slice directly instead.
pub fn log_warnings(warnings: &[Warning]) {
  for warning in warnings {
    warn!("{warning}");
  }
}
