//! Link integrity checking over one fully rendered HTML page.
//!
//! Extraction scans the generated HTML with compiled patterns rather than a
//! structural parse: the input is self-generated and structurally
//! constrained, so a closed tag set and double-quoted attributes are a safe
//! assumption. Everything in this module is advisory; the page is never
//! mutated and nothing here fails.
use std::sync::LazyLock;

use indexmap::IndexSet;
use log::{error, trace};
use regex::Regex;

use crate::{distance::levenshtein, types::Warning, utils};

/// Fragment reserved for the layout's back-to-top link. The page chrome
/// defines the target outside the checked content, so references to it are
/// never reported.
pub const NAV_FRAGMENT: &str = "top";

/// `id` attributes on the closed set of anchor-carrying elements: headings,
/// footnote paragraphs and superscripts, footnote list items and their
/// backref anchors, and inline-anchor spans. The `\s` before `id` keeps
/// `data-id` and friends out.
static ANCHOR_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"<(?:h[1-6]|p|sup|li|span|a)\b[^>]*?\sid="([^"]+)""#)
    .unwrap_or_else(|e| {
      error!("Failed to compile ANCHOR_ID_RE regex: {e}");
      utils::never_matching_regex()
    })
});

/// Hyperlinks whose href is a same-page fragment.
static FRAGMENT_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r##"<a\b[^>]*?\shref="#([^"]+)""##).unwrap_or_else(|e| {
    error!("Failed to compile FRAGMENT_HREF_RE regex: {e}");
    utils::never_matching_regex()
  })
});

/// Extract every anchor defined in a rendered page.
///
/// Returns the anchor set together with one [`Warning::DuplicateId`] per
/// repeated occurrence, in scan order. The first occurrence of an ID stays
/// the resolvable one; scanning continues past duplicates.
#[must_use]
pub fn extract_anchors(html: &str) -> (IndexSet<String>, Vec<Warning>) {
  let mut anchors = IndexSet::new();
  let mut warnings = Vec::new();

  for caps in ANCHOR_ID_RE.captures_iter(html) {
    let id = &caps[1];
    if !anchors.insert(id.to_string()) {
      warnings.push(Warning::DuplicateId { id: id.to_string() });
    }
  }

  trace!("Extracted {} anchors", anchors.len());
  (anchors, warnings)
}

/// Extract same-page fragment references in document order.
///
/// The reserved [`NAV_FRAGMENT`] target is excluded; every other
/// occurrence is kept, repeats included.
#[must_use]
pub fn extract_fragment_refs(html: &str) -> Vec<String> {
  FRAGMENT_HREF_RE
    .captures_iter(html)
    .map(|caps| caps[1].to_string())
    .filter(|fragment| fragment != NAV_FRAGMENT)
    .collect()
}

/// Check one fully rendered page for duplicate anchors and broken fragment
/// links.
///
/// Every reference that does not resolve against the page's anchors yields
/// a [`Warning::BrokenLink`] carrying the closest defined anchor by edit
/// distance, or no suggestion when the page defines no anchors at all.
#[must_use]
pub fn check_page(html: &str) -> Vec<Warning> {
  let (anchors, mut warnings) = extract_anchors(html);

  for fragment in extract_fragment_refs(html) {
    if anchors.contains(&fragment) {
      continue;
    }
    let suggestion =
      closest_anchor(&anchors, &fragment).map(ToString::to_string);
    warnings.push(Warning::BrokenLink {
      fragment,
      suggestion,
    });
  }

  warnings
}

/// Closest anchor to `fragment` by edit distance.
///
/// Ties keep the anchor defined earliest in the page: the set iterates in
/// first-inserted order and a candidate only replaces the current best on a
/// strictly smaller distance, which keeps suggestions reproducible.
fn closest_anchor<'a>(
  anchors: &'a IndexSet<String>,
  fragment: &str,
) -> Option<&'a str> {
  let mut best: Option<(&str, usize)> = None;

  for anchor in anchors {
    let distance = levenshtein(fragment, anchor);
    if best.is_none_or(|(_, current)| distance < current) {
      best = Some((anchor, distance));
    }
  }

  best.map(|(anchor, _)| anchor)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_closest_anchor_prefers_first_defined_on_tie() {
    let mut anchors = IndexSet::new();
    anchors.insert("ab".to_string());
    anchors.insert("ba".to_string());

    // Both candidates are one edit away from "aa".
    assert_eq!(closest_anchor(&anchors, "aa"), Some("ab"));
  }

  #[test]
  fn test_closest_anchor_empty_set() {
    assert_eq!(closest_anchor(&IndexSet::new(), "anything"), None);
  }

  #[test]
  fn test_data_attributes_are_not_anchors_or_refs() {
    let html = r##"<p data-id="fake">x</p><a data-href="#fake">y</a>"##;
    let (anchors, warnings) = extract_anchors(html);
    assert!(anchors.is_empty());
    assert!(warnings.is_empty());
    assert!(extract_fragment_refs(html).is_empty());
  }

  #[test]
  fn test_anchor_tag_set_is_closed() {
    // `div` is not an anchor carrier; `h2` is.
    let html = r#"<div id="outside">x</div><h2 id="inside">y</h2>"#;
    let (anchors, _) = extract_anchors(html);
    assert_eq!(
      anchors.iter().collect::<Vec<_>>(),
      vec![&"inside".to_string()]
    );
  }

  #[test]
  fn test_attribute_order_does_not_matter() {
    let html = r#"<h3 class="section" id="ordered">t</h3>"#;
    let (anchors, _) = extract_anchors(html);
    assert!(anchors.contains("ordered"));
  }
}
