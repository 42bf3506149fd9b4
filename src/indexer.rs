//! Heading indexing: marker recognition, anchor derivation, body rewrite.
//!
//! The indexer runs before the external markup renderer. It rewrites the
//! document's level-1 and level-2 heading markers into renderer-ready
//! `<hN id="...">` tags (raw HTML passes through the renderer untouched)
//! and collects the same headings into the two-level sidebar [`Outline`].
use std::{fmt::Write, sync::LazyLock};

use indexmap::IndexSet;
use log::{error, trace};
use regex::Regex;

use crate::{
  types::{Heading, IndexResult, Outline, OutlineEntry, Warning},
  utils,
};

/// Level-1 or level-2 heading marker, with an optional explicit
/// `{#anchor}` override at the end of the line. Deeper headings are not
/// markers here; their anchors belong to the renderer.
static HEADING_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(#{1,2})\s+(.+?)(?:\s+\{#([A-Za-z0-9_-]+)\})?\s*$")
    .unwrap_or_else(|e| {
      error!("Failed to compile HEADING_MARKER_RE regex: {e}");
      utils::never_matching_regex()
    })
});

/// Options for the document indexer.
#[derive(Debug, Clone)]
pub struct IndexOptions {
  /// Report structural problems (duplicate anchors among indexed headings,
  /// level-2 headings with no parent) alongside the index result. The
  /// rewritten body and the outline are identical either way.
  pub warnings: bool,
}

impl Default for IndexOptions {
  fn default() -> Self {
    Self { warnings: true }
  }
}

/// Indexes heading markers in one document body.
pub struct DocumentIndexer {
  options: IndexOptions,
}

impl DocumentIndexer {
  /// Create a new `DocumentIndexer` with the given options.
  #[must_use]
  pub const fn new(options: IndexOptions) -> Self {
    Self { options }
  }

  /// Index one document body.
  ///
  /// A single pass over the lines of `body`: recognized heading markers are
  /// rewritten to `<hN id="...">` tags and collected into the outline;
  /// every other line passes through byte-for-byte, including markers
  /// inside fenced code blocks and malformed markers (a marker we cannot
  /// parse is content, not an error). Running the indexer over its own
  /// output changes nothing, since rewritten tags carry no marker syntax.
  #[must_use]
  pub fn index(&self, body: &str) -> IndexResult {
    let mut rewritten = String::with_capacity(body.len() + 128);
    let mut outline = Outline::default();
    let mut warnings = Vec::new();
    let mut seen_ids: IndexSet<String> = IndexSet::new();
    let mut in_fence = false;

    for line in body.lines() {
      let trimmed = line.trim_start();
      if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
        in_fence = !in_fence;
      }

      let heading = if in_fence {
        None
      } else {
        parse_marker(line)
      };
      let Some(heading) = heading else {
        rewritten.push_str(line);
        rewritten.push('\n');
        continue;
      };

      if !seen_ids.insert(heading.id.clone()) && self.options.warnings {
        warnings.push(Warning::DuplicateId {
          id: heading.id.clone(),
        });
      }

      writeln!(
        rewritten,
        "<h{level} id=\"{id}\">{text}</h{level}>",
        level = heading.level,
        id = heading.id,
        text = heading.text,
      )
      .expect("Failed to write heading tag");

      if heading.level == 1 {
        outline.entries.push(OutlineEntry {
          heading,
          children: Vec::new(),
        });
      } else if let Some(entry) = outline.entries.last_mut() {
        entry.children.push(heading);
      } else {
        // No preceding level-1 heading: the anchor stays valid in the
        // page, but the outline has nowhere to hang it.
        if self.options.warnings {
          warnings.push(Warning::OrphanHeading { id: heading.id });
        }
      }
    }

    // `lines()` is newline-agnostic; put the final byte back the way the
    // input had it.
    if !body.is_empty() && !body.ends_with('\n') {
      rewritten.pop();
    }

    trace!(
      "Indexed {} top-level headings, {} warnings",
      outline.entries.len(),
      warnings.len()
    );

    IndexResult {
      body: rewritten,
      outline,
      warnings,
    }
  }
}

/// Parse one line as a heading marker.
///
/// Returns `None` for anything that is not a well-formed marker: wrong or
/// missing level signs, no whitespace after them, or an empty title.
fn parse_marker(line: &str) -> Option<Heading> {
  let caps = HEADING_MARKER_RE.captures(line)?;

  let text = caps[2].trim();
  if text.is_empty() {
    return None;
  }

  let level: u8 = if caps[1].len() == 1 { 1 } else { 2 };
  let id = caps.get(3).map_or_else(
    || utils::slugify(text),
    |explicit| explicit.as_str().to_string(),
  );

  Some(Heading {
    text: text.to_string(),
    level,
    id,
  })
}

/// Index a document body with default options.
#[must_use]
pub fn index_document(body: &str) -> IndexResult {
  DocumentIndexer::new(IndexOptions::default()).index(body)
}
