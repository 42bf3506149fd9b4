//! Types for the anchorlint public API.
use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

/// A heading recognized in a document body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Heading title text (inline markup not yet rendered).
  pub text:  String,
  /// Heading depth; only levels 1 and 2 are indexed into the outline.
  pub level: u8,
  /// Anchor ID, either author-supplied or derived from the title.
  pub id:    String,
}

/// Two-level grouping of a document's headings for sidebar rendering.
///
/// Level-2 headings are grouped under the nearest preceding level-1 heading,
/// preserving document order at both levels. A level-2 heading appearing
/// before any level-1 heading has no parent and is not part of the outline,
/// though its anchor stays valid in the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outline {
  /// Top-level entries in document order.
  pub entries: Vec<OutlineEntry>,
}

/// One level-1 heading together with its level-2 children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutlineEntry {
  /// The level-1 heading.
  pub heading:  Heading,
  /// Level-2 headings appearing before the next level-1 heading.
  pub children: Vec<Heading>,
}

impl Outline {
  /// True when no level-1 heading was indexed.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Render the outline as a nested list of fragment links.
  ///
  /// Each heading becomes `<a href="#id">text</a>` with the label text
  /// escaped. Rendering inline markup inside labels is the host template
  /// engine's concern; this helper emits plain escaped text.
  #[must_use]
  pub fn to_html(&self) -> String {
    if self.entries.is_empty() {
      return String::new();
    }

    let mut html = String::with_capacity(self.entries.len() * 64);
    html.push_str("<ul>");
    for entry in &self.entries {
      push_link(&mut html, &entry.heading);
      if !entry.children.is_empty() {
        html.push_str("<ul>");
        for child in &entry.children {
          push_link(&mut html, child);
          html.push_str("</li>");
        }
        html.push_str("</ul>");
      }
      html.push_str("</li>");
    }
    html.push_str("</ul>");

    html
  }
}

fn push_link(html: &mut String, heading: &Heading) {
  write!(
    html,
    "<li><a href=\"#{}\">{}</a>",
    heading.id,
    html_escape::encode_text(&heading.text)
  )
  .expect("Failed to write outline link");
}

/// Result of indexing one document body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexResult {
  /// Body with every recognized heading marker rewritten to an
  /// `<hN id="...">` tag; all other content unchanged.
  pub body: String,

  /// Sidebar outline built from the indexed headings.
  pub outline: Outline,

  /// Structural warnings; empty unless warnings are enabled.
  pub warnings: Vec<Warning>,
}

/// A diagnostic produced while indexing a document or checking a page.
///
/// Warnings never stop generation. Callers decide whether to print them
/// ([`crate::utils::log_warnings`]), collect them into a report, or fail a
/// build on policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Warning {
  /// An anchor ID defined more than once on the same page. The first
  /// occurrence stays resolvable; each repeat is reported separately.
  DuplicateId {
    /// The repeated anchor ID.
    id: String,
  },

  /// A same-page fragment link whose target anchor does not exist.
  BrokenLink {
    /// The unresolved fragment, without the leading `#`.
    fragment:   String,
    /// Closest defined anchor by edit distance; `None` when the page
    /// defines no anchors at all.
    suggestion: Option<String>,
  },

  /// A level-2 heading with no preceding level-1 heading. It is excluded
  /// from the outline while its anchor stays valid in the page.
  OrphanHeading {
    /// The unparented heading's anchor ID.
    id: String,
  },
}

impl fmt::Display for Warning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::DuplicateId { id } => write!(f, "DUPLICATE ID: {id}"),
      Self::BrokenLink {
        fragment,
        suggestion: Some(suggestion),
      } => {
        write!(f, "BROKEN LINK: #{fragment}, perhaps you meant #{suggestion}.")
      },
      Self::BrokenLink {
        fragment,
        suggestion: None,
      } => write!(f, "BROKEN LINK: #{fragment}"),
      Self::OrphanHeading { id } => write!(f, "ORPHAN HEADING: {id}"),
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Tests can unwrap")]

  use super::*;

  fn heading(text: &str, level: u8, id: &str) -> Heading {
    Heading {
      text: text.to_string(),
      level,
      id: id.to_string(),
    }
  }

  #[test]
  fn test_warning_display_lines() {
    let duplicate = Warning::DuplicateId {
      id: "intro".to_string(),
    };
    assert_eq!(duplicate.to_string(), "DUPLICATE ID: intro");

    let broken = Warning::BrokenLink {
      fragment:   "instalation".to_string(),
      suggestion: Some("installation".to_string()),
    };
    assert_eq!(
      broken.to_string(),
      "BROKEN LINK: #instalation, perhaps you meant #installation."
    );

    let no_suggestion = Warning::BrokenLink {
      fragment:   "missing".to_string(),
      suggestion: None,
    };
    assert_eq!(no_suggestion.to_string(), "BROKEN LINK: #missing");
  }

  #[test]
  fn test_warning_wire_shape() {
    let broken = Warning::BrokenLink {
      fragment:   "missing".to_string(),
      suggestion: None,
    };
    let json = serde_json::to_value(&broken).unwrap();
    assert_eq!(json["kind"], "broken-link");
    assert_eq!(json["fragment"], "missing");
    assert!(json["suggestion"].is_null());
  }

  #[test]
  fn test_outline_to_html_nesting() {
    let outline = Outline {
      entries: vec![OutlineEntry {
        heading:  heading("Overview", 1, "overview"),
        children: vec![heading("Setup", 2, "setup")],
      }],
    };

    assert_eq!(
      outline.to_html(),
      "<ul><li><a href=\"#overview\">Overview</a><ul><li><a \
       href=\"#setup\">Setup</a></li></ul></li></ul>"
    );
  }

  #[test]
  fn test_outline_to_html_escapes_labels() {
    let outline = Outline {
      entries: vec![OutlineEntry {
        heading:  heading("Q&A <notes>", 1, "q-a--notes"),
        children: Vec::new(),
      }],
    };

    let html = outline.to_html();
    assert!(html.contains("Q&amp;A &lt;notes&gt;"));
    assert!(!html.contains("<notes>"));
  }

  #[test]
  fn test_empty_outline_renders_nothing() {
    assert!(Outline::default().to_html().is_empty());
  }
}
