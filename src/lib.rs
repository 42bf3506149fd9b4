//! # anchorlint - anchor and link integrity for generated HTML documentation
//!
//! Post-generation checks for HTML pages produced from lightweight-markup
//! documents: index a document's headings into a two-level sidebar outline,
//! then verify that every same-page fragment link in the rendered page
//! resolves to a defined anchor.
//!
//! ## Quick Start
//!
//! ```rust
//! use anchorlint::{check_page, index_document};
//!
//! let body = "# Overview\n\nSee [setup](#setup).\n\n## Setup\n";
//! let indexed = index_document(body);
//!
//! assert!(indexed.body.contains("<h2 id=\"setup\">Setup</h2>"));
//! assert_eq!(indexed.outline.entries[0].children[0].id, "setup");
//!
//! // Once the external renderer has produced the final page:
//! let warnings = check_page(&indexed.body);
//! assert!(warnings.is_empty());
//! ```
//!
//! ## Features
//!
//! - **Heading indexing** with automatic anchor derivation and explicit
//!   `{#id}` author overrides
//! - **Two-level outline** for sidebar rendering, children grouped under the
//!   nearest preceding level-1 heading
//! - **Duplicate anchor detection** across a whole rendered page
//! - **Broken fragment links** reported with a closest-anchor suggestion
//!   (Levenshtein distance)
//! - **Advisory by design**: every anomaly is a structured [`Warning`];
//!   nothing here returns an error or halts generation
pub mod distance;
pub mod indexer;
pub mod linkcheck;
pub mod types;
pub mod utils;

pub use crate::{
  distance::levenshtein,
  indexer::{DocumentIndexer, IndexOptions, index_document},
  linkcheck::{
    NAV_FRAGMENT,
    check_page,
    extract_anchors,
    extract_fragment_refs,
  },
  types::{Heading, IndexResult, Outline, OutlineEntry, Warning},
};
