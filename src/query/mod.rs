//! # Keyword Context Search
//!
//! Finds every case-insensitive occurrence of a keyword in a rendered page and
//! reports a bounded window of surrounding text for the first few matches.
//!
//! ## Key Components
//!
//! - `ContextOptions`: window radius and match cap (defaults 300 and 5)
//! - `find_matches`: every non-overlapping match, left to right
//! - `find_context_snippets`: the capped, numbered `Report`
//!
//! Offsets and radii are counted in characters, not bytes, so windows never
//! split a UTF-8 sequence.

mod error;
mod snippets;

pub use error::QueryError;
pub use snippets::{find_context_snippets, find_matches};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of characters kept on each side of a match
pub const DEFAULT_CONTEXT_RADIUS: usize = 300;

/// Default number of matches rendered in a report
pub const DEFAULT_MAX_MATCHES: usize = 5;

/// Options for a keyword context search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextOptions {
    /// Characters to include on each side of a match
    pub context_radius: usize,

    /// Maximum number of matches rendered
    pub max_matches: usize,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            context_radius: DEFAULT_CONTEXT_RADIUS,
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }
}

impl ContextOptions {
    /// Options with the given radius and cap
    pub fn new(context_radius: usize, max_matches: usize) -> Self {
        Self {
            context_radius,
            max_matches,
        }
    }

    /// Replace the radius, keeping the cap
    pub fn with_context_radius(mut self, context_radius: usize) -> Self {
        self.context_radius = context_radius;
        self
    }
}

/// A case-insensitive occurrence of the keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Character offset where the occurrence begins
    pub start: usize,

    /// Length of the occurrence in characters
    pub len: usize,
}

impl Match {
    /// Character offset one past the end of the occurrence
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Window of original text around one match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// 1-based position in discovery order
    pub rank: usize,

    /// Character offset of the match inside the document
    pub match_start: usize,

    /// Inclusive start of the window, in characters
    pub start: usize,

    /// Exclusive end of the window, in characters
    pub end: usize,

    /// Window text with the document's original casing
    pub text: String,
}

/// Outcome of a keyword context search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// The keyword does not occur in the document
    NoMatches {
        /// Keyword as the caller supplied it
        keyword: String,
    },

    /// At least one occurrence was found
    Found {
        /// Every occurrence in the document, before capping
        total_matches: usize,

        /// The first `max_matches` windows
        snippets: Vec<Snippet>,
    },
}

impl Report {
    /// Number of snippets included in the report
    pub fn summary_count(&self) -> usize {
        match self {
            Report::NoMatches { .. } => 0,
            Report::Found { snippets, .. } => snippets.len(),
        }
    }

    /// Snippets in rank order; empty when nothing matched
    pub fn snippets(&self) -> &[Snippet] {
        match self {
            Report::NoMatches { .. } => &[],
            Report::Found { snippets, .. } => snippets,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Report::Found { .. })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::NoMatches { keyword } => {
                write!(f, "No instances of '{}' were found.", keyword)
            }
            Report::Found { snippets, .. } => {
                write!(f, "Found {} relevant match(es):\n\n", snippets.len())?;
                for (i, snippet) in snippets.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n\n---\n\n")?;
                    }
                    write!(f, "Match {}:\n{}", snippet.rank, snippet.text)?;
                }
                Ok(())
            }
        }
    }
}
