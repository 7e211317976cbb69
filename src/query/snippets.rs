//! Match scanning and window extraction

use tracing::trace;

use crate::query::error::QueryError;
use crate::query::{ContextOptions, Match, Report, Snippet};

/// Fold a character for comparison.
///
/// Always maps one character to one character so folded offsets line up with
/// offsets in the original text.
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Find every non-overlapping, case-insensitive occurrence of `keyword`
///
/// # Arguments
///
/// * `document` - The text to search
/// * `keyword` - The term to look for; must not be empty
///
/// # Returns
///
/// Matches in left-to-right order. After each match the scan resumes at the
/// end of that match.
///
/// Folding is per character: `İ` folds to `i`, and `ß` never matches `ss`.
pub fn find_matches(document: &str, keyword: &str) -> Result<Vec<Match>, QueryError> {
    if keyword.is_empty() {
        return Err(QueryError::EmptyKeyword);
    }

    let haystack: Vec<char> = document.chars().map(fold).collect();
    let needle: Vec<char> = keyword.chars().map(fold).collect();

    Ok(scan(&haystack, &needle))
}

fn scan(haystack: &[char], needle: &[char]) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut pointer = 0;

    while pointer + needle.len() <= haystack.len() {
        let Some(offset) = haystack[pointer..]
            .windows(needle.len())
            .position(|window| window == needle)
        else {
            break;
        };

        let found = Match {
            start: pointer + offset,
            len: needle.len(),
        };
        pointer = found.end();
        matches.push(found);
    }

    matches
}

/// Search `document` for `keyword` and build a report of context windows
///
/// # Arguments
///
/// * `document` - The rendered page text
/// * `keyword` - The term to look for; must not be empty
/// * `options` - Window radius and match cap
///
/// # Returns
///
/// `Report::NoMatches` when the keyword never occurs, otherwise a report
/// holding at most `options.max_matches` snippets in discovery order.
pub fn find_context_snippets(
    document: &str,
    keyword: &str,
    options: ContextOptions,
) -> Result<Report, QueryError> {
    if options.max_matches == 0 {
        return Err(QueryError::ZeroMaxMatches);
    }

    let matches = find_matches(document, keyword)?;
    trace!(total = matches.len(), "Scanned document for keyword");

    if matches.is_empty() {
        return Ok(Report::NoMatches {
            keyword: keyword.to_string(),
        });
    }

    let chars: Vec<char> = document.chars().collect();
    let snippets = matches
        .iter()
        .take(options.max_matches)
        .enumerate()
        .map(|(i, m)| {
            let start = m.start.saturating_sub(options.context_radius);
            let end = m
                .end()
                .saturating_add(options.context_radius)
                .min(chars.len());
            Snippet {
                rank: i + 1,
                match_start: m.start,
                start,
                end,
                text: chars[start..end].iter().collect(),
            }
        })
        .collect();

    Ok(Report::Found {
        total_matches: matches.len(),
        snippets,
    })
}
