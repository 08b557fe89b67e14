//! Name comparison and suffix arithmetic
//!
//! Names are compared lower-cased with trailing whitespace removed. A name
//! collides with another when the two are equal, or when the candidate is
//! the saved name followed by ` (<digits>)`.

use regex::Regex;
use std::sync::OnceLock;

// Matches "<base> (<digits>)" anchored at both ends
// Capture group 1: base name, capture group 2: suffix number
const SUFFIX_PATTERN: &str = r"^(.+) \(([0-9]+)\)$";

/// Lower-case and trim the end of a name for comparison
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().trim_end().to_string()
}

/// Suffix number of `candidate` if it is `base` plus ` (<n>)`
///
/// Both arguments are expected to be normalized. Numbers that do not fit in
/// a `u64` are treated as no match.
///
/// # Examples
///
/// ```
/// # use namescope_core::collision::suffix_number;
/// assert_eq!(suffix_number("page (3)", "page"), Some(3));
/// assert_eq!(suffix_number("page (x)", "page"), None);
/// assert_eq!(suffix_number("pages (3)", "page"), None);
/// ```
pub fn suffix_number(candidate: &str, base: &str) -> Option<u64> {
    static SUFFIX_REGEX: OnceLock<Regex> = OnceLock::new();
    let suffix_regex = SUFFIX_REGEX.get_or_init(|| Regex::new(SUFFIX_PATTERN).unwrap());

    let caps = suffix_regex.captures(candidate)?;
    if caps.get(1)?.as_str() != base {
        return None;
    }
    caps.get(2)?.as_str().parse::<u64>().ok()
}

/// Text appended to a colliding name: one leading and one trailing space
pub fn disambiguation_suffix(max_suffix: u64) -> String {
    format!(" ({}) ", max_suffix.saturating_add(1))
}

/// Running collision totals for one variant of one saving node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Candidates whose name equals the saved name or extends it with a suffix
    pub duplicates: usize,
    /// Largest suffix number seen among the suffixed duplicates
    pub max_suffix: u64,
}

impl Tally {
    /// Fold one candidate name into the tally (both names normalized)
    pub fn score(self, saved_name: &str, candidate_name: &str) -> Self {
        if saved_name == candidate_name {
            return Self {
                duplicates: self.duplicates + 1,
                ..self
            };
        }

        match suffix_number(candidate_name, saved_name) {
            Some(number) => Self {
                duplicates: self.duplicates + 1,
                max_suffix: self.max_suffix.max(number),
            },
            None => self,
        }
    }

    pub fn has_collisions(&self) -> bool {
        self.duplicates > 0
    }

    /// Suffix to append, or `None` when nothing collided
    pub fn suffix(&self) -> Option<String> {
        self.has_collisions()
            .then(|| disambiguation_suffix(self.max_suffix))
    }
}
