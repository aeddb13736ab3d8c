//! Strong's number keys (`G25`, `H430`, `G1234!a`, `H3068b`).
//!
//! Lexicon editions pad the number differently (`G0025` vs `G00025`), so the
//! pad width is learned from a representative key stored in the module.

use std::sync::OnceLock;

use regex::Regex;

use crate::lexicon::types::error::{LexiconError, Result};

/// Matches `G` or `H`, digits, then an optional `!` and/or lowercase letter.
static STRONGS_PATTERN: OnceLock<Regex> = OnceLock::new();

fn strongs_regex() -> &'static Regex {
    STRONGS_PATTERN.get_or_init(|| {
        Regex::new(r"^([GH])([0-9]+)((!)?([a-z])?)$").expect("Invalid Strong's number pattern")
    })
}

/// The only edition whose keys keep a trailing letter (`H3068B`).
const TRAILING_LETTER_EDITION: &str = "naslex";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrongsScheme {
    /// Module carries both Greek and Hebrew definitions.
    both_testaments: bool,
    keep_trailing_letter: bool,
}

impl StrongsScheme {
    pub fn new(both_testaments: bool, initials: &str) -> Self {
        Self {
            both_testaments,
            keep_trailing_letter: initials.eq_ignore_ascii_case(TRAILING_LETTER_EDITION),
        }
    }

    /// Converts a user-supplied Strong's number to the module's stored form.
    ///
    /// `sample` is a stored key of a non-intro record; its digit count decides
    /// between 4- and 5-digit padding. Input that is not a Strong's number is
    /// returned upper-cased as a literal.
    pub fn to_internal(&self, external: &str, sample: Option<&str>) -> Result<String> {
        let Some(caps) = strongs_regex().captures(external) else {
            return Ok(external.to_uppercase());
        };

        let kind = &caps[1];
        let number: u64 = caps[2].parse().map_err(|e| LexiconError::InvalidKeyFormat {
            key: external.to_string(),
            reason: format!("Strong's number out of range: {e}"),
        })?;
        let suffix = match caps.get(5) {
            Some(letter) if self.keep_trailing_letter => letter.as_str().to_uppercase(),
            _ => String::new(),
        };

        if self.both_testaments {
            return Ok(format!("{kind}{number:04}{suffix}"));
        }

        match sample.and_then(|s| strongs_regex().captures(s)) {
            Some(pattern) if pattern[2].len() == 4 => Ok(format!("{kind}{number:04}{suffix}")),
            Some(_) => Ok(format!("{kind}{number:05}{suffix}")),
            // Stored keys carry no letter prefix: just the number.
            None => Ok(format!("{number:05}")),
        }
    }
}
