//! Calendar-date keys for daily devotionals.
//!
//! Devotional records are stored under `MM.DD`. Callers pass a human date such
//! as `March 5`, `Mar 5`, `5 March`, `March 5, 2024` or `3/5`, which is parsed
//! leniently and reduced to month and day.

use std::sync::OnceLock;

use regex::Regex;

use crate::lexicon::types::error::{LexiconError, Result};

static MONTH_FIRST: OnceLock<Regex> = OnceLock::new();
static DAY_FIRST: OnceLock<Regex> = OnceLock::new();
static NUMERIC: OnceLock<Regex> = OnceLock::new();

fn month_first_regex() -> &'static Regex {
    MONTH_FIRST.get_or_init(|| {
        Regex::new(r"^([A-Za-z]+)\.?\s+([0-9]{1,2})(?:st|nd|rd|th)?(?:,?\s+[0-9]{1,4})?$")
            .expect("Invalid month-first date pattern")
    })
}

fn day_first_regex() -> &'static Regex {
    DAY_FIRST.get_or_init(|| {
        Regex::new(r"^([0-9]{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?([A-Za-z]+)\.?(?:,?\s+[0-9]{1,4})?$")
            .expect("Invalid day-first date pattern")
    })
}

fn numeric_regex() -> &'static Regex {
    NUMERIC.get_or_init(|| {
        Regex::new(r"^([0-9]{1,2})\s*[./-]\s*([0-9]{1,2})(?:\s*[./-]\s*[0-9]{2,4})?$")
            .expect("Invalid numeric date pattern")
    })
}

/// Days per month, with February allowing the 29th since keys carry no year.
const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Renders and parses month/day dates with a fixed set of month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormatter {
    month_names: &'static [&'static str; 12],
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(&ENGLISH_MONTHS)
    }
}

impl DateFormatter {
    pub fn new(month_names: &'static [&'static str; 12]) -> Self {
        Self { month_names }
    }

    /// Formats a month (1-based) and day, e.g. `March 5`.
    pub fn format(&self, month: u32, day: u32) -> String {
        format!("{} {}", self.month_names[(month - 1) as usize], day)
    }

    /// Parses a date into `(month, day)`, `None` if it is not a valid calendar date.
    pub fn parse(&self, text: &str) -> Option<(u32, u32)> {
        let text = text.trim();
        let (month, day) = if let Some(caps) = numeric_regex().captures(text) {
            (caps[1].parse().ok()?, caps[2].parse().ok()?)
        } else if let Some(caps) = month_first_regex().captures(text) {
            (self.month_number(&caps[1])?, caps[2].parse().ok()?)
        } else if let Some(caps) = day_first_regex().captures(text) {
            (self.month_number(&caps[2])?, caps[1].parse().ok()?)
        } else {
            return None;
        };
        is_valid(month, day).then_some((month, day))
    }

    /// Full month names or unambiguous abbreviations of at least three letters.
    fn month_number(&self, name: &str) -> Option<u32> {
        if name.len() < 3 {
            return None;
        }
        let name = name.to_lowercase();
        let mut hits = self
            .month_names
            .iter()
            .enumerate()
            .filter(|(_, m)| m.to_lowercase().starts_with(&name));
        let (index, _) = hits.next()?;
        hits.next().is_none().then_some(index as u32 + 1)
    }
}

fn is_valid(month: u32, day: u32) -> bool {
    (1..=12).contains(&month) && day >= 1 && day <= DAYS_IN_MONTH[(month - 1) as usize]
}

/// Key strategy for date-keyed modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DevotionalScheme {
    formatter: DateFormatter,
}

impl DevotionalScheme {
    pub fn new(formatter: DateFormatter) -> Self {
        Self { formatter }
    }

    pub fn to_internal(&self, external: &str) -> Result<String> {
        let (month, day) = self
            .formatter
            .parse(external)
            .ok_or_else(|| LexiconError::InvalidKeyFormat {
                key: external.to_string(),
                reason: "not a recognizable month and day".to_string(),
            })?;
        Ok(format!("{month:02}.{day:02}"))
    }

    /// Renders an `MM.DD` key as a date. Anything else, such as an intro
    /// record's title, is returned unchanged.
    pub fn to_external(&self, internal: &str) -> String {
        let parsed = internal
            .split_once('.')
            .and_then(|(m, d)| Some((m.trim().parse::<u32>().ok()?, d.trim().parse::<u32>().ok()?)))
            .filter(|&(m, d)| is_valid(m, d));
        match parsed {
            Some((month, day)) if internal.len() >= 3 => self.formatter.format(month, day),
            _ => internal.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_forms() {
        let f = DateFormatter::default();
        assert_eq!(f.parse("March 5"), Some((3, 5)));
        assert_eq!(f.parse("mar 5"), Some((3, 5)));
        assert_eq!(f.parse("Mar. 5th"), Some((3, 5)));
        assert_eq!(f.parse("5 March"), Some((3, 5)));
        assert_eq!(f.parse("March 5, 2024"), Some((3, 5)));
        assert_eq!(f.parse("3/5"), Some((3, 5)));
        assert_eq!(f.parse("12.25"), Some((12, 25)));
    }

    #[test]
    fn rejects_invalid_dates() {
        let f = DateFormatter::default();
        assert_eq!(f.parse("February 30"), None);
        assert_eq!(f.parse("13/1"), None);
        assert_eq!(f.parse("Ju 4"), None);
        assert_eq!(f.parse("Ja 4"), None);
        assert_eq!(f.parse("not a date"), None);
        assert_eq!(f.parse(""), None);
    }

    #[test]
    fn canonical_internal_form() {
        let s = DevotionalScheme::default();
        assert_eq!(s.to_internal("March 5").unwrap(), "03.05");
        assert_eq!(s.to_internal("December 31").unwrap(), "12.31");
        assert!(matches!(
            s.to_internal("Smarch 5"),
            Err(LexiconError::InvalidKeyFormat { .. })
        ));
    }

    #[test]
    fn round_trips_every_calendar_date() {
        let s = DevotionalScheme::default();
        for month in 1..=12u32 {
            for day in 1..=DAYS_IN_MONTH[(month - 1) as usize] {
                let external = DateFormatter::default().format(month, day);
                let internal = s.to_internal(&external).unwrap();
                assert_eq!(internal, format!("{month:02}.{day:02}"));
                assert_eq!(s.to_external(&internal), external);
            }
        }
    }

    #[test]
    fn non_date_internal_keys_pass_through() {
        let s = DevotionalScheme::default();
        assert_eq!(s.to_external("INTRODUCTION"), "INTRODUCTION");
        assert_eq!(s.to_external("13.40"), "13.40");
    }
}
