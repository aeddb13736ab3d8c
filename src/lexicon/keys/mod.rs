//! Key normalization between external (user-facing) and internal (stored) forms.
//!
//! The strategy depends on the module's category and is chosen once when the
//! module is opened:
//!
//! | Scheme       | external → internal            | search form | internal → external |
//! |--------------|--------------------------------|-------------|---------------------|
//! | `Plain`      | upper-fold                     | upper-fold  | identity            |
//! | `Devotional` | date → `MM.DD`                 | identity    | `MM.DD` → date      |
//! | `Strongs`    | `G25` → `G0025` / `G00025`     | upper-fold  | identity            |

pub mod devotional;
pub mod strongs;

use log::trace;

use crate::lexicon::types::error::Result;
use crate::lexicon::types::models::{BookCategory, ModuleDescriptor};

pub use devotional::{DateFormatter, DevotionalScheme};
pub use strongs::StrongsScheme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyScheme {
    Plain,
    Devotional(DevotionalScheme),
    Strongs(StrongsScheme),
}

impl KeyScheme {
    /// Selects the scheme for a module. The devotional category wins over
    /// Strong's feature flags.
    pub fn for_module(descriptor: &ModuleDescriptor) -> Self {
        let features = descriptor.features;
        let scheme = if descriptor.category == BookCategory::DailyDevotional {
            KeyScheme::Devotional(DevotionalScheme::default())
        } else if features.has_strongs() {
            KeyScheme::Strongs(StrongsScheme::new(
                features.greek_definitions && features.hebrew_definitions,
                &descriptor.initials,
            ))
        } else {
            KeyScheme::Plain
        };
        trace!("Key scheme for {}: {:?}", descriptor.initials, scheme);
        scheme
    }

    /// Whether `external_to_internal` consults a sample stored key.
    pub fn needs_sample(&self) -> bool {
        matches!(self, KeyScheme::Strongs(_))
    }

    pub fn external_to_internal(&self, external: &str, sample: Option<&str>) -> Result<String> {
        match self {
            KeyScheme::Plain => Ok(external.to_uppercase()),
            KeyScheme::Devotional(scheme) => scheme.to_internal(external),
            KeyScheme::Strongs(scheme) => scheme.to_internal(external, sample),
        }
    }

    pub fn internal_to_external(&self, internal: &str) -> String {
        match self {
            KeyScheme::Devotional(scheme) => scheme.to_external(internal),
            KeyScheme::Plain | KeyScheme::Strongs(_) => internal.to_string(),
        }
    }

    pub fn normalize_for_search(&self, internal: &str) -> String {
        match self {
            KeyScheme::Devotional(_) => internal.to_string(),
            KeyScheme::Plain | KeyScheme::Strongs(_) => internal.to_uppercase(),
        }
    }

    /// External key straight to the form compared during search.
    pub fn search_key(&self, external: &str, sample: Option<&str>) -> Result<String> {
        let internal = self.external_to_internal(external, sample)?;
        Ok(self.normalize_for_search(&internal))
    }
}
