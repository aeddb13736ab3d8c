//! Small helpers shared by the library and the CLI.

use encoding_rs::{Encoding, WINDOWS_1252};
use log::warn;

/// Resolves a charset label from module configuration.
///
/// SWORD modules without an explicit encoding are Latin-1, which is
/// windows-1252 under the WHATWG label rules; unknown labels fall back to it.
pub fn parse_encoding(label: &str) -> &'static Encoding {
    Encoding::for_label(label.trim().as_bytes()).unwrap_or_else(|| {
        warn!("Unknown encoding label {:?}; using {}", label, WINDOWS_1252.name());
        WINDOWS_1252
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_8;

    #[test]
    fn resolves_known_labels() {
        assert_eq!(parse_encoding("UTF-8"), UTF_8);
        assert_eq!(parse_encoding(" utf8 "), UTF_8);
        assert_eq!(parse_encoding("latin1"), WINDOWS_1252);
    }

    #[test]
    fn unknown_label_falls_back_to_latin1() {
        assert_eq!(parse_encoding("klingon"), WINDOWS_1252);
    }
}
