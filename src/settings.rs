//! Navigation to the operating system's settings surface.

use std::fmt;

use crate::{Error, Result};

/// URL that opens this app's page in the iOS Settings app
/// (`UIApplicationOpenSettingsURLString`).
pub const APP_SETTINGS_URL: &str = "app-settings:";

/// URL that opens the location pane of macOS System Settings.
pub const MACOS_LOCATION_SETTINGS_URL: &str =
    "x-apple.systempreferences:com.apple.preference.security?Privacy_LocationServices";

/// A validated URL pointing at a settings surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingsUrl(String);

impl SettingsUrl {
    /// Parse `url`, which must start with a URL scheme followed by `:`.
    ///
    /// The remainder is opaque to us (each platform has its own deep-link
    /// syntax) but may only use characters a URL can carry unescaped, so the
    /// platform URL types accept every value that parses here.
    pub fn parse(url: &str) -> Result<Self> {
        let invalid = || Error::InvalidSettingsUrl {
            url: url.to_string(),
        };

        let (scheme, rest) = url.split_once(':').ok_or_else(invalid)?;

        let mut chars = scheme.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return Err(invalid()),
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
            return Err(invalid());
        }
        if !rest.chars().all(is_url_char) {
            return Err(invalid());
        }

        Ok(Self(url.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingsUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SettingsUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Unreserved, reserved and percent characters of RFC 3986.
fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~:/?#[]@!$&'()*+,;=%".contains(c)
}

/// Opens a settings surface on behalf of the app.
pub trait SettingsNavigator {
    /// Ask the platform to navigate to `url`. Fire-and-forget.
    fn open(&self, url: &SettingsUrl);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_known_settings_urls() {
        let app = SettingsUrl::parse(APP_SETTINGS_URL).unwrap();
        assert_eq!(app.as_str(), APP_SETTINGS_URL);

        let macos = SettingsUrl::parse(MACOS_LOCATION_SETTINGS_URL).unwrap();
        assert_eq!(macos.to_string(), MACOS_LOCATION_SETTINGS_URL);
    }

    #[test]
    fn rejects_malformed_urls() {
        for url in [
            "",
            "app-settings",
            ":nothing",
            "1abc:",
            "app settings:",
            "app:has space",
        ] {
            match SettingsUrl::parse(url) {
                Err(Error::InvalidSettingsUrl { url: reported }) => assert_eq!(reported, url),
                other => panic!("expected {url:?} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_characters_that_need_escaping() {
        for url in [
            "app-settings:{id}",
            "app:\"quoted\"",
            "app:<tag>",
            "app:a|b",
            "app:caf\u{e9}",
        ] {
            assert!(SettingsUrl::parse(url).is_err(), "{url:?} should be rejected");
        }
        assert!(SettingsUrl::parse("app-settings:root=Privacy&path=LOCATION%20SERVICES").is_ok());
    }
}
