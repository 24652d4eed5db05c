//! Canonical locale tags.
//!
//! The documentation site and the cache layout both use lowercase
//! `language-region` tags such as `en-us` or `zh-cn`. [`Locale`] holds a tag
//! already in that form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// A normalised, lowercase locale tag.
///
/// ```rust
/// use docfetch_core::Locale;
///
/// let locale = Locale::new("en-US")?;
/// assert_eq!(locale.as_str(), "en-us");
///
/// let locale: Locale = " zh_CN ".parse()?;
/// assert_eq!(locale.as_str(), "zh-cn");
/// # Ok::<(), docfetch_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Normalise `tag` into a locale.
    ///
    /// Surrounding whitespace is trimmed, the tag is lowercased and `_`
    /// separators become `-`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the tag is empty after trimming.
    pub fn new(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(Error::Config("Locale must not be empty".into()));
        }
        Ok(Self(trimmed.to_lowercase().replace('_', "-")))
    }

    /// The canonical tag, e.g. `en-us`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en-us".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}
