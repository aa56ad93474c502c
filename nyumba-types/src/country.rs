//! ISO 3166-1 alpha-2 country codes.
//!
//! Every listing belongs to exactly one country market, and the feed
//! filter keys on this code. Stored inline as two uppercase ASCII
//! bytes so comparisons are cheap and the type is `Copy`.

use crate::Error;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A two-letter uppercase country code, e.g. `CI` or `SN`.
///
/// Parsing accepts lowercase input and normalizes it; anything that is
/// not exactly two ASCII letters is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Parses a country code from a string, normalizing to uppercase.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(Error::InvalidCountryCode(s.to_owned()));
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
        ]))
    }

    /// Creates a code from a literal, for static tables.
    ///
    /// Panics unless the input is exactly two uppercase ASCII letters;
    /// in a `const` or `static` initializer that is a compile error.
    #[must_use]
    pub const fn from_static(code: &'static str) -> Self {
        let bytes = code.as_bytes();
        if bytes.len() != 2 || !bytes[0].is_ascii_uppercase() || !bytes[1].is_ascii_uppercase() {
            panic!("country code must be two uppercase ASCII letters");
        }
        Self([bytes[0], bytes[1]])
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Invariant: both bytes are ASCII letters, so this is valid UTF-8.
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountryCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CountryCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CodeVisitor;

        impl Visitor<'_> for CodeVisitor {
            type Value = CountryCode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a two-letter ISO country code")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                CountryCode::parse(value).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(CodeVisitor)
    }
}
