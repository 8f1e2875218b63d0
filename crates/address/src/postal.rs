use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static CEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{5}-?\d{3}").unwrap());

/// Brazilian postal code (CEP), stored as eight digits and rendered `NNNNN-NNN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode {
    digits: String,
}

impl PostalCode {
    /// First CEP-shaped run in free text ("74000000" or "74000-000").
    pub fn find(text: &str) -> Option<Self> {
        CEP_RE.find(text).and_then(|m| Self::parse(m.as_str()))
    }

    /// Accept exactly eight digits, ignoring any other characters.
    pub fn parse(value: &str) -> Option<Self> {
        let digits: String = value.chars().filter(char::is_ascii_digit).collect();
        (digits.len() == 8).then_some(Self { digits })
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", &self.digits[..5], &self.digits[5..])
    }
}

impl Serialize for PostalCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PostalCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid CEP: {raw}")))
    }
}
