//! Cage value/operator sum types: a cage's arithmetic target is either a
//! known integer or an unresolved placeholder string, and its operator is
//! one of the four arithmetic signs or unknown.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cage's recognized target value: either a parsed positive integer, or
/// an unparseable string (typically `"?"`) carried through unmodified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CageValue {
    Known(u32),
    Unknown(String),
}

impl CageValue {
    pub fn from_digits(digits: &str) -> Self {
        match digits.parse::<u32>() {
            Ok(n) => CageValue::Known(n),
            Err(_) => CageValue::Unknown(digits.to_string()),
        }
    }
}

impl fmt::Display for CageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CageValue::Known(n) => write!(f, "{n}"),
            CageValue::Unknown(s) => write!(f, "{s}"),
        }
    }
}

/// A cage's arithmetic operator, canonicalized to one of the five output
/// glyphs (`+ - x / ?`); `Unknown` is the `?` fallback marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Div,
    Unknown,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Plus),
            '-' => Some(Operator::Minus),
            'x' => Some(Operator::Times),
            '/' => Some(Operator::Div),
            '?' => Some(Operator::Unknown),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
            Operator::Times => 'x',
            Operator::Div => '/',
            Operator::Unknown => '?',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Serialize for Operator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_char(self.to_char())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let c = char::deserialize(deserializer)?;
        Operator::from_char(c).ok_or_else(|| serde::de::Error::custom(format!("invalid operator glyph '{c}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_digits_parses_known_values() {
        assert_eq!(CageValue::from_digits("12"), CageValue::Known(12));
        assert_eq!(CageValue::from_digits("?"), CageValue::Unknown("?".to_string()));
    }

    #[test]
    fn operator_round_trips_through_char() {
        for c in ['+', '-', 'x', '/', '?'] {
            let op = Operator::from_char(c).unwrap();
            assert_eq!(op.to_char(), c);
        }
    }
}
