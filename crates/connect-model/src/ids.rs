#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// A numeric concept identifier from the backend schema.
///
/// Concept IDs are opaque: they are compared, hashed and printed, never
/// computed with. Records store them either as JSON numbers or as numeric
/// strings, so both forms are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConceptId(u64);

impl ConceptId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// The key under which this concept appears in a participant record.
    pub fn key(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConceptId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ModelError::InvalidConceptId(s.to_string()));
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ModelError::InvalidConceptId(s.to_string()))
    }
}

impl From<u64> for ConceptId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl serde::Serialize for ConceptId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ConceptId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Self(value)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_strings() {
        assert_eq!("612166858".parse::<ConceptId>().unwrap(), ConceptId::new(612166858));
        assert_eq!(" 42 ".parse::<ConceptId>().unwrap(), ConceptId::new(42));
        assert!("Connect_ID".parse::<ConceptId>().is_err());
        assert!("-1".parse::<ConceptId>().is_err());
        assert!("".parse::<ConceptId>().is_err());
    }

    #[test]
    fn deserializes_number_or_string() {
        let a: ConceptId = serde_json::from_str("353358909").unwrap();
        let b: ConceptId = serde_json::from_str("\"353358909\"").unwrap();
        assert_eq!(a, b);
    }
}
