//! Wikibase identifier newtypes.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ModelError;

static PROPERTY_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^P[1-9][0-9]*$").expect("property id regex"));

// BCP 47-ish: primary subtag of 2-3 letters, optional lowercase alphanumeric subtags.
static LANGUAGE_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}(-[a-z0-9]{1,8})*$").expect("language code regex")
});

/// Returns true if `raw` is `P` followed by a positive integer without leading zeros.
pub fn is_valid_property_id(raw: &str) -> bool {
    PROPERTY_ID_REGEX.is_match(raw)
}

/// Returns true if `raw` is a lowercase language code such as `en` or `zh-hant`.
pub fn is_valid_language_code(raw: &str) -> bool {
    LANGUAGE_CODE_REGEX.is_match(raw)
}

/// A syntactically valid property identifier (`P31`, `P1476`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyId(String);

impl PropertyId {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if is_valid_property_id(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ModelError::InvalidPropertyId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric part of the id.
    pub fn number(&self) -> u64 {
        // The regex guarantees digits; overflow is the only failure mode.
        self.0[1..].parse().unwrap_or(u64::MAX)
    }
}

impl TryFrom<String> for PropertyId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PropertyId> for String {
    fn from(id: PropertyId) -> Self {
        id.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A syntactically valid term language code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if is_valid_language_code(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ModelError::InvalidLanguageCode(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_id_shape() {
        assert!(is_valid_property_id("P31"));
        assert!(is_valid_property_id("P1476"));
        assert!(!is_valid_property_id("P0"));
        assert!(!is_valid_property_id("P031"));
        assert!(!is_valid_property_id("p31"));
        assert!(!is_valid_property_id("Q5"));
        assert!(!is_valid_property_id("P"));
        assert!(!is_valid_property_id(" P31"));
        assert_eq!(PropertyId::parse("P279").unwrap().number(), 279);
    }

    #[test]
    fn language_code_shape() {
        assert!(is_valid_language_code("en"));
        assert!(is_valid_language_code("ast"));
        assert!(is_valid_language_code("zh-hant"));
        assert!(is_valid_language_code("de-ch"));
        assert!(!is_valid_language_code("EN"));
        assert!(!is_valid_language_code("e"));
        assert!(!is_valid_language_code("en_us"));
        assert!(!is_valid_language_code(""));
    }

    #[test]
    fn property_id_rejects_bad_json() {
        let result: Result<PropertyId, _> = serde_json::from_str("\"X1\"");
        assert!(result.is_err());
        let id: PropertyId = serde_json::from_str("\"P17\"").unwrap();
        assert_eq!(id.as_str(), "P17");
    }
}
