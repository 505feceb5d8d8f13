use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field name to replacement text.
///
/// Field names not present in the mapping resolve to the empty string; a
/// missing field is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionMapping(HashMap<String, String>);

impl SubstitutionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field_name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field_name.into(), value.into())
    }

    /// The value for `field_name`, if the caller supplied one.
    #[inline]
    pub fn lookup(&self, field_name: &str) -> Option<&str> {
        self.0.get(field_name).map(String::as_str)
    }

    /// The value for `field_name`, or `""` when absent.
    #[inline]
    pub fn resolve(&self, field_name: &str) -> &str {
        self.lookup(field_name).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for SubstitutionMapping {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubstitutionMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_resolves_to_empty() {
        let mapping: SubstitutionMapping = [("title", "Awards")].into_iter().collect();
        assert_eq!(mapping.resolve("title"), "Awards");
        assert_eq!(mapping.lookup("subtitle"), None);
        assert_eq!(mapping.resolve("subtitle"), "");
    }

    #[test]
    fn test_json_is_a_plain_object() {
        let mapping: SubstitutionMapping =
            serde_json::from_str(r#"{"teamNumber}: {teamName}": "42: Falcons"}"#).unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.resolve("teamNumber}: {teamName}"), "42: Falcons");

        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"teamNumber}: {teamName}":"42: Falcons"}"#);
    }
}
