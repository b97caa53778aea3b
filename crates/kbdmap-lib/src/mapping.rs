//! LED index → key name mapping and its JSON persistence.
//!
//! The file is a flat JSON object keyed by the string form of the index:
//!
//! ```json
//! {
//!     "0": "left_shift",
//!     "12": "esc"
//! }
//! ```

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;

/// Default output file name, relative to the working directory.
pub const MAPPING_FILE: &str = "led_mapping_results.json";

/// Operator-supplied key names by LED index, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMapping {
    entries: Vec<(i64, String)>,
}

impl KeyMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` for `index`, returning the name it replaced.
    ///
    /// A re-mapped index keeps its original position.
    pub fn insert(&mut self, index: i64, name: impl Into<String>) -> Option<String> {
        let name = name.into();
        match self.entries.iter_mut().find(|(i, _)| *i == index) {
            Some((_, existing)) => Some(std::mem::replace(existing, name)),
            None => {
                self.entries.push((index, name));
                None
            }
        }
    }

    pub fn get(&self, index: i64) -> Option<&str> {
        self.entries
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, n)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.entries.iter().map(|(i, n)| (*i, n.as_str()))
    }

    /// JSON with the given indentation width.
    pub fn to_json(&self, indent: usize) -> Result<String> {
        let indent = vec![b' '; indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the mapping to `path`, replacing any previous file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json(4)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read a mapping written by [`KeyMapping::save_to`].
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl Serialize for KeyMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (index, name) in &self.entries {
            map.serialize_entry(&index.to_string(), name)?;
        }
        map.end()
    }
}

struct KeyMappingVisitor;

impl<'de> Visitor<'de> for KeyMappingVisitor {
    type Value = KeyMapping;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of LED index strings to key names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<KeyMapping, A::Error> {
        let mut mapping = KeyMapping::new();
        while let Some((key, name)) = access.next_entry::<String, String>()? {
            let index = key.trim().parse::<i64>().map_err(|_| {
                <A::Error as serde::de::Error>::custom(format!("invalid LED index key: {key:?}"))
            })?;
            mapping.insert(index, name);
        }
        Ok(mapping)
    }
}

impl<'de> Deserialize<'de> for KeyMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(KeyMappingVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut m = KeyMapping::new();
        assert!(m.is_empty());
        assert_eq!(m.insert(3, "esc"), None);
        assert_eq!(m.get(3), Some("esc"));
        assert_eq!(m.get(4), None);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn remap_overwrites_in_place() {
        let mut m = KeyMapping::new();
        m.insert(5, "a");
        m.insert(1, "b");
        assert_eq!(m.insert(5, "c"), Some("a".to_string()));

        let entries: Vec<(i64, &str)> = m.iter().collect();
        assert_eq!(entries, vec![(5, "c"), (1, "b")]);
    }

    #[test]
    fn unparsed_bucket_collides() {
        let mut m = KeyMapping::new();
        m.insert(-1, "first");
        assert_eq!(m.insert(-1, "second"), Some("first".to_string()));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn serializes_string_keys_in_insertion_order() {
        let mut m = KeyMapping::new();
        m.insert(10, "f1");
        m.insert(2, "esc");
        m.insert(-1, "mystery");
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"10":"f1","2":"esc","-1":"mystery"}"#);
    }

    #[test]
    fn to_json_uses_requested_indent() {
        let mut m = KeyMapping::new();
        m.insert(0, "left_shift");
        assert_eq!(m.to_json(4).unwrap(), "{\n    \"0\": \"left_shift\"\n}");
        assert_eq!(m.to_json(2).unwrap(), "{\n  \"0\": \"left_shift\"\n}");
    }

    #[test]
    fn save_then_load_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MAPPING_FILE);
        let mut m = KeyMapping::new();
        m.insert(0, "left_shift");
        m.insert(7, "space bar");

        m.save_to(&path).unwrap();
        assert_eq!(KeyMapping::load_from(&path).unwrap(), m);
    }

    #[test]
    fn save_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MAPPING_FILE);
        std::fs::write(&path, r#"{"9": "old"}"#).unwrap();

        let mut m = KeyMapping::new();
        m.insert(1, "new");
        m.save_to(&path).unwrap();

        let loaded = KeyMapping::load_from(&path).unwrap();
        assert_eq!(loaded.get(9), None);
        assert_eq!(loaded.get(1), Some("new"));
    }

    #[test]
    fn load_rejects_non_numeric_key() {
        let result: std::result::Result<KeyMapping, _> = serde_json::from_str(r#"{"esc": "1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn load_rejects_non_string_value() {
        let result: std::result::Result<KeyMapping, _> = serde_json::from_str(r#"{"1": 2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = KeyMapping::load_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::error::KbdmapError::Io(_)));
    }
}
