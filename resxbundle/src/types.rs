//! Core types for resxbundle.
//! Extraction produces these; the serializer renders them.

use std::{
    collections::HashSet,
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};

use crate::error::Error;

/// The value of a single resource entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceValue {
    /// Plain text (`System.String`, `System.Char`, or no declared type).
    String(String),

    /// Any integral or floating-point CLR type.
    Number(serde_json::Number),

    /// A `System.Byte[]` payload, decoded from base64.
    Binary(Vec<u8>),

    /// Primitive values that are neither text nor numbers.
    Other(OtherValue),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtherValue {
    Boolean(bool),

    /// Types with a stable textual form (`System.Guid`, `System.DateTime`, ...),
    /// emitted as strings.
    Text { type_name: String, text: String },
}

impl ResourceValue {
    /// Display form of the resolved value. String-only extraction does not use
    /// it; that mode keeps the source text instead.
    ///
    /// Booleans follow the CLR spelling (`True`/`False`) and binary payloads are
    /// re-encoded as base64.
    pub fn to_display_string(&self) -> String {
        match self {
            ResourceValue::String(s) => s.clone(),
            ResourceValue::Number(n) => n.to_string(),
            ResourceValue::Binary(bytes) => STANDARD.encode(bytes),
            ResourceValue::Other(OtherValue::Boolean(true)) => "True".to_string(),
            ResourceValue::Other(OtherValue::Boolean(false)) => "False".to_string(),
            ResourceValue::Other(OtherValue::Text { text, .. }) => text.clone(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResourceValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for ResourceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl Serialize for ResourceValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResourceValue::String(s) => serializer.serialize_str(s),
            ResourceValue::Number(n) => n.serialize(serializer),
            ResourceValue::Binary(bytes) => {
                let mut seq = serializer.serialize_seq(Some(bytes.len()))?;
                for byte in bytes {
                    seq.serialize_element(byte)?;
                }
                seq.end()
            }
            ResourceValue::Other(OtherValue::Boolean(b)) => serializer.serialize_bool(*b),
            ResourceValue::Other(OtherValue::Text { text, .. }) => serializer.serialize_str(text),
        }
    }
}

/// A single key/value pair of a bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceEntry {
    pub key: String,
    pub value: ResourceValue,
}

impl ResourceEntry {
    pub fn new(key: impl Into<String>, value: ResourceValue) -> Self {
        ResourceEntry {
            key: key.into(),
            value,
        }
    }
}

/// The entries of one resource file, in source order, with unique keys.
///
/// Serializes as a JSON object whose members keep that order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bundle {
    entries: Vec<ResourceEntry>,
    keys: HashSet<String>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bundle, failing on the first repeated key. `source` names the
    /// file in the error.
    pub fn from_entries(
        entries: impl IntoIterator<Item = ResourceEntry>,
        source: &str,
    ) -> Result<Self, Error> {
        let mut bundle = Bundle::new();
        for entry in entries {
            bundle.push(entry, source)?;
        }
        Ok(bundle)
    }

    pub fn push(&mut self, entry: ResourceEntry, source: &str) -> Result<(), Error> {
        if !self.keys.insert(entry.key.clone()) {
            return Err(Error::duplicate_key(entry.key, source));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn get(&self, key: &str) -> Option<&ResourceValue> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Bundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.end()
    }
}

/// A generated output file. The host decides where it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleArtifact {
    pub file_name: String,
    pub content: String,
}

impl BundleArtifact {
    /// Writes the artifact into `dir`, creating the directory if needed, and
    /// returns the written path.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, Error> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(Error::Io)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, self.content.as_bytes()).map_err(Error::Io)?;
        Ok(path)
    }
}
