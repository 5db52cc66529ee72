//! Dotted namespace paths for generated script bundles.
//!
//! `Acme.Module.Greetings` becomes two container declarations
//!
//! ```text
//! Acme = Acme||{};
//! Acme.Module = Acme.Module||{};
//! ```
//!
//! and the leaf path `Acme.Module.Greetings`, which the serializer assigns.
//! A guarded declaration keeps whatever object already lives at its path, so
//! the block can be evaluated any number of times.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

lazy_static! {
    static ref IDENTIFIER_REGEX: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

/// An ordered, non-empty sequence of identifier segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespacePath {
    segments: Vec<String>,
}

impl NamespacePath {
    /// Parses a dotted identifier such as `Acme.Module.Greetings`.
    pub fn parse(identifier: &str) -> Result<Self, Error> {
        if identifier.trim().is_empty() {
            return Err(Error::InvalidNamespace(
                "namespace identifier is empty".to_string(),
            ));
        }

        let segments = identifier
            .split('.')
            .map(|segment| {
                if segment.is_empty() {
                    Err(Error::InvalidNamespace(format!(
                        "`{}` contains an empty segment",
                        identifier
                    )))
                } else if !IDENTIFIER_REGEX.is_match(segment) {
                    Err(Error::InvalidNamespace(format!(
                        "segment `{}` of `{}` is not a valid script identifier",
                        segment, identifier
                    )))
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NamespacePath { segments })
    }

    /// Joins an optional module prefix and an identifier, then parses the result.
    /// An empty prefix is ignored.
    pub fn with_prefix(prefix: Option<&str>, identifier: &str) -> Result<Self, Error> {
        match prefix.map(str::trim).filter(|p| !p.is_empty()) {
            Some(prefix) => Self::parse(&format!("{}.{}", prefix, identifier)),
            None => Self::parse(identifier),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment, which receives the bundle.
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// The full dotted path of the leaf.
    pub fn leaf_path(&self) -> String {
        self.segments.join(".")
    }

    /// Accumulated paths of every container segment, outermost first.
    pub fn containers(&self) -> Vec<String> {
        let container_count = self.segments.len().saturating_sub(1);
        let mut paths = Vec::with_capacity(container_count);
        let mut current = String::new();
        for segment in &self.segments[..container_count] {
            if !current.is_empty() {
                current.push('.');
            }
            current.push_str(segment);
            paths.push(current.clone());
        }
        paths
    }

    /// One guarded declaration per container, in evaluation order.
    pub fn declarations(&self) -> Vec<String> {
        self.containers()
            .iter()
            .map(|path| format!("{0} = {0}||{{}};", path))
            .collect()
    }
}

impl Display for NamespacePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.leaf_path())
    }
}
