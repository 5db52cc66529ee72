#![allow(dead_code)]

use std::path::{Path, PathBuf};

use quick_xml::escape::escape;
use regex::Regex;
use serde_json::{Map, Value};

/// Builds a minimal resx document with string entries in the given order.
pub fn resx_document<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<root>\n");
    xml.push_str("  <resheader name=\"resmimetype\"><value>text/microsoft-resx</value></resheader>\n");
    for (key, value) in entries {
        xml.push_str(&format!(
            "  <data name=\"{}\" xml:space=\"preserve\"><value>{}</value></data>\n",
            escape(key),
            escape(value)
        ));
    }
    xml.push_str("</root>\n");
    xml
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Evaluates the statements emitted by the merge-closure mode against a
/// global object, the way a browser would. Only the generated statement
/// shapes are understood.
pub struct ScriptModel {
    pub globals: Map<String, Value>,
}

impl ScriptModel {
    pub fn new() -> Self {
        ScriptModel {
            globals: Map::new(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.globals.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn set(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        let (leaf, containers) = segments.split_last().unwrap();
        let mut current = &mut self.globals;
        for segment in containers {
            current = current
                .get_mut(*segment)
                .and_then(Value::as_object_mut)
                .unwrap_or_else(|| panic!("container `{}` of `{}` is not an object", segment, path));
        }
        current.insert(leaf.to_string(), value);
    }

    fn is_truthy(value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(_) => true,
        }
    }

    pub fn eval(&mut self, script: &str) {
        let guard = Regex::new(r"^([A-Za-z_$][\w$.]*) = ([A-Za-z_$][\w$.]*)\|\|\{\};$").unwrap();
        let open = Regex::new(r"^([A-Za-z_$][\w$.]*) = \(function \(\) \{$").unwrap();
        let strings = Regex::new(r"^\tvar strings = (.*);$").unwrap();
        let merge =
            Regex::new(r"^\treturn merge\(\{\}, ([A-Za-z_$][\w$.]*) \|\| \{\}, strings\);$")
                .unwrap();

        let lines: Vec<&str> = script.lines().collect();
        let mut i = 0;
        while i < lines.len() {
            if let Some(caps) = guard.captures(lines[i]) {
                assert_eq!(&caps[1], &caps[2], "guard must re-read its own path");
                let path = caps[1].to_string();
                if !Self::is_truthy(self.get(&path)) {
                    self.set(&path, Value::Object(Map::new()));
                }
                i += 1;
            } else if let Some(caps) = open.captures(lines[i]) {
                let leaf = caps[1].to_string();
                let payload = strings
                    .captures(lines[i + 1])
                    .map(|c| c[1].to_string())
                    .expect("closure declares strings");
                let merge_caps = merge.captures(lines[i + 2]).expect("closure merges");
                assert_eq!(&merge_caps[1], leaf.as_str());
                assert_eq!(lines[i + 3], "}());");

                let new_strings: Map<String, Value> = serde_json::from_str(&payload).unwrap();
                let mut merged = Map::new();
                if let Some(Value::Object(existing)) = self.get(&leaf) {
                    for (k, v) in existing {
                        merged.insert(k.clone(), v.clone());
                    }
                }
                for (k, v) in new_strings {
                    merged.insert(k, v);
                }
                self.set(&leaf, Value::Object(merged));
                i += 4;
            } else {
                panic!("unexpected statement: {:?}", lines[i]);
            }
        }
    }
}
