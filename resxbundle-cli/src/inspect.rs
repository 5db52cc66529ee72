use std::path::Path;

use resxbundle::{
    Error, ExtractionMode, FileNameParts, NamespacePath, Parser, ResxFormat,
    extract::resolve_typed,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub file: String,
    pub base_name: String,
    /// Leaf path the file compiles to without a module prefix, if the base
    /// name is a valid script identifier.
    pub leaf_path: Option<String>,
    pub locale: Option<LocaleReport>,
    pub headers: Vec<(String, String)>,
    pub entries: Vec<EntryReport>,
    /// Why compiling the whole file would fail, if it would.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LocaleReport {
    pub code: String,
    pub lcid: u32,
}

#[derive(Debug, Serialize)]
pub struct EntryReport {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Typed value, or `null` when the entry cannot be bundled.
    pub value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Describes what the compiler sees in one resource file. Per-entry problems
/// are listed rather than raised, so a broken file can still be examined.
pub fn inspect_file<P: AsRef<Path>>(path: P) -> Result<InspectReport, Error> {
    let path = path.as_ref();
    let document = ResxFormat::read_from(path).map_err(|e| Error::unreadable(path, e))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parts = FileNameParts::parse(&file_name);

    let entries = document
        .nodes
        .iter()
        .map(|node| {
            let (value, error) = match resolve_typed(node) {
                Ok(value) => match serde_json::to_value(&value) {
                    Ok(json) => (json, None),
                    Err(e) => (serde_json::Value::Null, Some(e.to_string())),
                },
                Err(e) => (serde_json::Value::Null, Some(e.to_string())),
            };
            EntryReport {
                key: node.name.clone(),
                type_name: node.type_name.clone().or_else(|| node.mime_type.clone()),
                comment: node.comment.clone(),
                value,
                error,
            }
        })
        .collect();
    let compile_error = resxbundle::extract(&document, ExtractionMode::Typed, &file_name)
        .err()
        .map(|e| e.to_string());

    Ok(InspectReport {
        file: path.display().to_string(),
        base_name: parts.base_name.clone(),
        leaf_path: NamespacePath::parse(&parts.base_name)
            .ok()
            .map(|path| path.leaf_path()),
        locale: parts.locale.as_ref().map(|tag| LocaleReport {
            code: tag.code().to_string(),
            lcid: tag.lcid(),
        }),
        headers: document
            .headers
            .iter()
            .map(|h| (h.name.clone(), h.value.clone()))
            .collect(),
        entries,
        compile_error,
    })
}

pub fn run_inspect_command(input: &str) -> Result<(), Error> {
    let report = inspect_file(input)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    match &report.compile_error {
        None => log::info!("{} entries can be bundled", report.entries.len()),
        Some(e) => log::warn!("{} would not compile: {}", input, e),
    }
    Ok(())
}
