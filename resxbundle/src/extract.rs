//! Turns parsed `.resx` nodes into a [`Bundle`].
//!
//! Typed extraction resolves each value to its CLR type without a type
//! resolver: strings, numbers, `System.Byte[]` and a handful of primitives
//! with a stable textual form. Anything that would need one (serialized
//! objects, file references, custom types) fails with
//! [`Error::UnresolvableType`]. String-only extraction validates values the
//! same way but keeps the trimmed source text of anything that is not a
//! plain string.
//!
//! Numbers keep their literal text (`1.50`, `1E3`, 29-digit decimals), so no
//! precision is lost between the resource file and the generated JSON.

use base64::{Engine, engine::general_purpose::STANDARD};
use crate::{
    error::Error,
    formats::resx::{DataNode, Format},
    types::{Bundle, OtherValue, ResourceEntry, ResourceValue},
};

/// How values are represented in the extracted bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Every value becomes [`ResourceValue::String`] holding its source text.
    StringOnly,
    /// Values keep their native type.
    Typed,
}

const INTEGER_TYPES: &[&str] = &[
    "System.SByte",
    "System.Byte",
    "System.Int16",
    "System.UInt16",
    "System.Int32",
    "System.UInt32",
    "System.Int64",
    "System.UInt64",
];

const FLOAT_TYPES: &[&str] = &["System.Single", "System.Double", "System.Decimal"];

const TEXTUAL_TYPES: &[&str] = &[
    "System.DateTime",
    "System.DateTimeOffset",
    "System.TimeSpan",
    "System.Guid",
    "System.Uri",
    "System.Version",
];

/// Extracts every node of `document`. `source` names the file in errors.
///
/// Fails on the first duplicate key or unresolvable value; no partial bundle
/// is returned.
pub fn extract(document: &Format, mode: ExtractionMode, source: &str) -> Result<Bundle, Error> {
    let mut bundle = Bundle::new();
    for node in &document.nodes {
        let value = resolve_typed(node)?;
        let value = match mode {
            ExtractionMode::Typed => value,
            ExtractionMode::StringOnly => match value {
                ResourceValue::String(text) => ResourceValue::String(text),
                _ => ResourceValue::String(node.value.trim().to_string()),
            },
        };
        bundle.push(ResourceEntry::new(node.name.clone(), value), source)?;
    }
    Ok(bundle)
}

/// Resolves a single node to its native value.
pub fn resolve_typed(node: &DataNode) -> Result<ResourceValue, Error> {
    if let Some(mime_type) = &node.mime_type {
        return Err(Error::unresolvable(&node.name, mime_type));
    }

    let Some(type_name) = node.type_name.as_deref() else {
        return Ok(ResourceValue::String(node.value.clone()));
    };

    // "System.Int32, mscorlib, Version=4.0.0.0, ..." -> "System.Int32"
    let short_name = type_name.split(',').next().unwrap_or_default().trim();
    let text = node.value.trim();

    match short_name {
        "System.String" | "System.Char" => Ok(ResourceValue::String(node.value.clone())),
        name if INTEGER_TYPES.contains(&name) => parse_integer(text)
            .map(ResourceValue::Number)
            .ok_or_else(|| invalid_value(node, name)),
        name if FLOAT_TYPES.contains(&name) => parse_float(text)
            .map(ResourceValue::Number)
            .ok_or_else(|| invalid_value(node, name)),
        "System.Byte[]" => {
            let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            STANDARD
                .decode(compact.as_bytes())
                .map(ResourceValue::Binary)
                .map_err(|_| invalid_value(node, "System.Byte[]"))
        }
        "System.Boolean" => match text.to_ascii_lowercase().as_str() {
            "true" => Ok(ResourceValue::Other(OtherValue::Boolean(true))),
            "false" => Ok(ResourceValue::Other(OtherValue::Boolean(false))),
            _ => Err(invalid_value(node, "System.Boolean")),
        },
        name if TEXTUAL_TYPES.contains(&name) => Ok(ResourceValue::Other(OtherValue::Text {
            type_name: name.to_string(),
            text: text.to_string(),
        })),
        _ => Err(Error::unresolvable(&node.name, type_name)),
    }
}

fn parse_integer(text: &str) -> Option<serde_json::Number> {
    text.parse::<i64>()
        .map(serde_json::Number::from)
        .or_else(|_| text.parse::<u64>().map(serde_json::Number::from))
        .ok()
}

/// Keeps the literal when it is already a JSON number; otherwise (`+1.5`,
/// `.5`) falls back to the shortest `f64` form. Non-finite values are rejected.
fn parse_float(text: &str) -> Option<serde_json::Number> {
    let float = text.parse::<f64>().ok().filter(|f| f.is_finite())?;
    serde_json::from_str::<serde_json::Number>(text)
        .ok()
        .or_else(|| serde_json::Number::from_f64(float))
}

fn invalid_value(node: &DataNode, type_name: &str) -> Error {
    Error::InvalidResource(format!(
        "value `{}` of `{}` is not a valid {}",
        node.value, node.name, type_name
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;
    use indoc::indoc;

    fn node(name: &str, value: &str, type_name: Option<&str>) -> DataNode {
        DataNode {
            name: name.to_string(),
            value: value.to_string(),
            type_name: type_name.map(str::to_string),
            mime_type: None,
            comment: None,
        }
    }

    const MIXED: &str = indoc! {r#"
        <root>
          <data name="Title"><value>Welcome</value></data>
          <data name="MaxItems" type="System.Int32, mscorlib"><value>25</value></data>
          <data name="Ratio" type="System.Double, mscorlib"><value>0.5</value></data>
          <data name="Enabled" type="System.Boolean, mscorlib"><value>True</value></data>
          <data name="Magic" type="System.Byte[], mscorlib"><value>AQID</value></data>
        </root>
    "#};

    #[test]
    fn test_typed_extraction() {
        let format = Format::from_str(MIXED).unwrap();
        let bundle = extract(&format, ExtractionMode::Typed, "Mixed.resx").unwrap();
        assert_eq!(bundle.len(), 5);
        assert_eq!(
            serde_json::to_string(&bundle).unwrap(),
            r#"{"Title":"Welcome","MaxItems":25,"Ratio":0.5,"Enabled":true,"Magic":[1,2,3]}"#
        );
    }

    #[test]
    fn test_string_only_extraction() {
        let format = Format::from_str(MIXED).unwrap();
        let bundle = extract(&format, ExtractionMode::StringOnly, "Mixed.resx").unwrap();
        assert!(bundle.iter().all(|e| e.value.as_str().is_some()));
        assert_eq!(bundle.get("MaxItems").and_then(|v| v.as_str()), Some("25"));
        assert_eq!(bundle.get("Enabled").and_then(|v| v.as_str()), Some("True"));
        assert_eq!(bundle.get("Magic").and_then(|v| v.as_str()), Some("AQID"));
    }

    #[test]
    fn test_duplicate_keys_fail() {
        let xml = indoc! {r#"
            <root>
              <data name="a"><value>x</value></data>
              <data name="a"><value>y</value></data>
            </root>
        "#};
        let format = Format::from_str(xml).unwrap();
        for mode in [ExtractionMode::Typed, ExtractionMode::StringOnly] {
            let result = extract(&format, mode, "Dup.resx");
            assert!(matches!(result, Err(Error::DuplicateKey { ref key, .. }) if key == "a"));
        }
    }

    #[test]
    fn test_serialized_object_is_unresolvable() {
        let mut blob = node("Logo", "AAEAAAD/////", None);
        blob.mime_type = Some("application/x-microsoft.net.object.binary.base64".to_string());
        let err = resolve_typed(&blob).unwrap_err();
        assert!(matches!(err, Error::UnresolvableType { .. }));
    }

    #[test]
    fn test_file_reference_and_custom_types_are_unresolvable() {
        let file_ref = node(
            "Icon",
            r"..\Resources\app.ico;System.Drawing.Icon, System.Drawing",
            Some("System.Resources.ResXFileRef, System.Windows.Forms"),
        );
        assert!(matches!(
            resolve_typed(&file_ref),
            Err(Error::UnresolvableType { .. })
        ));

        let custom = node("Point", "1, 2", Some("System.Drawing.Point, System.Drawing"));
        match resolve_typed(&custom) {
            Err(Error::UnresolvableType { key, type_name }) => {
                assert_eq!(key, "Point");
                assert_eq!(type_name, "System.Drawing.Point, System.Drawing");
            }
            other => panic!("expected unresolvable type, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolvable_fails_in_string_mode_too() {
        let xml = r#"<root><data name="P" type="Acme.Custom, Acme"><value>1</value></data></root>"#;
        let format = Format::from_str(xml).unwrap();
        assert!(extract(&format, ExtractionMode::StringOnly, "P.resx").is_err());
    }

    #[test]
    fn test_numbers() {
        let value = resolve_typed(&node("Big", "18446744073709551615", Some("System.UInt64"))).unwrap();
        assert_eq!(value.to_display_string(), "18446744073709551615");
        let value = resolve_typed(&node("Neg", " -12 ", Some("System.Int16, mscorlib"))).unwrap();
        assert_eq!(value, ResourceValue::Number((-12i64).into()));
        assert!(resolve_typed(&node("Bad", "twelve", Some("System.Int32"))).is_err());
        assert!(resolve_typed(&node("Nan", "NaN", Some("System.Double"))).is_err());
    }

    #[test]
    fn test_numbers_keep_their_literal_text() {
        let xml = indoc! {r#"
            <root>
              <data name="Price" type="System.Decimal, mscorlib"><value>1.50</value></data>
              <data name="Big" type="System.Decimal, mscorlib"><value>79228162514264337593543950335</value></data>
              <data name="Exp" type="System.Double, mscorlib"><value> 1E3 </value></data>
              <data name="Padded" type="System.Int32, mscorlib"><value>007</value></data>
            </root>
        "#};
        let format = Format::from_str(xml).unwrap();

        let typed = extract(&format, ExtractionMode::Typed, "Prices.resx").unwrap();
        assert_eq!(
            serde_json::to_string(&typed).unwrap(),
            r#"{"Price":1.50,"Big":79228162514264337593543950335,"Exp":1E3,"Padded":7}"#
        );

        let raw = extract(&format, ExtractionMode::StringOnly, "Prices.resx").unwrap();
        assert_eq!(
            serde_json::to_string(&raw).unwrap(),
            r#"{"Price":"1.50","Big":"79228162514264337593543950335","Exp":"1E3","Padded":"007"}"#
        );
    }

    #[test]
    fn test_non_json_float_literals() {
        let value = resolve_typed(&node("Lead", "+2.5", Some("System.Single"))).unwrap();
        assert_eq!(value.to_display_string(), "2.5");
        assert!(resolve_typed(&node("Inf", "Infinity", Some("System.Double"))).is_err());
    }

    #[test]
    fn test_textual_types() {
        let value = resolve_typed(&node(
            "Released",
            "2024-05-01T00:00:00",
            Some("System.DateTime, mscorlib"),
        ))
        .unwrap();
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#""2024-05-01T00:00:00""#
        );
    }

    #[test]
    fn test_string_and_char_keep_whitespace() {
        let value = resolve_typed(&node("Space", " ", Some("System.Char, mscorlib"))).unwrap();
        assert_eq!(value, ResourceValue::String(" ".to_string()));
    }

    #[test]
    fn test_line_wrapped_base64() {
        let value = resolve_typed(&node(
            "Bytes",
            "\n        AQID\n        BAU=\n    ",
            Some("System.Byte[], mscorlib"),
        ))
        .unwrap();
        assert_eq!(value, ResourceValue::Binary(vec![1, 2, 3, 4, 5]));
    }
}
