//! Rendering of extracted bundles into artifact text.
//!
//! Three output modes are supported:
//!
//! - [`OutputMode::RawJson`]: `{"k1":"v1","k2":"v2"}`
//! - [`OutputMode::NamespacedAssignment`]: `var Ns.Leaf = {"k1":"v1","lcid":1036,"lang":"fr-FR"};`
//! - [`OutputMode::NamespacedMergeClosure`]:
//!
//! ```text
//! Acme = Acme||{};
//! Acme.Greetings = (function () {
//! 	var strings = {"Hello":"Hello","Bye":"Bye"};
//! 	return merge({}, Acme.Greetings || {}, strings);
//! }());
//! ```
//!
//! The merge closure overlays the new entries on whatever already lives at the
//! leaf, so a locale bundle loaded after the neutral one overrides it key by
//! key. That precedence only holds if the page loads the neutral artifact
//! first; nothing here enforces the order.

use std::{
    fmt::{Display, Formatter},
    io,
    str::FromStr,
};

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use serde_json::ser::Formatter as JsonFormatter;

use crate::{
    error::Error,
    extract::ExtractionMode,
    locale::LocaleTag,
    namespace::NamespacePath,
    options::{BundleOptions, LineEnding},
    types::Bundle,
};

/// Synthetic key carrying the numeric locale identifier.
pub const LCID_KEY: &str = "lcid";
/// Synthetic key carrying the locale code.
pub const LANG_KEY: &str = "lang";

/// The artifact shape to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum OutputMode {
    /// A plain JSON document of string values.
    #[serde(rename = "raw-json", alias = "json")]
    RawJson,
    /// `var <leaf> = {...};` with locale metadata keys.
    #[serde(rename = "namespaced-assignment", alias = "assignment")]
    NamespacedAssignment,
    /// Guarded namespace declarations plus a merging closure.
    #[default]
    #[serde(
        rename = "namespaced-merge-closure",
        alias = "merge-closure",
        alias = "merge"
    )]
    NamespacedMergeClosure,
}

impl OutputMode {
    /// Returns the default file extension for this mode.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputMode::RawJson => "json",
            OutputMode::NamespacedAssignment | OutputMode::NamespacedMergeClosure => "js",
        }
    }

    /// The extraction this mode renders from.
    pub fn extraction_mode(&self) -> ExtractionMode {
        match self {
            OutputMode::RawJson => ExtractionMode::StringOnly,
            OutputMode::NamespacedAssignment | OutputMode::NamespacedMergeClosure => {
                ExtractionMode::Typed
            }
        }
    }

    /// Whether the output is script text that needs a namespace path.
    pub fn is_script(&self) -> bool {
        !matches!(self, OutputMode::RawJson)
    }
}

impl Display for OutputMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::RawJson => write!(f, "raw-json"),
            OutputMode::NamespacedAssignment => write!(f, "namespaced-assignment"),
            OutputMode::NamespacedMergeClosure => write!(f, "namespaced-merge-closure"),
        }
    }
}

/// Accepts the canonical names and their short aliases, case-insensitively.
///
/// ```rust
/// use resxbundle::OutputMode;
/// use std::str::FromStr;
/// assert_eq!(OutputMode::from_str("json").unwrap(), OutputMode::RawJson);
/// assert_eq!(OutputMode::from_str("Merge").unwrap(), OutputMode::NamespacedMergeClosure);
/// assert!(OutputMode::from_str("yaml").is_err());
/// ```
impl FromStr for OutputMode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase().replace('_', "-");
        match s.as_str() {
            "raw-json" | "json" => Ok(OutputMode::RawJson),
            "namespaced-assignment" | "assignment" => Ok(OutputMode::NamespacedAssignment),
            "namespaced-merge-closure" | "merge-closure" | "merge" => {
                Ok(OutputMode::NamespacedMergeClosure)
            }
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// JSON formatter that escapes characters which could end a `<script>` block
/// or a JavaScript string literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptSafeFormatter;

impl JsonFormatter for ScriptSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if matches!(ch, '<' | '>' | '&' | '\'' | '\u{2028}' | '\u{2029}') {
                writer.write_all(&fragment.as_bytes()[start..index])?;
                write!(writer, "\\u{:04x}", ch as u32)?;
                start = index + ch.len_utf8();
            }
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Serializes `value` as compact JSON that is safe to embed in script text.
pub fn to_script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, ScriptSafeFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| Error::InvalidResource(e.to_string()))
}

/// A bundle followed by the `lcid`/`lang` keys.
struct WithLocaleMetadata<'a> {
    bundle: &'a Bundle,
    lcid: u32,
    lang: &'a str,
}

impl Serialize for WithLocaleMetadata<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bundle.len() + 2))?;
        for entry in self.bundle.iter() {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.serialize_entry(LCID_KEY, &self.lcid)?;
        map.serialize_entry(LANG_KEY, self.lang)?;
        map.end()
    }
}

/// The pieces of a script artifact, kept apart until rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTemplate {
    /// Guarded container declarations, outermost first.
    pub declarations: Vec<String>,
    /// Dotted path of the leaf receiving the bundle.
    pub leaf_path: String,
    /// Escaped JSON object literal.
    pub payload: String,
}

impl ScriptTemplate {
    pub fn render_assignment(&self) -> String {
        format!("var {} = {};", self.leaf_path, self.payload)
    }

    pub fn render_merge_closure(&self, merge_function: &str, line_ending: LineEnding) -> String {
        let nl = line_ending.as_str();
        let mut out = String::new();
        for declaration in &self.declarations {
            out.push_str(declaration);
            out.push_str(nl);
        }
        out.push_str(&format!(
            "{leaf} = (function () {{{nl}\tvar strings = {payload};{nl}\treturn {merge}({{}}, {leaf} || {{}}, strings);{nl}}}());",
            leaf = self.leaf_path,
            payload = self.payload,
            merge = merge_function,
            nl = nl,
        ));
        out
    }
}

/// Renders bundles according to a [`BundleOptions`].
#[derive(Debug, Clone)]
pub struct BundleSerializer<'a> {
    options: &'a BundleOptions,
}

impl<'a> BundleSerializer<'a> {
    pub fn new(options: &'a BundleOptions) -> Self {
        BundleSerializer { options }
    }

    /// Renders `bundle`. Script modes need `namespace`; `locale` only shows up
    /// in the assignment mode's metadata keys.
    pub fn render(
        &self,
        bundle: &Bundle,
        namespace: Option<&NamespacePath>,
        locale: Option<&LocaleTag>,
    ) -> Result<String, Error> {
        match self.options.mode {
            OutputMode::RawJson => render_raw_json(bundle),
            OutputMode::NamespacedAssignment => {
                render_assignment(bundle, require_namespace(namespace)?, locale)
            }
            OutputMode::NamespacedMergeClosure => render_merge_closure(
                bundle,
                require_namespace(namespace)?,
                &self.options.merge_function,
                self.options.line_ending,
            ),
        }
    }
}

fn require_namespace(namespace: Option<&NamespacePath>) -> Result<&NamespacePath, Error> {
    namespace.ok_or_else(|| {
        Error::InvalidNamespace("script output requires a namespace path".to_string())
    })
}

/// `{"k1":"v1","k2":"v2"}`
pub fn render_raw_json(bundle: &Bundle) -> Result<String, Error> {
    Ok(serde_json::to_string(bundle)?)
}

/// `var <leaf> = {...,"lcid":<id>,"lang":"<code>"};`
///
/// A resource that itself uses one of the metadata keys is rejected as a
/// duplicate key.
pub fn render_assignment(
    bundle: &Bundle,
    namespace: &NamespacePath,
    locale: Option<&LocaleTag>,
) -> Result<String, Error> {
    for reserved in [LCID_KEY, LANG_KEY] {
        if bundle.contains_key(reserved) {
            return Err(Error::duplicate_key(reserved, namespace.leaf_path()));
        }
    }

    let payload = to_script_json(&WithLocaleMetadata {
        bundle,
        lcid: locale.map(LocaleTag::lcid).unwrap_or(0),
        lang: locale.map(LocaleTag::code).unwrap_or_default(),
    })?;

    let template = ScriptTemplate {
        declarations: Vec::new(),
        leaf_path: namespace.leaf_path(),
        payload,
    };
    Ok(template.render_assignment())
}

/// Container declarations followed by the merging closure.
pub fn render_merge_closure(
    bundle: &Bundle,
    namespace: &NamespacePath,
    merge_function: &str,
    line_ending: LineEnding,
) -> Result<String, Error> {
    let template = ScriptTemplate {
        declarations: namespace.declarations(),
        leaf_path: namespace.leaf_path(),
        payload: to_script_json(bundle)?,
    };
    Ok(template.render_merge_closure(merge_function, line_ending))
}
