//! Options controlling how resource files are compiled.

use serde::Deserialize;

use crate::{error::Error, namespace::NamespacePath, serialize::OutputMode};

/// Line separator used between script statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// What a batch does after a file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop at the first failing file and return its error.
    #[default]
    Halt,
    /// Report the failure and carry on with the remaining files.
    Continue,
}

/// Compilation options for [`crate::Compiler`].
///
/// Deserializable, so hosts can keep them in a config file; every field has a
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleOptions {
    /// Artifact shape.
    pub mode: OutputMode,
    /// Module (assembly) name prepended to the namespace and the file name.
    pub module_prefix: Option<String>,
    /// Namespace identifier for every file; defaults to each file's base name.
    pub target: Option<String>,
    /// Expression called to merge bundles in the merge-closure mode.
    pub merge_function: String,
    pub line_ending: LineEnding,
    /// Re-append the locale code to localized artifact file names. Off by
    /// default: neutral and localized files share `<prefix>.<base>.<ext>`.
    pub locale_in_file_name: bool,
    /// Overrides the mode's default output extension.
    pub extension: Option<String>,
    pub error_policy: ErrorPolicy,
}

impl Default for BundleOptions {
    fn default() -> Self {
        BundleOptions {
            mode: OutputMode::default(),
            module_prefix: None,
            target: None,
            merge_function: "merge".to_string(),
            line_ending: LineEnding::default(),
            locale_in_file_name: false,
            extension: None,
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl BundleOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_module_prefix(mut self, module_prefix: Option<String>) -> Self {
        self.module_prefix = module_prefix;
        self
    }

    pub fn with_target(mut self, target: Option<String>) -> Self {
        self.target = target;
        self
    }

    pub fn with_merge_function(mut self, merge_function: impl Into<String>) -> Self {
        self.merge_function = merge_function.into();
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn with_locale_in_file_name(mut self, locale_in_file_name: bool) -> Self {
        self.locale_in_file_name = locale_in_file_name;
        self
    }

    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    /// Extension of generated files, without the leading dot.
    pub fn output_extension(&self) -> &str {
        self.extension
            .as_deref()
            .map(|ext| ext.trim_start_matches('.'))
            .unwrap_or_else(|| self.mode.extension())
    }

    /// The module prefix, if set and not blank.
    pub fn prefix(&self) -> Option<&str> {
        self.module_prefix
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// Checks option combinations that would only fail later, per file.
    pub fn validate(&self) -> Result<(), Error> {
        if self.merge_function.trim().is_empty() {
            return Err(Error::config_error("merge function must not be empty"));
        }
        if self.output_extension().is_empty() {
            return Err(Error::config_error("output extension must not be empty"));
        }
        if self.mode.is_script() {
            if let Some(prefix) = self.prefix() {
                NamespacePath::parse(prefix)?;
            }
            if let Some(target) = &self.target {
                NamespacePath::parse(target)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BundleOptions::new();
        assert_eq!(options.mode, OutputMode::NamespacedMergeClosure);
        assert_eq!(options.merge_function, "merge");
        assert_eq!(options.output_extension(), "js");
        assert!(!options.locale_in_file_name);
        assert_eq!(options.error_policy, ErrorPolicy::Halt);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = BundleOptions::new()
            .with_mode(OutputMode::RawJson)
            .with_module_prefix(Some("Acme".to_string()))
            .with_extension(Some(".data.json".to_string()))
            .with_error_policy(ErrorPolicy::Continue);
        assert_eq!(options.output_extension(), "data.json");
        assert_eq!(options.prefix(), Some("Acme"));
        assert_eq!(options.error_policy, ErrorPolicy::Continue);
    }

    #[test]
    fn test_blank_prefix_is_ignored() {
        let options = BundleOptions::new().with_module_prefix(Some("  ".to_string()));
        assert_eq!(options.prefix(), None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(BundleOptions::new().with_merge_function(" ").validate().is_err());
        assert!(
            BundleOptions::new()
                .with_extension(Some(String::new()))
                .validate()
                .is_err()
        );
        assert!(
            BundleOptions::new()
                .with_module_prefix(Some("Acme..Web".to_string()))
                .validate()
                .is_err()
        );
        // Prefixes only name files in raw-json mode.
        assert!(
            BundleOptions::new()
                .with_mode(OutputMode::RawJson)
                .with_module_prefix(Some("acme-web".to_string()))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_deserialize_from_json() {
        let options: BundleOptions = serde_json::from_str(
            r#"{"mode":"assignment","module_prefix":"Acme","line_ending":"crlf","error_policy":"continue"}"#,
        )
        .unwrap();
        assert_eq!(options.mode, OutputMode::NamespacedAssignment);
        assert_eq!(options.module_prefix.as_deref(), Some("Acme"));
        assert_eq!(options.line_ending, LineEnding::CrLf);
        assert_eq!(options.error_policy, ErrorPolicy::Continue);
        assert_eq!(options.merge_function, "merge");
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result = serde_json::from_str::<BundleOptions>(r#"{"mode":"json","colour":"red"}"#);
        assert!(result.is_err());
    }
}
