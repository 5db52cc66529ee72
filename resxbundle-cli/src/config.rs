use std::fs;
use std::path::Path;

use resxbundle::{BundleOptions, Error};

/// Loads [`BundleOptions`] from a TOML file. Missing keys keep their defaults.
///
/// ```toml
/// mode = "assignment"
/// module_prefix = "Acme.Web"
/// line_ending = "crlf"
/// error_policy = "continue"
/// ```
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<BundleOptions, Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| Error::config_error(format!("cannot read {}: {}", path.display(), e)))?;
    parse_options(&text)
        .map_err(|e| Error::config_error(format!("{}: {}", path.display(), e)))
}

pub fn parse_options(text: &str) -> Result<BundleOptions, toml::de::Error> {
    toml::from_str(text)
}
