//! Locale detection from resource file names.
//!
//! A resource file may carry its culture as the last dotted segment before the
//! extension: `Greetings.fr-FR.resx` is French (France), `Greetings.resx` and
//! `Module.Greetings.resx` are neutral. Only one suffix level is inspected.
//!
//! A suffix that is not a known culture simply means "neutral"; it is never an
//! error.

use std::{collections::HashMap, fmt::Display, path::Path};

use lazy_static::lazy_static;
use serde::Serialize;
use unic_langid::LanguageIdentifier;

/// Windows culture names and their locale identifiers (LCIDs).
///
/// Neutral cultures come first, then specific ones. Names use the canonical
/// casing that is emitted in the `lang` field of generated bundles.
const CULTURES: &[(&str, u32)] = &[
    ("af", 54),
    ("am", 94),
    ("ar", 1),
    ("az", 44),
    ("be", 35),
    ("bg", 2),
    ("bn", 69),
    ("bs", 30746),
    ("ca", 3),
    ("cs", 5),
    ("cy", 82),
    ("da", 6),
    ("de", 7),
    ("el", 8),
    ("en", 9),
    ("es", 10),
    ("et", 37),
    ("eu", 45),
    ("fa", 41),
    ("fi", 11),
    ("fil", 100),
    ("fo", 56),
    ("fr", 12),
    ("ga", 60),
    ("gl", 86),
    ("gu", 71),
    ("he", 13),
    ("hi", 57),
    ("hr", 26),
    ("hu", 14),
    ("hy", 43),
    ("id", 33),
    ("is", 15),
    ("it", 16),
    ("ja", 17),
    ("ka", 55),
    ("kk", 63),
    ("km", 83),
    ("kn", 75),
    ("ko", 18),
    ("lo", 84),
    ("lt", 39),
    ("lv", 38),
    ("mk", 47),
    ("ml", 76),
    ("mn", 80),
    ("mr", 78),
    ("ms", 62),
    ("mt", 58),
    ("nb", 31764),
    ("ne", 97),
    ("nl", 19),
    ("nn", 30740),
    ("no", 20),
    ("pa", 70),
    ("pl", 21),
    ("ps", 99),
    ("pt", 22),
    ("rm", 23),
    ("ro", 24),
    ("ru", 25),
    ("si", 91),
    ("sk", 27),
    ("sl", 36),
    ("sq", 28),
    ("sr", 31770),
    ("sv", 29),
    ("sw", 65),
    ("ta", 73),
    ("te", 74),
    ("th", 30),
    ("tr", 31),
    ("tt", 68),
    ("uk", 34),
    ("ur", 32),
    ("uz", 67),
    ("vi", 42),
    ("yo", 106),
    ("zh", 30724),
    ("zh-Hans", 4),
    ("zh-Hant", 31748),
    ("af-ZA", 1078),
    ("am-ET", 1118),
    ("ar-AE", 14337),
    ("ar-EG", 3073),
    ("ar-IQ", 2049),
    ("ar-MA", 6145),
    ("ar-SA", 1025),
    ("az-Latn-AZ", 1068),
    ("be-BY", 1059),
    ("bg-BG", 1026),
    ("bn-BD", 2117),
    ("bn-IN", 1093),
    ("ca-ES", 1027),
    ("cs-CZ", 1029),
    ("cy-GB", 1106),
    ("da-DK", 1030),
    ("de-AT", 3079),
    ("de-CH", 2055),
    ("de-DE", 1031),
    ("de-LI", 5127),
    ("de-LU", 4103),
    ("el-GR", 1032),
    ("en-AU", 3081),
    ("en-CA", 4105),
    ("en-GB", 2057),
    ("en-IE", 6153),
    ("en-IN", 16393),
    ("en-NZ", 5129),
    ("en-SG", 18441),
    ("en-US", 1033),
    ("en-ZA", 7177),
    ("es-AR", 11274),
    ("es-CL", 13322),
    ("es-CO", 9226),
    ("es-ES", 3082),
    ("es-GT", 4106),
    ("es-MX", 2058),
    ("es-US", 21514),
    ("et-EE", 1061),
    ("eu-ES", 1069),
    ("fa-IR", 1065),
    ("fi-FI", 1035),
    ("fil-PH", 1124),
    ("fo-FO", 1080),
    ("fr-BE", 2060),
    ("fr-CA", 3084),
    ("fr-CH", 4108),
    ("fr-FR", 1036),
    ("fr-LU", 5132),
    ("ga-IE", 2108),
    ("gl-ES", 1110),
    ("gu-IN", 1095),
    ("he-IL", 1037),
    ("hi-IN", 1081),
    ("hr-BA", 4122),
    ("hr-HR", 1050),
    ("hu-HU", 1038),
    ("hy-AM", 1067),
    ("id-ID", 1057),
    ("is-IS", 1039),
    ("it-CH", 2064),
    ("it-IT", 1040),
    ("ja-JP", 1041),
    ("ka-GE", 1079),
    ("kk-KZ", 1087),
    ("km-KH", 1107),
    ("kn-IN", 1099),
    ("ko-KR", 1042),
    ("lo-LA", 1108),
    ("lt-LT", 1063),
    ("lv-LV", 1062),
    ("mk-MK", 1071),
    ("ml-IN", 1100),
    ("mn-MN", 1104),
    ("mr-IN", 1102),
    ("ms-BN", 2110),
    ("ms-MY", 1086),
    ("mt-MT", 1082),
    ("nb-NO", 1044),
    ("ne-NP", 1121),
    ("nl-BE", 2067),
    ("nl-NL", 1043),
    ("nn-NO", 2068),
    ("pa-IN", 1094),
    ("pl-PL", 1045),
    ("pt-BR", 1046),
    ("pt-PT", 2070),
    ("rm-CH", 1047),
    ("ro-RO", 1048),
    ("ru-RU", 1049),
    ("si-LK", 1115),
    ("sk-SK", 1051),
    ("sl-SI", 1060),
    ("sq-AL", 1052),
    ("sr-Cyrl-RS", 10266),
    ("sr-Latn-RS", 9242),
    ("sv-FI", 2077),
    ("sv-SE", 1053),
    ("sw-KE", 1089),
    ("ta-IN", 1097),
    ("te-IN", 1098),
    ("th-TH", 1054),
    ("tr-TR", 1055),
    ("tt-RU", 1092),
    ("uk-UA", 1058),
    ("ur-PK", 1056),
    ("uz-Latn-UZ", 1091),
    ("vi-VN", 1066),
    ("yo-NG", 1130),
    ("zh-CN", 2052),
    ("zh-HK", 3076),
    ("zh-MO", 5124),
    ("zh-SG", 4100),
    ("zh-TW", 1028),
];

lazy_static! {
    // Keyed by lowercase name with `-` separators.
    static ref CULTURE_TABLE: HashMap<String, (&'static str, u32)> = CULTURES
        .iter()
        .map(|&(name, lcid)| (name.to_ascii_lowercase(), (name, lcid)))
        .collect();
}

/// A culture resolved from a resource file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocaleTag {
    code: String,
    lcid: u32,
}

impl LocaleTag {
    /// Resolves a culture name such as `fr-FR`, `en` or `zh_hant`.
    ///
    /// Matching is case-insensitive and accepts `_` as a separator. Returns
    /// `None` for malformed tokens and for well-formed tags that are not in the
    /// culture table.
    pub fn resolve(code: &str) -> Option<LocaleTag> {
        let normalized = code.trim().replace('_', "-");
        if normalized.is_empty() {
            return None;
        }
        // Reject anything that is not a syntactically valid language identifier
        // before touching the table.
        normalized.parse::<LanguageIdentifier>().ok()?;

        CULTURE_TABLE
            .get(&normalized.to_ascii_lowercase())
            .map(|&(name, lcid)| LocaleTag {
                code: name.to_string(),
                lcid,
            })
    }

    /// Canonical culture name, e.g. `fr-FR`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Windows locale identifier, e.g. `1036` for `fr-FR`.
    pub fn lcid(&self) -> u32 {
        self.lcid
    }
}

impl Display for LocaleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code, self.lcid)
    }
}

/// A resource file name split into its logical parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNameParts {
    /// File name without extension and without the locale segment.
    pub base_name: String,
    /// The culture carried by the file name, if any.
    pub locale: Option<LocaleTag>,
    /// The format extension (without the dot), if any.
    pub extension: Option<String>,
}

impl FileNameParts {
    /// Splits `file_name` (directories are ignored).
    ///
    /// ```rust
    /// use resxbundle::locale::FileNameParts;
    /// let parts = FileNameParts::parse("Greetings.fr-FR.resx");
    /// assert_eq!(parts.base_name, "Greetings");
    /// assert_eq!(parts.locale.unwrap().lcid(), 1036);
    /// ```
    pub fn parse(file_name: impl AsRef<Path>) -> FileNameParts {
        let path = file_name.as_ref();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_string);

        let (base_name, locale) = match stem.rsplit_once('.') {
            Some((rest, candidate)) => match LocaleTag::resolve(candidate) {
                Some(tag) => (rest.to_string(), Some(tag)),
                None => (stem.to_string(), None),
            },
            None => (stem.to_string(), None),
        };

        FileNameParts {
            base_name,
            locale,
            extension,
        }
    }
}

/// Returns the culture carried by a resource file name, or `None` for a
/// neutral bundle.
pub fn resolve_file_locale(file_name: impl AsRef<Path>) -> Option<LocaleTag> {
    FileNameParts::parse(file_name).locale
}
