#![forbid(unsafe_code)]
//! Compile .NET `.resx` string resources for web front-ends.
//!
//! Each resource file becomes one [`BundleArtifact`]: either a plain JSON
//! document or a script that creates its namespace chain on demand and merges
//! its entries over whatever already lives at the target leaf. Loading a
//! neutral bundle followed by a localized one therefore gives locale-specific
//! values with neutral fallbacks.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use resxbundle::{BundleOptions, Compiler, LogReporter, OutputMode};
//!
//! let options = BundleOptions::new()
//!     .with_mode(OutputMode::NamespacedMergeClosure)
//!     .with_module_prefix(Some("Acme".to_string()));
//! let compiler = Compiler::new(options)?;
//!
//! let outcome = compiler.compile_batch(&["Greetings.resx", "Greetings.fr-FR.resx"], &LogReporter)?;
//! for (_, artifact) in &outcome.artifacts {
//!     artifact.write_to_dir("wwwroot/js/strings")?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Output Modes
//!
//! - **raw-json**: `{"Hello":"Hello"}`
//! - **namespaced-assignment**: `var Acme.Greetings = {"Hello":"Hello","lcid":0,"lang":""};`
//! - **namespaced-merge-closure**: guarded namespace declarations followed by
//!   `Acme.Greetings = (function () { ... }());`

pub mod compiler;
pub mod error;
pub mod extract;
pub mod formats;
pub mod locale;
pub mod namespace;
pub mod options;
pub mod report;
pub mod serialize;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    compiler::{BatchOutcome, Compiler},
    error::Error,
    extract::{ExtractionMode, extract},
    formats::ResxFormat,
    locale::{FileNameParts, LocaleTag, resolve_file_locale},
    namespace::NamespacePath,
    options::{BundleOptions, ErrorPolicy, LineEnding},
    report::{Event, LogReporter, MemoryReporter, NullReporter, RecordedEvent, Reporter},
    serialize::{BundleSerializer, OutputMode},
    traits::Parser,
    types::{Bundle, BundleArtifact, OtherValue, ResourceEntry, ResourceValue},
};
