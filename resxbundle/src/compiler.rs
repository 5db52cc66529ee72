//! Compiles `.resx` files into [`BundleArtifact`]s.
//!
//! Each file is handled on its own: resolve the locale from the file name,
//! extract the entries, build the namespace path and render. Batches add
//! reporting and an explicit [`ErrorPolicy`].
//!
//! # Load order
//!
//! A neutral bundle and its localized siblings share one leaf path. In the
//! merge-closure mode the last artifact evaluated wins per key, so the page
//! must load the neutral artifact before any localized one.

use std::path::{Path, PathBuf};

use crate::{
    error::Error,
    extract::extract,
    formats::{ResxFormat, is_resx_file},
    locale::FileNameParts,
    namespace::NamespacePath,
    options::{BundleOptions, ErrorPolicy},
    report::{Event, Reporter},
    serialize::BundleSerializer,
    traits::Parser,
    types::BundleArtifact,
};

const NO_INPUTS_REASON: &str = "no resource files found; make sure the .resx files are part of the input set";
const NOT_RESX_REASON: &str = "not a .resx resource file";

/// Results of a batch run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Artifacts in input order, paired with their source file.
    pub artifacts: Vec<(PathBuf, BundleArtifact)>,
    /// Files that failed (only populated under [`ErrorPolicy::Continue`]).
    pub failures: Vec<(PathBuf, Error)>,
    /// Inputs that were not resource files.
    pub skipped: Vec<PathBuf>,
}

impl BatchOutcome {
    /// Number of inputs that were attempted (compiled or failed).
    pub fn attempted(&self) -> usize {
        self.artifacts.len() + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turns recorded failures into [`Error::Batch`].
    pub fn into_result(self) -> Result<Vec<(PathBuf, BundleArtifact)>, Error> {
        if self.failures.is_empty() {
            Ok(self.artifacts)
        } else {
            Err(Error::Batch {
                failed: self.failures.len(),
                total: self.attempted(),
            })
        }
    }
}

/// Compiles resource files with a fixed set of [`BundleOptions`].
#[derive(Debug, Clone)]
pub struct Compiler {
    options: BundleOptions,
}

impl Compiler {
    /// Creates a compiler after validating `options`.
    pub fn new(options: BundleOptions) -> Result<Self, Error> {
        options.validate()?;
        Ok(Compiler { options })
    }

    pub fn options(&self) -> &BundleOptions {
        &self.options
    }

    /// Reads and compiles one file.
    pub fn compile_file<P: AsRef<Path>>(&self, path: P) -> Result<BundleArtifact, Error> {
        let path = path.as_ref();
        let document = ResxFormat::read_from(path).map_err(|e| Error::unreadable(path, e))?;
        self.compile_document(&file_name_of(path), &document)
    }

    /// Compiles in-memory resx `content` as if it were read from `file_name`.
    pub fn compile_str(&self, file_name: &str, content: &str) -> Result<BundleArtifact, Error> {
        let document = ResxFormat::from_str(content).map_err(|e| Error::unreadable(file_name, e))?;
        self.compile_document(file_name, &document)
    }

    /// Compiles an already parsed document. `file_name` drives locale detection
    /// and artifact naming.
    pub fn compile_document(
        &self,
        file_name: &str,
        document: &ResxFormat,
    ) -> Result<BundleArtifact, Error> {
        let parts = FileNameParts::parse(file_name);
        let bundle = extract(document, self.options.mode.extraction_mode(), file_name)?;

        let namespace = if self.options.mode.is_script() {
            let identifier = self
                .options
                .target
                .as_deref()
                .unwrap_or(&parts.base_name);
            Some(NamespacePath::with_prefix(self.options.prefix(), identifier)?)
        } else {
            None
        };

        let content = BundleSerializer::new(&self.options).render(
            &bundle,
            namespace.as_ref(),
            parts.locale.as_ref(),
        )?;

        Ok(BundleArtifact {
            file_name: self.artifact_file_name(&parts),
            content,
        })
    }

    /// `<prefix>.<base>[.<locale>].<extension>`
    pub fn artifact_file_name(&self, parts: &FileNameParts) -> String {
        let mut segments: Vec<&str> = Vec::with_capacity(4);
        if let Some(prefix) = self.options.prefix() {
            segments.push(prefix);
        }
        segments.push(&parts.base_name);
        if self.options.locale_in_file_name {
            if let Some(locale) = &parts.locale {
                segments.push(locale.code());
            }
        }
        segments.push(self.options.output_extension());
        segments.join(".")
    }

    /// Compiles every input, reporting progress through `reporter`.
    ///
    /// Non-`.resx` inputs are skipped. Under [`ErrorPolicy::Halt`] the first
    /// failure is returned; under [`ErrorPolicy::Continue`] failures are
    /// collected in the outcome. Files are compiled independently: a neutral
    /// file and its localized siblings yield artifacts with the same file
    /// name, and the host decides how to place them.
    pub fn compile_batch<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        reporter: &dyn Reporter,
    ) -> Result<BatchOutcome, Error> {
        let mut outcome = BatchOutcome::default();

        if inputs.is_empty() {
            reporter.report(Event::Skipped {
                path: None,
                reason: NO_INPUTS_REASON,
            });
            return Ok(outcome);
        }

        for input in inputs {
            let path = input.as_ref();
            if !is_resx_file(path) {
                reporter.report(Event::Skipped {
                    path: Some(path),
                    reason: NOT_RESX_REASON,
                });
                outcome.skipped.push(path.to_path_buf());
                continue;
            }

            reporter.report(Event::Started { path });

            match self.compile_file(path) {
                Ok(artifact) => {
                    reporter.report(Event::Generated {
                        path,
                        file_name: &artifact.file_name,
                    });
                    outcome.artifacts.push((path.to_path_buf(), artifact));
                }
                Err(error) => {
                    reporter.report(Event::Failed {
                        path,
                        error: &error,
                    });
                    match self.options.error_policy {
                        ErrorPolicy::Halt => return Err(error),
                        ErrorPolicy::Continue => outcome.failures.push((path.to_path_buf(), error)),
                    }
                }
            }
        }

        Ok(outcome)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
