//! Progress and diagnostic reporting.
//!
//! The compiler never prints. It hands [`Event`]s to a [`Reporter`] supplied by
//! the host: [`LogReporter`] forwards them to the `log` facade, [`NullReporter`]
//! drops them and [`MemoryReporter`] keeps them for later inspection.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::error::Error;

/// Log target used by [`LogReporter`].
pub const LOG_TARGET: &str = "resxbundle";

/// Something that happened while compiling a batch.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// Compilation of a resource file started.
    Started { path: &'a Path },
    /// A file (or the whole batch, when `path` is `None`) was not compiled.
    Skipped {
        path: Option<&'a Path>,
        reason: &'a str,
    },
    /// An artifact was produced for `path`.
    Generated { path: &'a Path, file_name: &'a str },
    /// Compiling `path` failed.
    Failed { path: &'a Path, error: &'a Error },
}

impl Display for Event<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Started { path } => write!(f, "Started converting {}", path.display()),
            Event::Skipped {
                path: Some(path),
                reason,
            } => write!(f, "Skipping {}: {}", path.display(), reason),
            Event::Skipped { path: None, reason } => write!(f, "Skipping conversion: {}", reason),
            Event::Generated { path, file_name } => {
                write!(f, "Generated {} from {}", file_name, path.display())
            }
            Event::Failed { path, error } => {
                write!(f, "Failed converting {}: {}", path.display(), error)
            }
        }
    }
}

pub trait Reporter: Send + Sync {
    fn report(&self, event: Event<'_>);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, event: Event<'_>) {
        match event {
            Event::Started { .. } | Event::Generated { .. } => {
                log::info!(target: LOG_TARGET, "{}", event)
            }
            Event::Skipped { .. } => log::warn!(target: LOG_TARGET, "{}", event),
            Event::Failed { .. } => log::error!(target: LOG_TARGET, "{}", event),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: Event<'_>) {}
}

/// An owned copy of an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    Started {
        path: PathBuf,
    },
    Skipped {
        path: Option<PathBuf>,
        reason: String,
    },
    Generated {
        path: PathBuf,
        file_name: String,
    },
    Failed {
        path: PathBuf,
        error: String,
    },
}

impl From<Event<'_>> for RecordedEvent {
    fn from(event: Event<'_>) -> Self {
        match event {
            Event::Started { path } => RecordedEvent::Started {
                path: path.to_path_buf(),
            },
            Event::Skipped { path, reason } => RecordedEvent::Skipped {
                path: path.map(Path::to_path_buf),
                reason: reason.to_string(),
            },
            Event::Generated { path, file_name } => RecordedEvent::Generated {
                path: path.to_path_buf(),
                file_name: file_name.to_string(),
            },
            Event::Failed { path, error } => RecordedEvent::Failed {
                path: path.to_path_buf(),
                error: error.to_string(),
            },
        }
    }
}

/// Records every event in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<RecordedEvent>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: Event<'_>) {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        events.push(event.into());
    }
}
