//! CLI library for testing purposes

pub mod compile;
pub mod config;
pub mod inspect;
pub mod logging;
pub mod path_glob;

pub use compile::{CompileArgs, CompileSummary, ModeArg, build_options, compile_to_dir};
pub use config::load_options;
pub use inspect::inspect_file;
pub use path_glob::expand_inputs;
