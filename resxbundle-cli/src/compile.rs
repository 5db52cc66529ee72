use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use resxbundle::{
    BatchOutcome, BundleOptions, Compiler, Error, ErrorPolicy, LineEnding, LogReporter,
    OutputMode, Reporter,
};

use crate::config::load_options;
use crate::path_glob::expand_inputs;

/// `--mode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Plain JSON document of string values
    #[value(alias = "raw-json")]
    Json,
    /// `var <ns> = {...};` with lcid/lang metadata for localized files
    #[value(alias = "namespaced-assignment")]
    Assignment,
    /// Namespace guards plus a closure merging into existing values
    #[value(alias = "namespaced-merge-closure", alias = "merge-closure")]
    Merge,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Json => OutputMode::RawJson,
            ModeArg::Assignment => OutputMode::NamespacedAssignment,
            ModeArg::Merge => OutputMode::NamespacedMergeClosure,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CompileArgs {
    /// Input .resx files, directories or glob patterns
    #[arg(short, long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    /// Directory receiving the generated files
    #[arg(short, long = "output-dir", visible_alias = "output")]
    pub output: PathBuf,

    /// Output shape (defaults to the config file, then `merge`)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Module name prepended to namespaces and file names
    #[arg(long)]
    pub prefix: Option<String>,

    /// Namespace identifier used instead of each file's base name
    #[arg(long)]
    pub target: Option<String>,

    /// Function called to merge bundles in `merge` mode
    #[arg(long = "merge-fn")]
    pub merge_fn: Option<String>,

    /// Extension of generated files
    #[arg(long)]
    pub extension: Option<String>,

    /// Separate script statements with CRLF
    #[arg(long)]
    pub crlf: bool,

    /// Re-append the locale code to localized file names
    /// (`Acme.Greetings.fr-FR.js`) so they do not replace the neutral file
    #[arg(long)]
    pub locale_in_file_name: bool,

    /// Keep compiling the remaining files after a failure
    #[arg(long)]
    pub continue_on_error: bool,

    /// TOML file with compile options; flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Applies command-line overrides on top of the config file (or defaults).
pub fn build_options(args: &CompileArgs) -> Result<BundleOptions, Error> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => BundleOptions::default(),
    };

    if let Some(mode) = args.mode {
        options.mode = mode.into();
    }
    if args.prefix.is_some() {
        options.module_prefix = args.prefix.clone();
    }
    if args.target.is_some() {
        options.target = args.target.clone();
    }
    if let Some(merge_fn) = &args.merge_fn {
        options.merge_function = merge_fn.clone();
    }
    if args.extension.is_some() {
        options.extension = args.extension.clone();
    }
    if args.crlf {
        options.line_ending = LineEnding::CrLf;
    }
    if args.locale_in_file_name {
        options.locale_in_file_name = true;
    }
    if args.continue_on_error {
        options.error_policy = ErrorPolicy::Continue;
    }
    Ok(options)
}

/// What a compile run produced on disk.
#[derive(Debug, Default)]
pub struct CompileSummary {
    pub written: Vec<PathBuf>,
    /// Written paths that replaced a file produced earlier in the same run.
    pub overwritten: Vec<PathBuf>,
    pub failed: usize,
    pub skipped: usize,
}

/// Compiles `inputs` and writes every artifact into `output_dir`.
///
/// Artifacts are written in input order. When two sources map to the same
/// file (a neutral bundle and its localized sibling without
/// `locale_in_file_name`), the later one replaces the earlier and a warning
/// is logged. Artifacts of successful files are written even when other files
/// failed under [`ErrorPolicy::Continue`]; the failures are then returned as
/// [`Error::Batch`].
pub fn compile_to_dir(
    inputs: &[PathBuf],
    output_dir: &Path,
    options: BundleOptions,
    reporter: &dyn Reporter,
) -> Result<CompileSummary, Error> {
    let compiler = Compiler::new(options)?;
    let outcome: BatchOutcome = compiler.compile_batch(inputs, reporter)?;

    let mut summary = CompileSummary {
        failed: outcome.failures.len(),
        skipped: outcome.skipped.len(),
        ..Default::default()
    };
    let mut written_from: HashMap<PathBuf, &Path> = HashMap::new();
    for (source, artifact) in &outcome.artifacts {
        let path = artifact.write_to_dir(output_dir)?;
        if let Some(previous) = written_from.insert(path.clone(), source.as_path()) {
            log::warn!(
                "{} from {} replaced the one generated from {}; pass --locale-in-file-name to keep both",
                path.display(),
                source.display(),
                previous.display()
            );
            summary.overwritten.push(path.clone());
        } else {
            summary.written.push(path);
        }
    }

    if summary.failed > 0 {
        return Err(Error::Batch {
            failed: summary.failed,
            total: outcome.attempted(),
        });
    }
    Ok(summary)
}

pub fn run_compile_command(args: CompileArgs) -> Result<CompileSummary, Error> {
    let options = build_options(&args)?;
    let inputs = expand_inputs(&args.inputs).map_err(Error::config_error)?;
    log::info!("Compiling {} input(s) into {}", inputs.len(), args.output.display());

    let summary = compile_to_dir(&inputs, &args.output, options, &LogReporter)?;
    for path in &summary.written {
        println!("Wrote {}", path.display());
    }
    println!(
        "✅ Compiled {} resource file(s){}",
        summary.written.len() + summary.overwritten.len(),
        if summary.skipped > 0 {
            format!(", skipped {}", summary.skipped)
        } else {
            String::new()
        }
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resxbundle::{MemoryReporter, NullReporter, RecordedEvent};
    use std::fs;
    use tempfile::TempDir;

    const GREETINGS: &str = r#"<root>
  <data name="Hello" xml:space="preserve"><value>Hello</value></data>
</root>"#;

    fn args(output: &Path) -> CompileArgs {
        CompileArgs {
            inputs: vec!["Greetings.resx".to_string()],
            output: output.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_override_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("resxbundle.toml");
        fs::write(
            &config,
            "mode = \"assignment\"\nmodule_prefix = \"Acme\"\nmerge_function = \"$.extend\"\n",
        )
        .unwrap();

        let mut cli = args(temp_dir.path());
        cli.config = Some(config);
        cli.prefix = Some("Contoso".to_string());
        cli.crlf = true;
        cli.continue_on_error = true;

        let options = build_options(&cli).unwrap();
        assert_eq!(options.mode, OutputMode::NamespacedAssignment);
        assert_eq!(options.module_prefix.as_deref(), Some("Contoso"));
        assert_eq!(options.merge_function, "$.extend");
        assert_eq!(options.line_ending, LineEnding::CrLf);
        assert_eq!(options.error_policy, ErrorPolicy::Continue);
        assert!(!options.locale_in_file_name);

        cli.locale_in_file_name = true;
        assert!(build_options(&cli).unwrap().locale_in_file_name);
    }

    #[test]
    fn test_mode_arg_mapping() {
        assert_eq!(OutputMode::from(ModeArg::Json), OutputMode::RawJson);
        assert_eq!(
            OutputMode::from(ModeArg::Merge),
            OutputMode::NamespacedMergeClosure
        );
    }

    #[test]
    fn test_compile_to_dir_writes_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("Greetings.resx");
        fs::write(&input, GREETINGS).unwrap();
        let out_dir = temp_dir.path().join("out");

        let summary = compile_to_dir(
            &[input],
            &out_dir,
            BundleOptions::new().with_mode(OutputMode::RawJson),
            &NullReporter,
        )
        .unwrap();
        assert_eq!(summary.written, vec![out_dir.join("Greetings.json")]);
        assert_eq!(
            fs::read_to_string(out_dir.join("Greetings.json")).unwrap(),
            r#"{"Hello":"Hello"}"#
        );
    }

    #[test]
    fn test_compile_to_dir_keeps_good_output_on_continue() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("Greetings.resx");
        fs::write(&good, GREETINGS).unwrap();
        let missing = temp_dir.path().join("Missing.resx");
        let out_dir = temp_dir.path().join("out");

        let reporter = MemoryReporter::new();
        let result = compile_to_dir(
            &[missing, good],
            &out_dir,
            BundleOptions::new().with_error_policy(ErrorPolicy::Continue),
            &reporter,
        );
        assert!(matches!(result, Err(Error::Batch { failed: 1, total: 2 })));
        assert!(out_dir.join("Greetings.js").exists());
        assert!(
            reporter
                .events()
                .iter()
                .any(|e| matches!(e, RecordedEvent::Failed { .. }))
        );
    }

    #[test]
    fn test_compile_to_dir_reports_shared_file_names() {
        let temp_dir = TempDir::new().unwrap();
        let neutral = temp_dir.path().join("Greetings.resx");
        let french = temp_dir.path().join("Greetings.fr-FR.resx");
        fs::write(&neutral, GREETINGS).unwrap();
        fs::write(
            &french,
            r#"<root><data name="Hello"><value>Bonjour</value></data></root>"#,
        )
        .unwrap();
        let out_dir = temp_dir.path().join("out");

        let summary = compile_to_dir(
            &[neutral.clone(), french.clone()],
            &out_dir,
            BundleOptions::new().with_mode(OutputMode::RawJson),
            &NullReporter,
        )
        .unwrap();
        assert_eq!(summary.written, vec![out_dir.join("Greetings.json")]);
        assert_eq!(summary.overwritten, vec![out_dir.join("Greetings.json")]);
        assert_eq!(
            fs::read_to_string(out_dir.join("Greetings.json")).unwrap(),
            r#"{"Hello":"Bonjour"}"#
        );

        let kept = compile_to_dir(
            &[neutral, french],
            &out_dir,
            BundleOptions::new()
                .with_mode(OutputMode::RawJson)
                .with_locale_in_file_name(true),
            &NullReporter,
        )
        .unwrap();
        assert!(kept.overwritten.is_empty());
        assert_eq!(
            kept.written,
            vec![out_dir.join("Greetings.json"), out_dir.join("Greetings.fr-FR.json")]
        );
    }
}
