use clap::{Parser, Subcommand};
use resxbundle_cli::{
    compile::{CompileArgs, run_compile_command},
    inspect::run_inspect_command,
    logging::setup_logger,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log every file as it is compiled
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile .resx files into JSON or namespaced JavaScript bundles.
    Compile(CompileArgs),

    /// Print what a .resx file contains, as JSON.
    Inspect {
        /// The resource file to inspect
        #[arg(short, long)]
        input: String,
    },
}

fn main() {
    let args = Args::parse();
    setup_logger(args.verbose);

    let result = match args.commands {
        Commands::Compile(compile_args) => run_compile_command(compile_args).map(|_| ()),
        Commands::Inspect { input } => run_inspect_command(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
