//! CLI tool for leetbox workspaces.

mod commands;
mod exit_codes;
mod output;
mod picker;
mod prompt;

use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use leetbox::{ReturnKind, RunTarget, Runner, Workspace};

use commands::Context;
use exit_codes::ExitCode;

/// Scaffold, edit and benchmark interchangeable algorithm implementations
#[derive(Parser)]
#[command(name = "leetbox")]
#[command(author, version, about = "Scaffold, edit and benchmark algorithm variants", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run; opens an interactive menu when omitted
    #[command(subcommand)]
    command: Option<Commands>,

    /// Workspace root containing the problems/ folder
    #[arg(long, env = "LEETBOX_ROOT", default_value = ".", global = true)]
    root: PathBuf,

    /// tsx executable (default: <root>/node_modules/.bin/tsx)
    #[arg(long, env = "LEETBOX_TSX", global = true)]
    tsx: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Suppress informational output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the test cases against the latest implementation
    Latest {
        /// Problem folder name (picked interactively if omitted)
        problem: Option<String>,
    },

    /// Benchmark every implementation of a problem
    Compare {
        /// Problem folder name (picked interactively if omitted)
        problem: Option<String>,
    },

    /// Add a variant or a problem
    Add {
        #[command(subcommand)]
        target: Option<AddTarget>,
    },

    /// Remove a variant or a problem
    Remove {
        #[command(subcommand)]
        target: Option<RemoveTarget>,
    },

    /// List problems, or the variants of one problem (alias: ls)
    #[command(alias = "ls")]
    List {
        /// Problem folder name
        problem: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum AddTarget {
    /// Scaffold a variant and register it as the latest implementation
    Variant {
        /// Problem folder name
        #[arg(short = 'p', long)]
        problem: Option<String>,

        /// Variant name, free-form (e.g. "Brute force")
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Return type when the test cases do not reveal one
        #[arg(long, value_enum, default_value = "scalar")]
        return_kind: ReturnKindArg,
    },

    /// Scaffold a new problem folder
    Problem {
        /// Problem name (e.g. "Two Sum")
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Folder name (default: camelCase of the name)
        #[arg(short = 's', long)]
        short_name: Option<String>,
    },
}

#[derive(Subcommand)]
enum RemoveTarget {
    /// Unregister a variant and delete its file
    Variant {
        /// Problem folder name
        #[arg(short = 'p', long)]
        problem: Option<String>,

        /// Entry name of the variant
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Do not ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete a whole problem folder
    Problem {
        /// Problem folder name
        #[arg(short = 'p', long)]
        problem: Option<String>,

        /// Do not ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ReturnKindArg {
    Scalar,
    Array,
}

impl From<ReturnKindArg> for ReturnKind {
    fn from(kind: ReturnKindArg) -> Self {
        match kind {
            ReturnKindArg::Scalar => ReturnKind::Scalar,
            ReturnKindArg::Array => ReturnKind::Array,
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(verbose > 1)
        .without_time()
        .init();
}

fn main() {
    // Set up Ctrl+C handler
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        eprintln!("\nInterrupted");
        std::process::exit(exit_codes::USER_INTERRUPT);
    })
    .ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                exit_codes::BAD_ARGS
            } else {
                exit_codes::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(cli.verbose, cli.quiet);

    let runner = match &cli.tsx {
        Some(tsx) => Runner::new(&cli.root).with_tsx(tsx),
        None => Runner::new(&cli.root),
    };
    let ctx = Context {
        workspace: Workspace::new(&cli.root),
        runner,
        format: cli.format,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        None => commands::menu(&ctx),

        Some(Commands::Latest { problem }) => commands::run(&ctx, RunTarget::Latest, problem),

        Some(Commands::Compare { problem }) => commands::run(&ctx, RunTarget::Compare, problem),

        Some(Commands::Add { target }) => match target {
            None => commands::add_menu(&ctx),
            Some(AddTarget::Variant {
                problem,
                name,
                return_kind,
            }) => commands::add_variant(&ctx, problem, name, return_kind.into()),
            Some(AddTarget::Problem { name, short_name }) => {
                commands::add_problem(&ctx, name, short_name)
            }
        },

        Some(Commands::Remove { target }) => match target {
            None => commands::remove_menu(&ctx),
            Some(RemoveTarget::Variant { problem, name, yes }) => {
                commands::remove_variant(&ctx, problem, name, yes)
            }
            Some(RemoveTarget::Problem { problem, yes }) => {
                commands::remove_problem(&ctx, problem, yes)
            }
        },

        Some(Commands::List { problem }) => commands::list(&ctx, problem),

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(ExitCode::Success)
        }
    };

    std::process::exit(commands::report(result).code());
}
