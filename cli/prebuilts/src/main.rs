//! prebuilts — resolve where prebuilt LLVM toolchain artifacts live.

mod commands;
mod workspace;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use prebuilts_locator::{Environment, Registry};
use tracing_subscriber::EnvFilter;

use workspace::Workspace;

#[derive(Parser)]
#[command(name = "prebuilts", version, about = "Prebuilt LLVM toolchain artifact locator")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the property bag computed for a module
    Resolve {
        /// Module type (e.g., libclang_rt_prebuilt_library_shared)
        module_type: String,
        /// Module name (e.g., prebuilt_libclang_rt.asan)
        name: String,
        /// Output format (json, toml)
        #[arg(long)]
        format: Option<String>,
        /// Module directory, relative to the workspace root
        #[arg(long)]
        module_dir: Option<String>,
    },
    /// Show per-target artifact paths for a module
    Describe {
        /// Module type
        module_type: String,
        /// Module name
        name: String,
        /// Module directory, relative to the workspace root
        #[arg(long)]
        module_dir: Option<String>,
    },
    /// Resolve every module in a manifest as JSON lines
    Emit {
        /// Manifest file listing [[module]] entries
        manifest: PathBuf,
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List architecture table rows
    Targets {
        /// Table to list (shared, static)
        #[arg(long)]
        table: Option<String>,
    },
    /// List registered module types
    Types,
    /// Check configuration and toolchain layout
    Doctor,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let workspace = Workspace::discover(&cwd)?;
    let registry = Registry::with_builtin_types();
    let env = Environment::from_process();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Resolve {
            module_type,
            name,
            format,
            module_dir,
        } => {
            let locator = workspace.locator(env, module_dir.as_deref());
            commands::resolve::run(
                &locator,
                &registry,
                &module_type,
                &name,
                format.as_deref(),
                &mut stdout,
            )
        }

        Commands::Describe {
            module_type,
            name,
            module_dir,
        } => {
            let locator = workspace.locator(env, module_dir.as_deref());
            commands::describe::run(&locator, &registry, &module_type, &name, &mut stdout)
        }

        Commands::Emit { manifest, output } => {
            let locator = workspace.locator(env, None);
            let manifest = cwd.join(manifest);
            let output = output.map(|o| cwd.join(o));
            commands::emit::run(&locator, &registry, &manifest, output.as_deref(), &mut stdout)
                .map(|_| ())
        }

        Commands::Targets { table } => {
            let locator = workspace.locator(env, None);
            commands::targets::run(&locator.paths(), table.as_deref(), &mut stdout)
        }

        Commands::Types => commands::types::run(&registry, &mut stdout),

        Commands::Doctor => {
            let locator = workspace.locator(env, None);
            commands::doctor::run(&workspace, &locator, &mut stdout)
        }
    }
}
