#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod logging;

use bowerpath_core::paths::BOWER_JSON;
use bowerpath_core::Config;
use clap::Parser;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bowerpath")]
#[command(author, version, about = "Resolve entry files of installed bower packages", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// Stop looking for a project root after this directory
    #[arg(long, global = true, value_name = "DIR")]
    ceiling: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Resolve the entry file(s) of a package ("*" for every package)
    Resolve {
        /// Package name, a single path segment
        name: String,

        /// Directory to start project-root discovery from
        #[arg(long, value_name = "DIR")]
        basedir: Option<PathBuf>,

        /// Version or url the package was declared with
        #[arg(long, value_name = "REF")]
        reference: Option<String>,
    },

    /// Resolve every dependency listed in a bower.json
    ResolveAll {
        /// Manifest to read (default: ./bower.json)
        manifest: Option<PathBuf>,

        /// Directory to start project-root discovery from
        #[arg(long, value_name = "DIR")]
        basedir: Option<PathBuf>,
    },

    /// Show how a package resolves, step by step
    Explain {
        /// Package name, a single path segment
        name: String,

        /// Directory to start project-root discovery from
        #[arg(long, value_name = "DIR")]
        basedir: Option<PathBuf>,

        /// Version or url the package was declared with
        #[arg(long, value_name = "REF")]
        reference: Option<String>,
    },

    /// Print the discovered project root and components directory
    Root {
        /// Directory to start project-root discovery from
        #[arg(long, value_name = "DIR")]
        basedir: Option<PathBuf>,
    },

    /// Resolve a package's main file from the installed-package listing
    Installed {
        /// Package name
        name: String,

        /// Do not let bower hit the network
        #[arg(long, conflicts_with = "scan")]
        offline: bool,

        /// Scan the components directory instead of running `bower list`
        #[arg(long)]
        scan: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json)
        .with_ceiling(cli.ceiling);

    logging::init(config.verbosity, config.json_logs);

    let span = tracing::info_span!("bowerpath", cwd = %config.cwd.display());
    let _guard = span.enter();

    match cli.command {
        Commands::Version => commands::version::run(cli.json),
        Commands::Resolve {
            name,
            basedir,
            reference,
        } => commands::resolve::run(
            &name,
            reference.as_deref(),
            &config.resolve_options(basedir),
            cli.json,
        ),
        Commands::ResolveAll { manifest, basedir } => {
            let manifest = manifest.map_or_else(
                || config.cwd.join(BOWER_JSON),
                |m| if m.is_absolute() { m } else { config.cwd.join(m) },
            );
            commands::resolve_all::run(&manifest, &config.resolve_options(basedir), cli.json)
        }
        Commands::Explain {
            name,
            basedir,
            reference,
        } => commands::explain::run(
            &name,
            reference.as_deref(),
            &config.resolve_options(basedir),
            cli.json,
        ),
        Commands::Root { basedir } => {
            commands::root::run(&config.resolve_options(basedir), cli.json)
        }
        Commands::Installed {
            name,
            offline,
            scan,
        } => {
            let source = if scan {
                commands::installed::Source::Scan
            } else {
                commands::installed::Source::Bower { offline }
            };
            commands::installed::run(&config.cwd, &name, source, cli.json)
        }
    }
}
