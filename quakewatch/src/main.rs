mod cli;
mod render;

use clap::{Parser, Subcommand};
use cli::ViewArgs;
use quakewatch_core::logging::{default_log_format, init_logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "quakewatch",
    version,
    about = "Quakewatch: live terminal dashboard for the USGS earthquake feed"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Keep the dashboard on screen and redraw on every change (default)
    Watch {
        /// Path to a quakewatch config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable polling at this interval, overriding the config
        #[arg(long)]
        poll_secs: Option<u64>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Fetch once, print the dashboard and exit
    Once {
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Config file tooling
    Config {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Config { cmd }) => cli::conf::run(cmd),

        Some(Command::Once { config, view }) => {
            init_logging(default_log_format());
            cli::once::run(config.as_deref(), &view)
        }

        Some(Command::Watch {
            config,
            poll_secs,
            view,
        }) => {
            init_logging(default_log_format());
            cli::watch::run(config.as_deref(), poll_secs, &view)
        }

        None => {
            init_logging(default_log_format());
            cli::watch::run(None, None, &ViewArgs::default())
        }
    };

    if let Err(e) = result {
        eprintln!("quakewatch error: {e:#}");
        std::process::exit(1);
    }
}
