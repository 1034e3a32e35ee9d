use anyhow::{Result, bail};
use clap::Subcommand;
use quakewatch_core::conf::{ConfigError, DashboardConfig, load_config};
use std::fs;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate a config file and summarize it
    Check {
        /// Path to the config file
        path: PathBuf,
    },

    /// Print the default config, or write it to a new file
    Init {
        /// Destination file; stdout when omitted
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(path),
        ConfigCmd::Init { path, force } => init(path, force),
    }
}

fn check(path: PathBuf) -> Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!("✔ feed: {} (timeout {}s)", cfg.feed.url, cfg.feed.timeout_secs);
            if cfg.polling.enabled {
                println!("✔ polling every {}s", cfg.polling.interval_secs);
            } else {
                println!("✔ polling disabled");
            }
            println!(
                "✔ showing up to {} events sorted by {}",
                cfg.display.limit, cfg.display.sort
            );
            Ok(())
        }
        Err(err) => {
            print_config_error(&err);
            bail!("invalid config: {}", path.display());
        }
    }
}

fn print_config_error(err: &ConfigError) {
    match err {
        ConfigError::Validation { issues } => {
            eprintln!("config has {} problem(s):", issues.len());
            for issue in issues {
                eprintln!("  ✘ {issue}");
            }
        }
        other => eprintln!("{other}"),
    }

    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => {
            Some("Create one with:\n\n  quakewatch config init quakewatch.toml")
        }
        ConfigError::Parse { .. } => Some(
            "Known sections are [feed], [polling], [filter] and [display].\n\
             Run `quakewatch config init` to see every key with its default.",
        ),
        ConfigError::Validation { .. } => None,
    }
}

fn init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let contents = DashboardConfig::default_toml();

    let Some(path) = path else {
        print!("{contents}");
        return Ok(());
    };

    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::write(&path, contents)?;
    println!("✔ Wrote default config to {}", path.display());

    Ok(())
}
