//! The `glimpse config` command.
//!
//! `show` also reports the data files a search would load, after the same
//! overrides the search commands accept.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use glimpse_core::Config;

use super::setup::IndexArgs;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration and the data files it resolves to
    Show {
        #[command(flatten)]
        index: IndexArgs,
    },

    /// Print the config file path
    Path,

    /// Write a config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// A data file named by the configuration, after `~` expansion.
#[derive(Debug)]
struct DataFile {
    label: &'static str,
    path: PathBuf,
    size: Option<u64>,
}

impl DataFile {
    fn probe(label: &'static str, path: PathBuf) -> Self {
        let size = std::fs::metadata(&path)
            .ok()
            .filter(|m| m.is_file())
            .map(|m| m.len());
        Self { label, path, size }
    }

    fn status(&self) -> String {
        match self.size {
            Some(bytes) => format!("found, {:.1} MB", bytes as f64 / 1_000_000.0),
            None => "missing".to_string(),
        }
    }
}

fn data_files(config: &Config) -> [DataFile; 2] {
    [
        DataFile::probe("tag_cache", config.tag_cache_path()),
        DataFile::probe("embeddings", config.embeddings_path()),
    ]
}

const CONFIG_HEADER: &str = "\
# Glimpse configuration.
# Data files are read once at startup; a leading `~` is expanded.
# --cache/--embeddings (or GLIMPSE_TAG_CACHE/GLIMPSE_EMBEDDINGS) override [data].

";

/// Write the default configuration to `path`.
fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format!("{CONFIG_HEADER}{}", Config::default().to_toml()?))?;
    Ok(())
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs, mut config: Config) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show { index } => {
            index.apply(&mut config);
            println!("{}", config.to_toml()?);

            let files = data_files(&config);
            for file in &files {
                println!("# {:<10} {} ({})", file.label, file.path.display(), file.status());
            }
            let missing = files.iter().filter(|f| f.size.is_none()).count();
            if missing > 0 {
                tracing::warn!("{} data file(s) missing; searches will fail to load", missing);
            }
        }

        ConfigCommand::Path => {
            let path = Config::default_path();
            println!("{}", path.display());
            if !path.exists() {
                tracing::info!("No config file yet; defaults are in use (`glimpse config init`)");
            }
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();
            init(&path, force)?;
            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
