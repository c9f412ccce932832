use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use driftfield::{AppConfig, RunError, Theme};

/// Drifting particle field with proximity connections.
#[derive(Parser, Debug)]
#[command(name = "driftfield", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Visual theme (glass or default)
    #[arg(short, long)]
    theme: Option<Theme>,

    /// Initial window width (logical pixels)
    #[arg(long)]
    width: Option<u32>,

    /// Initial window height (logical pixels)
    #[arg(long)]
    height: Option<u32>,

    /// Seed for reproducible particle placement
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig, RunError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if self.seed.is_some() {
            config.field.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let result = Cli::parse().into_config().and_then(|config| {
        tracing::debug!(?config, "starting");
        driftfield::run(config)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
