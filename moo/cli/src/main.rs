//! cowsay - a configurable speaking (or thinking) cow
//!
//! # Usage
//!
//! ```bash
//! cowsay moo!
//! fortune | cowsay -f tux -m borg
//! cowthink -W 20 "what is a cow anyway"
//!
//! # Share links for the drawing
//! cowsay --share -m dead "it is over"
//!
//! # Verbose logging
//! RUST_LOG=debug cowsay moo
//! ```
//!
//! # Environment Variables
//!
//! - `MOO_CONFIG`: Configuration file (default: `~/.config/moo/moo.toml`)
//! - `MOO_COW`, `MOO_WRAP`, `MOO_ACTION`: Render defaults
//! - `RUST_LOG`: Log filter, logs go to stderr

mod args;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use moo_core::{
    default_config_path, load_config_from_path, Composer, CowCatalog, CowState, ModeCatalog,
    MooConfig, ShareLinks,
};

use args::{invoked_as_cowthink, Args};

fn init_logging(level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("cowsay={level}").parse()?)
                .add_directive(format!("moo_core={level}").parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
    Ok(())
}

/// Built-in templates plus the configured directory
fn load_cows(config: &MooConfig) -> Result<CowCatalog> {
    let mut cows = CowCatalog::builtin().clone();
    if let Some(ref dir) = config.cows_path {
        cows.extend_from_dir(dir)
            .with_context(|| format!("Failed to load cows from {}", dir.display()))?;
    }
    Ok(cows)
}

fn list_modes(out: &mut impl Write, modes: &ModeCatalog) -> Result<()> {
    for mode in modes.iter() {
        let face = mode.face().padded();
        writeln!(
            out,
            "{:<2} {:<10} {}{}",
            mode.id.as_str(),
            mode.name,
            face.eyes,
            face.tongue
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let think = invoked_as_cowthink(std::env::args_os().next().as_deref());
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let config_path = args.config.clone().or_else(default_config_path);
    let mut config =
        load_config_from_path(config_path).context("Failed to load configuration")?;
    args.overrides(think).apply(&mut config);
    debug!(source = %config.source(), "Configuration resolved");

    let cows = load_cows(&config)?;
    let composer = Composer::new(ModeCatalog::builtin(), &cows);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.list {
        for name in cows.names() {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }
    if args.modes {
        return list_modes(&mut out, composer.modes());
    }

    let message = args
        .message(std::io::stdin().lock())
        .context("Failed to read message from stdin")?;
    let options = composer.normalize(&config.render_options());
    writeln!(out, "{}", composer.render_normalized(&message, &options))?;

    if args.share {
        let state = CowState::from_options(&message, &options);
        writeln!(out)?;
        writeln!(out, "{}", ShareLinks::new(&state, &config.base_url))?;
    }

    Ok(())
}
