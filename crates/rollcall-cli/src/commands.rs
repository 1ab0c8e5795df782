use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;

use rollcall_blend::Blender;
use rollcall_server::{RollcallServer, ServerConfig, StoreBackend};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Config => cmd_config(),
        Command::Blend(args) => cmd_blend(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let store = match &config.store {
        StoreBackend::Redis { url } => url.as_str(),
        StoreBackend::Memory => "memory",
    };
    println!(
        "{} rollcall on {} (store: {})",
        "▶".green().bold(),
        config.bind_addr.to_string().bold(),
        store.cyan()
    );
    let runtime = tokio::runtime::Runtime::new().context("cannot start async runtime")?;
    runtime.block_on(RollcallServer::new(config).serve())?;
    Ok(())
}

/// Load the configuration file, if any, then apply command-line overrides.
fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(url) = &args.redis_url {
        config.store = StoreBackend::Redis { url: url.clone() };
    }
    if args.memory {
        config.store = StoreBackend::Memory;
    }
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

fn cmd_config() -> anyhow::Result<()> {
    print!("{}", ServerConfig::default().to_toml_string()?);
    Ok(())
}

fn cmd_blend(args: BlendArgs) -> anyhow::Result<()> {
    let blender = match &args.overlay {
        Some(path) => Blender::from_overlay_path(path)?,
        None => Blender::builtin(),
    };
    let output = args.output.unwrap_or_else(|| default_output(&args.input));
    let written = blend_file(&blender, &args.input, &output)?;
    println!(
        "{} Blended {} → {} ({} bytes)",
        "✓".green().bold(),
        args.input.display().to_string().bold(),
        output.display().to_string().yellow(),
        written
    );
    Ok(())
}

fn blend_file(blender: &Blender, input: &Path, output: &Path) -> anyhow::Result<usize> {
    let base = std::fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;
    let blended = blender
        .blend(&base)
        .with_context(|| format!("cannot blend {}", input.display()))?;
    std::fs::write(output, &blended)
        .with_context(|| format!("cannot write {}", output.display()))?;
    Ok(blended.len())
}

fn default_output(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".bmp");
    PathBuf::from(name)
}
