use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rollcall",
    about = "Contributor directory and image gallery server",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Print the default configuration as TOML
    Config,
    /// Blend the overlay into an image file once
    Blend(BlendArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Redis connection URL
    #[arg(long, conflicts_with = "memory")]
    pub redis_url: Option<String>,
    /// Keep everything in process memory instead of redis
    #[arg(long)]
    pub memory: bool,
}

#[derive(Args)]
pub struct BlendArgs {
    /// PNG or BMP image to blend
    pub input: PathBuf,
    /// Overlay image; the bundled one when omitted
    #[arg(long)]
    pub overlay: Option<PathBuf>,
    /// Where to write the BMP result; defaults to INPUT.bmp
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
