/// tri - inspect, view and rewrite Alias/Quake .tri files
///
/// # Commands
///
/// - `tri info <file>` - list objects, texture names and triangle counts
/// - `tri view <file>` - rotate the meshes in the terminal (WASD/arrows, E/R roll, Q quit)
/// - `tri rewrite <in> <out>` - decode and re-encode a file
/// - `tri cube <out>` - write a demo cube
///
/// Logging goes to stderr; set `RUST_LOG` or pass `-v` for more detail.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tri_core::{CodecConfig, CoordinateConversion, SelectionMode};
use tri_terminal::{commands, TerminalApp};

#[derive(Parser)]
#[command(name = "tri")]
#[command(about = "Alias/Quake .tri triangle file tool")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    codec: CodecArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CodecArgs {
    /// TOML file with codec options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Export every mesh rather than only selected ones
    #[arg(long, global = true)]
    all: bool,

    /// Keep authoring coordinates as-is instead of converting to Quake axes
    #[arg(long, global = true)]
    no_convert: bool,

    /// Reject objects with more triangles than this
    #[arg(long, global = true)]
    max_triangles: Option<u32>,
}

impl CodecArgs {
    fn resolve(&self) -> Result<CodecConfig> {
        let mut config = match &self.config {
            Some(path) => CodecConfig::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => CodecConfig::default(),
        };
        if self.all {
            config.selection = SelectionMode::All;
        }
        if self.no_convert {
            config.coordinates = CoordinateConversion::None;
        }
        if let Some(max) = self.max_triangles {
            config.max_triangles = max;
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the objects in a .tri file
    Info { file: PathBuf },

    /// Render a .tri file in the terminal
    View { file: PathBuf },

    /// Decode and re-encode a .tri file
    Rewrite { input: PathBuf, output: PathBuf },

    /// Write a demo cube .tri file
    Cube {
        output: PathBuf,
        #[arg(long, default_value_t = 2.0)]
        size: f32,
        #[arg(long, default_value = "Cube")]
        name: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.codec.resolve()?;

    match cli.command {
        Commands::Info { file } => {
            print!("{}", commands::info(&file, &config)?);
        }
        Commands::View { file } => {
            let meshes = commands::load_meshes(&file, &config)?;
            if meshes.is_empty() {
                log::warn!("{} has no triangles to show", file.display());
                return Ok(());
            }
            let title = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let mut app = TerminalApp::new(meshes, title)?;
            app.run()?;
        }
        Commands::Rewrite { input, output } => {
            let written = commands::rewrite(&input, &output, &config)?;
            log::info!("Wrote {}", written.display());
        }
        Commands::Cube { output, size, name } => {
            let written = commands::cube(&output, size, &name, &config)?;
            log::info!("Wrote {}", written.display());
        }
    }
    Ok(())
}
