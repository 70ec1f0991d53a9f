use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palette_mapper::UniformLayout;
use palette_swap::assets::AssetLoader;
use palette_swap::models::AppConfig;
use palette_swap::rendering::PostProcessRenderer;
use palette_swap::server;
use palette_swap::services::{ConfigWatcher, PaletteSwapState};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Parser)]
#[command(name = "palette-swap")]
#[command(about = "Four-colour palette swap post-processing")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Start the HTTP server and reload the config file when it changes
    Dev,
    /// Apply the palette swap to a PNG file
    Render {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Palette name from the config
        #[arg(short, long, conflicts_with = "level")]
        palette: Option<String>,

        /// Use the palette of this level
        #[arg(short, long)]
        level: Option<String>,

        /// Darkness bias (positive darkens, negative lightens)
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        darkness: i32,
    },
    /// List configured palettes and levels
    Palettes,
    /// Print the uniform block for a palette as hex
    Uniform {
        /// Palette name from the config (default palette if omitted)
        #[arg(short, long)]
        palette: Option<String>,

        /// Darkness bias
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        darkness: i32,

        /// Pad the block to a multiple of 16 bytes
        #[arg(long)]
        aligned: bool,
    },
    /// Extract the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            palette,
            level,
            darkness,
        }) => run_render_command(input, output, palette, level, darkness),
        Some(Commands::Palettes) => run_palettes_command(),
        Some(Commands::Uniform {
            palette,
            darkness,
            aligned,
        }) => run_uniform_command(palette, darkness, aligned),
        Some(Commands::Init { force, list }) => run_init_command(force, list),
        Some(Commands::Serve) => run_server(false).await,
        Some(Commands::Dev) => run_server(true).await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palette_swap=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_cli_config() -> AppConfig {
    let loader = AssetLoader::from_env();
    if let Err(e) = loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config file");
    }
    AppConfig::load_from_assets(&loader)
}

/// Swap a PNG file directly (no server needed)
fn run_render_command(
    input: PathBuf,
    output: PathBuf,
    palette: Option<String>,
    level: Option<String>,
    darkness: i32,
) -> anyhow::Result<()> {
    init_cli_logging();

    let state = PaletteSwapState::new(load_cli_config());
    let frame = state.frame_for(palette.as_deref(), level.as_deref(), Some(darkness))?;

    let written = PostProcessRenderer::new().render_file(&input, &output, &frame.swap())?;

    println!(
        "Rendered {} -> {} ({} bytes, palette '{}', darkness {})",
        input.display(),
        output.display(),
        written,
        frame.palette_name,
        frame.darkness
    );
    Ok(())
}

fn run_palettes_command() -> anyhow::Result<()> {
    init_cli_logging();
    let config = load_cli_config();

    println!("Palettes (default: {}):", config.default_palette);
    for name in config.palette_names() {
        match config.palette(name) {
            Some(palette) => println!("  {name:<12} {}", palette.to_hex_strings().join(" ")),
            None => println!("  {name:<12} (invalid)"),
        }
    }

    let mut levels: Vec<_> = config.levels.iter().collect();
    levels.sort_by(|a, b| a.0.cmp(b.0));
    if !levels.is_empty() {
        println!("\nLevels:");
        for (name, level) in levels {
            println!(
                "  {name:<12} {}",
                level.palette.as_deref().unwrap_or("(keeps current)")
            );
        }
    }

    for problem in config.problems() {
        eprintln!("warning: {problem}");
    }
    Ok(())
}

fn run_uniform_command(palette: Option<String>, darkness: i32, aligned: bool) -> anyhow::Result<()> {
    init_cli_logging();
    let config = load_cli_config();

    let palette = match palette {
        Some(ref name) => config
            .palette(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown palette: {name}"))?,
        None => config.default_palette().1,
    };
    let layout = if aligned {
        UniformLayout::Aligned16
    } else {
        UniformLayout::Native
    };

    let bytes = palette.to_settings(darkness).to_uniform_bytes(layout);
    for row in bytes.chunks(16) {
        println!("{}", hex::encode(row));
    }
    Ok(())
}

fn run_init_command(force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!("\nSkipped {} existing files (use --force to overwrite):", report.skipped.len());
        for f in &report.skipped {
            println!("  - {f}");
        }
    }
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| format!("{DEFAULT_BIND_ADDR} (default)"));
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("palette-swap v{VERSION}");
    println!("Four-colour palette swap post-processing\n");

    println!("Environment Variables:");
    println!("  BIND_ADDR   = {bind_addr}");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if PathBuf::from(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("\nConfig:  {config_source}");

    let config = AppConfig::load_from_assets(&AssetLoader::from_env());
    println!(
        "  {} palettes, {} levels, default '{}'",
        config.palettes.len(),
        config.levels.len(),
        config.default_palette
    );

    println!("\nCommands:");
    println!("  palette-swap serve      Start the HTTP server");
    println!("  palette-swap dev        Start server with config hot reload");
    println!("  palette-swap render     Swap a PNG file");
    println!("  palette-swap palettes   List palettes and levels");
    println!("  palette-swap uniform    Print the uniform block");
    println!("  palette-swap init       Extract the embedded config");
    println!("\nRun 'palette-swap --help' for more details.");
}

/// Run the HTTP server, optionally reloading the config file on change
async fn run_server(dev: bool) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palette_swap=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(
        config = ?asset_loader
            .config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "Config source"
    );

    if let Err(e) = asset_loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config file");
    }

    let state = server::create_app_state(&asset_loader);

    // Kept alive for the lifetime of the server
    let _watcher = if dev {
        let watcher = ConfigWatcher::new(asset_loader.config_path().map(PathBuf::from));
        if watcher.is_active() {
            server::spawn_config_reloader(&watcher, &state, asset_loader.clone());
        } else {
            tracing::warn!("Dev mode without CONFIG_FILE: config reload disabled");
        }
        Some(watcher)
    } else {
        None
    };

    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, dev, "palette-swap server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
