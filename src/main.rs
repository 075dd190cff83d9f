use clap::Parser;
use eduquest::SpeechBackend;
use eduquest::core::catalog::{Catalog, CatalogError};
use eduquest::core::config::{self, CliOverrides, ResolvedConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "eduquest", about = "Terminal learning adventure")]
struct Args {
    /// Text-to-speech backend
    #[arg(long, value_enum)]
    speech: Option<SpeechBackend>,

    /// Catalog file (.toml or .json) to use instead of the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Starting point balance
    #[arg(long)]
    points: Option<u32>,

    /// Log level written to eduquest.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,

    /// Load and validate the catalog, print a summary, then exit
    #[arg(long)]
    check_catalog: bool,
}

fn load_catalog(config: &ResolvedConfig) -> Result<Catalog, CatalogError> {
    match &config.catalog_file {
        Some(path) => Catalog::load(path),
        None => Catalog::builtin(),
    }
}

#[tokio::main]
async fn main() -> std::io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to eduquest.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("eduquest.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    log::info!("EduQuest starting up");

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{e}");
            eprintln!("eduquest: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let cli = CliOverrides {
        speech: args.speech,
        catalog: args.catalog,
        points: args.points,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!(
        "Resolved config: {} points, speech {:?}, catalog {}",
        resolved.starting_points,
        resolved.speech_backend,
        resolved
            .catalog_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );

    let catalog = match load_catalog(&resolved) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{e}");
            eprintln!("eduquest: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.check_catalog {
        println!("Catalog OK: {}", catalog.summary());
        return Ok(ExitCode::SUCCESS);
    }

    eduquest::tui::run(resolved, catalog)?;
    Ok(ExitCode::SUCCESS)
}
