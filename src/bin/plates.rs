use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use plate_engine::{plates::write_plate, render::Rasterizer, PlateKind, RenderConfig};

/// Render the decorative plates as PNG files.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Plates to render; all of them when omitted.
    #[arg(value_enum)]
    plates: Vec<PlateKind>,

    /// Directory the PNG files are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Pixels per canvas unit.
    #[arg(long, default_value_t = plate_engine::config::DEFAULT_DPI)]
    dpi: f64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !(args.dpi.is_finite() && args.dpi > 0.0) {
        log::error!("dpi must be a positive number, got {}", args.dpi);
        return ExitCode::FAILURE;
    }

    let kinds = if args.plates.is_empty() {
        PlateKind::all().to_vec()
    } else {
        args.plates
    };
    let config = RenderConfig::default()
        .set_dpi(args.dpi)
        .set_output_dir(args.out_dir);
    let rasterizer = Rasterizer::new(&config);

    let mut failed = false;
    for kind in kinds {
        let plate = kind.plate();
        if let Err(err) = write_plate(plate, &rasterizer, &config) {
            log::error!("failed to render {}: {}", plate.name(), err);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
