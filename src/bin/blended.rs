use std::process::ExitCode;

use plate_engine::{render_plate, PlateKind, RenderConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match render_plate(PlateKind::Blended, &RenderConfig::default()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
