use common::log;
use common::BuildConfig;
use simple_logger::SimpleLogger;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

pub const PROGRAM_NAME: &str = "shader-build";
const DEFAULT_CONFIG: &str = "shader_build.yaml";
const LOG_LEVEL_VAR: &str = "SHADER_BUILD_LOG";

fn log_level() -> log::LevelFilter {
    env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(log::LevelFilter::Info)
}

fn main() -> ExitCode {
    if let Err(err) = SimpleLogger::new().with_level(log_level()).init() {
        eprintln!("{PROGRAM_NAME}: cannot initialize logger: {err}");
    }

    let config_path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let config = match BuildConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}: {}", config_path.display(), err);
            return ExitCode::from(2);
        }
    };

    log::info!("=============== SHADER PROCESSOR ===============");

    match common::compile_shaders(&config) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            log::error!("{}", err);
            ExitCode::from(2)
        }
    }
}
