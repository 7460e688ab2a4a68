//! Config validation CLI tool
//!
//! Validates a gymtrack configuration file and reports any errors.

use gymtrack_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a gymtrack configuration file.");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match gymtrack_config::load_config(&config_path) {
        Ok(config) => {
            let attendance = &config.attendance;
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", gymtrack_config::CURRENT_CONFIG_VERSION);
            println!("  Data directory: {}", config.service.data_dir.display());
            println!("  Auto checkout after: {} minutes", attendance.auto_checkout_minutes);
            println!("  Sweep interval: {} seconds", attendance.sweep_interval.as_secs());
            println!("  Expiring-soon window: {} days", attendance.expiring_soon_days);
            println!("  Recent check-ins shown: {}", attendance.recent_checkins);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                gymtrack_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                gymtrack_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                gymtrack_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                gymtrack_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        gymtrack_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
