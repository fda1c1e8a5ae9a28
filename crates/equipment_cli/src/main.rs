//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `equipment_core` linkage and print its version.
//! - Optionally load a data file and report how many records it holds.
//!
//! Usage: `equipment_cli [DATA_FILE]`. Logging is enabled when the
//! `EQUIPMENT_LOG_DIR` environment variable names an absolute directory.

use equipment_core::{
    core_version, default_log_level, init_logging, ping, EquipmentStorage, JsonEquipmentStorage,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Some(log_dir) = std::env::var_os("EQUIPMENT_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &PathBuf::from(log_dir)) {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("equipment_core ping={}", ping());
    println!("equipment_core version={}", core_version());

    let Some(data_file) = std::env::args_os().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let storage = JsonEquipmentStorage::new(data_file);
    match storage.read_default() {
        Ok(Some(manager)) => {
            info!(
                "event=cli_load module=cli status=ok records={}",
                manager.len()
            );
            println!("equipment_count={}", manager.len());
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("equipment_count=0 file_missing=true");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error={err}");
            ExitCode::FAILURE
        }
    }
}
