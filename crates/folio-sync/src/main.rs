use std::path::PathBuf;
use std::process;

use folio_sync::{content, load_config, process_data, write_artifact, SyncError};

fn usage() {
    eprintln!("Usage: sync-portfolio [OPTIONS]");
    eprintln!("  --config <path>   RON config (default: ./sync.ron if present)");
    eprintln!("  --output <path>   Artifact path, overrides the config");
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            flag @ ("--config" | "--output") => {
                i += 1;
                let Some(value) = args.get(i) else {
                    eprintln!("Missing value for {flag}");
                    usage();
                    process::exit(1);
                };
                let value = PathBuf::from(value);
                if flag == "--config" {
                    config_path = Some(value);
                } else {
                    output_path = Some(value);
                }
            }
            "--help" | "-h" => {
                usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if let Err(e) = run(config_path, output_path) {
        log::error!("Error syncing portfolio data: {e}");
        process::exit(1);
    }
}

fn run(config_path: Option<PathBuf>, output_path: Option<PathBuf>) -> Result<(), SyncError> {
    log::info!("Syncing portfolio data...");

    let mut config = load_config(config_path.as_deref())?;
    if let Some(output) = output_path {
        config.output = output;
    }

    let data = process_data(&content::portfolio(), &config.include);
    write_artifact(&config.output, &data)?;

    log::info!("Successfully synced data to: {}", config.output.display());
    Ok(())
}
