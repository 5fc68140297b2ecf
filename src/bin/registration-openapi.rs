//! # Registration OpenAPI generator
//!
//! Prints the OpenAPI document of the registration API, built from the same
//! configuration the service reads.
//!
//! ## Usage
//!
//! ```bash
//! # Print to stdout
//! cargo run --bin registration-openapi
//!
//! # Write to a file
//! cargo run --bin registration-openapi openapi.json
//!
//! # Document a different mount path and port
//! SERVE_PORT=8080 REGISTRATION_MOUNT_PATH=/v1/students cargo run --bin registration-openapi
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: Document written
//! - `1`: Invalid configuration or the output could not be written

use log::{error, info};
use registration_service::ServiceConfig;
use registration_service::docs::openapi_document;
use std::env;
use std::fs;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [output-file]", args[0]);
        process::exit(1);
    }

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    };
    info!(
        "Generating OpenAPI document for '{}' on port {}",
        config.mount_path, config.port
    );

    let document = openapi_document(&config);
    let rendered = match serde_json::to_string_pretty(&document) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("❌ Failed to render document: {}", e);
            process::exit(1);
        }
    };

    match args.get(1) {
        Some(path) => {
            if let Err(e) = fs::write(path, rendered + "\n") {
                eprintln!("❌ Failed to write '{}': {}", path, e);
                process::exit(1);
            }
            println!("✓ OpenAPI document written to {}", path);
        }
        None => println!("{}", rendered),
    }
}
