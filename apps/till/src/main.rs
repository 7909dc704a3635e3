//! # Kasse Till Entry Point
//!
//! Starts one register session on the terminal.
//!
//! ```text
//! kasse-till                     text display on stdout
//! KASSE_OUTPUT=json kasse-till   JSON lines for an external touch UI
//! ```
//!
//! Startup failures (unreadable database, malformed catalog) are printed to
//! stderr and end the process with a failure status.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match kasse_till::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("kasse-till: {}", e);
            ExitCode::FAILURE
        }
    }
}
