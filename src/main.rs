//! webtoapk - Web-to-APK build service.
//!
//! This binary serves an HTTP endpoint that wraps a website URL in a native
//! Android WebView project, packages it, signs it, and returns the signed
//! APK for download.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run the server and get exit code
    let exit_code = match webtoapk::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    };

    process::exit(exit_code);
}
