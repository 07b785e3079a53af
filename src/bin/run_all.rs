//! Runs every probe binary against one URL and prints the combined report.

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    netprobe::app::run_composer().await
}
