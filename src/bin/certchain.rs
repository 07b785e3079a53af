use std::process::ExitCode;

use netprobe::app::run_probe;
use netprobe::Probe;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    run_probe(Probe::Certchain).await
}
