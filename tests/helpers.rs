// Shared helpers for driving the probe binaries.

use std::process::{Command, Output};

/// Path of a probe binary built for this test run.
#[allow(dead_code)] // Not every test file runs every probe
pub fn probe_bin(name: &str) -> &'static str {
    match name {
        "packets" => env!("CARGO_BIN_EXE_packets"),
        "dns" => env!("CARGO_BIN_EXE_dns"),
        "certchain" => env!("CARGO_BIN_EXE_certchain"),
        "tls" => env!("CARGO_BIN_EXE_tls"),
        "header" => env!("CARGO_BIN_EXE_header"),
        "cookies" => env!("CARGO_BIN_EXE_cookies"),
        "redirect" => env!("CARGO_BIN_EXE_redirect"),
        "html_body" => env!("CARGO_BIN_EXE_html_body"),
        "run_all" => env!("CARGO_BIN_EXE_run_all"),
        other => panic!("unknown probe binary: {other}"),
    }
}

/// Runs a probe binary with `args`, with `RUST_LOG` cleared so log output is predictable.
#[allow(dead_code)]
pub fn run_probe(name: &str, args: &[&str]) -> Output {
    Command::new(probe_bin(name))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn {name}: {e}"))
}

/// Captured stdout as UTF-8.
#[allow(dead_code)]
pub fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be UTF-8")
}

/// Captured stderr as UTF-8 (lossy).
#[allow(dead_code)]
pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Mock HTTP server bound to 127.0.0.1, whatever `localhost` resolves to.
#[allow(dead_code)]
pub fn local_server() -> httptest::Server {
    httptest::ServerBuilder::new()
        .bind_addr(([127, 0, 0, 1], 0).into())
        .run()
        .expect("mock server should bind to 127.0.0.1")
}
