//! Full response body of a GET request.

use std::io::Write;

use crate::config::Opt;
use crate::error_handling::{InitializationError, ProbeError};
use crate::initialization::init_client;
use crate::transfer::{execute, Discard, RequestDescriptor};

/// Fetches the URL without following redirects and prints the body, decoded
/// as lossy UTF-8. Nothing is printed if the request fails.
pub async fn run<W: Write>(opt: &Opt, out: &mut W) -> Result<(), ProbeError> {
    let descriptor = RequestDescriptor::get(&opt.url)?.capture_body(true);
    let client = init_client(opt).map_err(InitializationError::from)?;

    let outcome = execute(&client, &descriptor, &mut Discard, opt.timeout()).await?;
    log::info!(
        "{} answered {} with {} byte(s)",
        outcome.final_url,
        outcome.status,
        outcome.body.len()
    );

    writeln!(out, "--- Full Body Content ---")?;
    out.write_all(String::from_utf8_lossy(&outcome.body).as_bytes())?;
    Ok(())
}
