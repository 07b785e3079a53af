//! Error types shared by every probe.
//!
//! Errors are split into:
//! - **Initialization errors**: the logger, HTTP client or resolver could not be set up
//! - **Probe errors**: resolution, transfer, TLS or output failures while probing
//!
//! Every probe error is terminal for the single request being performed and maps to
//! exit status 1.

mod types;

// Re-export public API
pub use types::{InitializationError, ProbeError};
