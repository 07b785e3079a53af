//! Helpers shared by unit tests.

use httptest::{Server, ServerBuilder};

/// Mock HTTP server bound to 127.0.0.1, whatever `localhost` resolves to.
pub(crate) fn local_server() -> Server {
    ServerBuilder::new()
        .bind_addr(([127, 0, 0, 1], 0).into())
        .run()
        .expect("mock server should bind to 127.0.0.1")
}
