//! HTTP middleware stack for the mock server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`, only active with a DSN)
//! 2. CORS (every origin, method and header)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (keep the client's tag or generate one)
//! 5. Panic catcher (turn handler panics into the JSON 500 envelope)

pub mod panic;
pub mod request_id;

pub use panic::handle_panic;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
