//! HTTP middleware stack for the proxy.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one transaction per request)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (the app may be served from another origin in development)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
