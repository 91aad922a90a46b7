//! Top-level facade crate for metricbuf.
//!
//! Re-exports the buffer core and the HTTP server library so users can depend on a single crate.

pub mod core {
    pub use metricbuf_core::*;
}

pub mod server {
    pub use metricbuf_server::*;
}
