//! Server module for building the HTTP server
//!
//! `ServerBuilder` wires configuration and stores into the router; `router`
//! assembles health and tutorial routes behind a trace layer.

pub mod builder;
pub mod router;

pub use builder::ServerBuilder;
pub use router::build_router;
