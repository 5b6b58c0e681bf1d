//! Library exports for cnxlogging, shared between the binary and tests.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod startup;
pub mod state;
pub mod statsd;
pub mod utils;
