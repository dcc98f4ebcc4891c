//! Presentation layer
//!
//! The HTTP API that stands in for the hub's pages and the command-line
//! entry points.

pub mod cli;
pub mod http;
