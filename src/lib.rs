//! Mobile Forensics Hub
//!
//! A guided mobile forensics workflow: wipe-accuracy assessment,
//! recovery-potential analysis, a wipe/recovery simulation, simulated data
//! extraction and threat detection. Every analysis is answered by a language
//! model through typed flows; the crate itself keeps the workflow state,
//! validates input and serves the steps over HTTP.
//!
//! Layers:
//! - [`core`]: configuration and shared error types
//! - [`domain`]: flow contracts, the session state machine and services
//! - [`application`]: server actions and session workflows
//! - [`infrastructure`]: model providers and the session store
//! - [`presentation`]: the HTTP API and the CLI

pub mod application;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
