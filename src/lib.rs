//! A small versioned HTTP API for managing todo tasks, backed by an
//! in-memory SQLite store, plus a weather forecast sample endpoint kept
//! around to demonstrate version groups and generated documentation.
//!
//! Layering: `domain` owns the records and store contract, `application`
//! the lifecycle rules, `infrastructure` the SQLite store, `http` the wire.

pub mod application;
pub mod config;
pub mod domain;
pub mod http;
pub mod infrastructure;
