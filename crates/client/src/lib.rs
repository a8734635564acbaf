//! HTTP client layer for the Adreel backend.
//!
//! Provides client configuration, the bearer-token store, typed REST
//! wrappers over the backend endpoints, and the generation job client
//! that drives a submitted job to a terminal state with a polling loop,
//! a watchdog timeout, and cooperative cancellation.

pub mod api;
pub mod config;
pub mod job;
pub mod token;
