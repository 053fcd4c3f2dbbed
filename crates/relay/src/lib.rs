//! Gemini Relay - transparent request rewriting for Gemini API traffic
//!
//! This crate intercepts outbound requests aimed at the Gemini API host and
//! reroutes them through a user-configured proxy or gateway, repairing the
//! path-shape mismatches common gateways introduce along the way.

pub mod config;
pub mod error;
pub mod interceptor;
pub mod sanitize;
pub mod testing;

pub use error::RelayError;
