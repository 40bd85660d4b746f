//! Core library for the `apiprobe` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration loading, the HTTP client for the food delivery API,
//! response-shape resolution, and the probes themselves. The primary
//! user-facing interface is the `apiprobe` command-line application; library
//! APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod probe;
pub mod shape;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
