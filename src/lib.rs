//! Benchmark harness comparing the per-call overhead of four ways of talking
//! to MongoDB: raw `Document` driver calls, serde-typed collections, an async
//! repository layer, and a blocking active-record layer.
//!
//! The harness seeds a synthetic dataset of categories and orders, preselects
//! one set of query targets shared by every strategy, runs a fixed operation
//! suite for a configured iteration count under each strategy, and reduces
//! the timing samples to per-operation summary statistics.

pub mod config;
pub mod error;
pub mod models;
pub mod odm;
pub mod ops;
pub mod registry;
pub mod report;
pub mod runner;
pub mod seed;
pub mod stats;
pub mod targets;

pub use error::{Error, Result};
