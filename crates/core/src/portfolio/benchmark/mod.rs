//! Benchmark comparison module.

mod benchmark_model;
pub mod benchmark_service;

pub use benchmark_model::*;
pub use benchmark_service::*;
