//! Portfolio performance module - current valuation and gain/loss.

mod performance_model;
pub mod performance_service;

pub use performance_model::*;
pub use performance_service::*;
