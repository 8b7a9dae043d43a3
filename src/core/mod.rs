//! Core library modules for co2-estimator
//!
//! Route lookup, emission configuration, the pure calculator and the trip
//! estimator built on top of them.

pub mod calculator;
pub mod collate;
pub mod config;
pub mod error;
pub mod estimator;
pub mod routes;

// Re-export main types for internal use
pub use calculator::{EmissionCalculator, ModeEmissionResult, PriceEstimate, SavingsResult};
pub use config::{CarbonCreditConfig, EmissionConfig, EmissionFactorTable, ModeDisplay};
pub use estimator::{Estimator, TripReport, TripRequest};
pub use routes::{RouteCatalog, RouteFact};
