//! # co2-estimator Library
//!
//! Estimates the CO2 emitted by a trip, compares it across transport modes
//! and prices the carbon credits needed to offset it.
//!
//! ## Features
//!
//! - **Route lookup**: bidirectional, case-insensitive distances for common
//!   Brazilian city pairs, with "did you mean" suggestions
//! - **Pure calculator**: emission, all-mode comparison, savings, credits and
//!   price range; invalid input abstains with `None`
//! - **Configurable**: emission factors and credit economics from JSON
//! - **Rendering**: pt-BR formatted text reports
//!
//! ## Basic Usage
//!
//! ```rust
//! let report = co2_estimator::estimate("São Paulo, SP", "Rio de Janeiro, RJ", None, "bus")?;
//! assert_eq!(report.distance_km, 430.0);
//! assert_eq!(report.emission_kg, 38.27);
//!
//! assert_eq!(co2_estimator::find_distance("rio de janeiro, rj", "SÃO PAULO, SP"), Some(430.0));
//! # Ok::<(), co2_estimator::Error>(())
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use co2_estimator::{EmissionCalculator, EmissionConfig};
//!
//! let config = EmissionConfig::from_json_str(
//!     r#"{"modes": [{"id": "train", "factorKgPerKm": 0.041}, {"id": "car", "factorKgPerKm": 0.12}]}"#,
//! )?;
//! let calculator = EmissionCalculator::new(config);
//! assert_eq!(calculator.calculate_emission(100.0, "train"), Some(4.1));
//! assert_eq!(calculator.calculate_emission(-1.0, "train"), None);
//! # Ok::<(), co2_estimator::Error>(())
//! ```

// Re-export core types that users might need
pub use crate::core::calculator::round;
pub use crate::core::error::{suggest_correction, Error, Result};
pub use crate::core::{
    CarbonCreditConfig, EmissionCalculator, EmissionConfig, EmissionFactorTable, Estimator,
    ModeDisplay, ModeEmissionResult, PriceEstimate, RouteCatalog, RouteFact, SavingsResult,
    TripReport, TripRequest,
};

// Internal modules
mod core;

pub mod render;

// C-compatible FFI bindings (optional)
#[cfg(feature = "c-bindings")]
pub mod ffi;

/// Estimate a trip with the built-in configuration and routes
///
/// # Arguments
/// * `origin`, `destination` - City names ("City, UF"), matched ignoring case
/// * `distance_km` - Manual distance; `None` looks the pair up in the catalog
/// * `mode` - Transport mode id (`bicycle`, `car`, `bus`, `truck`)
pub fn estimate(
    origin: &str,
    destination: &str,
    distance_km: Option<f64>,
    mode: &str,
) -> Result<TripReport> {
    let request = TripRequest {
        origin: origin.to_string(),
        destination: destination.to_string(),
        distance_km,
        mode: mode.to_string(),
    };
    Estimator::new().estimate(&request)
}

/// Catalog distance between two cities, in either direction
pub fn find_distance(origin: &str, destination: &str) -> Option<f64> {
    RouteCatalog::default().find_distance(origin, destination)
}

/// Every city of the built-in catalog, collated the Portuguese way
pub fn list_cities() -> Vec<String> {
    RouteCatalog::default().list_cities()
}
