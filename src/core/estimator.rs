//! Trip estimation for co2-estimator
//!
//! Validates a trip request, resolves its distance and runs every calculator
//! operation to assemble a [`TripReport`].

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::calculator::{EmissionCalculator, ModeEmissionResult, PriceEstimate, SavingsResult};
use crate::core::config::{EmissionConfig, CAR_MODE};
use crate::core::error::{Error, Result};
use crate::core::routes::RouteCatalog;

/// A trip to estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    /// Manual distance; `None` looks the pair up in the route catalog
    pub distance_km: Option<f64>,
    pub mode: String,
}

impl TripRequest {
    pub fn new(origin: &str, destination: &str, mode: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km: None,
            mode: mode.to_string(),
        }
    }

    pub fn with_distance(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }
}

/// Everything computed for one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripReport {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub mode: String,
    pub emission_kg: f64,
    pub car_emission_kg: Option<f64>,
    /// Only for modes other than the car
    pub savings: Option<SavingsResult>,
    pub comparison: Vec<ModeEmissionResult>,
    pub credits: Option<f64>,
    pub price: Option<PriceEstimate>,
}

/// Runs trip estimates against one configuration and route catalog
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    calculator: EmissionCalculator,
    catalog: RouteCatalog,
}

impl Estimator {
    /// Create an estimator with the built-in configuration and routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with custom configuration and routes
    pub fn with_config(config: EmissionConfig, catalog: RouteCatalog) -> Self {
        Self {
            calculator: EmissionCalculator::new(config),
            catalog,
        }
    }

    pub fn calculator(&self) -> &EmissionCalculator {
        &self.calculator
    }

    pub fn config(&self) -> &EmissionConfig {
        self.calculator.config()
    }

    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }

    /// Pick the trip distance: a manual value wins over the catalog
    pub fn resolve_distance(
        &self,
        origin: &str,
        destination: &str,
        manual_km: Option<f64>,
    ) -> Result<f64> {
        if let Some(distance) = manual_km {
            debug!("Using manual distance {distance} km for {origin} → {destination}");
            return Ok(distance);
        }

        if let Some(distance) = self.catalog.find_distance(origin, destination) {
            debug!("Found catalog distance {distance} km for {origin} → {destination}");
            return Ok(distance);
        }

        // Suggest a fix for whichever city the catalog does not know
        let suggestion = [origin, destination]
            .into_iter()
            .filter(|city| !self.catalog.contains_city(city))
            .find_map(|city| self.catalog.suggest_city(city));

        Err(Error::RouteNotFound {
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            suggestion,
        })
    }

    /// Estimate emissions, comparison, savings and credits for a trip
    pub fn estimate(&self, request: &TripRequest) -> Result<TripReport> {
        let origin = request.origin.trim();
        let destination = request.destination.trim();
        if origin.is_empty() || destination.is_empty() {
            return Err(Error::InvalidInput(
                "origin and destination are required".to_string(),
            ));
        }

        let distance_km = self.resolve_distance(origin, destination, request.distance_km)?;
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "distance must be a number greater than zero, got {distance_km}"
            )));
        }

        let mode = request.mode.as_str();
        if !self.config().has_mode(mode) {
            return Err(Error::UnknownMode(mode.to_string()));
        }

        let calc = &self.calculator;
        let emission_kg = calc.calculate_emission(distance_km, mode).ok_or_else(|| {
            Error::CalculationFailed(format!(
                "no emission for {distance_km} km by '{mode}'"
            ))
        })?;

        let car_emission_kg = calc.calculate_emission(distance_km, CAR_MODE);

        let savings = match car_emission_kg {
            Some(baseline) if mode != CAR_MODE => calc.calculate_savings(emission_kg, baseline),
            _ => None,
        };

        let comparison = calc.calculate_all_modes(distance_km).unwrap_or_default();

        let credits = calc.calculate_carbon_credits(emission_kg);
        let price = credits.and_then(|c| calc.estimate_credit_price(c));
        if credits.is_none() || price.is_none() {
            warn!("Carbon-credit economics are invalid; credit estimate omitted");
        }

        debug!("{origin} → {destination}: {distance_km} km by {mode} emits {emission_kg} kg CO2");

        Ok(TripReport {
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km,
            mode: mode.to_string(),
            emission_kg,
            car_emission_kg,
            savings,
            comparison,
            credits,
            price,
        })
    }
}
