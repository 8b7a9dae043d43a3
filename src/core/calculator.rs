//! Emission arithmetic for co2-estimator
//!
//! Every operation is pure and total: invalid input makes it abstain with
//! `None` instead of failing, so callers must distinguish "no result" from a
//! computed zero through the `Option` alone.

use serde::{Deserialize, Serialize};

use crate::core::config::{EmissionConfig, CAR_MODE};

/// Emission of one mode, as listed in a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeEmissionResult {
    pub mode: String,
    pub emission_kg: f64,
    /// `None` without a car baseline or when the car emits nothing
    pub percentage_vs_car: Option<f64>,
}

/// Difference between a baseline and an emission
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsResult {
    /// Negative when the emission exceeds the baseline
    pub saved_kg: f64,
    pub percentage: Option<f64>,
}

/// Price range for a number of carbon credits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Round half up (towards +∞) to `decimals` places
///
/// `f64::EPSILON` is added before scaling so values such as 1.005 whose
/// binary form sits just below the midpoint still round up.
pub fn round(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    ((value + f64::EPSILON) * factor + 0.5).floor() / factor
}

fn valid_distance(distance_km: f64) -> bool {
    distance_km.is_finite() && distance_km >= 0.0
}

/// Calculator bound to one emission configuration
#[derive(Debug, Clone, Default)]
pub struct EmissionCalculator {
    config: EmissionConfig,
}

impl EmissionCalculator {
    pub fn new(config: EmissionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmissionConfig {
        &self.config
    }

    /// kg CO2 for `distance_km` travelled by `mode`, to 2 decimals
    pub fn calculate_emission(&self, distance_km: f64, mode: &str) -> Option<f64> {
        if !valid_distance(distance_km) {
            return None;
        }
        let factor = self.config.emission_factors.factor(mode)?;
        if !factor.is_finite() {
            return None;
        }
        Some(round(distance_km * factor, 2))
    }

    /// Emission of every configured mode, lowest first
    ///
    /// Percentages against the car are computed from unrounded emissions.
    /// Ties keep configuration order.
    pub fn calculate_all_modes(&self, distance_km: f64) -> Option<Vec<ModeEmissionResult>> {
        if !valid_distance(distance_km) {
            return None;
        }

        let factors = &self.config.emission_factors;
        let car_emission = factors.factor(CAR_MODE).map(|factor| distance_km * factor);

        let mut results: Vec<ModeEmissionResult> = factors
            .iter()
            .map(|(mode, factor)| {
                let emission = distance_km * factor;
                let percentage_vs_car = match car_emission {
                    Some(car) if car != 0.0 => Some(round(emission / car * 100.0, 2)),
                    _ => None,
                };
                ModeEmissionResult {
                    mode: mode.to_string(),
                    emission_kg: round(emission, 2),
                    percentage_vs_car,
                }
            })
            .collect();

        results.sort_by(|a, b| a.emission_kg.total_cmp(&b.emission_kg));
        Some(results)
    }

    /// How much `emission_kg` saves against `baseline_kg`
    pub fn calculate_savings(&self, emission_kg: f64, baseline_kg: f64) -> Option<SavingsResult> {
        if !emission_kg.is_finite() || !baseline_kg.is_finite() {
            return None;
        }

        let saved = baseline_kg - emission_kg;
        let percentage = if baseline_kg != 0.0 {
            Some(round(saved / baseline_kg * 100.0, 2))
        } else {
            None
        };

        Some(SavingsResult {
            saved_kg: round(saved, 2),
            percentage,
        })
    }

    /// Carbon credits needed to offset `emission_kg`, to 4 decimals
    pub fn calculate_carbon_credits(&self, emission_kg: f64) -> Option<f64> {
        if !emission_kg.is_finite() || emission_kg < 0.0 {
            return None;
        }
        let per_credit = self.config.carbon_credit.kg_per_credit;
        if !per_credit.is_finite() || per_credit <= 0.0 {
            return None;
        }
        Some(round(emission_kg / per_credit, 4))
    }

    /// Price range for `credits`; the average is taken from the rounded bounds
    pub fn estimate_credit_price(&self, credits: f64) -> Option<PriceEstimate> {
        if !credits.is_finite() || credits < 0.0 {
            return None;
        }
        let credit = &self.config.carbon_credit;
        if !credit.price_min_per_unit.is_finite() || !credit.price_max_per_unit.is_finite() {
            return None;
        }

        let min = round(credits * credit.price_min_per_unit, 2);
        let max = round(credits * credit.price_max_per_unit, 2);
        let average = round((min + max) / 2.0, 2);

        Some(PriceEstimate { min, max, average })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CarbonCreditConfig, EmissionFactorTable};

    fn calculator_with(factors: &[(&str, f64)], credit: CarbonCreditConfig) -> EmissionCalculator {
        let mut config = EmissionConfig::default();
        config.emission_factors = EmissionFactorTable::new(factors.iter().copied()).unwrap();
        config.carbon_credit = credit;
        EmissionCalculator::new(config)
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round(1.005, 2), 1.01);
        assert_eq!(round(8.9, 2), 8.9);
        assert_eq!(round(74.16666, 2), 74.17);
        assert_eq!(round(0.12345, 4), 0.1235);
        // Towards +∞, like the browser's Math.round
        assert_eq!(round(-0.125, 2), -0.12);
        assert_eq!(round(-10.0, 2), -10.0);
    }

    #[test]
    fn test_calculate_emission() {
        let calc = EmissionCalculator::default();
        assert_eq!(calc.calculate_emission(430.0, "car"), Some(51.6));
        assert_eq!(calc.calculate_emission(430.0, "bus"), Some(38.27));
        assert_eq!(calc.calculate_emission(430.0, "bicycle"), Some(0.0));
        assert_eq!(calc.calculate_emission(0.0, "truck"), Some(0.0));
        assert_eq!(calc.calculate_emission(12.5, "truck"), Some(12.0));
    }

    #[test]
    fn test_calculate_emission_abstains() {
        let calc = EmissionCalculator::default();
        assert_eq!(calc.calculate_emission(-1.0, "car"), None);
        assert_eq!(calc.calculate_emission(f64::NAN, "car"), None);
        assert_eq!(calc.calculate_emission(f64::INFINITY, "car"), None);
        assert_eq!(calc.calculate_emission(100.0, "unknown-mode"), None);
        assert_eq!(calc.calculate_emission(100.0, "Car"), None);
    }

    #[test]
    fn test_calculate_all_modes_sorted_with_percentages() {
        let calc = EmissionCalculator::default();
        let results = calc.calculate_all_modes(100.0).unwrap();

        let summary: Vec<(&str, f64, Option<f64>)> = results
            .iter()
            .map(|r| (r.mode.as_str(), r.emission_kg, r.percentage_vs_car))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("bicycle", 0.0, Some(0.0)),
                ("bus", 8.9, Some(74.17)),
                ("car", 12.0, Some(100.0)),
                ("truck", 96.0, Some(800.0)),
            ]
        );
    }

    #[test]
    fn test_calculate_all_modes_without_car_baseline() {
        let calc = calculator_with(&[("train", 0.041), ("bus", 0.089)], CarbonCreditConfig::default());
        let results = calc.calculate_all_modes(100.0).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].mode, "train");
        assert!(results.iter().all(|r| r.percentage_vs_car.is_none()));
    }

    #[test]
    fn test_calculate_all_modes_zero_distance() {
        let calc = EmissionCalculator::default();
        let results = calc.calculate_all_modes(0.0).unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.emission_kg == 0.0));
        assert!(results.iter().all(|r| r.percentage_vs_car.is_none()));
        // All tied: configuration order is kept
        let modes: Vec<&str> = results.iter().map(|r| r.mode.as_str()).collect();
        assert_eq!(modes, vec!["bicycle", "car", "bus", "truck"]);
    }

    #[test]
    fn test_calculate_all_modes_abstains() {
        let calc = EmissionCalculator::default();
        assert_eq!(calc.calculate_all_modes(-5.0), None);
        assert_eq!(calc.calculate_all_modes(f64::NAN), None);
    }

    #[test]
    fn test_calculate_savings() {
        let calc = EmissionCalculator::default();
        assert_eq!(
            calc.calculate_savings(38.27, 51.6),
            Some(SavingsResult {
                saved_kg: 13.33,
                percentage: Some(25.83),
            })
        );
        assert_eq!(
            calc.calculate_savings(10.0, 0.0),
            Some(SavingsResult {
                saved_kg: -10.0,
                percentage: None,
            })
        );
        // More than the baseline is reported as negative savings
        assert_eq!(
            calc.calculate_savings(96.0, 12.0),
            Some(SavingsResult {
                saved_kg: -84.0,
                percentage: Some(-700.0),
            })
        );
        assert_eq!(calc.calculate_savings(f64::NAN, 1.0), None);
        assert_eq!(calc.calculate_savings(1.0, f64::INFINITY), None);
    }

    #[test]
    fn test_calculate_carbon_credits() {
        let calc = EmissionCalculator::default();
        assert_eq!(calc.calculate_carbon_credits(1000.0), Some(1.0));
        assert_eq!(calc.calculate_carbon_credits(51.6), Some(0.0516));
        assert_eq!(calc.calculate_carbon_credits(0.0), Some(0.0));
        assert_eq!(calc.calculate_carbon_credits(-5.0), None);
        assert_eq!(calc.calculate_carbon_credits(f64::NAN), None);
    }

    #[test]
    fn test_calculate_carbon_credits_invalid_economics() {
        for kg_per_credit in [0.0, -1.0, f64::NAN] {
            let calc = calculator_with(
                &[("car", 0.12)],
                CarbonCreditConfig {
                    kg_per_credit,
                    ..CarbonCreditConfig::default()
                },
            );
            assert_eq!(calc.calculate_carbon_credits(10.0), None);
        }
    }

    #[test]
    fn test_estimate_credit_price() {
        let calc = EmissionCalculator::default();
        assert_eq!(
            calc.estimate_credit_price(2.0),
            Some(PriceEstimate {
                min: 100.0,
                max: 300.0,
                average: 200.0,
            })
        );
        assert_eq!(
            calc.estimate_credit_price(0.0516),
            Some(PriceEstimate {
                min: 2.58,
                max: 7.74,
                average: 5.16,
            })
        );
        assert_eq!(calc.estimate_credit_price(-1.0), None);
        assert_eq!(calc.estimate_credit_price(f64::INFINITY), None);
    }

    #[test]
    fn test_estimate_credit_price_averages_rounded_bounds() {
        let calc = calculator_with(
            &[("car", 0.12)],
            CarbonCreditConfig {
                kg_per_credit: 1000.0,
                price_min_per_unit: 0.005,
                price_max_per_unit: 0.015,
                currency: "BRL".to_string(),
            },
        );
        // Raw average 0.01; averaging the rounded bounds gives 0.015 -> 0.02
        let price = calc.estimate_credit_price(1.0).unwrap();
        assert_eq!(price.min, 0.01);
        assert_eq!(price.max, 0.02);
        assert_eq!(price.average, 0.02);
    }

    #[test]
    fn test_estimate_credit_price_invalid_economics() {
        let calc = calculator_with(
            &[("car", 0.12)],
            CarbonCreditConfig {
                price_max_per_unit: f64::NAN,
                ..CarbonCreditConfig::default()
            },
        );
        assert_eq!(calc.estimate_credit_price(1.0), None);
    }

    #[test]
    fn test_operations_are_idempotent() {
        let calc = EmissionCalculator::default();
        assert_eq!(calc.calculate_emission(123.4, "bus"), calc.calculate_emission(123.4, "bus"));
        assert_eq!(calc.calculate_all_modes(77.0), calc.calculate_all_modes(77.0));
        assert_eq!(calc.calculate_savings(3.0, 9.0), calc.calculate_savings(3.0, 9.0));
        assert_eq!(calc.calculate_carbon_credits(42.0), calc.calculate_carbon_credits(42.0));
        assert_eq!(calc.estimate_credit_price(0.3), calc.estimate_credit_price(0.3));
    }
}
