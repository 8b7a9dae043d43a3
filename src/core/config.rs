//! Emission configuration for co2-estimator
//!
//! Holds the per-mode emission factors, the display metadata used by the
//! renderer and the carbon-credit economics. Built once at start-up (either
//! the built-in defaults or a JSON file) and never mutated afterwards.

use std::collections::HashMap;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Mode id used as the comparison baseline
pub const CAR_MODE: &str = "car";

/// Ordered mode → kg CO2/km table
///
/// Every factor is finite and non-negative; iteration follows insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactorTable {
    entries: Vec<(String, f64)>,
}

impl EmissionFactorTable {
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table = Self { entries: Vec::new() };
        for (mode, factor) in entries {
            let mode = mode.into();
            if mode.trim().is_empty() {
                return Err(Error::InvalidConfig("empty transport mode id".to_string()));
            }
            if !factor.is_finite() || factor < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "emission factor for '{mode}' must be finite and >= 0, got {factor}"
                )));
            }
            if table.factor(&mode).is_some() {
                return Err(Error::InvalidConfig(format!(
                    "transport mode '{mode}' is configured twice"
                )));
            }
            table.entries.push((mode, factor));
        }
        Ok(table)
    }

    pub fn factor(&self, mode: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(id, _)| id == mode)
            .map(|(_, factor)| *factor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(id, factor)| (id.as_str(), *factor))
    }

    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rendering metadata for a transport mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeDisplay {
    pub label: String,
    pub icon: String,
    pub color: String,
}

impl ModeDisplay {
    fn new(label: &str, icon: &str, color: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }

    /// Fallback for modes configured without metadata
    pub fn fallback(mode: &str) -> Self {
        Self::new(mode, "•", "#0B84A5")
    }
}

/// Carbon-credit economics
///
/// `price_min_per_unit <= price_max_per_unit` is assumed, not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonCreditConfig {
    pub kg_per_credit: f64,
    pub price_min_per_unit: f64,
    pub price_max_per_unit: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "BRL".to_string()
}

impl Default for CarbonCreditConfig {
    fn default() -> Self {
        Self {
            kg_per_credit: 1000.0,
            price_min_per_unit: 50.0,
            price_max_per_unit: 150.0,
            currency: default_currency(),
        }
    }
}

/// One mode as written in a configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModeEntry {
    id: String,
    factor_kg_per_km: f64,
    label: Option<String>,
    icon: Option<String>,
    color: Option<String>,
}

/// On-disk configuration layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    modes: Vec<ModeEntry>,
    #[serde(default)]
    carbon_credit: CarbonCreditConfig,
}

/// Complete emission configuration
#[derive(Debug, Clone)]
pub struct EmissionConfig {
    pub emission_factors: EmissionFactorTable,
    pub transport_modes: HashMap<String, ModeDisplay>,
    pub carbon_credit: CarbonCreditConfig,
}

impl Default for EmissionConfig {
    fn default() -> Self {
        let emission_factors = EmissionFactorTable {
            entries: vec![
                ("bicycle".to_string(), 0.0),
                ("car".to_string(), 0.12),
                ("bus".to_string(), 0.089),
                ("truck".to_string(), 0.96),
            ],
        };

        let transport_modes = HashMap::from([
            ("bicycle".to_string(), ModeDisplay::new("Bicicleta", "🚲", "#2EC4B6")),
            ("car".to_string(), ModeDisplay::new("Carro", "🚗", "#0B84A5")),
            ("bus".to_string(), ModeDisplay::new("Ônibus", "🚌", "#0B6E9E")),
            ("truck".to_string(), ModeDisplay::new("Caminhão", "🚚", "#045B66")),
        ]);

        Self {
            emission_factors,
            transport_modes,
            carbon_credit: CarbonCreditConfig::default(),
        }
    }
}

impl EmissionConfig {
    /// Parse a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;
        if file.modes.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one transport mode is required".to_string(),
            ));
        }

        let emission_factors = EmissionFactorTable::new(
            file.modes
                .iter()
                .map(|entry| (entry.id.clone(), entry.factor_kg_per_km)),
        )?;

        let transport_modes = file
            .modes
            .into_iter()
            .map(|entry| {
                let fallback = ModeDisplay::fallback(&entry.id);
                let display = ModeDisplay {
                    label: entry.label.unwrap_or(fallback.label),
                    icon: entry.icon.unwrap_or(fallback.icon),
                    color: entry.color.unwrap_or(fallback.color),
                };
                (entry.id, display)
            })
            .collect();

        debug!(
            "Loaded {} transport modes, {} kg per credit",
            emission_factors.len(),
            file.carbon_credit.kg_per_credit
        );

        Ok(Self {
            emission_factors,
            transport_modes,
            carbon_credit: file.carbon_credit,
        })
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading emission configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Display metadata for `mode`, falling back to the bare id
    pub fn display(&self, mode: &str) -> ModeDisplay {
        self.transport_modes
            .get(mode)
            .cloned()
            .unwrap_or_else(|| ModeDisplay::fallback(mode))
    }

    pub fn has_mode(&self, mode: &str) -> bool {
        self.emission_factors.factor(mode).is_some()
    }
}
