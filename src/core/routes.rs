//! Route catalog for co2-estimator
//!
//! A small, fixed list of city pairs with known road distances, used to fill
//! in the trip distance automatically.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::collate;
use crate::core::error::{suggest_correction, Error, Result};

/// A known distance between two cities ("City, UF")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteFact {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
}

impl RouteFact {
    pub fn new(origin: &str, destination: &str, distance_km: f64) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km,
        }
    }
}

/// Approximate road distances between Brazilian cities
const DEFAULT_ROUTES: &[(&str, &str, f64)] = &[
    ("São Paulo, SP", "Rio de Janeiro, RJ", 430.0),
    ("São Paulo, SP", "Brasília, DF", 1015.0),
    ("Rio de Janeiro, RJ", "Brasília, DF", 1148.0),
    // Regional connections
    ("São Paulo, SP", "Campinas, SP", 95.0),
    ("Rio de Janeiro, RJ", "Niterói, RJ", 13.0),
    ("Belo Horizonte, MG", "Ouro Preto, MG", 100.0),
    ("Porto Alegre, RS", "Pelotas, RS", 260.0),
    ("Curitiba, PR", "Florianópolis, SC", 300.0),
    ("Salvador, BA", "Feira de Santana, BA", 110.0),
    ("Fortaleza, CE", "Sobral, CE", 240.0),
    ("Manaus, AM", "Santarém, PA", 670.0),
    ("Belém, PA", "Ananindeua, PA", 20.0),
    ("Recife, PE", "Olinda, PE", 10.0),
    ("João Pessoa, PB", "Campina Grande, PB", 120.0),
    ("Natal, RN", "Mossoró, RN", 210.0),
    ("Vitória, ES", "Vila Velha, ES", 10.0),
    ("Goiânia, GO", "Anápolis, GO", 55.0),
    ("Campo Grande, MS", "Dourados, MS", 220.0),
    ("Cuiabá, MT", "Rondonópolis, MT", 220.0),
    ("Brasília, DF", "Goiânia, GO", 200.0),
    ("São Paulo, SP", "Santos, SP", 80.0),
    ("São Paulo, SP", "Ribeirão Preto, SP", 320.0),
    ("Salvador, BA", "Ilhéus, BA", 270.0),
    ("Porto Alegre, RS", "Caxias do Sul, RS", 130.0),
    ("Curitiba, PR", "Londrina, PR", 370.0),
    ("Fortaleza, CE", "Juazeiro do Norte, CE", 500.0),
    ("Recife, PE", "Maceió, AL", 250.0),
    ("Manaus, AM", "Belém, PA", 1480.0),
    ("São Paulo, SP", "Porto Alegre, RS", 1130.0),
    ("São Paulo, SP", "Salvador, BA", 1540.0),
    ("São Paulo, SP", "Recife, PE", 2650.0),
    ("Belo Horizonte, MG", "São Paulo, SP", 586.0),
    ("Curitiba, PR", "São Paulo, SP", 408.0),
    ("Vitória, ES", "Rio de Janeiro, RJ", 520.0),
    ("Rio de Janeiro, RJ", "Niterói, RJ", 13.0),
    ("Belém, PA", "Santarém, PA", 680.0),
];

/// Trim and lowercase a city name for lookup
fn normalize_city(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Ordered list of route facts
///
/// Facts are kept in insertion order; lookups return the first match.
#[derive(Debug, Clone)]
pub struct RouteCatalog {
    routes: Vec<RouteFact>,
}

impl Default for RouteCatalog {
    fn default() -> Self {
        Self {
            routes: DEFAULT_ROUTES
                .iter()
                .map(|&(origin, destination, distance)| RouteFact::new(origin, destination, distance))
                .collect(),
        }
    }
}

impl RouteCatalog {
    /// Build a catalog from explicit facts
    ///
    /// Every fact needs non-blank city names and a finite distance > 0.
    pub fn from_facts(routes: Vec<RouteFact>) -> Result<Self> {
        for (index, route) in routes.iter().enumerate() {
            if route.origin.trim().is_empty() || route.destination.trim().is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "route #{index} has an empty city name"
                )));
            }
            if !route.distance_km.is_finite() || route.distance_km <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "route #{index} ({} → {}) has invalid distance {}",
                    route.origin, route.destination, route.distance_km
                )));
            }
        }
        Ok(Self { routes })
    }

    /// Load a JSON array of `{"origin", "destination", "distanceKm"}` objects
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let routes: Vec<RouteFact> = serde_json::from_str(&content)?;
        Self::from_facts(routes)
    }

    pub fn routes(&self) -> &[RouteFact] {
        &self.routes
    }

    /// All cities appearing in any route, deduplicated and collated
    pub fn list_cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = Vec::new();
        for route in &self.routes {
            for city in [&route.origin, &route.destination] {
                if !cities.contains(city) {
                    cities.push(city.clone());
                }
            }
        }
        cities.sort_by(|a, b| collate::compare(a, b));
        cities
    }

    /// Distance between two cities in either direction
    ///
    /// Returns `None` when either name is blank or no fact matches.
    pub fn find_distance(&self, origin: &str, destination: &str) -> Option<f64> {
        let o = normalize_city(origin);
        let d = normalize_city(destination);
        if o.is_empty() || d.is_empty() {
            return None;
        }

        self.routes
            .iter()
            .find(|route| {
                let ro = normalize_city(&route.origin);
                let rd = normalize_city(&route.destination);
                (ro == o && rd == d) || (ro == d && rd == o)
            })
            .map(|route| route.distance_km)
    }

    /// Whether `city` appears in any route (case-insensitive, trimmed)
    pub fn contains_city(&self, city: &str) -> bool {
        let c = normalize_city(city);
        !c.is_empty()
            && self
                .routes
                .iter()
                .any(|route| normalize_city(&route.origin) == c || normalize_city(&route.destination) == c)
    }

    /// "Did you mean" suggestion for a city that is not in the catalog
    pub fn suggest_city(&self, input: &str) -> Option<String> {
        suggest_correction(input, &self.list_cities())
    }
}
