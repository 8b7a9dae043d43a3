//! Error types for co2-estimator
//!
//! The pure calculator and catalog lookups abstain with `Option`; everything
//! above them (configuration loading, trip orchestration, CLI) reports through
//! [`Error`]. Fuzzy matching for "did you mean" city suggestions lives here too.

use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;

use crate::core::collate::fold_accents;

/// Main error type for co2-estimator operations
#[derive(Debug, Error)]
pub enum Error {
    /// No catalog fact for the pair and no manual distance supplied
    #[error("No known distance between '{origin}' and '{destination}'{}", suggestion_hint(.suggestion))]
    RouteNotFound {
        origin: String,
        destination: String,
        suggestion: Option<String>,
    },

    /// Transport mode is not configured
    #[error("Unknown transport mode '{0}'")]
    UnknownMode(String),

    /// Invalid request parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The calculator abstained for a request that passed validation
    #[error("Calculation failed: {0}")]
    CalculationFailed(String),

    /// Invalid factor table, credit economics or route facts
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed configuration or route file
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(city) => format!(" (did you mean '{city}'?)"),
        None => String::new(),
    }
}

/// Convenience result type for co2-estimator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Lowercased, accent-folded form used for fuzzy comparison
fn comparison_key(s: &str) -> String {
    fold_accents(&s.trim().to_lowercase())
}

/// City part of a "City, UF" name
fn city_part(s: &str) -> &str {
    s.split(',').next().unwrap_or(s).trim()
}

/// Find the best fuzzy match using character-based scoring plus name-shape bonuses
///
/// Jaro-Winkler (70%) and normalized Levenshtein (30%) over the accent-folded
/// names, plus:
/// - City bonus: up to 25% when the input matches the part before the comma,
///   so "sao paulo" finds "São Paulo, SP" without typing the state.
/// - Word bonus: up to 10% for a close match on any single word of a
///   compound name ("santana" → "Feira de Santana, BA").
///
/// Minimum threshold: 0.75
fn find_best_fuzzy_match(input: &str, candidates: &[String]) -> Option<String> {
    let input_key = comparison_key(input);
    if input_key.is_empty() || candidates.is_empty() {
        return None;
    }

    let min_threshold = 0.75;
    let mut best_match = None;
    let mut best_score = 0.0f64;

    for candidate in candidates {
        let candidate_key = comparison_key(candidate);

        let jw_score = jaro_winkler(&input_key, &candidate_key);
        let lev_score = normalized_levenshtein(&input_key, &candidate_key);
        let combined_score = (jw_score * 0.7) + (lev_score * 0.3);

        let mut bonus = 0.0;

        // Users rarely type the state suffix
        let candidate_city = city_part(&candidate_key);
        let input_city = city_part(&input_key);
        let city_similarity = jaro_winkler(input_city, candidate_city);
        if city_similarity > 0.85 {
            bonus += 0.25 * city_similarity;
        }

        if input_key.chars().count() >= 4 {
            let word_similarity = candidate_city
                .split_whitespace()
                .filter(|word| word.chars().count() >= 4)
                .map(|word| jaro_winkler(&input_key, word))
                .fold(0.0f64, f64::max);
            if word_similarity > 0.9 {
                bonus += 0.1 * word_similarity;
            }
        }

        let final_score = combined_score + bonus;

        if final_score >= min_threshold && final_score > best_score {
            best_score = final_score;
            best_match = Some(candidate.clone());
        }
    }

    best_match
}

/// Suggest a correction for a potentially misspelled city name
///
/// Returns `None` when `input` already names a candidate (ignoring case and
/// surrounding whitespace) or when nothing is close enough.
pub fn suggest_correction(input: &str, candidates: &[String]) -> Option<String> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if candidates
        .iter()
        .any(|candidate| candidate.trim().to_lowercase() == normalized)
    {
        return None;
    }

    // Exact city name without the state ("Recife" → "Recife, PE")
    if let Some(found) = candidates
        .iter()
        .find(|candidate| comparison_key(city_part(candidate)) == comparison_key(&normalized))
    {
        return Some(found.clone());
    }

    find_best_fuzzy_match(input, candidates)
}
