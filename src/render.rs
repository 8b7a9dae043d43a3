//! Text rendering for trip reports
//!
//! Formats numbers and currency the Brazilian way (`1.234,56`, `R$ 1,92`)
//! and lays out the result, comparison and carbon-credit sections.

use crate::core::calculator::{ModeEmissionResult, PriceEstimate};
use crate::core::config::{EmissionConfig, CAR_MODE};
use crate::core::estimator::TripReport;

/// Width of the comparison bars, in characters
const BAR_WIDTH: usize = 20;

/// Format a number with pt-BR separators and a fixed number of decimals
///
/// Halves round away from zero. Non-finite input renders as `"0"`.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let scaled = (value.abs() * 10f64.powi(decimals as i32)).round();
    let digits = format!("{:0>width$.0}", scaled, width = decimals + 1);
    let (int_part, frac_part) = digits.split_at(digits.len() - decimals);

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && scaled != 0.0 { "-" } else { "" };
    if decimals == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{frac_part}")
    }
}

/// Format a monetary amount with two decimals
pub fn format_currency(value: f64, currency: &str) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let symbol = match currency {
        "BRL" => "R$",
        "USD" => "US$",
        "EUR" => "€",
        other => other,
    };
    let amount = format_number(value.abs(), 2);
    if value < 0.0 && amount != "0,00" {
        format!("-{symbol} {amount}")
    } else {
        format!("{symbol} {amount}")
    }
}

/// Intensity tier of a comparison bar, relative to the highest emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTier {
    Green,
    Yellow,
    Orange,
    Red,
}

impl BarTier {
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage > 100.0 {
            BarTier::Red
        } else if percentage > 75.0 {
            BarTier::Orange
        } else if percentage > 25.0 {
            BarTier::Yellow
        } else {
            BarTier::Green
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            BarTier::Green => "#2EC4B6",
            BarTier::Yellow => "#FFC107",
            BarTier::Orange => "#F6A623",
            BarTier::Red => "#E05A5A",
        }
    }

    fn fill(self) -> char {
        match self {
            BarTier::Green => '░',
            BarTier::Yellow => '▒',
            BarTier::Orange => '▓',
            BarTier::Red => '█',
        }
    }
}

fn render_bar(percentage: f64) -> String {
    let tier = BarTier::for_percentage(percentage);
    let filled = ((percentage.min(100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    let mut bar = String::with_capacity(BAR_WIDTH + 2);
    bar.push('[');
    bar.extend(std::iter::repeat(tier.fill()).take(filled));
    bar.extend(std::iter::repeat(' ').take(BAR_WIDTH - filled));
    bar.push(']');
    bar
}

/// Route, distance, emission, mode and (for non-car modes) savings
pub fn render_results(report: &TripReport, config: &EmissionConfig) -> String {
    let display = config.display(&report.mode);
    let mut out = String::new();

    out.push_str(&format!(
        "Trajeto:        {} → {}\n",
        report.origin, report.destination
    ));
    out.push_str(&format!(
        "Distância:      {} km\n",
        format_number(report.distance_km, 0)
    ));
    out.push_str(&format!(
        "Emissão de CO₂: 🍃 {} kg\n",
        format_number(report.emission_kg, 2)
    ));
    out.push_str(&format!("Modo:           {} {}\n", display.icon, display.label));

    if let Some(savings) = report.savings.filter(|_| report.mode != CAR_MODE) {
        // Emitting more than the car is not shown as negative savings
        if savings.saved_kg >= 0.0 {
            out.push_str(&format!(
                "Economia:       {} kg economizados",
                format_number(savings.saved_kg, 2)
            ));
            if let Some(percentage) = savings.percentage {
                out.push_str(&format!(" ({}%)", format_number(percentage, 1)));
            }
            out.push('\n');
        } else {
            out.push_str(&format!(
                "Acréscimo:      {} kg a mais que o carro\n",
                format_number(-savings.saved_kg, 2)
            ));
        }
    }

    out
}

/// One line per mode with emission, share of the car and a bar
pub fn render_comparison(
    modes: &[ModeEmissionResult],
    selected_mode: &str,
    config: &EmissionConfig,
) -> String {
    if modes.is_empty() {
        return String::new();
    }

    let max_emission = modes
        .iter()
        .map(|m| m.emission_kg)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut out = String::from("Comparação de Emissões por Modo de Transporte\n");

    for mode in modes {
        let display = config.display(&mode.mode);
        let selected = mode.mode == selected_mode;
        let percentage = if max_emission > 0.0 {
            mode.emission_kg / max_emission * 100.0
        } else {
            0.0
        };

        let share = mode
            .percentage_vs_car
            .map(|p| format!("{}% do carro", format_number(p, 0)))
            .unwrap_or_default();

        out.push_str(&format!(
            "{} {} {:<12} {:>12} kg  {:<16} {}{}\n",
            if selected { "▶" } else { " " },
            display.icon,
            display.label,
            format_number(mode.emission_kg, 2),
            share,
            render_bar(percentage),
            if selected { "  Selecionado" } else { "" },
        ));
    }

    out.push_str(
        "💡 Dica: Modos com menor emissão ajudam a reduzir o impacto ambiental. \
         Considere usar bicicleta ou transporte público quando possível!\n",
    );
    out
}

/// Credits needed and their estimated price range
pub fn render_carbon_credits(credits: f64, price: &PriceEstimate, config: &EmissionConfig) -> String {
    let currency = &config.carbon_credit.currency;
    format!(
        "Créditos de Carbono Necessários: {} créditos (1 crédito = {} kg CO₂)\n\
         Preço Estimado:                  {} ({} - {})\n",
        format_number(credits, 4),
        format_number(config.carbon_credit.kg_per_credit, 0),
        format_currency(price.average, currency),
        format_currency(price.min, currency),
        format_currency(price.max, currency),
    )
}

/// All sections of a report, separated by blank lines
pub fn render_report(report: &TripReport, config: &EmissionConfig) -> String {
    let mut sections = vec![render_results(report, config)];

    let comparison = render_comparison(&report.comparison, &report.mode, config);
    if !comparison.is_empty() {
        sections.push(comparison);
    }

    if let (Some(credits), Some(price)) = (report.credits, report.price.as_ref()) {
        sections.push(render_carbon_credits(credits, price, config));
    }

    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::estimator::{Estimator, TripRequest};

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234.567, 2), "1.234,57");
        assert_eq!(format_number(430.0, 0), "430");
        assert_eq!(format_number(1234567.0, 0), "1.234.567");
        assert_eq!(format_number(0.0383, 4), "0,0383");
        assert_eq!(format_number(0.5, 0), "1");
        assert_eq!(format_number(74.17, 1), "74,2");
        assert_eq!(format_number(-13.3, 2), "-13,30");
        assert_eq!(format_number(-0.001, 2), "0,00");
        assert_eq!(format_number(f64::NAN, 2), "0");
        assert_eq!(format_number(f64::INFINITY, 0), "0");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(3.84, "BRL"), "R$ 3,84");
        assert_eq!(format_currency(1500.0, "BRL"), "R$ 1.500,00");
        assert_eq!(format_currency(-2.0, "BRL"), "-R$ 2,00");
        assert_eq!(format_currency(f64::NAN, "BRL"), "R$ 0,00");
        assert_eq!(format_currency(1.0, "USD"), "US$ 1,00");
        assert_eq!(format_currency(1.0, "CHF"), "CHF 1,00");
    }

    #[test]
    fn test_bar_tiers() {
        assert_eq!(BarTier::for_percentage(0.0), BarTier::Green);
        assert_eq!(BarTier::for_percentage(25.0), BarTier::Green);
        assert_eq!(BarTier::for_percentage(50.0), BarTier::Yellow);
        assert_eq!(BarTier::for_percentage(100.0), BarTier::Orange);
        assert_eq!(BarTier::for_percentage(120.0), BarTier::Red);
        assert_eq!(BarTier::Green.color(), "#2EC4B6");
        assert_eq!(render_bar(50.0), format!("[{}{}]", "▒".repeat(10), " ".repeat(10)));
        assert_eq!(render_bar(0.0), format!("[{}]", " ".repeat(BAR_WIDTH)));
    }

    #[test]
    fn test_render_results_with_savings() {
        let estimator = Estimator::new();
        let report = estimator
            .estimate(&TripRequest::new("São Paulo, SP", "Rio de Janeiro, RJ", "bus"))
            .unwrap();
        let text = render_results(&report, estimator.config());

        assert!(text.contains("São Paulo, SP → Rio de Janeiro, RJ"));
        assert!(text.contains("430 km"));
        assert!(text.contains("38,27 kg"));
        assert!(text.contains("🚌 Ônibus"));
        assert!(text.contains("13,33 kg economizados (25,8%)"));
    }

    #[test]
    fn test_render_results_car_and_higher_emission() {
        let estimator = Estimator::new();
        let car = estimator
            .estimate(&TripRequest::new("Recife, PE", "Olinda, PE", "car"))
            .unwrap();
        let text = render_results(&car, estimator.config());
        assert!(!text.contains("Economia"));
        assert!(!text.contains("Acréscimo"));

        let truck = estimator
            .estimate(&TripRequest::new("Recife, PE", "Olinda, PE", "truck"))
            .unwrap();
        let text = render_results(&truck, estimator.config());
        assert!(!text.contains("economizados"));
        assert!(text.contains("8,40 kg a mais que o carro"));
    }

    #[test]
    fn test_render_comparison() {
        let estimator = Estimator::new();
        let modes = estimator.calculator().calculate_all_modes(100.0).unwrap();
        let text = render_comparison(&modes, "bus", estimator.config());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Comparação de Emissões por Modo de Transporte");
        assert!(lines[1].contains("Bicicleta") && lines[1].contains("0% do carro"));
        assert!(lines[2].starts_with('▶') && lines[2].contains("Selecionado"));
        assert!(lines[2].contains("8,90 kg") && lines[2].contains("74% do carro"));
        assert!(lines[4].contains("96,00 kg") && lines[4].contains("800% do carro"));
        assert!(lines[4].contains(&"▓".repeat(BAR_WIDTH)));
        assert!(lines[5].starts_with("💡 Dica"));
        assert_eq!(render_comparison(&[], "bus", estimator.config()), "");
    }

    #[test]
    fn test_render_carbon_credits() {
        let config = EmissionConfig::default();
        let price = PriceEstimate {
            min: 1.92,
            max: 5.75,
            average: 3.84,
        };
        let text = render_carbon_credits(0.0383, &price, &config);
        assert!(text.contains("0,0383 créditos"));
        assert!(text.contains("1 crédito = 1.000 kg CO₂"));
        assert!(text.contains("R$ 3,84 (R$ 1,92 - R$ 5,75)"));
    }

    #[test]
    fn test_render_report_sections() {
        let estimator = Estimator::new();
        let report = estimator
            .estimate(&TripRequest::new("Curitiba, PR", "Londrina, PR", "bicycle"))
            .unwrap();
        let text = render_report(&report, estimator.config());
        assert!(text.contains("Trajeto:"));
        assert!(text.contains("Comparação de Emissões"));
        assert!(text.contains("0,0000 créditos"));
        assert!(text.contains("R$ 0,00 (R$ 0,00 - R$ 0,00)"));
    }
}
