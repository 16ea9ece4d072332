use serde::{Deserialize, Serialize};

use crate::format::format_rate_label;
use crate::types::Rate;
use crate::VcMethodResult;

use super::vc_method::{discount_power_factor, exit_value, VcMethodInput};

/// Discount rates swept by default, as fractions (20% to 70% in steps of 10 points).
pub const DEFAULT_RATE_GRID: [Rate; 6] = [0.20, 0.30, 0.40, 0.50, 0.60, 0.70];

const MILLION: f64 = 1_000_000.0;

/// Valuation today at one alternative discount rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Rate as a percent label, e.g. `"40%"`.
    pub discount_rate_label: String,
    /// Rate as a fraction.
    pub discount_rate: Rate,
    /// Post-money valuation today at this rate, in millions. Unrounded.
    pub valuation_millions: f64,
}

/// Re-discount the current exit value across a grid of discount rates.
///
/// Only the rate varies: revenue, multiple and holding period come from
/// `input`, and `input.discount_rate_pct` is ignored. Points are returned in
/// grid order. `None` selects [`DEFAULT_RATE_GRID`].
pub fn compute_sensitivity(
    input: &VcMethodInput,
    rate_grid: Option<&[Rate]>,
) -> Vec<SensitivityPoint> {
    let grid: &[Rate] = rate_grid.unwrap_or(&DEFAULT_RATE_GRID[..]);
    let exit = exit_value(input);

    let points: Vec<SensitivityPoint> = grid
        .iter()
        .map(|&rate| SensitivityPoint {
            discount_rate_label: format_rate_label(rate),
            discount_rate: rate,
            valuation_millions: exit / discount_power_factor(rate, input.years_to_exit) / MILLION,
        })
        .collect();

    tracing::debug!(points = points.len(), exit_value = exit, "computed discount-rate sweep");
    points
}

/// Parse a JSON array of fractional rates (`[0.25, 0.35]`) into a sweep grid.
pub fn rate_grid_from_json(json: &str) -> VcMethodResult<Vec<Rate>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UnitScale;
    use crate::venture::vc_method::compute_results;
    use pretty_assertions::assert_eq;

    fn input_at(rate_pct: f64) -> VcMethodInput {
        VcMethodInput {
            year5_revenue: 50.0,
            revenue_unit: UnitScale::Millions,
            exit_multiple: 6.0,
            discount_rate_pct: rate_pct,
            years_to_exit: 5,
            investment_amount: 10.0,
            investment_unit: UnitScale::Millions,
            sector: "Technology".into(),
        }
    }

    #[test]
    fn test_default_grid_labels_in_order() {
        let points = compute_sensitivity(&input_at(45.0), None);
        let labels: Vec<&str> = points.iter().map(|p| p.discount_rate_label.as_str()).collect();
        assert_eq!(labels, vec!["20%", "30%", "40%", "50%", "60%", "70%"]);
    }

    #[test]
    fn test_valuations_decrease_with_rate() {
        let points = compute_sensitivity(&input_at(45.0), None);
        for pair in points.windows(2) {
            assert!(pair[0].valuation_millions > pair[1].valuation_millions);
        }
        assert!((points[0].valuation_millions - 120.563_271_604_938_3).abs() < 1e-9);
    }

    #[test]
    fn test_independent_of_current_rate() {
        let a = compute_sensitivity(&input_at(25.0), None);
        let b = compute_sensitivity(&input_at(65.0), None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_grid_point_matches_engine() {
        let input = input_at(40.0);
        let engine = compute_results(&input);
        let points = compute_sensitivity(&input, None);
        let at_40 = points.iter().find(|p| p.discount_rate_label == "40%").unwrap();
        assert!((at_40.valuation_millions - engine.valuation_today / 1_000_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_grid_and_empty_grid() {
        let grid = [0.25, 0.10];
        let points = compute_sensitivity(&input_at(45.0), Some(&grid[..]));
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].discount_rate, 0.25);
        assert_eq!(points[1].discount_rate_label, "10%");

        let empty: [Rate; 0] = [];
        assert!(compute_sensitivity(&input_at(45.0), Some(&empty[..])).is_empty());
    }

    #[test]
    fn test_zero_exit_value_is_flat_zero() {
        let mut input = input_at(45.0);
        input.exit_multiple = 0.0;
        let points = compute_sensitivity(&input, None);
        assert!(points.iter().all(|p| p.valuation_millions == 0.0));
    }

    #[test]
    fn test_rate_grid_from_json_drives_custom_sweep() {
        let grid = rate_grid_from_json("[0.25, 0.45]").unwrap();
        let points = compute_sensitivity(&input_at(45.0), Some(&grid));
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].discount_rate_label, "25%");
        let r = compute_results(&input_at(45.0));
        assert!((points[1].valuation_millions - r.valuation_today / 1e6).abs() < 1e-9);
    }

    #[test]
    fn test_rate_grid_from_json_rejects_non_array() {
        let err = rate_grid_from_json("{\"rate\": 0.3}").unwrap_err();
        assert!(matches!(err, crate::VcMethodError::SerializationError(_)));
    }
}
