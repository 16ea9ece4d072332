use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::format::{format_currency, format_multiple, format_percent};
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Rate, UnitScale};
use crate::VcMethodResult;

use super::sensitivity::{compute_sensitivity, SensitivityPoint};

/// Conventional VC target-return band, in percent. Only used for warnings.
const CONVENTIONAL_RATE_MIN_PCT: f64 = 20.0;
const CONVENTIONAL_RATE_MAX_PCT: f64 = 70.0;

// ─── Structs ─────────────────────────────────────────────────────────────────

/// Assumptions for a single Venture Capital Method valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VcMethodInput {
    /// Projected revenue in the exit year, expressed in `revenue_unit`.
    pub year5_revenue: f64,
    /// Unit `year5_revenue` is expressed in.
    #[serde(default)]
    pub revenue_unit: UnitScale,
    /// Industry revenue multiple applied at exit.
    pub exit_multiple: Multiple,
    /// Target annual rate of return, in percent (45.0 = 45%).
    pub discount_rate_pct: f64,
    /// Holding period in whole years.
    pub years_to_exit: i32,
    /// Amount invested in this round, expressed in `investment_unit`.
    pub investment_amount: f64,
    /// Unit `investment_amount` is expressed in.
    #[serde(default)]
    pub investment_unit: UnitScale,
    /// Sector label. Carried for display only.
    #[serde(default)]
    pub sector: String,
}

impl VcMethodInput {
    /// Parse assumptions from a JSON document.
    pub fn from_json(json: &str) -> VcMethodResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Exit-year revenue in the reference currency.
    pub fn revenue(&self) -> Money {
        self.revenue_unit.apply(self.year5_revenue)
    }

    /// Investment in the reference currency.
    pub fn investment(&self) -> Money {
        self.investment_unit.apply(self.investment_amount)
    }

    /// Discount rate as a fraction.
    pub fn discount_rate(&self) -> Rate {
        self.discount_rate_pct / 100.0
    }
}

/// Metrics derived from a [`VcMethodInput`]. All amounts are in the reference
/// currency. Non-finite values are legitimate outcomes of degenerate inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationResults {
    pub exit_value: Money,
    pub discount_power_factor: f64,
    /// Post-money valuation today.
    pub valuation_today: Money,
    pub pre_money_valuation: Money,
    pub vc_ownership_fraction: f64,
    pub expected_roi_multiple: Multiple,
    pub expected_profit: Money,
}

/// Presentation strings for [`ValuationResults`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationDisplay {
    pub exit_value: String,
    pub valuation_today: String,
    pub pre_money_valuation: String,
    pub investment: String,
    pub vc_ownership: String,
    pub expected_roi_multiple: String,
    pub expected_profit: String,
}

/// Full output of a VC Method run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcMethodOutput {
    pub sector: String,
    pub results: ValuationResults,
    pub sensitivity: Vec<SensitivityPoint>,
    pub display: ValuationDisplay,
}

// ─── Shared arithmetic ───────────────────────────────────────────────────────

/// Exit value = exit-year revenue × exit multiple.
pub fn exit_value(input: &VcMethodInput) -> Money {
    input.revenue() * input.exit_multiple
}

/// Compounding factor (1 + rate)^years for a fractional rate.
pub fn discount_power_factor(rate: Rate, years: i32) -> f64 {
    (1.0 + rate).powf(f64::from(years))
}

// ─── Function 1: compute_results ─────────────────────────────────────────────

/// Value a venture investment with the Venture Capital Method.
///
/// The exit value is discounted back at the target rate of return to give the
/// post-money valuation today; the investor's ownership is the investment over
/// that valuation. No input is rejected: zero or negative values flow through
/// IEEE-754 arithmetic, so division by zero yields infinity or NaN.
///
/// With a zero investment the ownership is zero and the ROI multiple is NaN.
pub fn compute_results(input: &VcMethodInput) -> ValuationResults {
    let investment = input.investment();

    let exit_value = exit_value(input);
    let discount_power_factor = discount_power_factor(input.discount_rate(), input.years_to_exit);
    let valuation_today = exit_value / discount_power_factor;

    let pre_money_valuation = valuation_today - investment;
    let vc_ownership_fraction = investment / valuation_today;

    let exit_payout = exit_value * vc_ownership_fraction;
    let expected_roi_multiple = exit_payout / investment;
    let expected_profit = exit_payout - investment;

    tracing::debug!(
        exit_value,
        discount_power_factor,
        valuation_today,
        vc_ownership_fraction,
        "computed VC method results"
    );

    ValuationResults {
        exit_value,
        discount_power_factor,
        valuation_today,
        pre_money_valuation,
        vc_ownership_fraction,
        expected_roi_multiple,
        expected_profit,
    }
}

// ─── Function 2: run_vc_method ───────────────────────────────────────────────

/// Run the valuation and the default discount-rate sweep, wrapped in the
/// standard computation envelope with display strings and warnings.
pub fn run_vc_method(input: &VcMethodInput) -> ComputationOutput<VcMethodOutput> {
    let start = Instant::now();

    let results = compute_results(input);
    let sensitivity = compute_sensitivity(input, None);
    let warnings = collect_warnings(input, &results);

    for w in &warnings {
        tracing::debug!(warning = %w, "degenerate VC method result");
    }

    let display = ValuationDisplay {
        exit_value: format_currency(results.exit_value),
        valuation_today: format_currency(results.valuation_today),
        pre_money_valuation: format_currency(results.pre_money_valuation),
        investment: format_currency(input.investment()),
        vc_ownership: format_percent(results.vc_ownership_fraction),
        expected_roi_multiple: format_multiple(results.expected_roi_multiple),
        expected_profit: format_currency(results.expected_profit),
    };

    let output = VcMethodOutput {
        sector: input.sector.clone(),
        results,
        sensitivity,
        display,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Venture Capital Method (exit value discounted at target rate of return)",
        &serde_json::json!({
            "year5_revenue": input.year5_revenue,
            "revenue_unit": input.revenue_unit,
            "exit_multiple": input.exit_multiple,
            "discount_rate_pct": input.discount_rate_pct,
            "years_to_exit": input.years_to_exit,
            "investment_amount": input.investment_amount,
            "investment_unit": input.investment_unit,
            "sector": input.sector,
        }),
        warnings,
        elapsed,
        output,
    )
}

fn collect_warnings(input: &VcMethodInput, results: &ValuationResults) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.year5_revenue < 0.0 {
        warnings.push("Exit-year revenue is negative".to_string());
    }
    if input.investment_amount < 0.0 {
        warnings.push("Investment amount is negative".to_string());
    }

    if input.investment() == 0.0 {
        warnings.push(
            "Investment is zero: ownership is zero and the ROI multiple is undefined".to_string(),
        );
    } else if results.valuation_today == 0.0 || !results.valuation_today.is_finite() {
        warnings.push(format!(
            "Valuation today is {}: ownership and ROI multiple are undefined",
            results.valuation_today
        ));
    }

    if results.pre_money_valuation < 0.0 {
        warnings.push(format!(
            "Investment exceeds post-money valuation by {}",
            format_currency(-results.pre_money_valuation)
        ));
    }

    if input.discount_rate_pct < CONVENTIONAL_RATE_MIN_PCT
        || input.discount_rate_pct > CONVENTIONAL_RATE_MAX_PCT
    {
        warnings.push(format!(
            "Discount rate {}% is outside the conventional VC range of {}%-{}%",
            input.discount_rate_pct, CONVENTIONAL_RATE_MIN_PCT, CONVENTIONAL_RATE_MAX_PCT
        ));
    }

    if input.years_to_exit == 0 {
        warnings.push("Years to exit is zero: no discounting applied".to_string());
    }

    warnings
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    fn reference_input() -> VcMethodInput {
        VcMethodInput {
            year5_revenue: 50.0,
            revenue_unit: UnitScale::Millions,
            exit_multiple: 6.0,
            discount_rate_pct: 45.0,
            years_to_exit: 5,
            investment_amount: 10.0,
            investment_unit: UnitScale::Millions,
            sector: "Technology".into(),
        }
    }

    #[test]
    fn test_exit_value_applies_unit_once() {
        let input = reference_input();
        assert_eq!(exit_value(&input), 300_000_000.0);

        let mut thousands = reference_input();
        thousands.year5_revenue = 50_000.0;
        thousands.revenue_unit = UnitScale::Thousands;
        assert_eq!(exit_value(&thousands), 300_000_000.0);
    }

    #[test]
    fn test_dependency_chain() {
        let r = compute_results(&reference_input());

        assert!((r.discount_power_factor - 1.45_f64.powf(5.0)).abs() < TOL);
        assert_eq!(r.valuation_today, r.exit_value / r.discount_power_factor);
        assert_eq!(r.pre_money_valuation, r.valuation_today - 10_000_000.0);
        assert_eq!(r.vc_ownership_fraction, 10_000_000.0 / r.valuation_today);
        assert!((r.expected_profit - (r.exit_value * r.vc_ownership_fraction - 10_000_000.0)).abs() < TOL);
    }

    #[test]
    fn test_roi_equals_power_factor() {
        // exit × (inv / (exit / f)) / inv collapses to f
        let r = compute_results(&reference_input());
        assert!((r.expected_roi_multiple - r.discount_power_factor).abs() < 1e-9);
    }

    #[test]
    fn test_zero_investment() {
        let mut input = reference_input();
        input.investment_amount = 0.0;
        let r = compute_results(&input);

        assert_eq!(r.vc_ownership_fraction, 0.0);
        assert!(r.expected_roi_multiple.is_nan());
        assert_eq!(r.expected_profit, 0.0);
        assert_eq!(r.pre_money_valuation, r.valuation_today);
    }

    #[test]
    fn test_zero_revenue_gives_infinite_ownership() {
        let mut input = reference_input();
        input.year5_revenue = 0.0;
        let r = compute_results(&input);

        assert_eq!(r.exit_value, 0.0);
        assert_eq!(r.valuation_today, 0.0);
        assert!(r.vc_ownership_fraction.is_infinite());
        // 0 × ∞ is NaN
        assert!(r.expected_profit.is_nan());
    }

    #[test]
    fn test_minus_hundred_percent_rate() {
        let mut input = reference_input();
        input.discount_rate_pct = -100.0;
        let r = compute_results(&input);

        assert_eq!(r.discount_power_factor, 0.0);
        assert!(r.valuation_today.is_infinite());
        assert_eq!(r.vc_ownership_fraction, 0.0);
    }

    #[test]
    fn test_warnings_for_reference_case_are_empty() {
        let out = run_vc_method(&reference_input());
        assert!(out.warnings.is_empty(), "unexpected warnings: {:?}", out.warnings);
        assert_eq!(out.metadata.precision, "f64_ieee754");
    }

    #[test]
    fn test_warnings_for_degenerate_inputs() {
        let mut input = reference_input();
        input.investment_amount = 0.0;
        input.years_to_exit = 0;
        input.discount_rate_pct = 10.0;
        let out = run_vc_method(&input);

        assert!(out.warnings.iter().any(|w| w.contains("Investment is zero")));
        assert!(out.warnings.iter().any(|w| w.contains("no discounting")));
        assert!(out.warnings.iter().any(|w| w.contains("outside the conventional")));
    }

    #[test]
    fn test_over_invested_warning_and_negative_pre_money() {
        let mut input = reference_input();
        input.investment_amount = 60.0;
        let out = run_vc_method(&input);

        assert!(out.result.results.pre_money_valuation < 0.0);
        assert!(out.result.display.pre_money_valuation.starts_with('-'));
        assert!(out.warnings.iter().any(|w| w.contains("exceeds post-money")));
    }

    #[test]
    fn test_display_strings() {
        let out = run_vc_method(&reference_input());
        let d = &out.result.display;
        assert_eq!(d.exit_value, "$300.0M");
        assert_eq!(d.valuation_today, "$46.8M");
        assert_eq!(d.investment, "$10.0M");
        assert_eq!(d.vc_ownership, "21.4%");
        assert_eq!(d.expected_roi_multiple, "6.41x");
        assert_eq!(out.result.sensitivity.len(), 6);
        assert_eq!(out.result.sector, "Technology");
    }

    #[test]
    fn test_from_json_reports_serialization_error() {
        let err = VcMethodInput::from_json("{\"year5_revenue\": \"lots\"}").unwrap_err();
        assert!(matches!(err, crate::VcMethodError::SerializationError(_)));
    }

    #[test]
    fn test_input_deserialises_with_default_units() {
        let input: VcMethodInput = serde_json::from_value(serde_json::json!({
            "year5_revenue": 50.0,
            "exit_multiple": 6.0,
            "discount_rate_pct": 45.0,
            "years_to_exit": 5,
            "investment_amount": 10.0
        }))
        .unwrap();
        assert_eq!(input.revenue_unit, UnitScale::Millions);
        assert_eq!(input.investment_unit, UnitScale::Millions);
        assert_eq!(input.sector, "");
    }

    #[test]
    fn test_input_accepts_unit_aliases() {
        let input = VcMethodInput::from_json(
            r#"{
                "year5_revenue": 50000,
                "revenue_unit": "k",
                "exit_multiple": 6.0,
                "discount_rate_pct": 45.0,
                "years_to_exit": 5,
                "investment_amount": 10,
                "investment_unit": "Millions"
            }"#,
        )
        .unwrap();
        assert_eq!(input.revenue_unit, UnitScale::Thousands);
        assert_eq!(input.investment_unit, UnitScale::Millions);
        assert_eq!(input.revenue(), 50_000_000.0);

        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["revenue_unit"], "thousands");
    }

    #[test]
    fn test_input_rejects_unknown_unit() {
        let err = VcMethodInput::from_json(
            r#"{
                "year5_revenue": 50,
                "revenue_unit": "billions",
                "exit_multiple": 6.0,
                "discount_rate_pct": 45.0,
                "years_to_exit": 5,
                "investment_amount": 10
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, crate::VcMethodError::SerializationError(_)));
    }

    #[test]
    fn test_negative_exit_with_zero_investment_shows_unsigned_ownership() {
        let mut input = reference_input();
        input.year5_revenue = -50.0;
        input.investment_amount = 0.0;
        let out = run_vc_method(&input);
        assert_eq!(out.result.display.vc_ownership, "0.0%");
    }
}
