use clap::Args;
use serde_json::{json, Value};

use vc_method_core::format::format_millions;
use vc_method_core::types::UnitScale;
use vc_method_core::venture::sensitivity;
use vc_method_core::venture::vc_method::{self, VcMethodInput};

use crate::input;

/// Deal assumptions shared by the valuation and sensitivity commands.
///
/// Defaults describe a typical Series A: $50M exit-year revenue at 6x, a 45%
/// target return over five years and a $10M investment.
#[derive(Args, Debug, Clone)]
pub struct DealArgs {
    /// Projected revenue in the exit year
    #[arg(long, allow_negative_numbers = true, default_value_t = 50.0)]
    pub year5_revenue: f64,

    /// Unit of --year5-revenue: ones, thousands or millions
    #[arg(long, default_value = "millions")]
    pub revenue_unit: UnitScale,

    /// Industry exit multiple applied to revenue
    #[arg(long, allow_negative_numbers = true, default_value_t = 6.0)]
    pub exit_multiple: f64,

    /// Target rate of return in percent (typically 20-70)
    #[arg(long, allow_negative_numbers = true, default_value_t = 45.0)]
    pub discount_rate: f64,

    /// Years until the exit event
    #[arg(long, allow_negative_numbers = true, default_value_t = 5)]
    pub years: i32,

    /// Amount invested in this round
    #[arg(long, allow_negative_numbers = true, default_value_t = 10.0)]
    pub investment: f64,

    /// Unit of --investment: ones, thousands or millions
    #[arg(long, default_value = "millions")]
    pub investment_unit: UnitScale,

    /// Sector label (display only)
    #[arg(long, default_value = "Technology")]
    pub sector: String,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl DealArgs {
    fn to_input(&self) -> VcMethodInput {
        VcMethodInput {
            year5_revenue: self.year5_revenue,
            revenue_unit: self.revenue_unit,
            exit_multiple: self.exit_multiple,
            discount_rate_pct: self.discount_rate,
            years_to_exit: self.years,
            investment_amount: self.investment,
            investment_unit: self.investment_unit,
            sector: self.sector.clone(),
        }
    }
}

fn resolve_input(args: &DealArgs) -> Result<VcMethodInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        input::file::read_input(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Ok(args.to_input())
    }
}

pub fn run_value(args: DealArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal = resolve_input(&args)?;
    let result = vc_method::run_vc_method(&deal);
    Ok(serde_json::to_value(result)?)
}

pub fn run_sensitivity(args: DealArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal = resolve_input(&args)?;
    let points: Vec<Value> = sensitivity::compute_sensitivity(&deal, None)
        .into_iter()
        .map(|p| {
            json!({
                "discount_rate_label": p.discount_rate_label,
                "discount_rate": p.discount_rate,
                "valuation_millions": p.valuation_millions,
                "valuation": format_millions(p.valuation_millions),
            })
        })
        .collect();
    Ok(json!({
        "sector": deal.sector,
        "exit_value": vc_method::exit_value(&deal),
        "years_to_exit": deal.years_to_exit,
        "results": points,
    }))
}
