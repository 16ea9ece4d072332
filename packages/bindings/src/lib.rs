use napi::Result as NapiResult;
use napi_derive::napi;

use vc_method_core::venture::{sensitivity, vc_method};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_input(input_json: &str) -> NapiResult<vc_method::VcMethodInput> {
    vc_method::VcMethodInput::from_json(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Venture Capital Method
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_results(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = vc_method::compute_results(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_sensitivity(
    input_json: String,
    rate_grid_json: Option<String>,
) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let grid = rate_grid_json
        .as_deref()
        .map(sensitivity::rate_grid_from_json)
        .transpose()
        .map_err(to_napi_error)?;
    let output = sensitivity::compute_sensitivity(&input, grid.as_deref());
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn run_vc_method(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = vc_method::run_vc_method(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_currency(value: f64) -> String {
    vc_method_core::format::format_currency(value)
}
