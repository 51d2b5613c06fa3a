use crate::schema::{PredictRequest, PredictResponse};

pub const DEFAULT_PROBABILITY: f64 = 0.85;

/// Turns a crop payload into the market outlook sentence.
///
/// Only `crop` and `area` reach the output; the probability is fixed at
/// construction. There is no model behind this yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketOutlook {
    probability: Option<f64>,
}

impl Default for MarketOutlook {
    fn default() -> Self {
        Self {
            probability: Some(DEFAULT_PROBABILITY),
        }
    }
}

impl MarketOutlook {
    pub fn new(probability: Option<f64>) -> Self {
        Self { probability }
    }

    pub fn assess(&self, request: &PredictRequest) -> PredictResponse {
        PredictResponse {
            prediction: format!(
                "Based on your {} crop with {} acres, the predicted market outlook is positive!",
                request.crop,
                format_area(request.area)
            ),
            probability: self.probability,
        }
    }
}

/// Shortest round-trip decimal with a mandatory fractional part, switching to
/// `1e+16` / `1e-05` style exponents outside `[1e-4, 1e16)`.
pub fn format_area(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Debug already picks the same decimal/exponent cut-over, only the
    // exponent spelling differs.
    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}
