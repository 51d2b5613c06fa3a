use ::serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictRequest {
    #[serde(deserialize_with = "lax_int")]
    pub year: i64,
    #[serde(deserialize_with = "lax_float")]
    pub area: f64,
    #[serde(deserialize_with = "lax_float")]
    pub production: f64,
    #[serde(deserialize_with = "lax_float")]
    pub yield_per_ha: f64,
    #[serde(deserialize_with = "lax_float")]
    pub fertilizer: f64,
    #[serde(deserialize_with = "lax_float")]
    pub irrigation: f64,
    pub crop: String,
    pub season: String,
}

impl PredictRequest {
    /// Decodes a request body. A missing content type is read as JSON; any
    /// other non-JSON media type is treated as a non-object body.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, ApiError> {
        if !content_type.map_or(true, is_json_media_type) {
            return Err(ApiError::NotJson);
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ApiError::MissingBody);
        }

        let mut deserializer = serde_json::Deserializer::from_slice(body);
        let request = serde_path_to_error::deserialize(&mut deserializer)?;
        deserializer.end().map_err(ApiError::InvalidJson)?;
        Ok(request)
    }
}

/// `application/json`, `application/*+json`, parameters ignored.
fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.split_once('/') {
        Some((_, subtype)) => subtype == "json" || subtype.ends_with("+json"),
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictResponse {
    pub prediction: String,
    #[serde(default)]
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Greeting {
    pub message: String,
}

/// Accepts JSON numbers, booleans and numeric strings, e.g. `10`, `true`, `"10.5"`.
fn lax_float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LaxFloat)
}

/// Accepts JSON integers, booleans, integral floats (`2024.0`) and integer strings.
fn lax_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LaxInt)
}

struct LaxFloat;

impl<'de> de::Visitor<'de> for LaxFloat {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<f64, E> {
        Ok(if v { 1.0 } else { 0.0 })
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        v.trim()
            .parse::<f64>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

struct LaxInt;

impl<'de> de::Visitor<'de> for LaxInt {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or an integer string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<i64, E> {
        Ok(i64::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(v as i64)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        v.trim()
            .parse::<i64>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}
