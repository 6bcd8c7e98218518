use std::time::Duration;

use reachy_core::Params;
use serde_json::Value;

use crate::unit::UnitError;

/// Typed access to a resolved parameter map.
#[derive(Debug, Clone, Copy)]
pub struct ParamReader<'a> {
    params: &'a Params,
}

impl<'a> ParamReader<'a> {
    pub fn new(params: &'a Params) -> Self {
        Self { params }
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        self.params.get(name).filter(|v| !v.is_null())
    }

    /// A number, or `default` when absent. Numeric strings are accepted.
    pub fn number_or(&self, name: &str, default: f64) -> Result<f64, UnitError> {
        let Some(value) = self.present(name) else {
            return Ok(default);
        };
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(n) if n.is_finite() => Ok(n),
            _ => Err(invalid(name, format!("expected a number, got {value}"))),
        }
    }

    /// A non-negative duration in seconds that fits a [`Duration`], or `default` when absent.
    pub fn duration_or(&self, name: &str, default: f64) -> Result<f64, UnitError> {
        let secs = self.number_or(name, default)?;
        if secs < 0.0 {
            return Err(invalid(name, "must not be negative"));
        }
        Duration::try_from_secs_f64(secs)
            .map(|_| secs)
            .map_err(|e| invalid(name, e.to_string()))
    }

    pub fn required_str(&self, name: &str) -> Result<&'a str, UnitError> {
        match self.present(name) {
            None => Err(UnitError::MissingParameter(name.to_string())),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(invalid(name, format!("expected a string, got {other}"))),
        }
    }

    /// A required string that must be one of `allowed` (case-insensitive).
    pub fn choice<'c>(&self, name: &str, allowed: &[&'c str]) -> Result<&'c str, UnitError> {
        let raw = self.required_str(name)?;
        allowed
            .iter()
            .copied()
            .find(|a| a.eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| {
                invalid(
                    name,
                    format!("'{raw}' is not one of: {}", allowed.join(", ")),
                )
            })
    }
}

fn invalid(name: &str, reason: impl Into<String>) -> UnitError {
    UnitError::InvalidParameter {
        name: name.to_string(),
        reason: reason.into(),
    }
}
