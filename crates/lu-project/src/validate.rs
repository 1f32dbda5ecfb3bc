//! Settings validation.

use crate::schema::SolverSettings;
use serde_json::Value;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing value: {field}")]
    MissingValue { field: String },
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: "must be positive and finite".to_string(),
    })
}

pub fn validate_settings(settings: &SolverSettings) -> Result<(), ValidationError> {
    positive("dt_s", settings.dt_s)?;
    positive("density_kgpm3", settings.density_kgpm3)?;
    positive("scaling.length", settings.scaling.length)?;
    positive("scaling.speed", settings.scaling.speed)?;
    positive("scaling.density", settings.scaling.density)?;

    if settings.velocity_field_generator.trim().is_empty() {
        return Err(ValidationError::MissingValue {
            field: "velocity_field_generator".to_string(),
        });
    }

    match &settings.velocity_field_input {
        Value::Null | Value::Object(_) => Ok(()),
        other => Err(ValidationError::InvalidValue {
            field: "velocity_field_input".to_string(),
            value: other.to_string(),
            reason: "must be a mapping".to_string(),
        }),
    }
}
