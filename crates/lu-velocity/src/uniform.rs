//! Constant free stream.

use lu_core::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{VelocityError, VelocityResult};
use crate::generator::{GeneratorInput, VelocityGenerator};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UniformSettings {
    /// Free-stream speed [m/s].
    #[serde(default)]
    pub u_inf: f64,
    /// Free-stream direction, normalized on construction.
    #[serde(default = "default_direction")]
    pub u_inf_direction: [f64; 3],
}

pub(crate) fn default_direction() -> [f64; 3] {
    [1.0, 0.0, 0.0]
}

impl Default for UniformSettings {
    fn default() -> Self {
        Self {
            u_inf: 0.0,
            u_inf_direction: default_direction(),
        }
    }
}

/// Normalize a direction vector, rejecting zero and non-finite ones.
pub(crate) fn unit_direction(d: [f64; 3]) -> Result<[f64; 3], lu_core::LuError> {
    for v in d {
        ensure_finite(v, "u_inf_direction")?;
    }
    let norm = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
    let norm = ensure_positive(norm, "|u_inf_direction|")?;
    Ok([d[0] / norm, d[1] / norm, d[2] / norm])
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniformGenerator {
    velocity: [f64; 3],
}

impl UniformGenerator {
    pub const NAME: &'static str = "uniform";

    pub fn new(settings: &UniformSettings) -> VelocityResult<Self> {
        let u_inf = ensure_finite(settings.u_inf, "u_inf")
            .map_err(|e| VelocityError::settings(Self::NAME, e))?;
        let dir = unit_direction(settings.u_inf_direction)
            .map_err(|e| VelocityError::settings(Self::NAME, e))?;
        Ok(Self {
            velocity: dir.map(|c| u_inf * c),
        })
    }

    pub fn from_value(settings: Value) -> VelocityResult<Self> {
        let settings: UniformSettings =
            serde_json::from_value(settings).map_err(|e| VelocityError::settings(Self::NAME, e))?;
        Self::new(&settings)
    }

    pub fn velocity(&self) -> [f64; 3] {
        self.velocity
    }
}

impl VelocityGenerator for UniformGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn velocity_at(&self, _input: &GeneratorInput<'_>, _point: [f64; 3]) -> [f64; 3] {
        self.velocity
    }
}
