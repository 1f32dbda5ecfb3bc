//! Convected 1-cos vertical gust on top of a free stream.

use std::f64::consts::PI;

use lu_core::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{VelocityError, VelocityResult};
use crate::generator::{GeneratorInput, VelocityGenerator};
use crate::uniform::{default_direction, unit_direction};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GustSettings {
    /// Free-stream speed [m/s]; also the gust convection speed.
    #[serde(default)]
    pub u_inf: f64,
    #[serde(default = "default_direction")]
    pub u_inf_direction: [f64; 3],
    /// Gust length L [m].
    #[serde(default = "default_gust_length")]
    pub gust_length: f64,
    /// Peak vertical velocity [m/s].
    #[serde(default)]
    pub gust_intensity: f64,
    /// Distance ahead of the origin where the gust front starts [m].
    #[serde(default)]
    pub offset: f64,
}

fn default_gust_length() -> f64 {
    1.0
}

impl Default for GustSettings {
    fn default() -> Self {
        Self {
            u_inf: 0.0,
            u_inf_direction: default_direction(),
            gust_length: default_gust_length(),
            gust_intensity: 0.0,
            offset: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GustGenerator {
    free_stream: [f64; 3],
    u_inf: f64,
    length: f64,
    intensity: f64,
    offset: f64,
}

impl GustGenerator {
    pub const NAME: &'static str = "one_minus_cos";

    pub fn new(settings: &GustSettings) -> VelocityResult<Self> {
        let invalid = |e| VelocityError::settings(Self::NAME, e);
        let u_inf = ensure_finite(settings.u_inf, "u_inf").map_err(invalid)?;
        let dir = unit_direction(settings.u_inf_direction).map_err(invalid)?;
        let length = ensure_positive(settings.gust_length, "gust_length").map_err(invalid)?;
        let intensity = ensure_finite(settings.gust_intensity, "gust_intensity").map_err(invalid)?;
        let offset = ensure_finite(settings.offset, "offset").map_err(invalid)?;

        Ok(Self {
            free_stream: dir.map(|c| u_inf * c),
            u_inf,
            length,
            intensity,
            offset,
        })
    }

    pub fn from_value(settings: Value) -> VelocityResult<Self> {
        let settings: GustSettings =
            serde_json::from_value(settings).map_err(|e| VelocityError::settings(Self::NAME, e))?;
        Self::new(&settings)
    }

    /// Vertical gust velocity at inertial x-position `x` and time `t`.
    ///
    /// Nonzero only while the point lies inside the gust, i.e. for
    /// `-L <= x - offset - u_inf t <= 0`.
    pub fn vertical_velocity(&self, x: f64, t: f64) -> f64 {
        let x_rel = x - self.offset - self.u_inf * t;
        if x_rel > 0.0 || x_rel < -self.length {
            return 0.0;
        }
        0.5 * self.intensity * (1.0 - (2.0 * PI * x_rel / self.length).cos())
    }
}

impl VelocityGenerator for GustGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn velocity_at(&self, input: &GeneratorInput<'_>, point: [f64; 3]) -> [f64; 3] {
        let x = point[0] + input.for_pos[0];
        let [u, v, w] = self.free_stream;
        [u, v, w + self.vertical_velocity(x, input.t)]
    }
}
