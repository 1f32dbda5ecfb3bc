//! Typed step configuration compiled from solver settings.

use lu_core::units::{Density, Length, Time, Velocity, kgpm3, m, mps, s};
use lu_core::{IntegrationOrder, ensure_positive};
use lu_project::{ScalingDef, SolverSettings, validate_settings};
use lu_velocity::{VelocityGenerator, generator_from_name};
use serde_json::Value;

use crate::error::SimResult;

/// Reference quantities for non-dimensionalizing the assembled system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    pub length: Length,
    pub speed: Velocity,
    pub density: Density,
}

impl Scaling {
    pub fn new(length: Length, speed: Velocity, density: Density) -> SimResult<Self> {
        ensure_positive(length.value, "scaling length")?;
        ensure_positive(speed.value, "scaling speed")?;
        ensure_positive(density.value, "scaling density")?;
        Ok(Self {
            length,
            speed,
            density,
        })
    }

    /// Scaling of one, i.e. dimensional matrices.
    pub fn unit() -> Self {
        Self {
            length: m(1.0),
            speed: mps(1.0),
            density: kgpm3(1.0),
        }
    }

    /// Reference time `length / speed`.
    pub fn time(&self) -> Time {
        self.length / self.speed
    }
}

impl TryFrom<&ScalingDef> for Scaling {
    type Error = crate::error::SimError;

    fn try_from(def: &ScalingDef) -> SimResult<Self> {
        Scaling::new(m(def.length), mps(def.speed), kgpm3(def.density))
    }
}

/// Everything the step solver needs from its settings.
#[derive(Debug, Clone, PartialEq)]
pub struct StepConfig {
    pub dt: Time,
    pub order: IntegrationOrder,
    pub density: Density,
    pub scaling: Scaling,
    pub remove_predictor: bool,
    pub use_sparse: bool,
    pub physical_model: bool,
    pub generator: String,
    pub generator_input: Value,
}

impl StepConfig {
    pub fn from_settings(settings: &SolverSettings) -> SimResult<Self> {
        validate_settings(settings)?;
        Ok(Self {
            dt: s(settings.dt_s),
            order: settings.integr_order,
            density: kgpm3(settings.density_kgpm3),
            scaling: Scaling::try_from(&settings.scaling)?,
            remove_predictor: settings.remove_predictor,
            use_sparse: settings.use_sparse,
            physical_model: settings.physical_model,
            generator: settings.velocity_field_generator.clone(),
            generator_input: settings.velocity_field_input.clone(),
        })
    }

    /// Time step in seconds.
    pub fn dt_s(&self) -> f64 {
        self.dt.value
    }

    /// Resolve the configured velocity generator.
    pub fn build_generator(&self) -> SimResult<Box<dyn VelocityGenerator>> {
        Ok(generator_from_name(&self.generator, &self.generator_input)?)
    }
}

impl Default for StepConfig {
    fn default() -> Self {
        let settings = SolverSettings::default();
        Self {
            dt: s(settings.dt_s),
            order: settings.integr_order,
            density: kgpm3(settings.density_kgpm3),
            scaling: Scaling::unit(),
            remove_predictor: settings.remove_predictor,
            use_sparse: settings.use_sparse,
            physical_model: settings.physical_model,
            generator: settings.velocity_field_generator,
            generator_input: settings.velocity_field_input,
        }
    }
}
