//! Solver settings schema.

use lu_core::IntegrationOrder;
use lu_core::constants::RHO_SEA_LEVEL_KGPM3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings of the linear step solver, as read from a settings file.
///
/// Every field has a default, so an empty document is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolverSettings {
    /// Time step [s].
    #[serde(default = "default_dt_s")]
    pub dt_s: f64,
    /// Finite-difference order of the circulation rate: 1 or 2.
    #[serde(default)]
    pub integr_order: IntegrationOrder,
    /// Air density [kg/m^3].
    #[serde(default = "default_density_kgpm3")]
    pub density_kgpm3: f64,
    #[serde(default)]
    pub scaling: ScalingDef,
    #[serde(default = "default_true")]
    pub remove_predictor: bool,
    #[serde(default = "default_true")]
    pub use_sparse: bool,
    #[serde(default = "default_true")]
    pub physical_model: bool,
    #[serde(default = "default_generator")]
    pub velocity_field_generator: String,
    /// Generator settings, passed through untouched.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub velocity_field_input: Value,
}

/// Reference quantities used to non-dimensionalize the assembled system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScalingDef {
    #[serde(default = "default_scale")]
    pub length: f64,
    #[serde(default = "default_scale")]
    pub speed: f64,
    #[serde(default = "default_scale")]
    pub density: f64,
}

fn default_dt_s() -> f64 {
    0.1
}

fn default_density_kgpm3() -> f64 {
    RHO_SEA_LEVEL_KGPM3
}

fn default_true() -> bool {
    true
}

fn default_generator() -> String {
    "uniform".to_string()
}

fn default_scale() -> f64 {
    1.0
}

impl Default for ScalingDef {
    fn default() -> Self {
        Self {
            length: default_scale(),
            speed: default_scale(),
            density: default_scale(),
        }
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            dt_s: default_dt_s(),
            integr_order: IntegrationOrder::default(),
            density_kgpm3: default_density_kgpm3(),
            scaling: ScalingDef::default(),
            remove_predictor: true,
            use_sparse: true,
            physical_model: true,
            velocity_field_generator: default_generator(),
            velocity_field_input: Value::Null,
        }
    }
}
