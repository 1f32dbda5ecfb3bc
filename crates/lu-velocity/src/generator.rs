//! Generator contract and name-based selection.

use lu_grid::VertexField;
use serde_json::Value;
use tracing::debug;

use crate::error::{VelocityError, VelocityResult};
use crate::gust::GustGenerator;
use crate::uniform::UniformGenerator;

/// Names accepted by [`generator_from_name`].
pub const GENERATOR_NAMES: [&str; 2] = [UniformGenerator::NAME, GustGenerator::NAME];

/// Everything a generator may read for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorInput<'a> {
    /// Vertex positions, one field per surface.
    pub zeta: &'a [VertexField],
    /// Replace the output field instead of adding to it.
    pub override_field: bool,
    /// Simulation time [s].
    pub t: f64,
    pub ts: usize,
    /// Time step [s].
    pub dt: f64,
    /// Frame-of-reference position: three translations, three rotations.
    pub for_pos: [f64; 6],
}

pub trait VelocityGenerator: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Velocity at a single vertex position.
    fn velocity_at(&self, input: &GeneratorInput<'_>, point: [f64; 3]) -> [f64; 3];

    /// Fill `u_ext` for every surface.
    ///
    /// With `override_field` the previous content is replaced, otherwise the
    /// generated velocity is added to it.
    fn generate(
        &self,
        input: &GeneratorInput<'_>,
        u_ext: &mut [VertexField],
    ) -> VelocityResult<()> {
        if u_ext.len() != input.zeta.len() {
            return Err(VelocityError::InvalidArg {
                what: "u_ext and zeta surface counts differ",
            });
        }
        if u_ext
            .iter()
            .zip(input.zeta)
            .any(|(u, z)| u.shape() != z.shape())
        {
            return Err(VelocityError::InvalidArg {
                what: "u_ext and zeta grid shapes differ",
            });
        }

        for (field, zeta) in u_ext.iter_mut().zip(input.zeta) {
            let (rows, cols) = zeta.shape();
            for i in 0..rows {
                for j in 0..cols {
                    let v = self.velocity_at(input, zeta.vertex(i, j));
                    if input.override_field {
                        field.set_vertex(i, j, v);
                    } else {
                        field.add_to_vertex(i, j, v);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Build a generator from its registered name and a JSON settings object.
///
/// `Value::Null` is treated as an empty object, so every field falls back to
/// its default.
pub fn generator_from_name(
    name: &str,
    settings: &Value,
) -> VelocityResult<Box<dyn VelocityGenerator>> {
    let settings = match settings {
        Value::Null => Value::Object(Default::default()),
        other => other.clone(),
    };

    let generator: Box<dyn VelocityGenerator> = match name {
        UniformGenerator::NAME => Box::new(UniformGenerator::from_value(settings)?),
        GustGenerator::NAME => Box::new(GustGenerator::from_value(settings)?),
        _ => {
            return Err(VelocityError::UnknownGenerator {
                name: name.to_string(),
            });
        }
    };
    debug!(generator = generator.name(), "velocity generator selected");
    Ok(generator)
}
