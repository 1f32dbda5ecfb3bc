//! External velocity fields for the aerodynamic grid.
//!
//! A [`VelocityGenerator`] fills the incident velocity `u_ext` at every panel
//! vertex from the vertex positions, the time and the frame-of-reference
//! position. Generators are selected by name with [`generator_from_name`] and
//! configured from a free-form JSON value, so settings files can carry any
//! generator's parameters without this crate knowing the file format.
//!
//! Available generators:
//! - `uniform`: constant free stream
//! - `one_minus_cos`: free stream plus a convected 1-cos vertical gust

pub mod error;
pub mod generator;
pub mod gust;
pub mod uniform;

pub use error::{VelocityError, VelocityResult};
pub use generator::{GENERATOR_NAMES, GeneratorInput, VelocityGenerator, generator_from_name};
pub use gust::{GustGenerator, GustSettings};
pub use uniform::{UniformGenerator, UniformSettings};
