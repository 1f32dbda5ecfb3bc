//! Timestep collections: all surfaces at one instant.

use crate::error::{GridError, GridResult};
use crate::surface::{SurfaceDims, SurfaceSnapshot};

/// Aerodynamic data of every surface at one time step.
#[derive(Debug, Clone, PartialEq)]
pub struct AeroTimestep {
    /// One entry per surface, in surface index order.
    pub surfaces: Vec<SurfaceSnapshot>,
    /// Simulation time (s).
    pub t: f64,
    /// Step index.
    pub ts: usize,
    /// Free-stream air density (kg/m³).
    pub rho: f64,
}

impl AeroTimestep {
    pub fn new(surfaces: Vec<SurfaceSnapshot>) -> Self {
        Self {
            surfaces,
            t: 0.0,
            ts: 0,
            rho: lu_core::constants::RHO_SEA_LEVEL_KGPM3,
        }
    }

    pub fn n_surf(&self) -> usize {
        self.surfaces.len()
    }

    /// Shapes of every surface, in order.
    pub fn dims(&self) -> Vec<SurfaceDims> {
        self.surfaces.iter().map(SurfaceSnapshot::dims).collect()
    }

    /// Validate that there is at least one surface and each is self-consistent.
    pub fn validate(&self) -> GridResult<()> {
        if self.surfaces.is_empty() {
            return Err(GridError::NoSurfaces);
        }
        for (i, surface) in self.surfaces.iter().enumerate() {
            surface.validate(i)?;
        }
        Ok(())
    }
}

/// The part of the structural state this solver reads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StructTimestep {
    /// Frame-of-reference position: translations (0..3) and rotations (3..6).
    pub for_pos: [f64; 6],
}

impl StructTimestep {
    pub fn at(for_pos: [f64; 6]) -> Self {
        Self { for_pos }
    }
}
