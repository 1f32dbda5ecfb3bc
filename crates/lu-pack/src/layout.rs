//! Per-surface layout of the packed vectors.
//!
//! Captures the grid shapes of every surface once, at linearization time, and
//! provides the block sizes and per-surface offsets used by packing and
//! unpacking. Offsets are contiguous and in surface index order.

use lu_core::IntegrationOrder;
use lu_grid::{AeroTimestep, GridError, SurfaceDims};

use crate::error::{PackError, PackResult};

/// Start of one surface inside each block of the packed vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceOffsets {
    /// Offset inside a 3-component vertex block (zeta, zeta_dot, u_ext, forces).
    pub vertex: usize,
    /// Offset inside a bound circulation block.
    pub bound: usize,
    /// Offset inside the wake circulation block.
    pub wake: usize,
}

/// Shapes and offsets of every surface, plus the state formulation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorLayout {
    surfaces: Vec<SurfaceDims>,
    offsets: Vec<SurfaceOffsets>,
    order: IntegrationOrder,
    vertex_values: usize,
    bound_panels: usize,
    wake_panels: usize,
}

impl VectorLayout {
    /// Build a layout from explicit surface shapes.
    pub fn new(surfaces: Vec<SurfaceDims>, order: IntegrationOrder) -> PackResult<Self> {
        if surfaces.is_empty() {
            return Err(GridError::NoSurfaces.into());
        }

        let mut offsets = Vec::with_capacity(surfaces.len());
        let mut cursor = SurfaceOffsets::default();
        for dims in &surfaces {
            offsets.push(cursor);
            cursor.vertex += dims.vertex_values();
            cursor.bound += dims.bound_panels();
            cursor.wake += dims.wake_panels();
        }

        Ok(Self {
            surfaces,
            offsets,
            order,
            vertex_values: cursor.vertex,
            bound_panels: cursor.bound,
            wake_panels: cursor.wake,
        })
    }

    /// Capture the layout of a validated timestep.
    pub fn from_timestep(tstep: &AeroTimestep, order: IntegrationOrder) -> PackResult<Self> {
        tstep.validate()?;
        Self::new(tstep.dims(), order)
    }

    pub fn n_surf(&self) -> usize {
        self.surfaces.len()
    }

    pub fn surfaces(&self) -> &[SurfaceDims] {
        &self.surfaces
    }

    pub fn offsets(&self) -> &[SurfaceOffsets] {
        &self.offsets
    }

    pub fn order(&self) -> IntegrationOrder {
        self.order
    }

    /// Scalar count of one vertex block summed over surfaces.
    pub fn vertex_values(&self) -> usize {
        self.vertex_values
    }

    /// Bound panels summed over surfaces (`K`).
    pub fn bound_panels(&self) -> usize {
        self.bound_panels
    }

    /// Wake panels summed over surfaces (`K_star`).
    pub fn wake_panels(&self) -> usize {
        self.wake_panels
    }

    /// Length of `u = [zeta, zeta_dot, u_ext]`.
    pub fn input_len(&self) -> usize {
        3 * self.vertex_values
    }

    /// Length of `x`; `2K + K_star`, plus `K` for second order.
    pub fn state_len(&self) -> usize {
        let base = 2 * self.bound_panels + self.wake_panels;
        if self.order.carries_previous_gamma() {
            base + self.bound_panels
        } else {
            base
        }
    }

    /// Length of `y` (force rows only).
    pub fn output_len(&self) -> usize {
        self.vertex_values
    }

    /// Check a timestep against the captured surface count and shapes.
    pub fn check_timestep(&self, tstep: &AeroTimestep) -> PackResult<()> {
        if tstep.n_surf() != self.n_surf() {
            return Err(PackError::SurfaceCount {
                expected: self.n_surf(),
                actual: tstep.n_surf(),
            });
        }
        for (i, (surface, dims)) in tstep.surfaces.iter().zip(&self.surfaces).enumerate() {
            surface.validate_against(i, dims)?;
        }
        Ok(())
    }
}
