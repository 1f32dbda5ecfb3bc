//! Per-surface aerodynamic snapshot.

use nalgebra::DMatrix;

use crate::error::{GridError, GridResult};
use crate::field::{ForceField, VertexField};

/// Grid shapes of one surface, fixed for the lifetime of a linearization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceDims {
    /// (rows, cols) of the vertex grid carrying zeta, zeta_dot, u_ext and forces.
    pub vertices: (usize, usize),
    /// (rows, cols) of the bound circulation grid.
    pub bound: (usize, usize),
    /// (rows, cols) of the wake circulation grid.
    pub wake: (usize, usize),
}

impl SurfaceDims {
    pub fn new(vertices: (usize, usize), bound: (usize, usize), wake: (usize, usize)) -> Self {
        Self {
            vertices,
            bound,
            wake,
        }
    }

    /// Scalar count of one 3-component vertex field (zeta, zeta_dot, u_ext, force rows).
    pub fn vertex_values(&self) -> usize {
        3 * self.vertices.0 * self.vertices.1
    }

    pub fn bound_panels(&self) -> usize {
        self.bound.0 * self.bound.1
    }

    pub fn wake_panels(&self) -> usize {
        self.wake.0 * self.wake.1
    }
}

/// Aerodynamic data of one lifting surface at one time step.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSnapshot {
    /// Panel vertex positions.
    pub zeta: VertexField,
    /// Panel vertex velocities.
    pub zeta_dot: VertexField,
    /// External (incident) velocity at the vertices.
    pub u_ext: VertexField,
    /// Bound circulation.
    pub gamma: DMatrix<f64>,
    /// Time derivative of the bound circulation.
    pub gamma_dot: DMatrix<f64>,
    /// Wake circulation.
    pub gamma_star: DMatrix<f64>,
    /// Forces at the vertices; rows 3..6 stay zero.
    pub forces: ForceField,
}

impl SurfaceSnapshot {
    /// All-zero snapshot with the given shapes.
    pub fn zeros(dims: SurfaceDims) -> Self {
        let (vr, vc) = dims.vertices;
        Self {
            zeta: VertexField::zeros(vr, vc),
            zeta_dot: VertexField::zeros(vr, vc),
            u_ext: VertexField::zeros(vr, vc),
            gamma: DMatrix::zeros(dims.bound.0, dims.bound.1),
            gamma_dot: DMatrix::zeros(dims.bound.0, dims.bound.1),
            gamma_star: DMatrix::zeros(dims.wake.0, dims.wake.1),
            forces: ForceField::zeros(vr, vc),
        }
    }

    /// Shapes as read from zeta, gamma and gamma_star.
    pub fn dims(&self) -> SurfaceDims {
        SurfaceDims {
            vertices: self.zeta.shape(),
            bound: self.gamma.shape(),
            wake: self.gamma_star.shape(),
        }
    }

    /// Check that every field agrees with the shapes the snapshot reports.
    pub fn validate(&self, surface: usize) -> GridResult<()> {
        self.validate_against(surface, &self.dims())
    }

    /// Check every field against externally fixed shapes.
    pub fn validate_against(&self, surface: usize, dims: &SurfaceDims) -> GridResult<()> {
        let vertex_fields = [
            ("zeta", self.zeta.shape()),
            ("zeta_dot", self.zeta_dot.shape()),
            ("u_ext", self.u_ext.shape()),
            ("forces", self.forces.shape()),
        ];
        for (field, actual) in vertex_fields {
            check_shape(surface, field, dims.vertices, actual)?;
        }
        check_shape(surface, "gamma", dims.bound, self.gamma.shape())?;
        check_shape(surface, "gamma_dot", dims.bound, self.gamma_dot.shape())?;
        check_shape(surface, "gamma_star", dims.wake, self.gamma_star.shape())?;
        Ok(())
    }
}

fn check_shape(
    surface: usize,
    field: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> GridResult<()> {
    if expected != actual {
        return Err(GridError::ShapeMismatch {
            surface,
            field,
            expected,
            actual,
        });
    }
    Ok(())
}
