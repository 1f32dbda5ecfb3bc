//! Multi-component grid fields and row-major flattening.
//!
//! A field stores one `DMatrix<f64>` per component, all with the same
//! (rows, cols) shape. Flattening runs row-major over (component, row, col)
//! with the component axis varying slowest, so a 3-component field over a
//! 2x2 grid flattens as `x00 x01 x10 x11 y00 ... z11`.

use nalgebra::DMatrix;

use crate::error::{GridError, GridResult};

/// Append `grid` to `out` in row-major order.
///
/// `nalgebra` stores column-major, so this walks rows explicitly.
pub fn extend_row_major(grid: &DMatrix<f64>, out: &mut Vec<f64>) {
    out.reserve(grid.len());
    for row in grid.row_iter() {
        out.extend(row.iter().copied());
    }
}

/// Rebuild a (rows, cols) grid from a row-major buffer of exactly rows*cols values.
pub fn grid_from_row_major(
    rows: usize,
    cols: usize,
    data: &[f64],
    what: &'static str,
) -> GridResult<DMatrix<f64>> {
    if data.len() != rows * cols {
        return Err(GridError::BufferLength {
            what,
            expected: rows * cols,
            actual: data.len(),
        });
    }
    Ok(DMatrix::from_row_slice(rows, cols, data))
}

/// A `C`-component field defined on a rectangular grid of vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<const C: usize> {
    components: [DMatrix<f64>; C],
}

/// Positions, velocities and incident flow at panel vertices (x, y, z).
pub type VertexField = Field<3>;

/// Forces (rows 0..3) and moments (rows 3..6) at panel vertices.
pub type ForceField = Field<6>;

impl<const C: usize> Field<C> {
    /// All-zero field on a (rows, cols) grid.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            components: std::array::from_fn(|_| DMatrix::zeros(rows, cols)),
        }
    }

    /// Build from per-component grids, which must share one shape.
    pub fn from_components(components: [DMatrix<f64>; C]) -> GridResult<Self> {
        if let Some(first) = components.first() {
            let first = first.shape();
            for other in components.iter().skip(1) {
                if other.shape() != first {
                    return Err(GridError::RaggedField {
                        first,
                        other: other.shape(),
                    });
                }
            }
        }
        Ok(Self { components })
    }

    /// Rebuild from a row-major buffer of `C * rows * cols` values.
    pub fn from_row_major(
        rows: usize,
        cols: usize,
        data: &[f64],
        what: &'static str,
    ) -> GridResult<Self> {
        let per_component = rows * cols;
        if data.len() != C * per_component {
            return Err(GridError::BufferLength {
                what,
                expected: C * per_component,
                actual: data.len(),
            });
        }
        Ok(Self {
            components: std::array::from_fn(|c| {
                let start = c * per_component;
                DMatrix::from_row_slice(rows, cols, &data[start..start + per_component])
            }),
        })
    }

    /// Grid shape (rows, cols) shared by every component.
    pub fn shape(&self) -> (usize, usize) {
        self.components
            .first()
            .map(|c| c.shape())
            .unwrap_or((0, 0))
    }

    /// Total number of scalar values across components.
    pub fn len(&self) -> usize {
        let (rows, cols) = self.shape();
        C * rows * cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn component(&self, c: usize) -> &DMatrix<f64> {
        &self.components[c]
    }

    pub fn component_mut(&mut self, c: usize) -> &mut DMatrix<f64> {
        &mut self.components[c]
    }

    pub fn components(&self) -> &[DMatrix<f64>; C] {
        &self.components
    }

    /// Value of every component at vertex (i, j).
    pub fn vertex(&self, i: usize, j: usize) -> [f64; C] {
        std::array::from_fn(|c| self.components[c][(i, j)])
    }

    pub fn set_vertex(&mut self, i: usize, j: usize, value: [f64; C]) {
        for (grid, v) in self.components.iter_mut().zip(value) {
            grid[(i, j)] = v;
        }
    }

    pub fn add_to_vertex(&mut self, i: usize, j: usize, value: [f64; C]) {
        for (grid, v) in self.components.iter_mut().zip(value) {
            grid[(i, j)] += v;
        }
    }

    /// Set every vertex to `value`.
    pub fn fill(&mut self, value: [f64; C]) {
        for (grid, v) in self.components.iter_mut().zip(value) {
            grid.fill(v);
        }
    }

    /// Append all components to `out`, component axis slowest.
    pub fn extend_row_major(&self, out: &mut Vec<f64>) {
        for grid in &self.components {
            extend_row_major(grid, out);
        }
    }
}

impl Field<6> {
    /// Force field whose first three rows are `forces` and whose moment rows are zero.
    pub fn from_force_rows(forces: Field<3>) -> Self {
        let (rows, cols) = forces.shape();
        let [fx, fy, fz] = forces.components;
        Self {
            components: [
                fx,
                fy,
                fz,
                DMatrix::zeros(rows, cols),
                DMatrix::zeros(rows, cols),
                DMatrix::zeros(rows, cols),
            ],
        }
    }

    /// Append only the force rows (components 0..3), row-major.
    pub fn extend_force_rows(&self, out: &mut Vec<f64>) {
        for grid in &self.components[..3] {
            extend_row_major(grid, out);
        }
    }
}
