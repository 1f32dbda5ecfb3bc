//! Packed vectors back to per-surface grids.

use lu_core::ensure_positive;
use lu_grid::{AeroTimestep, ForceField, VertexField, grid_from_row_major};
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::error::{PackError, PackResult, check_len};
use crate::layout::VectorLayout;

/// The state vector split into its blocks, all surfaces concatenated.
#[derive(Debug, Clone, PartialEq)]
pub struct StateBlocks {
    pub gamma: DVector<f64>,
    pub gamma_star: DVector<f64>,
    /// Circulation rate, already divided by `dt`.
    pub gamma_dot: DVector<f64>,
    /// Previous-step circulation, second order only.
    pub gamma_prev: Option<DVector<f64>>,
}

/// Per-surface results of one step.
#[derive(Debug, Clone, PartialEq)]
pub struct UnpackedStep {
    pub forces: Vec<ForceField>,
    pub gamma: Vec<DMatrix<f64>>,
    pub gamma_dot: Vec<DMatrix<f64>>,
    pub gamma_star: Vec<DMatrix<f64>>,
}

/// Per-surface input grids recovered from `u`.
#[derive(Debug, Clone, PartialEq)]
pub struct InputFields {
    pub zeta: Vec<VertexField>,
    pub zeta_dot: Vec<VertexField>,
    pub u_ext: Vec<VertexField>,
}

impl VectorLayout {
    /// Split `x` into gamma, gamma_star and gamma_dot (plus gamma at n-1 for second order).
    pub fn split_state(&self, x: &DVector<f64>, dt: f64) -> PackResult<StateBlocks> {
        check_len("state vector", self.state_len(), x.len())?;
        let dt = ensure_positive(dt, "dt")?;

        let k = self.bound_panels();
        let k_star = self.wake_panels();

        let gamma = x.rows(0, k).into_owned();
        let gamma_star = x.rows(k, k_star).into_owned();
        let gamma_dot = x.rows(k + k_star, k).into_owned() / dt;
        let gamma_prev = self
            .order()
            .carries_previous_gamma()
            .then(|| x.rows(2 * k + k_star, k).into_owned());

        Ok(StateBlocks {
            gamma,
            gamma_star,
            gamma_dot,
            gamma_prev,
        })
    }
}

type SurfaceResults = (ForceField, DMatrix<f64>, DMatrix<f64>, DMatrix<f64>);

/// Rebuild per-surface forces and circulation from `y`, `x` and `u`.
///
/// `template` supplies the surfaces being written to and must match the layout
/// in surface count and shapes. Every vector must have exactly the length the
/// layout expects; nothing is truncated or padded. The moment rows of each
/// force field are zero.
pub fn unpack(
    y: &DVector<f64>,
    x: &DVector<f64>,
    u: &DVector<f64>,
    template: &AeroTimestep,
    layout: &VectorLayout,
    dt: f64,
) -> PackResult<UnpackedStep> {
    if template.n_surf() != layout.n_surf() {
        return Err(PackError::SurfaceCount {
            expected: layout.n_surf(),
            actual: template.n_surf(),
        });
    }
    layout.check_timestep(template)?;
    check_len("output vector", layout.output_len(), y.len())?;
    check_len("input vector", layout.input_len(), u.len())?;
    let blocks = layout.split_state(x, dt)?;

    let per_surface: Vec<SurfaceResults> = layout
        .surfaces()
        .par_iter()
        .zip(layout.offsets().par_iter())
        .map(|(dims, offsets)| -> PackResult<SurfaceResults> {
            let (vr, vc) = dims.vertices;
            let (br, bc) = dims.bound;
            let (wr, wc) = dims.wake;
            let v = offsets.vertex..offsets.vertex + dims.vertex_values();
            let b = offsets.bound..offsets.bound + dims.bound_panels();
            let w = offsets.wake..offsets.wake + dims.wake_panels();

            let forces = VertexField::from_row_major(vr, vc, &y.as_slice()[v], "forces")?;
            let gamma = grid_from_row_major(br, bc, &blocks.gamma.as_slice()[b.clone()], "gamma")?;
            let gamma_dot =
                grid_from_row_major(br, bc, &blocks.gamma_dot.as_slice()[b], "gamma_dot")?;
            let gamma_star =
                grid_from_row_major(wr, wc, &blocks.gamma_star.as_slice()[w], "gamma_star")?;
            Ok((ForceField::from_force_rows(forces), gamma, gamma_dot, gamma_star))
        })
        .collect::<PackResult<_>>()?;

    let mut step = UnpackedStep {
        forces: Vec::with_capacity(per_surface.len()),
        gamma: Vec::with_capacity(per_surface.len()),
        gamma_dot: Vec::with_capacity(per_surface.len()),
        gamma_star: Vec::with_capacity(per_surface.len()),
    };
    for (forces, gamma, gamma_dot, gamma_star) in per_surface {
        step.forces.push(forces);
        step.gamma.push(gamma);
        step.gamma_dot.push(gamma_dot);
        step.gamma_star.push(gamma_star);
    }
    Ok(step)
}

/// Rebuild per-surface zeta, zeta_dot and u_ext from `u`.
pub fn unpack_input(u: &DVector<f64>, layout: &VectorLayout) -> PackResult<InputFields> {
    check_len("input vector", layout.input_len(), u.len())?;
    let block = layout.vertex_values();
    let u = u.as_slice();

    let split = |start: usize, what: &'static str| -> PackResult<Vec<VertexField>> {
        layout
            .surfaces()
            .iter()
            .zip(layout.offsets())
            .map(|(dims, offsets)| {
                let (vr, vc) = dims.vertices;
                let from = start + offsets.vertex;
                VertexField::from_row_major(vr, vc, &u[from..from + dims.vertex_values()], what)
                    .map_err(PackError::from)
            })
            .collect()
    };

    Ok(InputFields {
        zeta: split(0, "zeta")?,
        zeta_dot: split(block, "zeta_dot")?,
        u_ext: split(2 * block, "u_ext")?,
    })
}

impl UnpackedStep {
    pub fn n_surf(&self) -> usize {
        self.forces.len()
    }

    /// Overwrite forces and circulation of every surface of `tstep`.
    pub fn apply_to(self, tstep: &mut AeroTimestep) -> PackResult<()> {
        if tstep.n_surf() != self.n_surf() {
            return Err(PackError::SurfaceCount {
                expected: self.n_surf(),
                actual: tstep.n_surf(),
            });
        }
        let results = self
            .forces
            .into_iter()
            .zip(self.gamma)
            .zip(self.gamma_dot)
            .zip(self.gamma_star);
        for (surface, (((forces, gamma), gamma_dot), gamma_star)) in
            tstep.surfaces.iter_mut().zip(results)
        {
            surface.forces = forces;
            surface.gamma = gamma;
            surface.gamma_dot = gamma_dot;
            surface.gamma_star = gamma_star;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::{pack_forces, pack_input, pack_state};
    use lu_core::IntegrationOrder;
    use lu_grid::{SurfaceDims, SurfaceSnapshot};

    fn tstep() -> AeroTimestep {
        let mut a = SurfaceSnapshot::zeros(SurfaceDims::new((2, 3), (2, 3), (3, 3)));
        a.gamma = DMatrix::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
        a.gamma_dot = DMatrix::from_element(2, 3, 0.5);
        a.gamma_star = DMatrix::from_fn(3, 3, |i, j| -((i * 3 + j) as f64));
        a.forces.component_mut(2).fill(7.0);

        let mut b = SurfaceSnapshot::zeros(SurfaceDims::new((2, 2), (1, 2), (1, 2)));
        b.gamma = DMatrix::from_row_slice(1, 2, &[10.0, 20.0]);
        b.forces.component_mut(0).fill(-3.0);

        AeroTimestep::new(vec![a, b])
    }

    #[test]
    fn split_state_divides_rate_by_dt() {
        let t = tstep();
        let layout = VectorLayout::from_timestep(&t, IntegrationOrder::Second).unwrap();
        let x = pack_state(&t, None, 0.25, IntegrationOrder::Second).unwrap();

        let blocks = layout.split_state(&x, 0.25).unwrap();
        assert_eq!(blocks.gamma.len(), 8);
        assert_eq!(blocks.gamma_star.len(), 11);
        assert!(blocks.gamma_dot.iter().take(6).all(|&v| (v - 0.5).abs() < 1e-15));
        assert!(blocks.gamma_prev.is_some());
    }

    #[test]
    fn split_state_rejects_wrong_length() {
        let t = tstep();
        let layout = VectorLayout::from_timestep(&t, IntegrationOrder::First).unwrap();
        let x = pack_state(&t, None, 0.1, IntegrationOrder::Second).unwrap();

        assert_eq!(
            layout.split_state(&x, 0.1).unwrap_err(),
            PackError::Dimension {
                what: "state vector",
                expected: 8 + 11 + 8,
                actual: 8 + 11 + 8 + 8,
            }
        );
    }

    #[test]
    fn unpack_restores_packed_fields() {
        let t = tstep();
        let layout = VectorLayout::from_timestep(&t, IntegrationOrder::Second).unwrap();
        let dt = 0.5;

        let y = pack_forces(&t);
        let x = pack_state(&t, None, dt, IntegrationOrder::Second).unwrap();
        let u = pack_input(&t);
        let step = unpack(&y, &x, &u, &t, &layout, dt).unwrap();

        assert_eq!(step.n_surf(), 2);
        for (i, surface) in t.surfaces.iter().enumerate() {
            assert_eq!(step.forces[i], surface.forces);
            assert_eq!(step.gamma[i], surface.gamma);
            assert_eq!(step.gamma_dot[i], surface.gamma_dot);
            assert_eq!(step.gamma_star[i], surface.gamma_star);
        }
    }

    #[test]
    fn unpack_rejects_surface_count_mismatch() {
        let t = tstep();
        let layout = VectorLayout::from_timestep(&t, IntegrationOrder::First).unwrap();
        let mut short = t.clone();
        short.surfaces.pop();

        let err = unpack(
            &pack_forces(&t),
            &pack_state(&t, None, 0.1, IntegrationOrder::First).unwrap(),
            &pack_input(&t),
            &short,
            &layout,
            0.1,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PackError::SurfaceCount {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn unpack_rejects_extra_output() {
        let t = tstep();
        let layout = VectorLayout::from_timestep(&t, IntegrationOrder::First).unwrap();
        let mut padded = pack_forces(&t).as_slice().to_vec();
        padded.push(0.0);
        let y = DVector::from_vec(padded);

        let err = unpack(
            &y,
            &pack_state(&t, None, 0.1, IntegrationOrder::First).unwrap(),
            &pack_input(&t),
            &t,
            &layout,
            0.1,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PackError::Dimension {
                what: "output vector",
                ..
            }
        ));
    }

    #[test]
    fn apply_to_overwrites_results() {
        let t = tstep();
        let layout = VectorLayout::from_timestep(&t, IntegrationOrder::First).unwrap();
        let step = unpack(
            &pack_forces(&t),
            &pack_state(&t, None, 0.1, IntegrationOrder::First).unwrap(),
            &pack_input(&t),
            &t,
            &layout,
            0.1,
        )
        .unwrap();

        let mut target = AeroTimestep::new(
            t.surfaces
                .iter()
                .map(|s| SurfaceSnapshot::zeros(s.dims()))
                .collect(),
        );
        step.apply_to(&mut target).unwrap();
        assert_eq!(target.surfaces[1].gamma, t.surfaces[1].gamma);
        assert_eq!(target.surfaces[0].forces, t.surfaces[0].forces);
    }

    #[test]
    fn unpack_input_recovers_vertex_fields() {
        let mut t = tstep();
        t.surfaces[1].zeta.set_vertex(1, 0, [1.0, 2.0, 3.0]);
        t.surfaces[0].u_ext.fill([25.0, 0.0, 1.0]);
        let layout = VectorLayout::from_timestep(&t, IntegrationOrder::First).unwrap();

        let fields = unpack_input(&pack_input(&t), &layout).unwrap();
        assert_eq!(fields.zeta[1], t.surfaces[1].zeta);
        assert_eq!(fields.u_ext[0], t.surfaces[0].u_ext);
        assert_eq!(fields.zeta_dot[0], t.surfaces[0].zeta_dot);
    }
}
