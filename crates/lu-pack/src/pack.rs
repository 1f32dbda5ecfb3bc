//! Grids to packed vectors.

use lu_core::IntegrationOrder;
use lu_grid::{AeroTimestep, GridError, SurfaceSnapshot, extend_row_major};
use nalgebra::DVector;
use rayon::prelude::*;

use crate::error::{PackError, PackResult};

/// Flatten one quantity of every surface and concatenate in surface order.
///
/// Surfaces are flattened in parallel; `collect` keeps index order.
fn concat_surfaces<F>(surfaces: &[SurfaceSnapshot], flatten: F) -> Vec<f64>
where
    F: Fn(&SurfaceSnapshot, &mut Vec<f64>) + Sync,
{
    let parts: Vec<Vec<f64>> = surfaces
        .par_iter()
        .map(|surface| {
            let mut part = Vec::new();
            flatten(surface, &mut part);
            part
        })
        .collect();
    parts.concat()
}

/// Input vector `u = [zeta, zeta_dot, u_ext]`.
///
/// Each block holds every surface in index order.
pub fn pack_input(tstep: &AeroTimestep) -> DVector<f64> {
    let surfaces = &tstep.surfaces;
    let zeta = concat_surfaces(surfaces, |s, out| s.zeta.extend_row_major(out));
    let zeta_dot = concat_surfaces(surfaces, |s, out| s.zeta_dot.extend_row_major(out));
    let u_ext = concat_surfaces(surfaces, |s, out| s.u_ext.extend_row_major(out));

    let mut u = Vec::with_capacity(zeta.len() + zeta_dot.len() + u_ext.len());
    u.extend(zeta);
    u.extend(zeta_dot);
    u.extend(u_ext);
    DVector::from_vec(u)
}

/// State vector `x = [gamma, gamma_star, dt * gamma_dot, gamma_prev]`.
///
/// `gamma_prev` exists only for second order. It is read from `previous` when
/// given, otherwise estimated as `gamma - dt * gamma_dot`.
pub fn pack_state(
    current: &AeroTimestep,
    previous: Option<&AeroTimestep>,
    dt: f64,
    order: IntegrationOrder,
) -> PackResult<DVector<f64>> {
    let surfaces = &current.surfaces;
    let gamma = concat_surfaces(surfaces, |s, out| extend_row_major(&s.gamma, out));
    let gamma_star = concat_surfaces(surfaces, |s, out| extend_row_major(&s.gamma_star, out));
    let gamma_dot = concat_surfaces(surfaces, |s, out| extend_row_major(&s.gamma_dot, out));

    if gamma_dot.len() != gamma.len() {
        return Err(PackError::Dimension {
            what: "gamma_dot",
            expected: gamma.len(),
            actual: gamma_dot.len(),
        });
    }

    let gamma_prev = match (order, previous) {
        (IntegrationOrder::First, _) => Vec::new(),
        (IntegrationOrder::Second, Some(previous)) => {
            check_previous(current, previous)?;
            concat_surfaces(&previous.surfaces, |s, out| extend_row_major(&s.gamma, out))
        }
        (IntegrationOrder::Second, None) => gamma
            .iter()
            .zip(&gamma_dot)
            .map(|(g, g_dot)| g - dt * g_dot)
            .collect(),
    };

    let mut x =
        Vec::with_capacity(2 * gamma.len() + gamma_star.len() + gamma_prev.len());
    x.extend_from_slice(&gamma);
    x.extend(gamma_star);
    x.extend(gamma_dot.iter().map(|g_dot| dt * g_dot));
    x.extend(gamma_prev);
    Ok(DVector::from_vec(x))
}

/// Output vector `y`: force rows 0..3 of every surface.
pub fn pack_forces(tstep: &AeroTimestep) -> DVector<f64> {
    DVector::from_vec(concat_surfaces(&tstep.surfaces, |s, out| {
        s.forces.extend_force_rows(out)
    }))
}

fn check_previous(current: &AeroTimestep, previous: &AeroTimestep) -> PackResult<()> {
    if previous.n_surf() != current.n_surf() {
        return Err(PackError::SurfaceCount {
            expected: current.n_surf(),
            actual: previous.n_surf(),
        });
    }
    for (i, (cur, prev)) in current.surfaces.iter().zip(&previous.surfaces).enumerate() {
        if cur.gamma.shape() != prev.gamma.shape() {
            return Err(GridError::ShapeMismatch {
                surface: i,
                field: "gamma",
                expected: cur.gamma.shape(),
                actual: prev.gamma.shape(),
            }
            .into());
        }
    }
    Ok(())
}
