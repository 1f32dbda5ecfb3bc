//! Pack/unpack properties over random multi-surface layouts.

use lu_core::IntegrationOrder;
use lu_grid::{AeroTimestep, SurfaceDims, SurfaceSnapshot};
use lu_pack::{
    PackError, VectorLayout, pack_forces, pack_input, pack_state, unpack, unpack_input,
};
use nalgebra::DMatrix;
use proptest::prelude::*;

/// Fill every field of a surface from a deterministic seed.
fn filled_surface(dims: SurfaceDims, seed: f64) -> SurfaceSnapshot {
    let mut s = SurfaceSnapshot::zeros(dims);
    let (vr, vc) = dims.vertices;
    for i in 0..vr {
        for j in 0..vc {
            let base = seed + (i * vc + j) as f64;
            s.zeta.set_vertex(i, j, [base, base + 0.1, base + 0.2]);
            s.zeta_dot.set_vertex(i, j, [-base, 0.5 * base, 1.0]);
            s.u_ext.set_vertex(i, j, [10.0 + base, 0.0, -base]);
            s.forces.set_vertex(i, j, [base, 2.0 * base, 3.0 * base, 0.0, 0.0, 0.0]);
        }
    }
    s.gamma = DMatrix::from_fn(dims.bound.0, dims.bound.1, |i, j| seed * (i + 2 * j + 1) as f64);
    s.gamma_dot = DMatrix::from_fn(dims.bound.0, dims.bound.1, |i, j| (i as f64) - (j as f64));
    s.gamma_star = DMatrix::from_fn(dims.wake.0, dims.wake.1, |i, j| seed - (i * j) as f64);
    s
}

fn dims_strategy() -> impl Strategy<Value = SurfaceDims> {
    (1usize..4, 1usize..5, 1usize..4).prop_map(|(rows, cols, wake_rows)| {
        SurfaceDims::new((rows + 1, cols + 1), (rows, cols), (wake_rows, cols))
    })
}

fn order_strategy() -> impl Strategy<Value = IntegrationOrder> {
    prop_oneof![Just(IntegrationOrder::First), Just(IntegrationOrder::Second)]
}

proptest! {
    #[test]
    fn pack_then_unpack_is_identity(
        dims in prop::collection::vec(dims_strategy(), 1..4),
        order in order_strategy(),
        dt in 0.01_f64..1.0,
    ) {
        let surfaces: Vec<_> = dims
            .iter()
            .enumerate()
            .map(|(i, d)| filled_surface(*d, 1.0 + i as f64))
            .collect();
        let tstep = AeroTimestep::new(surfaces);
        let layout = VectorLayout::from_timestep(&tstep, order).unwrap();

        let y = pack_forces(&tstep);
        let x = pack_state(&tstep, None, dt, order).unwrap();
        let u = pack_input(&tstep);

        // element-count conservation
        prop_assert_eq!(y.len(), layout.output_len());
        prop_assert_eq!(x.len(), layout.state_len());
        prop_assert_eq!(u.len(), layout.input_len());
        let vertex_sum: usize = dims.iter().map(SurfaceDims::vertex_values).sum();
        prop_assert_eq!(u.len(), 3 * vertex_sum);

        let step = unpack(&y, &x, &u, &tstep, &layout, dt).unwrap();
        let inputs = unpack_input(&u, &layout).unwrap();
        for (i, surface) in tstep.surfaces.iter().enumerate() {
            prop_assert_eq!(&step.forces[i], &surface.forces);
            prop_assert_eq!(&step.gamma[i], &surface.gamma);
            prop_assert_eq!(&step.gamma_star[i], &surface.gamma_star);
            // dt * g / dt is not always bit-exact
            for (a, b) in step.gamma_dot[i].iter().zip(surface.gamma_dot.iter()) {
                prop_assert!((a - b).abs() <= 1e-12 * b.abs().max(1.0));
            }
            prop_assert_eq!(&inputs.zeta[i], &surface.zeta);
            prop_assert_eq!(&inputs.zeta_dot[i], &surface.zeta_dot);
            prop_assert_eq!(&inputs.u_ext[i], &surface.u_ext);
        }
    }

    #[test]
    fn state_length_follows_order(
        dims in prop::collection::vec(dims_strategy(), 1..4),
    ) {
        let tstep = AeroTimestep::new(dims.iter().map(|d| SurfaceSnapshot::zeros(*d)).collect());
        let k: usize = dims.iter().map(SurfaceDims::bound_panels).sum();
        let k_star: usize = dims.iter().map(SurfaceDims::wake_panels).sum();

        let first = pack_state(&tstep, None, 0.1, IntegrationOrder::First).unwrap();
        let second = pack_state(&tstep, None, 0.1, IntegrationOrder::Second).unwrap();
        prop_assert_eq!(first.len(), 2 * k + k_star);
        prop_assert_eq!(second.len(), 3 * k + k_star);
    }
}

#[test]
fn concrete_single_panel_state() {
    let mut surface = SurfaceSnapshot::zeros(SurfaceDims::new((2, 2), (2, 2), (1, 2)));
    surface.gamma = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    let tstep = AeroTimestep::new(vec![surface]);

    let x = pack_state(&tstep, None, 0.1, IntegrationOrder::Second).unwrap();

    assert_eq!(x.len(), 14);
    assert_eq!(x.as_slice()[10..], [1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn surfaces_keep_their_index() {
    let d = SurfaceDims::new((2, 2), (1, 1), (1, 1));
    let tstep = AeroTimestep::new(vec![filled_surface(d, 1.0), filled_surface(d, 100.0)]);
    let layout = VectorLayout::from_timestep(&tstep, IntegrationOrder::First).unwrap();

    let step = unpack(
        &pack_forces(&tstep),
        &pack_state(&tstep, None, 0.1, IntegrationOrder::First).unwrap(),
        &pack_input(&tstep),
        &tstep,
        &layout,
        0.1,
    )
    .unwrap();

    assert_eq!(step.gamma[0][(0, 0)], 1.0);
    assert_eq!(step.gamma[1][(0, 0)], 100.0);
}

#[test]
fn reordered_surfaces_are_rejected() {
    let a = SurfaceDims::new((2, 3), (1, 2), (2, 2));
    let b = SurfaceDims::new((3, 3), (2, 2), (1, 2));
    let tstep = AeroTimestep::new(vec![filled_surface(a, 1.0), filled_surface(b, 2.0)]);
    let layout = VectorLayout::from_timestep(&tstep, IntegrationOrder::First).unwrap();

    let mut reordered = tstep.clone();
    reordered.surfaces.swap(0, 1);

    let err = unpack(
        &pack_forces(&tstep),
        &pack_state(&tstep, None, 0.1, IntegrationOrder::First).unwrap(),
        &pack_input(&tstep),
        &reordered,
        &layout,
        0.1,
    )
    .unwrap_err();
    assert!(matches!(err, PackError::Grid(_)));
}
