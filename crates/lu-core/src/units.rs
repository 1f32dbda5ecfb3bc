// lu-core/src/units.rs

use uom::si::f64::{
    Length as UomLength, MassDensity as UomMassDensity, Time as UomTime,
    Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Length = UomLength;
pub type Time = UomTime;
pub type Velocity = UomVelocity;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

pub mod constants {
    use super::*;

    /// Sea-level ISA air density.
    pub const RHO_SEA_LEVEL_KGPM3: f64 = 1.225;

    #[inline]
    pub fn rho_sea_level() -> Density {
        kgpm3(RHO_SEA_LEVEL_KGPM3)
    }
}
