//! Finite-difference order used for the bound circulation rate.

use crate::error::LuError;

/// Order of the backward difference closing the circulation rate.
///
/// First order: `dG/dt = (G[n+1] - G[n]) / dt`.
/// Second order: `dG/dt = (3 G[n+1] - 4 G[n] + G[n-1]) / (2 dt)`, which adds the
/// previous-step circulation to the state vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum IntegrationOrder {
    First,
    #[default]
    Second,
}

impl IntegrationOrder {
    /// Whether the state vector carries the previous-step circulation block.
    pub fn carries_previous_gamma(self) -> bool {
        matches!(self, IntegrationOrder::Second)
    }

    pub fn as_u8(self) -> u8 {
        match self {
            IntegrationOrder::First => 1,
            IntegrationOrder::Second => 2,
        }
    }
}

impl TryFrom<u8> for IntegrationOrder {
    type Error = LuError;

    fn try_from(order: u8) -> Result<Self, Self::Error> {
        match order {
            1 => Ok(IntegrationOrder::First),
            2 => Ok(IntegrationOrder::Second),
            order => Err(LuError::UnsupportedOrder { order }),
        }
    }
}

impl From<IntegrationOrder> for u8 {
    fn from(order: IntegrationOrder) -> Self {
        order.as_u8()
    }
}

impl std::fmt::Display for IntegrationOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
