//! Retained timestep history.
//!
//! The history is append-only: the external driver calls [`AeroHistory::add_timestep`]
//! before each step, and the step solver overwrites result fields of the
//! current entry only.

use crate::error::{GridError, GridResult};
use crate::timestep::AeroTimestep;

/// Ordered sequence of timesteps; never empty.
#[derive(Debug, Clone)]
pub struct AeroHistory {
    steps: Vec<AeroTimestep>,
    /// Maximum retained entries (at least two), `None` keeps everything.
    keep: Option<usize>,
}

impl AeroHistory {
    /// Start a history from the initial timestep.
    pub fn new(initial: AeroTimestep) -> GridResult<Self> {
        initial.validate()?;
        Ok(Self {
            steps: vec![initial],
            keep: None,
        })
    }

    /// Bound the number of retained entries. Values below two are raised to two,
    /// the depth the finite-difference closures need.
    pub fn with_retention(mut self, keep: usize) -> Self {
        self.keep = Some(keep.max(2));
        self.trim();
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Timestep `n` (the last entry).
    pub fn current(&self) -> &AeroTimestep {
        // steps is never empty by construction
        &self.steps[self.steps.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut AeroTimestep {
        let last = self.steps.len() - 1;
        &mut self.steps[last]
    }

    /// Timestep `n-1`, if retained.
    pub fn previous(&self) -> Option<&AeroTimestep> {
        self.steps.len().checked_sub(2).map(|i| &self.steps[i])
    }

    /// Mutable current entry alongside the read-only previous one.
    pub fn split_current_mut(&mut self) -> (&mut AeroTimestep, Option<&AeroTimestep>) {
        let last = self.steps.len() - 1;
        let (rest, current) = self.steps.split_at_mut(last);
        (&mut current[0], rest.last())
    }

    /// Append a copy of the current timestep with the step index advanced.
    pub fn add_timestep(&mut self) -> &mut AeroTimestep {
        let mut next = self.current().clone();
        next.ts += 1;
        self.steps.push(next);
        self.trim();
        self.current_mut()
    }

    /// Append an externally built timestep. It must have the current surface layout.
    pub fn push(&mut self, tstep: AeroTimestep) -> GridResult<()> {
        let dims = self.current().dims();
        if tstep.n_surf() != dims.len() {
            return Err(GridError::SurfaceCount {
                expected: dims.len(),
                actual: tstep.n_surf(),
            });
        }
        for (i, (surface, d)) in tstep.surfaces.iter().zip(&dims).enumerate() {
            surface.validate_against(i, d)?;
        }
        self.steps.push(tstep);
        self.trim();
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AeroTimestep> {
        self.steps.iter()
    }

    fn trim(&mut self) {
        if let Some(keep) = self.keep {
            if self.steps.len() > keep {
                let excess = self.steps.len() - keep;
                self.steps.drain(..excess);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{SurfaceDims, SurfaceSnapshot};

    fn tstep() -> AeroTimestep {
        AeroTimestep::new(vec![SurfaceSnapshot::zeros(SurfaceDims::new(
            (2, 2),
            (2, 2),
            (1, 2),
        ))])
    }

    #[test]
    fn new_history_has_no_previous() {
        let history = AeroHistory::new(tstep()).unwrap();
        assert_eq!(history.len(), 1);
        assert!(history.previous().is_none());
    }

    #[test]
    fn add_timestep_copies_current() {
        let mut history = AeroHistory::new(tstep()).unwrap();
        history.current_mut().surfaces[0].gamma[(0, 0)] = 3.0;

        let next = history.add_timestep();
        assert_eq!(next.ts, 1);
        assert_eq!(next.surfaces[0].gamma[(0, 0)], 3.0);

        next.surfaces[0].gamma[(0, 0)] = 5.0;
        let prev = history.previous().unwrap();
        assert_eq!(prev.surfaces[0].gamma[(0, 0)], 3.0);
    }

    #[test]
    fn retention_keeps_last_two_at_least() {
        let mut history = AeroHistory::new(tstep()).unwrap().with_retention(0);
        for _ in 0..5 {
            history.add_timestep();
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.current().ts, 5);
        assert_eq!(history.previous().unwrap().ts, 4);
    }

    #[test]
    fn split_current_mut_exposes_previous() {
        let mut history = AeroHistory::new(tstep()).unwrap();
        history.add_timestep();
        let (current, previous) = history.split_current_mut();
        current.surfaces[0].gamma[(1, 1)] = 2.0;
        assert_eq!(previous.unwrap().surfaces[0].gamma[(1, 1)], 0.0);
    }

    #[test]
    fn push_rejects_other_layout() {
        let mut history = AeroHistory::new(tstep()).unwrap();
        let other = AeroTimestep::new(vec![SurfaceSnapshot::zeros(SurfaceDims::new(
            (3, 2),
            (2, 2),
            (1, 2),
        ))]);
        assert!(matches!(
            history.push(other),
            Err(GridError::ShapeMismatch { field: "zeta", .. })
        ));
    }
}
