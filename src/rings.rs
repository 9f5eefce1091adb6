//! Ring radius profile of the Gaussian grid.
//!
//! The profile is the sequence of angular radii (in degrees from the dense
//! pole) at which point rings are placed, with the spacing between
//! consecutive rings growing from `phi_ini` near the pole to `phi_max` far
//! away under a Gaussian-shaped falloff. The whole candidate profile is
//! computed first and the boundary correction applied in one pass, so the
//! result is immutable from construction on.

use crate::grid::GridParameters;

/// Monotonically increasing ring radii `phi` with their spacings `dphi`,
/// capped at 90 degrees (dense antipole) or 180 degrees (single pole).
#[derive(Debug, Clone)]
pub struct RingProfile {
    phi: Vec<f64>,
    dphi: Vec<f64>,
}

impl RingProfile {
    /// Builds the profile for validated grid parameters.
    ///
    /// Spacings are sampled at `rings` latitudes evenly spaced on [0, 90]:
    /// `dphi = (phi_max - phi_ini) * (1 - exp(-(lat/sigma)^beta)) + phi_ini`.
    /// Radii accumulate until they cross the domain limit; the overshoot is
    /// then resolved by the edge correction (see [`RingProfile::correct_overshoot`]).
    pub fn build(params: &GridParameters) -> Self {
        let limit = if params.dense_antipole { 90.0 } else { 180.0 };
        let span = params.phi_max - params.phi_ini;
        let n = params.rings;

        let mut phi = Vec::with_capacity(n);
        let mut dphi = Vec::with_capacity(n);
        let mut total = 0.0;
        let mut overshoot = false;

        for i in 0..n {
            let lat = 90.0 * i as f64 / (n - 1) as f64;
            let step = span * (1.0 - (-(lat / params.sigma).powf(params.beta)).exp())
                + params.phi_ini;
            total += step;
            phi.push(total);
            dphi.push(step);
            if total > limit {
                overshoot = true;
                break;
            }
        }

        let mut profile = Self { phi, dphi };
        if overshoot {
            profile.correct_overshoot(limit, params.dense_antipole);
        }
        profile
    }

    /// Resolves a profile whose last ring crossed the domain limit.
    ///
    /// In dense-antipole mode, when the gap between the second-to-last ring
    /// and the limit is smaller than that ring's spacing, the final two
    /// rings are replaced by a single ring exactly at the limit; otherwise
    /// the overshooting ring is dropped. Single-pole mode always drops.
    /// The branch choice is a compatibility heuristic, not derived from
    /// spacing constraints.
    fn correct_overshoot(&mut self, limit: f64, dense_antipole: bool) {
        let k = self.phi.len() - 1;
        if dense_antipole && k >= 2 && limit - self.phi[k - 1] < self.dphi[k - 1] {
            let anchor = self.phi[k - 2];
            self.phi.truncate(k - 1);
            self.dphi.truncate(k - 1);
            self.phi.push(limit);
            self.dphi.push(limit - anchor);
        } else {
            self.phi.truncate(k);
            self.dphi.truncate(k);
        }
    }

    /// Ring radii in degrees from the dense pole.
    pub fn radii(&self) -> &[f64] {
        &self.phi
    }

    /// Spacing that produced each ring, in degrees.
    pub fn spacings(&self) -> &[f64] {
        &self.dphi
    }

    pub fn len(&self) -> usize {
        self.phi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phi.is_empty()
    }

    /// Smallest and largest ring spacing. Spacings increase monotonically,
    /// so these are the first and last entries.
    pub fn spacing_bounds(&self) -> (f64, f64) {
        (self.dphi[0], self.dphi[self.dphi.len() - 1])
    }
}
