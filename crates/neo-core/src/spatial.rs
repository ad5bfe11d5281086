//! Log-scaled radial placement around the Earth model.
//!
//! Miss distances span several orders of magnitude, so the radial
//! magnitude is `log10(max(d, 1)) * DISTANCE_SCALE` to keep the scene
//! visually bounded. The direction carries no semantic meaning; it is
//! sampled uniformly on the unit sphere purely to avoid visual
//! overlap, with the random source injected so tests can seed it.

use rand::rngs::ThreadRng;
use rand::Rng;
use std::f64::consts::TAU;

use crate::record::ValidatedRecord;

/// Scale constant applied to the log10 of the miss distance.
pub const DISTANCE_SCALE: f64 = 4.0;

/// Baseline mesh radius in scene units.
pub const BASE_VISUAL_RADIUS: f64 = 0.3;
const MIN_VISUAL_RADIUS: f64 = 0.15;
const MAX_VISUAL_RADIUS: f64 = 0.9;

/// Position in scene units. Owned by the scene view; recomputed on
/// every reload, never cached across reloads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatialPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SpatialPosition {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Deterministic radial magnitude for a miss distance in kilometers.
/// The `max(d, 1)` guard keeps the logarithm's argument positive even
/// though validation already excludes non-positive distances.
pub fn radial_distance(miss_distance_km: f64) -> f64 {
    miss_distance_km.max(1.0).log10() * DISTANCE_SCALE
}

/// Mesh radius scaled by the object's physical diameter, log-scaled
/// and clamped so a multi-kilometer body reads larger than a
/// house-sized one without dwarfing the scene.
pub fn visual_radius(diameter_km: f64) -> f64 {
    let scaled = BASE_VISUAL_RADIUS * (1.0 + 2.0 * (1.0 + diameter_km.max(0.0)).log10());
    scaled.clamp(MIN_VISUAL_RADIUS, MAX_VISUAL_RADIUS)
}

/// Maps validated records into scene space using an owned random
/// source for angular placement.
pub struct SpatialMapper<R: Rng> {
    rng: R,
}

impl SpatialMapper<ThreadRng> {
    /// Mapper backed by the thread-local generator, for production
    /// render paths where reproducibility of angles is not required.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> SpatialMapper<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform direction on the unit sphere via the inverse-transform
    /// method: `theta = U1 * 2pi`, `phi = acos(2*U2 - 1)`. Sampling
    /// `phi` uniformly instead would pile mass onto the poles.
    pub fn unit_direction(&mut self) -> [f64; 3] {
        let theta = self.rng.gen::<f64>() * TAU;
        let phi = (2.0 * self.rng.gen::<f64>() - 1.0).acos();
        [
            phi.sin() * theta.cos(),
            phi.sin() * theta.sin(),
            phi.cos(),
        ]
    }

    pub fn compute_position(&mut self, record: &ValidatedRecord) -> SpatialPosition {
        let distance = radial_distance(record.miss_distance_km);
        let [ux, uy, uz] = self.unit_direction();
        SpatialPosition {
            x: distance * ux,
            y: distance * uy,
            z: distance * uz,
        }
    }
}
