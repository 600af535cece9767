//! Poisson-disk (blue noise) sampling.
//!
//! Produces a spatially well-distributed set of 2D points inside a
//! rectangular region using Bridson-style dart throwing: an active list of
//! accepted points spawns candidates on an annulus `[r, 2r)` around itself,
//! and a candidate survives only if it keeps at least the minimum distance to
//! every point accepted so far.
//!
//! The validity check scans every accepted sample, so generation cost grows
//! roughly quadratically with the sample count; no spatial acceleration
//! structure is used.

use nalgebra::Point2;
use rand::Rng;

use crate::error::{GeomError, Result};
use crate::geom::Rect;

/// Fixed margin, in world units, by which the sampling region is shrunk so
/// that no sample lands flush against the bounds.
pub const BOUNDS_MARGIN: f64 = 10.0;

/// Options for Poisson-disk sampling.
#[derive(Debug, Clone)]
pub struct PoissonDiskOptions {
    /// Minimum distance between any two samples (the disk radius).
    pub min_distance: f64,

    /// Number of candidate placements tried per active point before that
    /// point is retired.
    pub max_attempts: usize,

    /// Number of intervals per bounds edge to pre-seed with evenly spaced
    /// boundary points. Zero disables boundary seeding.
    pub boundary_samples: usize,
}

impl Default for PoissonDiskOptions {
    fn default() -> Self {
        Self {
            min_distance: 10.0,
            max_attempts: 30,
            boundary_samples: 0,
        }
    }
}

impl PoissonDiskOptions {
    /// Create options with the specified minimum distance.
    pub fn new(min_distance: f64) -> Self {
        Self {
            min_distance,
            ..Default::default()
        }
    }

    /// Set the number of candidate attempts per active point.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the number of boundary seeding intervals per edge.
    pub fn with_boundary_samples(mut self, intervals: usize) -> Self {
        self.boundary_samples = intervals;
        self
    }
}

/// Generate a blue-noise point set inside `bounds`.
///
/// If boundary seeding is enabled, the result starts with evenly spaced
/// points along all four edges of `bounds` (corners included); these seeds
/// participate in the exclusion-radius test for generated points but are
/// themselves exempt from the final duplicate sweep. Generated samples are
/// confined to `bounds` shrunk by [`BOUNDS_MARGIN`] and appear in acceptance
/// order. The same seed and parameters always produce the same sequence.
///
/// # Errors
///
/// Fails with [`GeomError::InvalidArgument`] if `bounds` has a non-positive
/// extent, `min_distance` is not positive, or `max_attempts` is zero.
///
/// # Example
///
/// ```
/// use atoll::geom::Rect;
/// use atoll::sample::{poisson_disk, PoissonDiskOptions};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
/// let mut rng = StdRng::seed_from_u64(7);
/// let samples = poisson_disk(&bounds, &PoissonDiskOptions::default(), &mut rng).unwrap();
/// assert!(!samples.is_empty());
/// ```
pub fn poisson_disk<R: Rng + ?Sized>(
    bounds: &Rect,
    options: &PoissonDiskOptions,
    rng: &mut R,
) -> Result<Vec<Point2<f64>>> {
    if bounds.is_empty() {
        return Err(GeomError::invalid_arg(
            "bounds",
            format!("{}x{}", bounds.width, bounds.height),
            "width and height must be positive",
        ));
    }
    if options.min_distance <= 0.0 {
        return Err(GeomError::invalid_arg(
            "min_distance",
            options.min_distance,
            "must be positive",
        ));
    }
    if options.max_attempts == 0 {
        return Err(GeomError::invalid_arg(
            "max_attempts",
            options.max_attempts,
            "must be at least 1",
        ));
    }

    let mut samples = Vec::new();
    if options.boundary_samples > 0 {
        seed_boundary(bounds, options.boundary_samples, &mut samples);
    }
    let boundary_count = samples.len();

    let interior = bounds.shrunk(BOUNDS_MARGIN);
    if interior.is_empty() {
        // Nothing can be placed without violating the margin.
        return Ok(samples);
    }

    let seed = Point2::new(
        interior.x + rng.random_range(0.0..interior.width),
        interior.y + rng.random_range(0.0..interior.height),
    );
    samples.push(seed);

    // Active list of indices into `samples` still spawning candidates.
    let mut active: Vec<usize> = vec![boundary_count];
    while !active.is_empty() {
        let last = active.len() - 1;
        let slot = rng.random_range(0..active.len());
        active.swap(slot, last);
        let current = samples[active[last]];

        let mut created = false;
        for _ in 0..options.max_attempts {
            let theta = rng.random_range(0.0..360.0_f64).to_radians();
            let radius = options.min_distance + rng.random_range(0.0..options.min_distance);
            let candidate = Point2::new(
                current.x + radius * theta.cos(),
                current.y + radius * theta.sin(),
            );

            let clear = samples
                .iter()
                .all(|s| (candidate - s).norm() > options.min_distance);
            if clear && interior.contains(&candidate) {
                samples.push(candidate);
                active.push(samples.len() - 1);
                created = true;
            }
        }

        if !created {
            active.pop();
        }
    }

    remove_exact_duplicates(&mut samples, boundary_count);
    Ok(samples)
}

/// Push evenly spaced seed points along all four edges of `bounds`.
///
/// Bottom and top edges get `intervals + 1` stations each (both corners
/// included); left and right edges get `intervals` stations each, skipping
/// the top corners already covered by the vertical sweep.
fn seed_boundary(bounds: &Rect, intervals: usize, samples: &mut Vec<Point2<f64>>) {
    let interval_width = bounds.width / intervals as f64;
    for i in 0..=intervals {
        let x = bounds.x + i as f64 * interval_width;
        samples.push(Point2::new(x, bounds.y));
        samples.push(Point2::new(x, bounds.top()));
    }
    let interval_height = bounds.height / intervals as f64;
    for i in 0..intervals {
        let y = bounds.y + i as f64 * interval_height;
        samples.push(Point2::new(bounds.x, y));
        samples.push(Point2::new(bounds.right(), y));
    }
}

/// Drop samples past `exempt_prefix` that exactly equal any other sample.
///
/// The exclusion-radius test makes duplicates impossible in principle; this
/// sweep enforces the no-duplicates contract regardless.
fn remove_exact_duplicates(samples: &mut Vec<Point2<f64>>, exempt_prefix: usize) {
    let mut i = samples.len();
    while i > exempt_prefix {
        i -= 1;
        let p = samples[i];
        let duplicate = samples.iter().enumerate().any(|(j, q)| j != i && *q == p);
        if duplicate {
            samples.remove(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_square(seed: u64, options: &PoissonDiskOptions) -> Vec<Point2<f64>> {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut rng = StdRng::seed_from_u64(seed);
        poisson_disk(&bounds, options, &mut rng).unwrap()
    }

    #[test]
    fn test_rejects_empty_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let options = PoissonDiskOptions::default();
        let result = poisson_disk(&Rect::new(0.0, 0.0, 0.0, 100.0), &options, &mut rng);
        assert!(result.is_err());
        let result = poisson_disk(&Rect::new(0.0, 0.0, 100.0, -5.0), &options, &mut rng);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_bad_options() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(poisson_disk(&bounds, &PoissonDiskOptions::new(0.0), &mut rng).is_err());
        assert!(poisson_disk(&bounds, &PoissonDiskOptions::new(-2.0), &mut rng).is_err());
        let no_attempts = PoissonDiskOptions::default().with_max_attempts(0);
        assert!(poisson_disk(&bounds, &no_attempts, &mut rng).is_err());
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let options = PoissonDiskOptions::default();
        let a = sample_square(42, &options);
        let b = sample_square(42, &options);
        assert_eq!(a, b);
    }

    #[test]
    fn test_minimum_spacing_and_containment() {
        let options = PoissonDiskOptions::new(10.0);
        let samples = sample_square(7, &options);
        assert!(!samples.is_empty());

        let interior = Rect::new(0.0, 0.0, 100.0, 100.0).shrunk(BOUNDS_MARGIN);
        for p in &samples {
            assert!(interior.contains(p), "sample {:?} outside margin", p);
        }
        for i in 0..samples.len() {
            for j in (i + 1)..samples.len() {
                let d = (samples[i] - samples[j]).norm();
                assert!(d >= 10.0, "samples {} and {} are {} apart", i, j, d);
            }
        }
    }

    #[test]
    fn test_no_exact_duplicates() {
        let options = PoissonDiskOptions::new(5.0);
        let samples = sample_square(99, &options);
        for i in 0..samples.len() {
            for j in (i + 1)..samples.len() {
                assert_ne!(samples[i], samples[j]);
            }
        }
    }

    #[test]
    fn test_boundary_seeding_layout() {
        let options = PoissonDiskOptions::new(10.0).with_boundary_samples(2);
        let samples = sample_square(3, &options);

        // 2 intervals: 3 stations on bottom/top, 2 on left/right, interleaved
        // in edge-walk order. The corner stations repeat by construction.
        let expected = [
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 100.0),
            Point2::new(50.0, 0.0),
            Point2::new(50.0, 100.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 100.0),
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(0.0, 50.0),
            Point2::new(100.0, 50.0),
        ];
        assert!(samples.len() > expected.len());
        assert_eq!(&samples[..expected.len()], &expected[..]);
    }

    #[test]
    fn test_boundary_seeds_keep_generated_points_away() {
        let options = PoissonDiskOptions::new(10.0).with_boundary_samples(4);
        let samples = sample_square(11, &options);
        let boundary_count = 2 * (4 + 1) + 2 * 4;
        let (boundary, generated) = samples.split_at(boundary_count);
        for p in generated {
            for b in boundary {
                assert!((p - b).norm() > 10.0);
            }
        }
    }

    #[test]
    fn test_degenerate_interior_yields_only_boundary_seeds() {
        let bounds = Rect::new(0.0, 0.0, 15.0, 15.0);
        let mut rng = StdRng::seed_from_u64(5);
        let options = PoissonDiskOptions::new(2.0);
        assert!(poisson_disk(&bounds, &options, &mut rng).unwrap().is_empty());

        let seeded = options.with_boundary_samples(1);
        let samples = poisson_disk(&bounds, &seeded, &mut rng).unwrap();
        assert_eq!(samples.len(), 2 * 2 + 2 * 1);
    }

    #[test]
    fn test_hundred_by_hundred_scenario() {
        // 100x100 bounds at radius 10 saturates to a stable count band.
        let options = PoissonDiskOptions::new(10.0);
        let samples = sample_square(12345, &options);
        assert!(
            (40..=90).contains(&samples.len()),
            "unexpected sample count {}",
            samples.len()
        );
        for i in 0..samples.len() {
            for j in (i + 1)..samples.len() {
                assert!((samples[i] - samples[j]).norm() >= 10.0);
            }
        }
    }
}
