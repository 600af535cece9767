//! # Atoll
//!
//! A small 2D computational-geometry toolkit for procedurally generating
//! organic shapes from random point sets.
//!
//! Atoll provides three independent building blocks:
//!
//! - **Blue-noise sampling** ([`sample`]): a Poisson-disk sampler that fills
//!   a rectangle with points no two of which are closer than a minimum
//!   distance, producing visually uniform, non-clumpy coverage.
//! - **Concave hulls** ([`hull`]): digs a convex hull inward along its
//!   longest edges so the boundary follows the true shape of a point cloud.
//! - **Dual-mesh navigation** ([`mesh`]): fast triangle / side / region
//!   topology queries over an externally computed triangulation, with a
//!   "ghost" layer that removes all boundary special cases.
//!
//! Convex hulls and Delaunay triangulations themselves are deliberately not
//! computed here; their outputs (ordered hull indices, flattened triangle
//! buffers) are consumed as inputs. A typical pipeline samples points, runs
//! them through an external convex hull or triangulation routine, and feeds
//! the result into [`hull::concave_hull`] or [`mesh::DualMesh`].
//!
//! All operations are synchronous, pure given their inputs, and validate
//! preconditions up front; randomness always comes from a caller-supplied,
//! seedable source so results are reproducible.
//!
//! ## Quick Start
//!
//! ```
//! use atoll::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Scatter blue-noise points over a rectangle.
//! let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let mut rng = StdRng::seed_from_u64(42);
//! let samples = poisson_disk(&bounds, &PoissonDiskOptions::new(10.0), &mut rng).unwrap();
//! assert!(!samples.is_empty());
//!
//! // Dig a concave hull from a point cloud and its (externally computed)
//! // convex hull.
//! use nalgebra::Point2;
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//!     Point2::new(5.0, 5.0),
//! ];
//! let hull = concave_hull(&points, &[0, 1, 2, 3], &ConcaveHullOptions::new(5.0)).unwrap();
//! assert!(hull.boundary.contains(&4));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod geom;
pub mod hull;
pub mod mesh;
pub mod sample;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use atoll::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{GeomError, Result};
    pub use crate::geom::Rect;
    pub use crate::hull::{concave_hull, ConcaveHull, ConcaveHullOptions, HullEdge};
    pub use crate::mesh::DualMesh;
    pub use crate::sample::{poisson_disk, PoissonDiskOptions};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sampled_cloud_feeds_the_hull_digger() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
        let mut rng = StdRng::seed_from_u64(1);
        let samples = poisson_disk(&bounds, &PoissonDiskOptions::new(15.0), &mut rng).unwrap();
        assert!(samples.len() > 4);

        // Stand in for the external convex hull step with the sampling
        // margin's corner rectangle, which contains every generated sample.
        let mut points: Vec<Point2<f64>> = samples;
        let corner = points.len();
        points.extend([
            Point2::new(5.0, 5.0),
            Point2::new(195.0, 5.0),
            Point2::new(195.0, 195.0),
            Point2::new(5.0, 195.0),
        ]);
        let convex = [corner, corner + 1, corner + 2, corner + 3];

        let hull = concave_hull(&points, &convex, &ConcaveHullOptions::new(20.0)).unwrap();
        assert!(hull.edges.len() >= 4);
        for edge in &hull.edges {
            assert!(edge.a < points.len() && edge.b < points.len());
        }
    }
}
